//! Importable prompt strings that translate compressed field names back to
//! human-readable descriptions. Inject these into LLM prompts so the model
//! can interpret the abbreviated output.

/// Abbreviated getstats report type and field keys and their meanings.
pub const STATS_FIELDS: &str = "\u{394}=delta(change since last sample, omitted when 0) G=gauge(snapshot, omitted when 0/null) S=sparse(only present when non-zero)\n\
Report types: out_v=outbound video out_a=outbound audio in_a=inbound audio in_v=inbound video rtt=remote-inbound RTT cp=candidate pair(active or relay) cq=connection quality(SFU) ms=media source video\n\
Fields: bs=bytesSent(\u{394}) hbs=headerBytesSent(\u{394}) ps=packetsSent(\u{394}) br=bytesReceived(\u{394}) hbr=headerBytesReceived(\u{394}) pr=packetsReceived(\u{394}) fe=framesEncoded(\u{394}) fd=framesDecoded(\u{394}) fr=framesReceived(\u{394}) fps=framesPerSecond(G) f=frames(\u{394}) fam=framesAssembledFromMultiplePackets(\u{394}) qp=qpSum(\u{394}) j=jitter(G,sec) al=audioLevel(G,0-1) tae=totalAudioEnergy(\u{394}) tsd=totalSamplesDuration(\u{394},sec) tsr=totalSamplesReceived(\u{394}) cs=concealedSamples(\u{394}S) ce=concealmentEvents(\u{394}S) rsa=removedSamplesForAcceleration(\u{394}S) scs=silentConcealedSamples(\u{394}S) tet=totalEncodeTime(\u{394},sec) tebt=totalEncodedBytesTarget(\u{394}) tdt=totalDecodeTime(\u{394},sec) tifd=totalInterFrameDelay(\u{394},sec) tsid=totalSquaredInterFrameDelay(\u{394}) tat=totalAssemblyTime(\u{394},sec) tpd=totalProcessingDelay(\u{394},sec) jbd=jitterBufferDelay(\u{394}) jbe=jitterBufferEmittedCount(\u{394}) jbm=jitterBufferMinimumDelay(\u{394}) jbt=jitterBufferTargetDelay(\u{394}) pl=packetsLost(\u{394}S) pd=packetsDiscarded(\u{394}S) nk=nackCount(\u{394}S) kfd=keyFramesDecoded(\u{394}S) pli=pliCount(\u{394}S) hfs=hugeFramesSent(\u{394}S) fzc=freezeCount(\u{394}S) fzd=totalFreezesDuration(\u{394}S,sec) fdr=framesDropped(\u{394}S) rtt=roundTripTime(G,sec) trtt=totalRoundTripTime(\u{394}) rttm=roundTripTimeMeasurements(\u{394}) rr=responsesReceived(\u{394}) rts=remoteTimestamp(G) s=score(G,0-100) as=avgScore(G) mos=mosScore(G,1-5)";

/// Abbreviated connection event payload keys and their meanings.
pub const EVENT_FIELDS: &str = "Fields: did=deviceId gid=groupId k=kind w=width h=height en=enabled mu=muted rs=readyState sid=sessionId uid=userId tt=trackType(1=audio,2=video) dir=direction pt=peerType(0=pub,1=sub) mid=mediaLineId mli=sdpMLineIndex ok=success(1/0) errc=errorCode err=errorMsg t=type n=count eoc=endOfCandidates fr=fastReconnect(1/0) cap=capabilities bp=bundlePolicy st=permissionState(g/p/d) hl=hasDeviceLabels(1/0) agc=autoGainControl ns=noiseSuppression ec=echoCancellation\n\
Kinds: a=audio v=video | Devices: ai=audioinput vi=videoinput ao=audiooutput\n\
States(int): signaling(stable=0,have-local-offer=1,have-remote-offer=2,have-local-pranswer=3,have-remote-pranswer=4,closed=5) iceConn(new=0,checking=1,connected=2,completed=3,failed=4,disconnected=5,closed=6) iceGather(new=0,gathering=1,complete=2) conn(new=0,connecting=1,connected=2,disconnected=3,failed=4,closed=5)";

/// Abbreviated SDP digest (sdp_sum) keys and their meanings.
pub const SDP_DIGEST_FIELDS: &str = "sdp_sum fields: type=offer|answer sdp_hash=sha256prefix bundle_mids=bundledMediaLineIds mid=mediaLineId kind=audio|video|application dir=sendrecv|sendonly|recvonly|inactive rejected=portIsZero codecs=orderedCodecNames sim_rids=simulcastRIDCount tcc=transportWideCCEnabled";

/// Scope string conventions.
pub const SCOPE_REFERENCE: &str = "Scopes: 0-pub=publisher 0-sub=subscriber sfu:<region>=SFU";

/// Adaptive sampling markers in the output.
pub const SAMPLING_REFERENCE: &str = "Sampling: When adaptive sampling is enabled, getstats events are thinned to every Nth sample. Full resolution is preserved around interesting moments (packet loss, freeze, FPS/jitter/RTT changes). Category value \"=\"=unchanged since last emitted sample (steady-state suppression). Counter deltas in sampled output are accumulated over skipped samples so totals remain correct.";

/// All field references combined into one prompt block.
pub fn full_reference() -> String {
    [
        STATS_FIELDS,
        EVENT_FIELDS,
        SDP_DIGEST_FIELDS,
        SCOPE_REFERENCE,
        SAMPLING_REFERENCE,
    ]
    .join("\n")
}
