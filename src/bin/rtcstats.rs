use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use rtcstats::{human_bytes, process_file, Options, SamplingConfig, TimestampMode};

#[derive(Parser)]
#[command(name = "rtcstats")]
#[command(version)]
#[command(about = "Compresses WebRTC event logs for LLM analysis", long_about = None)]
struct Cli {
    /// Input file: a JSON array of [name, scope, payload, ts] events
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Timestamp mode: absolute|delta|both
    #[arg(long, default_value = "absolute")]
    ts: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Suppress the size report on stderr
    #[arg(short, long)]
    quiet: bool,

    /// Enable adaptive sampling of getstats events
    #[arg(long)]
    sample: bool,

    /// Keep every Nth getstats sample (default 5; implies --sample)
    #[arg(long, value_name = "N")]
    sample_n: Option<usize>,

    /// Samples kept around interesting moments, before and after
    /// (default 2; implies --sample)
    #[arg(long, value_name = "N")]
    sample_ctx: Option<usize>,

    /// Include the prompt field reference on stderr after processing
    #[arg(long)]
    prompt_reference: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    // Flag errors exit 1, matching parse and I/O failures; --help and
    // --version still exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let ts_mode = match cli.ts.to_lowercase().as_str() {
        "absolute" | "abs" => TimestampMode::Absolute,
        "delta" | "dt" => TimestampMode::Delta,
        "both" => TimestampMode::Both,
        other => {
            eprintln!("rtcstats: invalid timestamp mode: {other} (use: absolute|delta|both)");
            return ExitCode::FAILURE;
        }
    };

    let mut sampling = None;
    if cli.sample || cli.sample_n.is_some() || cli.sample_ctx.is_some() {
        let mut config = SamplingConfig::default();
        if let Some(interval) = cli.sample_n {
            if interval == 0 {
                eprintln!("rtcstats: --sample-n must be at least 1");
                return ExitCode::FAILURE;
            }
            config.interval = interval;
        }
        if let Some(context) = cli.sample_ctx {
            config.context_before = context;
            config.context_after = context;
        }
        sampling = Some(config);
    }

    let options = Options {
        ts_mode,
        pretty: cli.pretty,
        sampling,
    };

    let summary = match process_file(&cli.input, cli.output.as_deref(), &options) {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("rtcstats: {err}");
            return ExitCode::FAILURE;
        }
    };

    if !cli.quiet {
        let source = cli.input.display().to_string();
        let dest = match &cli.output {
            Some(path) if path.as_os_str() != "-" => path.display().to_string(),
            _ => "stdout".to_string(),
        };
        eprintln!(
            "{}: {} -> {}: {} ({:.1}% reduction, {} events)",
            source,
            human_bytes(summary.input_bytes),
            dest,
            human_bytes(summary.output_bytes),
            summary.reduction * 100.0,
            summary.event_count
        );
    }

    if cli.prompt_reference {
        eprintln!("{}", rtcstats::prompts::full_reference());
    }

    ExitCode::SUCCESS
}
