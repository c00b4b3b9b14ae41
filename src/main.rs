use anyhow::{bail, Context};
use clap::Parser;
use log::{info, LevelFilter};
use std::path::PathBuf;

use resurround::output::{default_output_path, OutputFormat};
use resurround::{
    process_file, TailMode, UpmixParams, UpmixReport, DEFAULT_BLOCK_SIZE, DEFAULT_SMOOTHING,
};

/// Upmix a stereo WAV into front-left, front-right, front-center and back channels
#[derive(Parser, Debug)]
#[command(name = "resurround")]
#[command(version, about, long_about = None)]
struct Args {
    /// Stereo WAV file to process
    #[arg(value_name = "INPUT")]
    input_file: PathBuf,

    /// Four-channel WAV to write [default: <INPUT stem>_surround.wav]
    #[arg(value_name = "OUTPUT")]
    output_file: Option<PathBuf>,

    /// Samples per correlation block
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// EMA weight of each new block's correlation, in (0, 1]
    #[arg(short, long, default_value_t = DEFAULT_SMOOTHING)]
    smoothing: f32,

    /// Handling of trailing samples that do not fill a block
    #[arg(long, value_enum, default_value_t = TailMode::ShortBlock)]
    tail: TailMode,

    /// Output 16-bit PCM instead of float32 (clips matrixed peaks above full scale)
    #[arg(long)]
    pcm16: bool,

    /// Write a JSON processing report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Include per-block correlation and mix values in the report
    #[arg(long, requires = "report")]
    report_blocks: bool,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if !args.input_file.is_file() {
        bail!("input file not found: {}", args.input_file.display());
    }

    let output_path = args
        .output_file
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input_file));

    if output_path == args.input_file {
        bail!("output would overwrite the input file: {}", output_path.display());
    }

    let params = UpmixParams::default()
        .with_block_size(args.block_size)
        .with_smoothing(args.smoothing)
        .with_tail(args.tail);

    let format = if args.pcm16 {
        OutputFormat::Pcm16
    } else {
        OutputFormat::Float32
    };

    let (metadata, result) = process_file(&args.input_file, &output_path, params, format)
        .with_context(|| format!("failed to upmix {}", args.input_file.display()))?;

    if let Some(report_path) = &args.report {
        let report = UpmixReport::new(
            &args.input_file,
            &output_path,
            &metadata,
            &params,
            &result,
            args.report_blocks,
        );
        report
            .write(report_path)
            .with_context(|| format!("failed to write report {}", report_path.display()))?;
        info!(
            "Report saved to {} (mean mix {:.3}, {:.0}% of blocks matrixed)",
            report_path.display(),
            report.mean_mix,
            report.surround_fraction * 100.0
        );
    }

    Ok(())
}
