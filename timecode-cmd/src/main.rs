mod render;

use std::io::{stderr, stdout, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use timecodetool::{handlers, FrameRate};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use render::Format;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a timecode is valid at a frame rate.
    ///
    /// Use ; before the frames for drop-frame timecode, e.g., 00:01:00;02. Drop-frame is
    /// only valid at 29.97 and 59.94 fps.
    Validate {
        /// Timecode as hh:mm:ss:ff or hh:mm:ss;ff
        timecode: String,

        /// Frame rate, e.g., 23.976, 24, 25, 29.97, 59.94
        #[arg(short = 'r', long, value_name = "fps")]
        fps: FrameRate,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,
    },
    /// Measure the number of frames and time between two timecodes.
    ///
    /// Both timecodes are included in the span, so a span from a timecode to itself is
    /// one frame long.
    Span {
        /// First timecode of the span
        first: String,

        /// Last timecode of the span
        last: String,

        /// Frame rate, e.g., 23.976, 24, 25, 29.97, 59.94
        #[arg(short = 'r', long, value_name = "fps")]
        fps: FrameRate,

        /// Stop the span one frame before the last timecode.
        #[arg(short, long, action)]
        exclude_last: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,
    },
    /// Add and subtract timecodes or frame counts.
    ///
    /// Operations alternate between an operator (+ or -) and an operand that is either a
    /// timecode or a number of frames, for example:
    /// calculate 01:00:00:00 + 00:00:10:00 - 12 --fps 24
    Calculate {
        /// Starting timecode
        timecode: String,

        /// Operators and operands
        #[arg(required = true, num_args = 1..)]
        operations: Vec<String>,

        /// Frame rate, e.g., 23.976, 24, 25, 29.97, 59.94
        #[arg(short = 'r', long, value_name = "fps")]
        fps: FrameRate,

        /// Timecode operands, and the resulting span, stop one frame early.
        #[arg(short, long, action)]
        exclude_last: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: Format,
    },
}

fn emit(output: &str) -> Result<()> {
    stdout()
        .write_all(output.as_bytes())
        .context("writing to stdout")
}

fn exit_code(valid: bool) -> ExitCode {
    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(stderr)
        .with_ansi(false)
        .without_time()
        .with_env_filter(
            EnvFilter::try_from_env("TIMECODETOOL_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    debug!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Validate {
            timecode,
            fps,
            format,
        } => {
            let zult = handlers::validate(timecode, *fps);
            emit(&render::validate(&zult, format)?)?;
            Ok(exit_code(zult.valid))
        }
        Commands::Span {
            first,
            last,
            fps,
            exclude_last,
            format,
        } => {
            let zult = handlers::span(first, last, *fps, *exclude_last);
            emit(&render::span(&zult, format)?)?;
            Ok(exit_code(zult.valid))
        }
        Commands::Calculate {
            timecode,
            operations,
            fps,
            exclude_last,
            format,
        } => {
            debug!("operations: {operations:?}");
            let zult = handlers::calculate(timecode, operations, *fps, *exclude_last);
            emit(&render::calculate(&zult, format)?)?;
            Ok(exit_code(zult.span.valid))
        }
    }
}
