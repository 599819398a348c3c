use std::error::Error;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use hrform::logging::{init_logging, LogConfig, LogFormat};
use hrform::{read_matrix, render_dense, PbmFile, ProgressLog, Reorderer};
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(
    about = "HR-form - reorder a square sparse bitmap into bordered block-lower-triangular form"
)]
struct Cli {
    /// Input bitmap (binary PBM); standard input when omitted
    input: Option<PathBuf>,

    /// Output bitmap; a dense ASCII rendering goes to standard output when omitted
    output: Option<PathBuf>,

    /// Write a JSON summary of the run to this file
    #[cfg(feature = "serde")]
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Log format: pretty, compact or json (overrides HRFORM_LOG_FORMAT)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Log progress every this many percent of placed columns
    #[arg(long, default_value_t = 10)]
    progress_step: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = LogConfig::from_env();
    if let Some(format) = cli.log_format {
        config.format = format;
    }
    if let Err(err) = init_logging(&config) {
        eprintln!("hrform: logging disabled: {err}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut matrix = match &cli.input {
        Some(path) => {
            PbmFile::load(path).map_err(|err| format!("{}: {err}", path.display()))?
        }
        None => read_matrix(io::stdin().lock())?,
    };

    let started = Instant::now();
    let mut progress = ProgressLog::new(cli.progress_step);
    let summary = Reorderer::new().run_with_observer(&mut matrix, &mut progress);
    info!(
        p = summary.active.p,
        q = summary.active.q,
        blocks = summary.blocks,
        singleton_blocks = summary.singleton_blocks,
        elapsed = ?started.elapsed(),
        "reordered matrix"
    );

    #[cfg(feature = "serde")]
    if let Some(path) = &cli.report {
        hrform::ReorderReport::new(&matrix, &summary)
            .save(path)
            .map_err(|err| format!("{}: {err}", path.display()))?;
        info!(path = %path.display(), "wrote report");
    }

    match &cli.output {
        Some(path) => {
            PbmFile::save(path, &matrix).map_err(|err| format!("{}: {err}", path.display()))?
        }
        None => render_dense(BufWriter::new(io::stdout().lock()), &matrix, summary.active)?,
    }
    Ok(())
}
