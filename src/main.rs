/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description: 체결 통계 집계 CLI
**/

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use trade_stats::utils::logging;
use trade_stats::{output, AggregationEngine, AggregationError, Config, RowReader};

/// Aggregate trade statistics from a CSV price update stream
#[derive(Parser, Debug)]
#[clap(name = "trade_stats", version)]
#[clap(about = "Aggregate per-symbol trade statistics from a CSV price update stream")]
struct Cli {
    /// Path to input CSV file. If omitted or '-', read from standard input.
    file: Option<PathBuf>,

    /// JSON configuration file (defaults to ./trade_stats.json when present)
    #[clap(long, short = 'c')]
    config: Option<PathBuf>,

    /// Write the result table to this file instead of standard output
    #[clap(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = match err.downcast_ref::<AggregationError>() {
                Some(agg) => {
                    logging::log_error("집계 실패", agg);
                    agg.exit_code()
                }
                None => 1,
            };
            eprintln!("error: {:#}", err);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    logging::init(&config.logging.level)?;

    let started = Instant::now();
    let delimiter = config.input.delimiter_byte()?;
    let mut engine = AggregationEngine::new().with_progress_interval(config.logging.progress_interval);

    // 입력 선택: 파일 또는 표준 입력
    let summaries = match cli.file.as_deref() {
        Some(path) if path != Path::new("-") => {
            logging::log_run_start(&path.display().to_string());
            let reader = RowReader::from_path(path, delimiter)
                .with_context(|| format!("cannot open input {}", path.display()))?;
            engine.run(reader)?
        }
        _ => {
            logging::log_run_start("<stdin>");
            engine.run(RowReader::from_reader(io::stdin().lock(), delimiter))?
        }
    };

    logging::log_run_complete(engine.rows_processed(), summaries.len(), started.elapsed());

    match cli.output.as_deref() {
        Some(path) => {
            let file = File::create(path)
                .map_err(AggregationError::from)
                .with_context(|| format!("cannot create output {}", path.display()))?;
            output::write_summaries(BufWriter::new(file), &summaries)?;
        }
        None => output::write_summaries(io::stdout().lock(), &summaries)?,
    }

    Ok(())
}
