//! `running-chart`: render a running log as an SVG calendar.

mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::{Datelike, Local};
use clap::Parser;
use rc_chart::{ChartConfig, ChartError, draw_calendar, load_log};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> rc_chart::Result<()> {
    let year = cli.year.unwrap_or_else(|| Local::now().year());

    let config = match &cli.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::default(),
    };
    let records = load_log(&cli.log)?;
    log::info!("{} records read from {}", records.len(), cli.log.display());

    let doc = draw_calendar(year, &records, &config)?;

    if cli.stdout {
        if let Some(svg) = doc.persist(None)? {
            io::stdout()
                .write_all(svg.as_bytes())
                .map_err(|source| ChartError::Output { source })?;
        }
    } else {
        let path = doc.write_to(cli.output_path(year))?;
        println!("{}", path.display());
    }
    Ok(())
}
