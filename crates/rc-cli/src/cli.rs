use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "running-chart")]
#[command(author, version, about = "Draw a year of runs as an SVG calendar")]
#[command(long_about = "Reads a running log (one `DATE [H:]MM:SS KM` record per line) and \
    draws one calendar year as an SVG grid. Marker size follows the distance, \
    marker colour follows the pace.")]
pub struct Cli {
    /// Calendar year to draw [default: current year]
    pub year: Option<i32>,

    /// Running log to read
    #[arg(short, long, default_value = "running.log")]
    pub log: PathBuf,

    /// Output file; `.svg` is appended if missing [default: "Running <YEAR>"]
    #[arg(short, long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// JSON chart configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the SVG to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// `env_logger` default filter for the requested verbosity.
    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    pub fn output_path(&self, year: i32) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("Running {year}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["running-chart"]).unwrap();
        assert_eq!(cli.year, None);
        assert_eq!(cli.log, PathBuf::from("running.log"));
        assert_eq!(cli.log_level(), "warn");
        assert_eq!(cli.output_path(2022), PathBuf::from("Running 2022"));
    }

    #[test]
    fn verbosity_raises_level() {
        let cli = Cli::try_parse_from(["running-chart", "-vv", "2021"]).unwrap();
        assert_eq!(cli.year, Some(2021));
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["running-chart", "-vvvv"]).unwrap();
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn stdout_conflicts_with_output() {
        assert!(Cli::try_parse_from(["running-chart", "--stdout", "-o", "chart"]).is_err());
    }
}
