use clap::{ArgAction, Parser, ValueEnum};
use gpx_stats_lib::{Config, ElevationPolicy, UnitSystem};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// GPX Stats - Print distance and elevation statistics of a GPX track log
pub struct Settings {
    /// GPX file to analyze
    #[clap(value_name = "FILE")]
    pub gpx_file: PathBuf,

    /// Unit system for the report
    #[clap(long, value_enum, default_value_t = Units::Imperial)]
    pub units: Units,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Count distance between points lacking elevation instead of failing
    #[clap(long, default_value = "false")]
    pub skip_missing_elevation: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Imperial,
    Metric,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<Units> for UnitSystem {
    fn from(units: Units) -> Self {
        match units {
            Units::Imperial => UnitSystem::Imperial,
            Units::Metric => UnitSystem::Metric,
        }
    }
}

impl Settings {
    /// Analyzer configuration derived from the command line
    pub fn analyzer_config(&self) -> Config {
        Config {
            elevation_policy: if self.skip_missing_elevation {
                ElevationPolicy::SkipMissing
            } else {
                ElevationPolicy::Strict
            },
        }
    }

    /// Default log directive when RUST_LOG is not set
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
