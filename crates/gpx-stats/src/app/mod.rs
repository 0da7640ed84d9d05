//! GPX Stats application: load one GPX file, analyze it and print the report

mod logging;
mod report;
mod settings;

pub use logging::{log_version_info, setup_logging};
pub use report::{Report, to_json};
pub use settings::{OutputFormat, Settings};

use gpx_stats_lib::{StatsError, TrackAnalyzer, TrackSet, UnitSystem};
use std::io::Write;

/// Failures that end the run with a non-zero exit code
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Error reading GPX file: {0}")]
    Load(#[source] StatsError),

    #[error("Error analyzing GPX file: {0}")]
    Analyze(#[source] StatsError),

    #[error("Error encoding JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error writing output: {0}")]
    Output(#[from] std::io::Error),
}

/// Run a full analysis and write the report to `out`
pub fn run<W: Write>(settings: &Settings, out: &mut W) -> Result<(), AppError> {
    tracing::info!("Analyzing {}", settings.gpx_file.display());

    let track_set = TrackSet::from_path(&settings.gpx_file).map_err(AppError::Load)?;
    if track_set.is_empty() {
        tracing::warn!("{} contains no track points", settings.gpx_file.display());
    }

    let analyzer = TrackAnalyzer::new(settings.analyzer_config());
    let metrics = analyzer.analyze(&track_set).map_err(AppError::Analyze)?;

    match settings.format {
        OutputFormat::Text => {
            let units = UnitSystem::from(settings.units);
            writeln!(out, "{}", Report::new(&metrics, units))?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", to_json(&metrics)?)?;
        }
    }

    Ok(())
}
