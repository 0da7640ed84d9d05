//! Rendering of analysis results

use gpx_stats_lib::{Metrics, UnitSystem};
use serde::Serialize;
use std::fmt;

/// Five-line human readable summary
pub struct Report<'a> {
    metrics: &'a Metrics,
    units: UnitSystem,
}

impl<'a> Report<'a> {
    pub fn new(metrics: &'a Metrics, units: UnitSystem) -> Self {
        Self { metrics, units }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metrics;
        let u = self.units;
        writeln!(f, "Total Distance: {}", u.format_distance(m.total_distance_m))?;
        writeln!(f, "Elevation Gain: {}", u.format_elevation(m.elevation_gain_m))?;
        writeln!(f, "Elevation Loss: {}", u.format_elevation(m.elevation_loss_m))?;
        writeln!(
            f,
            "Distance Climbing: {}",
            u.format_distance(m.climbing_distance_m)
        )?;
        write!(
            f,
            "Distance Descending: {}",
            u.format_distance(m.descending_distance_m)
        )
    }
}

/// Machine readable summary, raw meters plus the derived flat distance
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    metrics: &'a Metrics,
    flat_distance_m: f64,
}

pub fn to_json(metrics: &Metrics) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        metrics,
        flat_distance_m: metrics.flat_distance_m(),
    })
}
