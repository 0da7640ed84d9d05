//! GPX Stats Library - Distance and Elevation Statistics for GPS Track Logs
//!
//! This library turns a parsed GPX document into five summary figures: total horizontal
//! distance, elevation gain, elevation loss, and the horizontal distance covered while
//! climbing and while descending.
//!
//! # Architecture
//!
//! - **[`TrackSet`]**: Read-only track/segment/point model converted from [`gpx::Gpx`]
//! - **[`TrackAnalyzer`]**: Single forward pass over every segment, producing [`Metrics`]
//! - **[`geodesy`]**: Haversine great-circle distance on a spherical Earth
//! - **[`units`]**: Human readable rendering of distances and elevations
//!
//! Segments are never bridged: the first point of a segment is not compared against the
//! last point of the previous one.

mod analyzer;
pub mod geodesy;
mod track;
pub mod units;

// Public API exports
pub use analyzer::{Config, ElevationPolicy, Metrics, TrackAnalyzer, analyze};
pub use track::{Segment, Track, TrackPoint, TrackSet};
pub use units::UnitSystem;

use std::path::PathBuf;

/// Error types for loading and analyzing track logs
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing elevation at track {track}, segment {segment}, point {point}")]
    MissingElevation {
        track: usize,
        segment: usize,
        point: usize,
    },
}

pub type Result<T> = std::result::Result<T, StatsError>;
