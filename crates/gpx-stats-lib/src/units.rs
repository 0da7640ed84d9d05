//! Rendering of distances and elevations for people

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Conversion factor from meters to international feet
pub const FEET_PER_METER: f64 = 3.28084;

pub const FEET_PER_MILE: f64 = 5280.0;

pub const METERS_PER_KILOMETER: f64 = 1000.0;

/// Unit system used when rendering metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitSystem {
    /// Feet below one mile, miles above
    #[default]
    Imperial,
    /// Meters below one kilometer, kilometers above
    Metric,
}

impl UnitSystem {
    pub fn format_distance(self, meters: f64) -> String {
        match self {
            UnitSystem::Imperial => format_distance(meters),
            UnitSystem::Metric => format_distance_metric(meters),
        }
    }

    pub fn format_elevation(self, meters: f64) -> String {
        match self {
            UnitSystem::Imperial => format_elevation(meters),
            UnitSystem::Metric => format_elevation_metric(meters),
        }
    }
}

/// Format a distance in feet if less than a mile, otherwise in miles
pub fn format_distance(meters: f64) -> String {
    let feet = meters * FEET_PER_METER;
    let miles = feet / FEET_PER_MILE;

    if miles < 1.0 {
        format!("{feet:.0} ft")
    } else {
        format!("{miles:.2} mi")
    }
}

/// Format an elevation in feet; elevations are never shown in miles
pub fn format_elevation(meters: f64) -> String {
    let feet = meters * FEET_PER_METER;
    format!("{feet:.0} ft")
}

/// Format a distance in meters if less than a kilometer, otherwise in kilometers
pub fn format_distance_metric(meters: f64) -> String {
    let kilometers = meters / METERS_PER_KILOMETER;

    if kilometers < 1.0 {
        format!("{meters:.0} m")
    } else {
        format!("{kilometers:.2} km")
    }
}

pub fn format_elevation_metric(meters: f64) -> String {
    format!("{meters:.0} m")
}
