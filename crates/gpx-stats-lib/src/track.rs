//! Track storage and parsing module
//!
//! This module provides the read-only track/segment/point model the analyzer walks,
//! converted from parsed GPX data.

use crate::{Result, StatsError, geodesy};
use std::io::{BufReader, Read};
use std::path::Path;

/// A single recorded position
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPoint {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Elevation in meters, if the receiver recorded one
    pub elevation: Option<f64>,
}

/// Ordered run of points recorded without a gap
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub points: Vec<TrackPoint>,
}

/// Ordered list of segments
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub name: Option<String>,
    pub segments: Vec<Segment>,
}

/// Every track of one parsed input
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSet {
    pub tracks: Vec<Track>,
}

impl TrackPoint {
    /// Create a point with a known elevation
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Create a point with no elevation
    pub fn without_elevation(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Position as a `geo` point (x = longitude, y = latitude)
    #[inline]
    pub fn point(&self) -> geo::Point<f64> {
        geo::Point::new(self.longitude, self.latitude)
    }

    /// Great-circle surface distance to `other` in meters
    #[inline]
    pub fn distance_to(&self, other: &TrackPoint) -> f64 {
        geodesy::haversine_distance_points(self.point(), other.point())
    }
}

impl From<&gpx::Waypoint> for TrackPoint {
    fn from(waypoint: &gpx::Waypoint) -> Self {
        let point = waypoint.point();
        Self {
            latitude: point.y(),
            longitude: point.x(),
            elevation: waypoint.elevation,
        }
    }
}

impl Segment {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }
}

impl From<&gpx::TrackSegment> for Segment {
    fn from(segment: &gpx::TrackSegment) -> Self {
        Self {
            points: segment.points.iter().map(TrackPoint::from).collect(),
        }
    }
}

impl Track {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            name: None,
            segments,
        }
    }
}

impl From<&gpx::Track> for Track {
    fn from(track: &gpx::Track) -> Self {
        Self {
            name: track.name.clone(),
            segments: track.segments.iter().map(Segment::from).collect(),
        }
    }
}

impl From<gpx::Gpx> for TrackSet {
    fn from(gpx: gpx::Gpx) -> Self {
        Self::from(&gpx)
    }
}

impl From<&gpx::Gpx> for TrackSet {
    fn from(gpx: &gpx::Gpx) -> Self {
        Self {
            tracks: gpx.tracks.iter().map(Track::from).collect(),
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackSet {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Parse a GPX document from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("track_set::from_reader");
        let gpx = gpx::read(BufReader::new(reader))?;
        Ok(Self::from(gpx))
    }

    /// Open and parse a GPX file
    ///
    /// I/O failures keep the offending path in the error.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| StatsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let track_set = Self::from_reader(file)?;
        tracing::debug!(
            "Loaded {}: {} tracks, {} segments, {} points",
            path.display(),
            track_set.tracks.len(),
            track_set.segment_count(),
            track_set.point_count()
        );
        Ok(track_set)
    }

    /// Iterate over every segment of every track, in order
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.tracks.iter().flat_map(|track| track.segments.iter())
    }

    /// Get total number of segments across all tracks
    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// Get total number of points across all tracks and segments
    pub fn point_count(&self) -> usize {
        self.segments().map(|segment| segment.points.len()).sum()
    }

    /// True when there is not a single point to analyze
    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}
