//! TrackAnalyzer - Distance and elevation accumulation over a track set
//!
//! Each segment is folded independently over its consecutive point pairs and the
//! per-segment results are summed, so no state is carried across segment or track
//! boundaries.

use crate::{Result, Segment, StatsError, TrackPoint, TrackSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// What to do with a point pair when either point has no elevation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ElevationPolicy {
    /// Fail with [`StatsError::MissingElevation`] naming the offending point
    #[default]
    Strict,
    /// Count the horizontal distance but no elevation change for the pair
    SkipMissing,
}

/// Configuration for the track analyzer
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Handling of points without elevation (default: strict)
    pub elevation_policy: ElevationPolicy,
}

/// Summary statistics of one analysis run, all in meters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metrics {
    /// Horizontal distance over every point pair
    pub total_distance_m: f64,
    /// Sum of positive elevation differences
    pub elevation_gain_m: f64,
    /// Sum of the magnitudes of negative elevation differences
    pub elevation_loss_m: f64,
    /// Horizontal distance of pairs whose elevation strictly increased
    pub climbing_distance_m: f64,
    /// Horizontal distance of pairs whose elevation strictly decreased
    pub descending_distance_m: f64,
}

impl Metrics {
    /// Horizontal distance attributed to neither climbing nor descending
    pub fn flat_distance_m(&self) -> f64 {
        (self.total_distance_m - self.climbing_distance_m - self.descending_distance_m).max(0.0)
    }

    /// Account for one consecutive point pair
    ///
    /// `elevation_diff` is `None` when the pair has no usable elevation.
    fn accumulate(&mut self, distance: f64, elevation_diff: Option<f64>) {
        self.total_distance_m += distance;

        match elevation_diff {
            Some(diff) if diff > 0.0 => {
                self.elevation_gain_m += diff;
                self.climbing_distance_m += distance;
            }
            Some(diff) if diff < 0.0 => {
                self.elevation_loss_m += -diff;
                self.descending_distance_m += distance;
            }
            // Flat, or elevation unknown
            _ => {}
        }
    }
}

impl AddAssign for Metrics {
    fn add_assign(&mut self, other: Self) {
        self.total_distance_m += other.total_distance_m;
        self.elevation_gain_m += other.elevation_gain_m;
        self.elevation_loss_m += other.elevation_loss_m;
        self.climbing_distance_m += other.climbing_distance_m;
        self.descending_distance_m += other.descending_distance_m;
    }
}

impl Add for Metrics {
    type Output = Metrics;

    fn add(mut self, other: Self) -> Self::Output {
        self += other;
        self
    }
}

impl Sum for Metrics {
    fn sum<I: Iterator<Item = Metrics>>(iter: I) -> Self {
        iter.fold(Metrics::default(), Add::add)
    }
}

/// Walks a [`TrackSet`] and accumulates [`Metrics`]
#[derive(Debug, Clone, Default)]
pub struct TrackAnalyzer {
    config: Config,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackAnalyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze every segment of every track
    pub fn analyze(&self, track_set: &TrackSet) -> Result<Metrics> {
        #[cfg(feature = "profiling")]
        profiling::scope!("analyzer::analyze");

        let mut metrics = Metrics::default();
        let mut skipped_pairs = 0;

        for (track_index, track) in track_set.tracks.iter().enumerate() {
            for (segment_index, segment) in track.segments.iter().enumerate() {
                let (segment_metrics, skipped) = self.analyze_segment(segment).map_err(|point| {
                    StatsError::MissingElevation {
                        track: track_index,
                        segment: segment_index,
                        point,
                    }
                })?;
                metrics += segment_metrics;
                skipped_pairs += skipped;
            }
        }

        if skipped_pairs > 0 {
            tracing::warn!(
                "Skipped elevation for {} point pairs without elevation",
                skipped_pairs
            );
        }
        tracing::debug!(
            "Analyzed {} points in {} segments: {:?}",
            track_set.point_count(),
            track_set.segment_count(),
            metrics
        );

        Ok(metrics)
    }

    /// Fold a single segment over its consecutive point pairs
    ///
    /// Returns the segment metrics and the number of pairs whose elevation was skipped,
    /// or the index of the first point without elevation under the strict policy.
    fn analyze_segment(&self, segment: &Segment) -> std::result::Result<(Metrics, usize), usize> {
        segment.points.windows(2).enumerate().try_fold(
            (Metrics::default(), 0),
            |(mut metrics, mut skipped), (index, pair)| {
                let (prev, point) = (&pair[0], &pair[1]);
                let distance = prev.distance_to(point);

                let elevation_diff = match Self::elevation_diff(prev, point) {
                    Ok(diff) => Some(diff),
                    Err(missing) => match self.config.elevation_policy {
                        ElevationPolicy::Strict => return Err(index + missing),
                        ElevationPolicy::SkipMissing => {
                            skipped += 1;
                            None
                        }
                    },
                };

                metrics.accumulate(distance, elevation_diff);
                Ok((metrics, skipped))
            },
        )
    }

    /// Elevation change from `prev` to `point`
    ///
    /// On failure, returns the offset within the pair (0 or 1) of the point missing
    /// its elevation.
    #[inline]
    fn elevation_diff(prev: &TrackPoint, point: &TrackPoint) -> std::result::Result<f64, usize> {
        match (prev.elevation, point.elevation) {
            (Some(from), Some(to)) => Ok(to - from),
            (None, _) => Err(0),
            (Some(_), None) => Err(1),
        }
    }
}

/// Analyze a track set with the default configuration
pub fn analyze(track_set: &TrackSet) -> Result<Metrics> {
    TrackAnalyzer::default().analyze(track_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Segment, Track};

    const ONE_DEGREE_M: f64 = 111_195.0;

    fn segment(points: &[(f64, f64, f64)]) -> Segment {
        Segment::new(
            points
                .iter()
                .map(|&(lat, lon, ele)| TrackPoint::new(lat, lon, ele))
                .collect(),
        )
    }

    fn single_track(segments: Vec<Segment>) -> TrackSet {
        TrackSet::new(vec![Track::new(segments)])
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_empty_track_set() {
        let metrics = analyze(&TrackSet::default()).unwrap();
        assert_eq!(metrics, Metrics::default());
    }

    #[test]
    fn test_single_point_segment() {
        let track_set = single_track(vec![segment(&[(45.0, 7.0, 300.0)])]);
        let metrics = analyze(&track_set).unwrap();
        assert_eq!(metrics, Metrics::default());
    }

    #[test]
    fn test_up_and_down() {
        let track_set = single_track(vec![segment(&[
            (0.0, 0.0, 100.0),
            (0.0, 1.0, 150.0),
            (0.0, 2.0, 100.0),
        ])]);
        let metrics = analyze(&track_set).unwrap();

        assert_close(metrics.elevation_gain_m, 50.0, 1e-9);
        assert_close(metrics.elevation_loss_m, 50.0, 1e-9);
        assert_close(metrics.climbing_distance_m, ONE_DEGREE_M, 1.0);
        assert_close(metrics.descending_distance_m, ONE_DEGREE_M, 1.0);
        assert_close(metrics.total_distance_m, 2.0 * ONE_DEGREE_M, 2.0);
        assert_close(metrics.flat_distance_m(), 0.0, 1e-6);
    }

    #[test]
    fn test_vertical_climb_without_displacement() {
        let track_set = single_track(vec![segment(&[
            (46.0, 8.0, 1000.0),
            (46.0, 8.0, 1010.0),
            (46.0, 8.0, 1025.0),
            (46.0, 8.0, 1040.0),
        ])]);
        let metrics = analyze(&track_set).unwrap();

        assert_close(metrics.elevation_gain_m, 40.0, 1e-9);
        assert_eq!(metrics.elevation_loss_m, 0.0);
        assert_eq!(metrics.total_distance_m, 0.0);
        assert_eq!(metrics.climbing_distance_m, 0.0);
    }

    #[test]
    fn test_segments_are_not_bridged() {
        let track_set = single_track(vec![
            segment(&[(0.0, 0.0, 0.0), (0.0, 1.0, 0.0)]),
            segment(&[(10.0, 10.0, 100.0), (10.0, 11.0, 50.0)]),
        ]);
        let metrics = analyze(&track_set).unwrap();

        let second_leg =
            TrackPoint::new(10.0, 10.0, 0.0).distance_to(&TrackPoint::new(10.0, 11.0, 0.0));
        assert_close(metrics.total_distance_m, ONE_DEGREE_M + second_leg, 1.0);
        assert_eq!(metrics.elevation_gain_m, 0.0);
        assert_close(metrics.elevation_loss_m, 50.0, 1e-9);
        assert_close(metrics.descending_distance_m, second_leg, 1e-6);
    }

    #[test]
    fn test_tracks_are_not_bridged() {
        let track_set = TrackSet::new(vec![
            Track::new(vec![segment(&[(0.0, 0.0, 0.0), (0.0, 1.0, 10.0)])]),
            Track::new(vec![segment(&[(20.0, 20.0, 500.0), (20.0, 20.0, 490.0)])]),
        ]);
        let metrics = analyze(&track_set).unwrap();

        assert_close(metrics.total_distance_m, ONE_DEGREE_M, 1.0);
        assert_close(metrics.elevation_gain_m, 10.0, 1e-9);
        assert_close(metrics.elevation_loss_m, 10.0, 1e-9);
    }

    #[test]
    fn test_flat_distance_is_neither_climbing_nor_descending() {
        let track_set = single_track(vec![segment(&[
            (0.0, 0.0, 200.0),
            (0.0, 1.0, 200.0),
            (0.0, 2.0, 210.0),
        ])]);
        let metrics = analyze(&track_set).unwrap();

        assert_close(metrics.climbing_distance_m, ONE_DEGREE_M, 1.0);
        assert_eq!(metrics.descending_distance_m, 0.0);
        assert_close(metrics.flat_distance_m(), ONE_DEGREE_M, 1.0);
        assert!(
            metrics.total_distance_m
                >= metrics.climbing_distance_m + metrics.descending_distance_m
        );
    }

    #[test]
    fn test_accumulators_never_negative() {
        let track_set = single_track(vec![segment(&[
            (45.0, 7.0, 300.0),
            (45.001, 7.001, 290.0),
            (45.002, 7.002, 310.0),
            (45.003, 7.001, 305.0),
            (45.002, 7.000, 305.0),
        ])]);
        let metrics = analyze(&track_set).unwrap();

        assert!(metrics.total_distance_m >= 0.0);
        assert!(metrics.elevation_gain_m >= 0.0);
        assert!(metrics.elevation_loss_m >= 0.0);
        assert!(metrics.climbing_distance_m >= 0.0);
        assert!(metrics.descending_distance_m >= 0.0);
        assert_close(metrics.elevation_gain_m, 20.0, 1e-9);
        assert_close(metrics.elevation_loss_m, 15.0, 1e-9);
    }

    #[test]
    fn test_strict_policy_names_offending_point() {
        let track_set = TrackSet::new(vec![
            Track::new(vec![segment(&[(0.0, 0.0, 0.0), (0.0, 1.0, 0.0)])]),
            Track::new(vec![
                segment(&[(1.0, 1.0, 5.0)]),
                Segment::new(vec![
                    TrackPoint::new(1.0, 1.0, 5.0),
                    TrackPoint::new(1.0, 1.1, 6.0),
                    TrackPoint::without_elevation(1.0, 1.2),
                ]),
            ]),
        ]);

        match analyze(&track_set) {
            Err(StatsError::MissingElevation {
                track,
                segment,
                point,
            }) => {
                assert_eq!((track, segment, point), (1, 1, 2));
            }
            other => panic!("expected missing elevation error, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_policy_ignores_lone_point_without_elevation() {
        let track_set = single_track(vec![Segment::new(vec![TrackPoint::without_elevation(
            1.0, 1.0,
        )])]);
        assert!(analyze(&track_set).is_ok());
    }

    #[test]
    fn test_skip_policy_keeps_horizontal_distance() {
        let track_set = single_track(vec![Segment::new(vec![
            TrackPoint::new(0.0, 0.0, 100.0),
            TrackPoint::without_elevation(0.0, 1.0),
            TrackPoint::new(0.0, 2.0, 120.0),
            TrackPoint::new(0.0, 3.0, 110.0),
        ])]);
        let analyzer = TrackAnalyzer::new(Config {
            elevation_policy: ElevationPolicy::SkipMissing,
        });
        let metrics = analyzer.analyze(&track_set).unwrap();

        assert_close(metrics.total_distance_m, 3.0 * ONE_DEGREE_M, 3.0);
        assert_eq!(metrics.elevation_gain_m, 0.0);
        assert_close(metrics.elevation_loss_m, 10.0, 1e-9);
        assert_close(metrics.descending_distance_m, ONE_DEGREE_M, 1.0);
        assert_close(metrics.flat_distance_m(), 2.0 * ONE_DEGREE_M, 2.0);
    }

    #[test]
    fn test_config_default_is_strict() {
        assert_eq!(Config::default().elevation_policy, ElevationPolicy::Strict);
        assert_eq!(
            TrackAnalyzer::default().config().elevation_policy,
            ElevationPolicy::Strict
        );
    }

    #[test]
    fn test_metrics_sum() {
        let a = Metrics {
            total_distance_m: 10.0,
            elevation_gain_m: 1.0,
            elevation_loss_m: 2.0,
            climbing_distance_m: 3.0,
            descending_distance_m: 4.0,
        };
        let total: Metrics = vec![a, a, a].into_iter().sum();

        assert_eq!(total.total_distance_m, 30.0);
        assert_eq!(total.elevation_gain_m, 3.0);
        assert_eq!(total.elevation_loss_m, 6.0);
        assert_eq!(total.climbing_distance_m, 9.0);
        assert_eq!(total.descending_distance_m, 12.0);
        assert_eq!(total.flat_distance_m(), 9.0);
    }
}
