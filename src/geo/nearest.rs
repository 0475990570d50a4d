// Closest track point to a cursor location

use super::LatLng;
use crate::telemetry::{FilteredTrack, TrackPoint};

/// Outcome of a nearest point search. Recomputed on every pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NearestResult<'t> {
    /// Index into the track and the point itself; `None` for an empty track
    pub hit: Option<(usize, &'t TrackPoint)>,
    /// Distance to the hit in meters, `f64::INFINITY` without a hit
    pub distance_m: f64,
}

impl<'t> NearestResult<'t> {
    pub fn none() -> Self {
        Self {
            hit: None,
            distance_m: f64::INFINITY,
        }
    }

    pub fn index(&self) -> Option<usize> {
        self.hit.map(|(index, _)| index)
    }

    pub fn point(&self) -> Option<&'t TrackPoint> {
        self.hit.map(|(_, point)| point)
    }

    pub fn is_found(&self) -> bool {
        self.hit.is_some()
    }
}

/// Finds the track point closest to `cursor` using great-circle distance.
pub fn nearest(cursor: LatLng, track: &FilteredTrack) -> NearestResult<'_> {
    nearest_by(cursor, track, LatLng::distance_to)
}

/// Linear scan with an injected distance function.
///
/// Ties keep the earliest point in track order. A distance that is NaN never wins.
pub fn nearest_by<F>(cursor: LatLng, track: &FilteredTrack, distance: F) -> NearestResult<'_>
where
    F: Fn(LatLng, LatLng) -> f64,
{
    let mut best = NearestResult::none();
    for (index, point) in track.iter().enumerate() {
        let d = distance(cursor, point.position);
        if d < best.distance_m {
            best = NearestResult {
                hit: Some((index, point)),
                distance_m: d,
            };
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::{TelemetryPoint, filter_points};
    use proptest::prelude::*;

    fn track_from(coords: &[(f64, f64)]) -> FilteredTrack {
        let raw: Vec<TelemetryPoint> = coords
            .iter()
            .map(|&(lat, lng)| TelemetryPoint::new(lat, lng, 0, 6))
            .collect();
        filter_points(&raw)
    }

    #[test]
    fn test_empty_track_has_no_result() {
        let track = FilteredTrack::default();
        let result = nearest(LatLng::new(55.0, 37.0), &track);
        assert!(!result.is_found());
        assert_eq!(result.point(), None);
        assert_eq!(result.index(), None);
        assert_eq!(result.distance_m, f64::INFINITY);
    }

    #[test]
    fn test_finds_closest_point() {
        let track = track_from(&[(55.0, 37.0), (55.01, 37.0), (55.02, 37.0)]);
        let result = nearest(LatLng::new(55.0105, 37.0), &track);

        assert_eq!(result.index(), Some(1));
        assert_eq!(
            result.point().map(|p| p.position),
            Some(LatLng::new(55.01, 37.0))
        );
        let expected = LatLng::new(55.0105, 37.0).distance_to(LatLng::new(55.01, 37.0));
        assert_eq!(result.distance_m, expected);
    }

    #[test]
    fn test_cursor_on_point_is_zero_distance() {
        let track = track_from(&[(55.0, 37.0), (56.0, 38.0)]);
        let result = nearest(LatLng::new(56.0, 38.0), &track);
        assert_eq!(result.index(), Some(1));
        assert_eq!(result.distance_m, 0.0);
    }

    #[test]
    fn test_tie_keeps_first_point() {
        let track = track_from(&[(55.0, 37.0), (56.0, 38.0), (55.0, 37.0)]);
        let result = nearest(LatLng::new(55.0, 37.0), &track);
        assert_eq!(result.index(), Some(0));

        let constant = nearest_by(LatLng::new(10.0, 10.0), &track, |_, _| 5.0);
        assert_eq!(constant.index(), Some(0));
        assert_eq!(constant.distance_m, 5.0);
    }

    #[test]
    fn test_injected_distance_function() {
        let track = track_from(&[(55.0, 37.0), (56.0, 30.0)]);
        // planar distance on longitude only
        let result = nearest_by(LatLng::new(0.0, 31.0), &track, |a, b| (a.lng - b.lng).abs());
        assert_eq!(result.index(), Some(1));
        assert_eq!(result.distance_m, 1.0);
    }

    #[test]
    fn test_nan_distance_never_wins() {
        let track = track_from(&[(55.0, 37.0)]);
        let result = nearest_by(LatLng::new(55.0, 37.0), &track, |_, _| f64::NAN);
        assert!(!result.is_found());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_nearest_is_minimum(
            coords in proptest::collection::vec((2.0f64..80.0, 2.0f64..170.0), 1..60),
            cursor_lat in -85.0f64..85.0,
            cursor_lng in -179.0f64..179.0,
        ) {
            let track = track_from(&coords);
            let cursor = LatLng::new(cursor_lat, cursor_lng);
            let result = nearest(cursor, &track);

            let distances: Vec<f64> = track.iter().map(|p| cursor.distance_to(p.position)).collect();
            let min = distances.iter().cloned().fold(f64::INFINITY, f64::min);
            let first_min = distances.iter().position(|d| *d == min);

            prop_assert_eq!(result.distance_m, min);
            prop_assert_eq!(result.index(), first_min);
            let point = result.point().unwrap();
            prop_assert_eq!(cursor.distance_to(point.position), min);
        }
    }
}
