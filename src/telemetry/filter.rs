// Filters raw GPS records down to the points that form the drawable track

use log::debug;

use super::TelemetryPoint;
use crate::geo::LatLng;

/// Value of the `valid` flag for a good fix
pub const VALID_FIX_FLAG: i64 = 0;
/// Coordinates at or below this magnitude are treated as an unset receiver position
pub const MIN_ABS_COORDINATE_DEG: f64 = 1.0;
pub const MIN_SATELLITE_COUNT: i64 = 3;

/// An accepted record together with its validated position.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
    pub position: LatLng,
    pub heading_deg: f64,
    pub record: TelemetryPoint,
}

impl TrackPoint {
    /// Returns `None` when the record does not pass [`is_usable`]
    pub fn from_record(record: &TelemetryPoint) -> Option<Self> {
        if !is_usable(record) {
            return None;
        }
        let position = record.position()?;
        Some(Self {
            position,
            heading_deg: record.heading_deg(),
            record: record.clone(),
        })
    }
}

/// Ordered sequence of accepted points. Order follows the source dataset and defines the
/// polyline drawn on the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredTrack {
    points: Vec<TrackPoint>,
}

impl FilteredTrack {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TrackPoint> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackPoint> {
        self.points.iter()
    }

    /// Polyline vertices in track order
    pub fn positions(&self) -> Vec<LatLng> {
        self.points.iter().map(|p| p.position).collect()
    }
}

impl<'a> IntoIterator for &'a FilteredTrack {
    type Item = &'a TrackPoint;
    type IntoIter = std::slice::Iter<'a, TrackPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Whether a raw record can be part of the track.
///
/// Absent or malformed fields never pass, and NaN coordinates fail the magnitude check.
pub fn is_usable(point: &TelemetryPoint) -> bool {
    let (Some(valid), Some(lat), Some(lng), Some(satellites)) = (
        point.valid(),
        point.latitude(),
        point.longitude(),
        point.satellitecount(),
    ) else {
        return false;
    };

    valid == VALID_FIX_FLAG
        && lat.abs() > MIN_ABS_COORDINATE_DEG
        && lng.abs() > MIN_ABS_COORDINATE_DEG
        && satellites >= MIN_SATELLITE_COUNT
}

/// Builds the track from the raw dataset. Pure and order-preserving; run it once per load and
/// keep the result.
pub fn filter_points(raw_points: &[TelemetryPoint]) -> FilteredTrack {
    let points: Vec<TrackPoint> = raw_points
        .iter()
        .filter_map(TrackPoint::from_record)
        .collect();

    debug!(
        "Accepted {} of {} raw points ({} rejected)",
        points.len(),
        raw_points.len(),
        raw_points.len() - points.len()
    );

    FilteredTrack { points }
}
