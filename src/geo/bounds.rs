// Bounding viewport of a track

use log::debug;
use serde::{Deserialize, Serialize};

use super::LatLng;
use crate::errors::TrackscopeError;
use crate::telemetry::FilteredTrack;

/// Rectangular map region given by its south-west and north-east corners
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Viewport {
    /// Degenerate viewport around a single position
    pub fn around(position: LatLng) -> Self {
        Self {
            south_west: position,
            north_east: position,
        }
    }

    pub fn extend(&mut self, position: LatLng) {
        self.south_west.lat = self.south_west.lat.min(position.lat);
        self.south_west.lng = self.south_west.lng.min(position.lng);
        self.north_east.lat = self.north_east.lat.max(position.lat);
        self.north_east.lng = self.north_east.lng.max(position.lng);
    }

    pub fn lat_span(&self) -> f64 {
        self.north_east.lat - self.south_west.lat
    }

    pub fn lng_span(&self) -> f64 {
        self.north_east.lng - self.south_west.lng
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Inclusive on every edge
    pub fn contains(&self, position: LatLng) -> bool {
        position.lat >= self.south_west.lat
            && position.lat <= self.north_east.lat
            && position.lng >= self.south_west.lng
            && position.lng <= self.north_east.lng
    }

    /// Grows each axis symmetrically to at least `min_span_deg`, keeping the center.
    pub fn padded(&self, min_span_deg: f64) -> Self {
        let center = self.center();
        let half_lat = self.lat_span().max(min_span_deg) / 2.0;
        let half_lng = self.lng_span().max(min_span_deg) / 2.0;
        Self {
            south_west: LatLng::new(center.lat - half_lat, center.lng - half_lng),
            north_east: LatLng::new(center.lat + half_lat, center.lng + half_lng),
        }
    }
}

/// Smallest viewport containing every point of the track.
///
/// Fails with [`TrackscopeError::EmptyTrack`]; callers skip the fit in that case.
pub fn compute_bounds(track: &FilteredTrack) -> Result<Viewport, TrackscopeError> {
    let mut positions = track.iter().map(|p| p.position);
    let first = positions.next().ok_or(TrackscopeError::EmptyTrack)?;

    let viewport = positions.fold(Viewport::around(first), |mut viewport, position| {
        viewport.extend(position);
        viewport
    });

    debug!(
        "Track bounds: SW=({}, {}) NE=({}, {})",
        viewport.south_west.lat,
        viewport.south_west.lng,
        viewport.north_east.lat,
        viewport.north_east.lng
    );
    Ok(viewport)
}
