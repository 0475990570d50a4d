// Hover/selection state derived from the nearest point search

use serde::{Deserialize, Serialize};

use crate::errors::TrackscopeError;
use crate::geo::NearestResult;
use crate::map::{Marker, MarkerColor, MarkerIcon, MarkerSlot};
use crate::telemetry::FilteredTrack;

/// Below this distance the cursor is on the track
pub const TRACKING_THRESHOLD_M: f64 = 40.0;
/// Below this distance the cursor is near the track
pub const HOVERING_THRESHOLD_M: f64 = 300.0;

pub const SELECTION_DOT_DIAMETER_PX: f32 = 10.0;

/// Upper bounds (exclusive) of the tracking and hovering zones, in meters
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct HoverThresholds {
    pub tracking_m: f64,
    pub hovering_m: f64,
}

impl Default for HoverThresholds {
    fn default() -> Self {
        Self {
            tracking_m: TRACKING_THRESHOLD_M,
            hovering_m: HOVERING_THRESHOLD_M,
        }
    }
}

impl HoverThresholds {
    pub fn validate(&self) -> Result<(), TrackscopeError> {
        if !self.tracking_m.is_finite() || !self.hovering_m.is_finite() {
            return Err(TrackscopeError::InvalidThresholds {
                reason: "thresholds must be finite".to_string(),
            });
        }
        if self.tracking_m <= 0.0 {
            return Err(TrackscopeError::InvalidThresholds {
                reason: format!("tracking threshold must be positive, got {}", self.tracking_m),
            });
        }
        if self.tracking_m >= self.hovering_m {
            return Err(TrackscopeError::InvalidThresholds {
                reason: format!(
                    "tracking threshold ({}) must be below hovering threshold ({})",
                    self.tracking_m, self.hovering_m
                ),
            });
        }
        Ok(())
    }
}

/// Which zone the cursor is in, and the track point it refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    NoSelection,
    /// Cursor on the track: detail and selection markers on the point
    Tracking { index: usize },
    /// Cursor near the track: selection marker only
    Hovering { index: usize },
}

/// Markers implied by an [`InteractionState`]. `None` means the slot is cleared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerSet {
    pub selection: Option<Marker>,
    pub detail: Option<Marker>,
}

impl MarkerSet {
    pub fn get(&self, slot: MarkerSlot) -> Option<&Marker> {
        match slot {
            MarkerSlot::Selection => self.selection.as_ref(),
            MarkerSlot::Detail => self.detail.as_ref(),
        }
    }
}

impl InteractionState {
    pub fn selected_index(&self) -> Option<usize> {
        match self {
            Self::NoSelection => None,
            Self::Tracking { index } | Self::Hovering { index } => Some(*index),
        }
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self, Self::Tracking { .. })
    }

    /// Builds the markers for this state from the track the index refers to.
    /// An index outside the track yields no markers.
    pub fn markers(&self, track: &FilteredTrack) -> MarkerSet {
        let Some(point) = self.selected_index().and_then(|index| track.get(index)) else {
            return MarkerSet::default();
        };

        let selection = Some(Marker {
            position: point.position,
            icon: MarkerIcon::Dot {
                color: MarkerColor::Blue,
                diameter_px: SELECTION_DOT_DIAMETER_PX,
            },
            popup: None,
        });
        let detail = self.is_tracking().then(|| Marker {
            position: point.position,
            icon: MarkerIcon::Arrow {
                color: MarkerColor::Red,
                heading_deg: point.heading_deg,
            },
            popup: Some(point.record.describe()),
        });

        MarkerSet { selection, detail }
    }
}

/// Classifies a search result with the default 40 m / 300 m zones.
pub fn classify(result: &NearestResult) -> InteractionState {
    classify_with(result, &HoverThresholds::default())
}

/// Stateless: depends only on `result`. No hit, a NaN distance, or a distance at or beyond
/// `hovering_m` gives [`InteractionState::NoSelection`].
pub fn classify_with(result: &NearestResult, thresholds: &HoverThresholds) -> InteractionState {
    let Some(index) = result.index() else {
        return InteractionState::NoSelection;
    };

    if result.distance_m < thresholds.tracking_m {
        InteractionState::Tracking { index }
    } else if result.distance_m < thresholds.hovering_m {
        InteractionState::Hovering { index }
    } else {
        InteractionState::NoSelection
    }
}
