// Event handlers tying the track, the interaction state and the viewport to a map display

use log::{debug, info};

use super::{Control, ControlId, ControlPosition, MapDisplay, MarkerSlot, TileLayer};
use crate::config::MapSettings;
use crate::geo::{LatLng, Viewport, compute_bounds, nearest};
use crate::interaction::{HoverThresholds, InteractionState, classify_with};
use crate::telemetry::{FilteredTrack, TelemetryPoint, TrackPoint, filter_points};

pub const RESET_CONTROL_LABEL: &str = "Reset position";

/// Owns the filtered track for one map and reacts to load, pointer and control events.
///
/// The track is filtered once per [`load`](Self::load). Every pointer move recomputes the
/// interaction state from scratch; the display is only touched when the state changes.
pub struct TrackMapSession {
    track: FilteredTrack,
    thresholds: HoverThresholds,
    tile_layer: TileLayer,
    default_zoom: u8,
    state: InteractionState,
    viewport: Option<Viewport>,
    reset_control: Option<ControlId>,
}

impl TrackMapSession {
    pub fn new(settings: &MapSettings) -> Self {
        Self {
            track: FilteredTrack::default(),
            thresholds: settings.thresholds,
            tile_layer: settings.tile_layer.clone(),
            default_zoom: settings.default_zoom,
            state: InteractionState::NoSelection,
            viewport: None,
            reset_control: None,
        }
    }

    /// Sets up the base layer and registers the reset control. Pair with [`detach`](Self::detach).
    pub fn attach(&mut self, display: &mut impl MapDisplay) {
        display.set_tile_layer(&self.tile_layer);
        display.set_zoom(self.default_zoom);
        if self.reset_control.is_none() {
            let id = display.add_control(Control {
                label: RESET_CONTROL_LABEL.to_string(),
                position: ControlPosition::TopRight,
            });
            debug!("Registered reset control {:?}", id);
            self.reset_control = Some(id);
        }
    }

    /// Removes the reset control and the markers this session put on the display.
    pub fn detach(&mut self, display: &mut impl MapDisplay) {
        if let Some(id) = self.reset_control.take() {
            display.remove_control(id);
            debug!("Removed reset control {:?}", id);
        }
        if self.state != InteractionState::NoSelection {
            display.clear_marker(MarkerSlot::Selection);
            display.clear_marker(MarkerSlot::Detail);
            self.state = InteractionState::NoSelection;
        }
    }

    /// Filters the dataset, draws it and fits the viewport to it.
    pub fn load(&mut self, raw_points: &[TelemetryPoint], display: &mut impl MapDisplay) {
        self.track = filter_points(raw_points);
        info!(
            "Track loaded with {} of {} points",
            self.track.len(),
            raw_points.len()
        );

        self.state = InteractionState::NoSelection;
        display.clear_marker(MarkerSlot::Selection);
        display.clear_marker(MarkerSlot::Detail);
        display.draw_polyline(&self.track.positions());
        self.fit_to_track(display);
    }

    /// Fits the display to the whole track. An empty track leaves the display untouched
    /// and returns `None`.
    pub fn fit_to_track(&mut self, display: &mut impl MapDisplay) -> Option<Viewport> {
        match compute_bounds(&self.track) {
            Ok(viewport) => {
                display.fit_bounds(&viewport);
                self.viewport = Some(viewport);
                Some(viewport)
            }
            Err(e) => {
                debug!("Skipping viewport fit: {}", e);
                None
            }
        }
    }

    pub fn on_pointer_move(
        &mut self,
        cursor: LatLng,
        display: &mut impl MapDisplay,
    ) -> InteractionState {
        let result = nearest(cursor, &self.track);
        let next = classify_with(&result, &self.thresholds);
        if next != self.state {
            debug!(
                "Interaction state {:?} -> {:?} at {:.1} m",
                self.state, next, result.distance_m
            );
            let markers = next.markers(&self.track);
            for slot in [MarkerSlot::Selection, MarkerSlot::Detail] {
                match markers.get(slot) {
                    Some(marker) => display.show_marker(slot, marker.clone()),
                    None => display.clear_marker(slot),
                }
            }
            self.state = next;
        }
        self.state
    }

    /// Dispatches a control click. Returns `false` for controls this session does not own.
    pub fn on_control_clicked(&mut self, id: ControlId, display: &mut impl MapDisplay) -> bool {
        if self.reset_control != Some(id) {
            return false;
        }
        info!("Resetting viewport to track bounds");
        self.fit_to_track(display);
        true
    }

    pub fn track(&self) -> &FilteredTrack {
        &self.track
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn thresholds(&self) -> &HoverThresholds {
        &self.thresholds
    }

    pub fn reset_control(&self) -> Option<ControlId> {
        self.reset_control
    }

    pub fn selected_point(&self) -> Option<&TrackPoint> {
        self.state
            .selected_index()
            .and_then(|index| self.track.get(index))
    }
}
