// Map display collaborator
// Describes what the track session needs from a map widget: a tile layer, a polyline,
// markers with popups, viewport fitting and on-screen controls.

pub mod session;

use serde::{Deserialize, Serialize};

use crate::geo::{LatLng, Viewport};

pub use session::TrackMapSession;

pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
pub const DEFAULT_ZOOM: u8 = 13;

/// Raster tile source shown under the track
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: OSM_TILE_URL.to_string(),
            attribution: OSM_ATTRIBUTION.to_string(),
        }
    }
}

/// The two marker slots driven by the interaction state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkerSlot {
    /// Dot on the closest point while the cursor is near the track
    Selection,
    /// Heading arrow with the point popup while the cursor is on the track
    Detail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerColor {
    Blue,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MarkerIcon {
    Dot { color: MarkerColor, diameter_px: f32 },
    /// Arrow rotated clockwise from north
    Arrow { color: MarkerColor, heading_deg: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub position: LatLng,
    pub icon: MarkerIcon,
    pub popup: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A button overlaid on the map
#[derive(Clone, Debug, PartialEq)]
pub struct Control {
    pub label: String,
    pub position: ControlPosition,
}

/// Handle returned by [`MapDisplay::add_control`], used to deliver clicks and to remove it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u32);

/// Capabilities consumed from the map widget.
///
/// Pointer moves and control clicks flow the other way: the host forwards them to
/// [`TrackMapSession::on_pointer_move`] and [`TrackMapSession::on_control_clicked`].
pub trait MapDisplay {
    fn set_tile_layer(&mut self, layer: &TileLayer);

    fn set_zoom(&mut self, zoom: u8);

    /// Replaces the drawn track with `path`, in order
    fn draw_polyline(&mut self, path: &[LatLng]);

    /// Shows `marker` in `slot`, replacing what was there
    fn show_marker(&mut self, slot: MarkerSlot, marker: Marker);

    fn clear_marker(&mut self, slot: MarkerSlot);

    /// Moves the visible region so that it contains `viewport`
    fn fit_bounds(&mut self, viewport: &Viewport);

    fn add_control(&mut self, control: Control) -> ControlId;

    fn remove_control(&mut self, id: ControlId);
}
