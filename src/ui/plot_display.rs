// MapDisplay implementation backed by an egui_plot canvas.
// Longitude is drawn on the x axis and latitude on the y axis; no tiles are fetched.

use std::collections::{BTreeMap, HashMap};

use egui::Ui;
use egui_plot::{Line, MarkerShape, PlotBounds, PlotPoints, Points};
use log::debug;

use trackscope::geo::{LatLng, Viewport};
use trackscope::map::{
    Control, ControlId, MapDisplay, Marker, MarkerIcon, MarkerSlot, TileLayer,
};

use super::{PALETTE_TRACK, marker_color};

/// Screen width covered by the initial view, in 256 px tiles
const INITIAL_VIEW_TILES: f64 = 4.;
/// Arrow length as a fraction of the visible latitude span
const ARROW_LENGTH_FRACTION: f64 = 0.05;

/// Latitude beyond which the aspect stops growing
const MAX_ASPECT_LATITUDE_DEG: f64 = 85.;

/// Degrees of longitude per degree of latitude for equal ground distance around
/// `center_lat`, so the track keeps its shape whatever the window size.
pub(crate) fn ground_aspect(center_lat: f64) -> f64 {
    let lat = center_lat.clamp(-MAX_ASPECT_LATITUDE_DEG, MAX_ASPECT_LATITUDE_DEG);
    1. / lat.to_radians().cos()
}

/// Longitude span covered by `tiles` map tiles at `zoom`
pub(crate) fn span_for_zoom(zoom: u8, tiles: f64) -> f64 {
    tiles * 360. / 2f64.powi(zoom as i32)
}

pub(crate) struct PlotMapDisplay {
    tile_layer: Option<TileLayer>,
    polyline: Vec<[f64; 2]>,
    markers: HashMap<MarkerSlot, Marker>,
    controls: BTreeMap<ControlId, Control>,
    next_control_id: u32,
    pending_bounds: Option<Viewport>,
    last_viewport: Option<Viewport>,
    min_span_deg: f64,
}

impl PlotMapDisplay {
    pub(crate) fn new(min_span_deg: f64) -> Self {
        Self {
            tile_layer: None,
            polyline: Vec::new(),
            markers: HashMap::new(),
            controls: BTreeMap::new(),
            next_control_id: 0,
            pending_bounds: None,
            last_viewport: None,
            min_span_deg,
        }
    }

    pub(crate) fn attribution(&self) -> Option<&str> {
        self.tile_layer.as_ref().map(|l| l.attribution.as_str())
    }

    pub(crate) fn controls(&self) -> Vec<(ControlId, Control)> {
        self.controls
            .iter()
            .map(|(id, control)| (*id, control.clone()))
            .collect()
    }

    /// Popup of the detail marker, if one is shown
    pub(crate) fn popup(&self) -> Option<&str> {
        self.markers
            .get(&MarkerSlot::Detail)
            .and_then(|m| m.popup.as_deref())
    }

    /// Draws the map and returns the cursor position when the pointer is over it.
    pub(crate) fn show(&mut self, ui: &mut Ui) -> Option<LatLng> {
        let pending = self.pending_bounds.take();
        let min_span_deg = self.min_span_deg;
        let polyline = &self.polyline;
        let markers = &self.markers;
        let center_lat = self.last_viewport.map_or(0., |v| v.center().lat);

        let response = egui_plot::Plot::new("track_map")
            .data_aspect(ground_aspect(center_lat) as f32)
            .show_background(false)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .show(ui, |plot_ui| {
                if let Some(viewport) = pending {
                    let padded = viewport.padded(min_span_deg);
                    plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                        [padded.south_west.lng, padded.south_west.lat],
                        [padded.north_east.lng, padded.north_east.lat],
                    ));
                }

                if !polyline.is_empty() {
                    plot_ui.line(
                        Line::new("Track", PlotPoints::new(polyline.clone()))
                            .color(PALETTE_TRACK)
                            .width(2.),
                    );
                }

                let arrow_length = plot_ui.plot_bounds().height() * ARROW_LENGTH_FRACTION;
                for slot in [MarkerSlot::Selection, MarkerSlot::Detail] {
                    let Some(marker) = markers.get(&slot) else {
                        continue;
                    };
                    let origin = [marker.position.lng, marker.position.lat];
                    match marker.icon {
                        MarkerIcon::Dot { color, diameter_px } => {
                            plot_ui.points(
                                Points::new("Selection", PlotPoints::new(vec![origin]))
                                    .shape(MarkerShape::Circle)
                                    .filled(true)
                                    .radius(diameter_px / 2.)
                                    .color(marker_color(color)),
                            );
                        }
                        MarkerIcon::Arrow { color, heading_deg } => {
                            let heading = heading_deg.to_radians();
                            let tip = [
                                origin[0] + heading.sin() * arrow_length,
                                origin[1] + heading.cos() * arrow_length,
                            ];
                            plot_ui.line(
                                Line::new("Heading", PlotPoints::new(vec![origin, tip]))
                                    .color(marker_color(color))
                                    .width(3.),
                            );
                            plot_ui.points(
                                Points::new("Heading", PlotPoints::new(vec![tip]))
                                    .shape(MarkerShape::Up)
                                    .filled(true)
                                    .radius(6.)
                                    .color(marker_color(color)),
                            );
                        }
                    }
                }

                plot_ui.pointer_coordinate()
            });

        response.inner.map(|p| LatLng::new(p.y, p.x))
    }
}

impl MapDisplay for PlotMapDisplay {
    fn set_tile_layer(&mut self, layer: &TileLayer) {
        debug!("Using tile layer {}", layer.url_template);
        self.tile_layer = Some(layer.clone());
    }

    fn set_zoom(&mut self, zoom: u8) {
        let center = self
            .last_viewport
            .map(|v| v.center())
            .unwrap_or(LatLng::new(0., 0.));
        let span = span_for_zoom(zoom, INITIAL_VIEW_TILES);
        self.pending_bounds = Some(Viewport::around(center).padded(span));
    }

    fn draw_polyline(&mut self, path: &[LatLng]) {
        self.polyline = path.iter().map(|p| [p.lng, p.lat]).collect();
    }

    fn show_marker(&mut self, slot: MarkerSlot, marker: Marker) {
        self.markers.insert(slot, marker);
    }

    fn clear_marker(&mut self, slot: MarkerSlot) {
        self.markers.remove(&slot);
    }

    fn fit_bounds(&mut self, viewport: &Viewport) {
        self.pending_bounds = Some(*viewport);
        self.last_viewport = Some(*viewport);
    }

    fn add_control(&mut self, control: Control) -> ControlId {
        self.next_control_id += 1;
        let id = ControlId(self.next_control_id);
        self.controls.insert(id, control);
        id
    }

    fn remove_control(&mut self, id: ControlId) {
        self.controls.remove(&id);
    }
}
