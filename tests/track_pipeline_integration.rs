// Integration tests for the load -> filter -> nearest -> classify -> display pipeline

use std::path::Path;

use trackscope::geo::Viewport;
use trackscope::map::{
    Control, ControlId, MapDisplay, Marker, MarkerIcon, MarkerSlot, TileLayer,
};
use trackscope::{
    InteractionState, LatLng, MapSettings, TelemetryPoint, TrackMapSession, TrackscopeError,
    classify, compute_bounds, filter_points, load_points, nearest,
};

const SAMPLE_TRACK: &str = "track_samples/moscow_loop.json";

/// Map display that keeps the latest state of every capability
#[derive(Default)]
struct FakeMap {
    polyline: Vec<LatLng>,
    selection: Option<Marker>,
    detail: Option<Marker>,
    fitted: Vec<Viewport>,
    controls: Vec<(ControlId, Control)>,
    next_control: u32,
    zoom: Option<u8>,
    tile_layer: Option<TileLayer>,
}

impl MapDisplay for FakeMap {
    fn set_tile_layer(&mut self, layer: &TileLayer) {
        self.tile_layer = Some(layer.clone());
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = Some(zoom);
    }

    fn draw_polyline(&mut self, path: &[LatLng]) {
        self.polyline = path.to_vec();
    }

    fn show_marker(&mut self, slot: MarkerSlot, marker: Marker) {
        match slot {
            MarkerSlot::Selection => self.selection = Some(marker),
            MarkerSlot::Detail => self.detail = Some(marker),
        }
    }

    fn clear_marker(&mut self, slot: MarkerSlot) {
        match slot {
            MarkerSlot::Selection => self.selection = None,
            MarkerSlot::Detail => self.detail = None,
        }
    }

    fn fit_bounds(&mut self, viewport: &Viewport) {
        self.fitted.push(*viewport);
    }

    fn add_control(&mut self, control: Control) -> ControlId {
        self.next_control += 1;
        let id = ControlId(self.next_control);
        self.controls.push((id, control));
        id
    }

    fn remove_control(&mut self, id: ControlId) {
        self.controls.retain(|(existing, _)| *existing != id);
    }
}

fn sample_points() -> Vec<TelemetryPoint> {
    load_points(Path::new(SAMPLE_TRACK)).expect("Failed to load sample track")
}

#[test]
fn test_sample_track_filtering() {
    let raw = sample_points();
    assert_eq!(raw.len(), 60);

    let track = filter_points(&raw);
    // two invalid fixes, one with too few satellites, one at 0,0 and one without latitude
    assert_eq!(track.len(), 55);

    let accepted_times: Vec<&str> = track
        .iter()
        .filter_map(|p| p.record.field("time").and_then(|t| t.as_str()))
        .collect();
    let mut sorted = accepted_times.clone();
    sorted.sort();
    assert_eq!(accepted_times, sorted, "track order must follow the source");
}

#[test]
fn test_sample_track_bounds() {
    let track = filter_points(&sample_points());
    let viewport = compute_bounds(&track).unwrap();
    assert_eq!(viewport.south_west, LatLng::new(55.7452, 37.6084));
    assert_eq!(viewport.north_east, LatLng::new(55.7572, 37.6284));
}

#[test]
fn test_two_valid_three_invalid() {
    let raw = vec![
        TelemetryPoint::new(55.1, 37.1, 4, 9),
        TelemetryPoint::new(55.2, 37.2, 0, 9).with_field("id", "a"),
        TelemetryPoint::new(0.9, 37.3, 0, 9),
        TelemetryPoint::new(55.4, 37.4, 0, 9).with_field("id", "b"),
        TelemetryPoint::new(55.5, 37.5, 0, 1),
    ];

    let track = filter_points(&raw);

    assert_eq!(track.len(), 2);
    assert_eq!(track.points()[0].record, raw[1]);
    assert_eq!(track.points()[1].record, raw[3]);
}

#[test]
fn test_empty_track_pipeline() {
    let track = filter_points(&[]);
    let result = nearest(LatLng::new(55.0, 37.0), &track);
    assert!(result.point().is_none());
    assert_eq!(result.distance_m, f64::INFINITY);
    assert_eq!(classify(&result), InteractionState::NoSelection);
    assert!(matches!(
        compute_bounds(&track),
        Err(TrackscopeError::EmptyTrack)
    ));
}

#[test]
fn test_session_over_sample_track() {
    let raw = sample_points();
    let mut map = FakeMap::default();
    let mut session = TrackMapSession::new(&MapSettings::default());

    session.attach(&mut map);
    assert_eq!(map.zoom, Some(13));
    assert_eq!(map.tile_layer, Some(TileLayer::default()));
    assert_eq!(map.controls.len(), 1);
    assert_eq!(map.controls[0].1.label, "Reset position");

    session.load(&raw, &mut map);
    assert_eq!(map.polyline.len(), 55);
    assert_eq!(map.fitted.len(), 1);

    // exactly on the record stamped 09:00:10
    let on_track = LatLng::new(55.756396, 37.6234);
    let state = session.on_pointer_move(on_track, &mut map);
    assert_eq!(state, InteractionState::Tracking { index: 9 });
    let detail = map.detail.clone().expect("detail marker");
    let selection = map.selection.clone().expect("selection marker");
    assert_eq!(detail.position, selection.position);
    assert!(matches!(
        detail.icon,
        MarkerIcon::Arrow { heading_deg, .. } if heading_deg == 150.0
    ));
    let popup = detail.popup.expect("popup");
    // the whole record, in the order of the source file
    let raw_record = &raw[10];
    assert_eq!(popup.lines().count(), raw_record.fields().len());
    assert!(popup.starts_with("imei: 865067020412345\ntime: 2024-05-14T09:00:10Z\n"));

    // ~156 m east of the easternmost point
    let near_track = LatLng::new(55.7512, 37.6309);
    let state = session.on_pointer_move(near_track, &mut map);
    assert_eq!(state, InteractionState::Hovering { index: 0 });
    assert!(map.detail.is_none());
    assert_eq!(
        map.selection.as_ref().map(|m| m.position),
        Some(LatLng::new(55.7512, 37.6284))
    );

    let far_away = LatLng::new(55.8, 37.7);
    assert_eq!(
        session.on_pointer_move(far_away, &mut map),
        InteractionState::NoSelection
    );
    assert!(map.selection.is_none());
    assert!(map.detail.is_none());

    let reset = map.controls[0].0;
    assert!(session.on_control_clicked(reset, &mut map));
    assert_eq!(map.fitted.len(), 2);
    assert_eq!(map.fitted[0], map.fitted[1]);

    session.detach(&mut map);
    assert!(map.controls.is_empty());
}
