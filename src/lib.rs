// Library interface for trackscope
// This allows integration tests and benchmarks to access internal modules

pub mod config;
pub mod errors;
pub mod geo;
pub mod interaction;
pub mod map;
pub mod telemetry;
pub mod writer;

// Re-export commonly used types
pub use config::{AppConfig, MapSettings};
pub use errors::TrackscopeError;
pub use geo::{LatLng, NearestResult, Viewport, compute_bounds, nearest};
pub use interaction::{HoverThresholds, InteractionState, classify, classify_with};
pub use map::{MapDisplay, TrackMapSession};
pub use telemetry::{FilteredTrack, TelemetryPoint, TrackPoint, filter_points, load_points};
