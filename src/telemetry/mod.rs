pub mod filter;
pub mod loader;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::geo::LatLng;

pub use filter::{FilteredTrack, TrackPoint, filter_points, is_usable};
pub use loader::load_points;

const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const VALID: &str = "valid";
const SATELLITE_COUNT: &str = "satellitecount";
const HEADING: &str = "dir";

/// A single record from the GPS dataset.
///
/// The record is kept as read, in source order, and serializes back unchanged. The known fields
/// are derived from it leniently: a missing, `null` or non-numeric value is `None`, so the point
/// is rejected by the filter instead of failing the whole load.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct TelemetryPoint {
    fields: Map<String, Value>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    valid: Option<i64>,
    satellitecount: Option<i64>,
    dir: Option<f64>,
}

impl From<Map<String, Value>> for TelemetryPoint {
    fn from(fields: Map<String, Value>) -> Self {
        let number = |name: &str| fields.get(name).and_then(coerce_f64);
        Self {
            latitude: number(LATITUDE),
            longitude: number(LONGITUDE),
            valid: fields.get(VALID).and_then(integral_i64),
            // floor keeps `count >= n` unchanged for integral n
            satellitecount: number(SATELLITE_COUNT).map(|count| count.floor() as i64),
            dir: number(HEADING),
            fields,
        }
    }
}

impl From<TelemetryPoint> for Map<String, Value> {
    fn from(point: TelemetryPoint) -> Self {
        point.fields
    }
}

impl TelemetryPoint {
    pub fn new(latitude: f64, longitude: f64, valid: i64, satellitecount: i64) -> Self {
        let mut fields = Map::new();
        fields.insert(LATITUDE.to_string(), Value::from(latitude));
        fields.insert(LONGITUDE.to_string(), Value::from(longitude));
        fields.insert(VALID.to_string(), Value::from(valid));
        fields.insert(SATELLITE_COUNT.to_string(), Value::from(satellitecount));
        Self::from(fields)
    }

    pub fn with_heading(self, dir: f64) -> Self {
        self.with_field(HEADING, dir)
    }

    /// Sets a field, replacing it in place when the record already has it.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        Self::from(self.fields)
    }

    /// Latitude in decimal degrees
    pub fn latitude(&self) -> Option<f64> {
        self.latitude
    }

    /// Longitude in decimal degrees
    pub fn longitude(&self) -> Option<f64> {
        self.longitude
    }

    /// Receiver fix flag, 0 means the fix is valid
    pub fn valid(&self) -> Option<i64> {
        self.valid
    }

    pub fn satellitecount(&self) -> Option<i64> {
        self.satellitecount
    }

    /// Heading in degrees, clockwise from north
    pub fn dir(&self) -> Option<f64> {
        self.dir
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Every field of the record as read, in source order
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Position of the record, if both coordinates are present
    pub fn position(&self) -> Option<LatLng> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        }
    }

    pub fn heading_deg(&self) -> f64 {
        self.dir.unwrap_or(0.0)
    }

    /// Readable dump of the whole record, one `field: value` per line in source order.
    pub fn describe(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| match value {
                Value::String(text) => format!("{}: {}", name, text),
                other => format!("{}: {}", name, other),
            })
            .join("\n")
    }
}

/// Numbers, and strings that hold a finite number.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Integral JSON numbers only; `"0"` is not a valid fix flag.
fn integral_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.fract() == 0.0)
            .map(|number| number as i64)
    })
}
