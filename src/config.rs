use std::fs::File;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::TrackscopeError;
use crate::interaction::HoverThresholds;
use crate::map::{DEFAULT_ZOOM, TileLayer};

const CONFIG_DIR_NAME: &str = "trackscope";
const CONFIG_FILE_NAME: &str = "config.json";

/// Smallest span, in degrees, the viewer shows when fitting to a single point
pub const MIN_VIEW_SPAN_DEG: f64 = 0.002;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MapSettings {
    pub tile_layer: TileLayer,
    pub default_zoom: u8,
    pub thresholds: HoverThresholds,
    pub min_view_span_deg: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            tile_layer: TileLayer::default(),
            default_zoom: DEFAULT_ZOOM,
            thresholds: HoverThresholds::default(),
            min_view_span_deg: MIN_VIEW_SPAN_DEG,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1024.,
            height: 768.,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub map: MapSettings,
    pub window_size: WindowSize,
    pub last_dataset: Option<PathBuf>,
}

impl AppConfig {
    pub fn default_path() -> Result<PathBuf, TrackscopeError> {
        Ok(dirs::config_dir()
            .ok_or(TrackscopeError::NoConfigDir)?
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Reads the user config file. `Ok(None)` when there is none yet.
    pub fn from_local_file() -> Result<Option<Self>, TrackscopeError> {
        Self::from_path(&Self::default_path()?)
    }

    pub fn from_path(config_path: &Path) -> Result<Option<Self>, TrackscopeError> {
        if !config_path.exists() {
            debug!("No config file at {:?}", config_path);
            return Ok(None);
        }

        let file =
            File::open(config_path).map_err(|e| TrackscopeError::ConfigIOError { source: e })?;
        let config: Self = serde_json::from_reader(file)
            .map_err(|e| TrackscopeError::ConfigSerializeError { source: e })?;
        config.map.thresholds.validate()?;
        info!("Loaded config from {:?}", config_path);
        Ok(Some(config))
    }

    /// Loads the user config, falling back to defaults when it is missing
    pub fn load_or_default() -> Result<Self, TrackscopeError> {
        Ok(Self::from_local_file()?.unwrap_or_default())
    }

    /// Records a dataset that loaded successfully. Returns whether the config changed and
    /// needs saving.
    pub fn remember_dataset(&mut self, dataset: &Path) -> bool {
        if self.last_dataset.as_deref() == Some(dataset) {
            return false;
        }
        self.last_dataset = Some(dataset.to_path_buf());
        true
    }

    pub fn save(&self) -> Result<(), TrackscopeError> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), TrackscopeError> {
        if let Some(parent) = config_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| TrackscopeError::ConfigIOError { source: e })?;
        }

        let file = File::create(config_path)
            .map_err(|e| TrackscopeError::ConfigIOError { source: e })?;
        serde_json::to_writer_pretty(file, self)
            .map_err(|e| TrackscopeError::ConfigSerializeError { source: e })
    }
}
