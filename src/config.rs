//! Viewer settings persisted as JSON.
//!
//! Unknown or missing sections fall back to defaults, and numeric camera
//! parameters outside their valid range are replaced on load.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::camera::CameraSettings;
use crate::constants::{DEFAULT_MAX_FRAMERATE, DEFAULT_PAN_STEP, DEFAULT_ZOOM_FACTOR};
use crate::keybindings::KeyBindings;

/// Format version written by this build. Files with a higher version are
/// rejected.
pub const CONFIG_VERSION: u32 = 1;

const CONFIG_DIR_NAME: &str = "bufview";
const CONFIG_FILE_NAME: &str = "bufview-config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config version {found} is not supported (newest known is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("No config directory on this platform")]
    NoConfigDir,
}

/// Verbosity of the `log` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Everything the viewer reads from its config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub version: u32,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub rendering: RenderingConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub preferences: Preferences,
}

/// Zoom and pan tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Base of the exponential zoom, must be greater than 1
    #[serde(default = "default_zoom_factor")]
    pub zoom_factor: f32,
    /// Distance moved per tick while an arrow key is held
    #[serde(default = "default_pan_step")]
    pub pan_step: f32,
}

fn default_zoom_factor() -> f32 {
    DEFAULT_ZOOM_FACTOR
}

fn default_pan_step() -> f32 {
    DEFAULT_PAN_STEP
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            pan_step: DEFAULT_PAN_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Upper bound on update loop ticks per second
    #[serde(default = "default_max_framerate")]
    pub max_framerate: f64,
}

fn default_max_framerate() -> f64 {
    DEFAULT_MAX_FRAMERATE
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            max_framerate: DEFAULT_MAX_FRAMERATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            camera: CameraConfig::default(),
            rendering: RenderingConfig::default(),
            keybindings: KeyBindings::default(),
            preferences: Preferences::default(),
        }
    }
}

impl ViewerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a config, rejecting newer formats and repairing bad numbers.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        config.sanitize();
        Ok(config)
    }

    fn sanitize(&mut self) {
        let camera = &mut self.camera;
        if !camera.zoom_factor.is_finite() || camera.zoom_factor <= 1.0 {
            log::warn!(
                "Config zoom factor {} must be above 1, using {}",
                camera.zoom_factor,
                DEFAULT_ZOOM_FACTOR
            );
            camera.zoom_factor = DEFAULT_ZOOM_FACTOR;
        }
        if !camera.pan_step.is_finite() || camera.pan_step <= 0.0 {
            log::warn!(
                "Config pan step {} must be positive, using {}",
                camera.pan_step,
                DEFAULT_PAN_STEP
            );
            camera.pan_step = DEFAULT_PAN_STEP;
        }

        self.keybindings.resolve_conflicts();

        let framerate = self.rendering.max_framerate;
        if !framerate.is_finite() || framerate <= 0.0 {
            log::warn!("Config max framerate {} must be positive, using 1", framerate);
            self.rendering.max_framerate = 1.0;
        }
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings::new(self.camera.zoom_factor, self.camera.pan_step, self.keybindings)
    }

    /// Time budget of one update loop tick.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rendering.max_framerate)
    }

    /// `<config dir>/bufview/bufview-config.json`, with `~/.config` standing
    /// in when the platform reports no config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Config read from {}", path.display());
        Ok(config)
    }

    /// Load the config at [`ViewerConfig::default_path`], or `None` when
    /// there is no usable file there.
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.is_file() {
            log::debug!("No config at {}", path.display());
            return None;
        }
        Self::load(&path)
            .map_err(|e| log::warn!("Ignoring config {}: {}", path.display(), e))
            .ok()
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Config written to {}", path.display());
        Ok(())
    }

    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save(&path)
    }
}
