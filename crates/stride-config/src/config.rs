//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level controller configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Locomotion and mode-switch tuning.
    pub controller: ControllerConfig,
    /// Third-person orbit zoom (also used while in parkour context).
    pub tpp_zoom: OrbitZoomConfig,
    /// Climbing orbit zoom.
    pub climb_zoom: OrbitZoomConfig,
    /// Delayed body show/hide on mode change.
    pub visibility: VisibilityConfig,
    /// Parkour proximity detection.
    pub parkour: ParkourConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Locomotion and mode-switch tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    /// Probe height handed to the ground detector, in meters.
    pub step_height: f32,
    /// Approximate time in seconds to turn toward the input direction.
    pub turn_smooth_time: f32,
    /// First-person yaw speed in degrees per second per unit of mouse X.
    pub fpp_mouse_sensitivity: f32,
    /// Seconds to hold at minimum zoom before another zoom-in enters first person.
    pub fpp_transition_delay: f32,
}

/// Orbit camera zoom limits and speed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrbitZoomConfig {
    /// Scroll-to-radius scale factor.
    pub zoom_speed: f32,
    /// Closest orbit radius in meters.
    pub min_radius: f32,
    /// Farthest orbit radius in meters.
    pub max_radius: f32,
}

/// Delays applied before the character body is shown or hidden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Seconds before the body appears after a show request.
    pub show_delay: f32,
    /// Seconds before the body disappears after a hide request.
    pub hide_delay: f32,
}

/// Parkour proximity probe settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParkourConfig {
    /// Sphere radius around the character in meters.
    pub detection_radius: f32,
    /// Layer bitmask of objects the probe considers.
    pub layer_mask: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every change of control mode or coordinator flags.
    pub state_watcher: bool,
}

// --- Default implementations ---

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            step_height: 0.8,
            turn_smooth_time: 0.1,
            fpp_mouse_sensitivity: 100.0,
            fpp_transition_delay: 1.0,
        }
    }
}

impl Default for OrbitZoomConfig {
    fn default() -> Self {
        Self {
            zoom_speed: 1.0,
            min_radius: 1.0,
            max_radius: 6.0,
        }
    }
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            show_delay: 0.2,
            hide_delay: 1.7,
        }
    }
}

impl Default for ParkourConfig {
    fn default() -> Self {
        Self {
            detection_radius: 5.0,
            layer_mask: u32::MAX,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            state_watcher: true,
        }
    }
}

// --- Validation ---

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a finite, non-negative number, got {value}"),
        })
    }
}

impl OrbitZoomConfig {
    fn validate(&self, section: [&'static str; 3]) -> Result<(), ConfigError> {
        non_negative(section[0], self.zoom_speed)?;
        non_negative(section[1], self.min_radius)?;
        non_negative(section[2], self.max_radius)?;
        if self.min_radius > self.max_radius {
            return Err(ConfigError::Invalid {
                field: section[1],
                reason: format!(
                    "min_radius {} exceeds max_radius {}",
                    self.min_radius, self.max_radius
                ),
            });
        }
        Ok(())
    }
}

impl Config {
    /// Check that every numeric setting is usable by the controller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("controller.step_height", self.controller.step_height)?;
        non_negative("controller.turn_smooth_time", self.controller.turn_smooth_time)?;
        non_negative(
            "controller.fpp_transition_delay",
            self.controller.fpp_transition_delay,
        )?;
        if !self.controller.fpp_mouse_sensitivity.is_finite() {
            return Err(ConfigError::Invalid {
                field: "controller.fpp_mouse_sensitivity",
                reason: "must be finite".to_string(),
            });
        }
        self.tpp_zoom.validate([
            "tpp_zoom.zoom_speed",
            "tpp_zoom.min_radius",
            "tpp_zoom.max_radius",
        ])?;
        self.climb_zoom.validate([
            "climb_zoom.zoom_speed",
            "climb_zoom.min_radius",
            "climb_zoom.max_radius",
        ])?;
        non_negative("visibility.show_delay", self.visibility.show_delay)?;
        non_negative("visibility.hide_delay", self.visibility.hide_delay)?;
        non_negative("parkour.detection_radius", self.parkour.detection_radius)?;
        Ok(())
    }

    /// Platform config directory for Stride (`<config_dir>/stride`), if one exists.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stride"))
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            config.validate()?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        new_config.validate()?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
