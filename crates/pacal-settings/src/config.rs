//! Configuration for the calibration print.
//!
//! Provides the structured configuration object for the generator,
//! validation, and JSON/TOML file handling.
//!
//! Configuration is organized into logical sections:
//! - Temperatures (hotend, bed)
//! - Bed geometry (size, origin convention)
//! - Extrusion geometry (line width, layer height, filament diameter)
//! - Print speeds
//! - Calibration pattern dimensions
//! - Pressure advance gradient
//! - Retraction

use pacal_core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hotend and bed temperatures (°C).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TemperatureSettings {
    /// Hotend (extruder) temperature
    pub hotend: u32,
    /// Bed temperature
    pub bed: u32,
}

impl Default for TemperatureSettings {
    fn default() -> Self {
        Self {
            hotend: 240,
            bed: 80,
        }
    }
}

/// Bed size and origin convention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BedSettings {
    /// True if the machine's bed center is (0, 0); false if the origin
    /// is a corner and the print must be centered using the bed size.
    pub center_is_zero: bool,
    /// Bed size X (mm), used only when `center_is_zero` is false
    pub size_x: f64,
    /// Bed size Y (mm), used only when `center_is_zero` is false
    pub size_y: f64,
}

impl BedSettings {
    /// XY offset that centers the pattern on the bed.
    pub fn offsets(&self) -> (f64, f64) {
        if self.center_is_zero {
            (0.0, 0.0)
        } else {
            (self.size_x / 2.0, self.size_y / 2.0)
        }
    }
}

impl Default for BedSettings {
    fn default() -> Self {
        Self {
            center_is_zero: false,
            size_x: 175.0,
            size_y: 175.0,
        }
    }
}

/// Extrusion cross-section geometry (mm).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExtrusionSettings {
    /// Extruded line width
    pub width: f64,
    /// Layer height
    pub layer_height: f64,
    /// Filament diameter
    pub filament_diameter: f64,
}

impl Default for ExtrusionSettings {
    fn default() -> Self {
        Self {
            width: 0.6,
            layer_height: 0.2,
            filament_diameter: 1.75,
        }
    }
}

/// Print speeds (mm/s).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedSettings {
    /// Non-printing travel speed
    pub travel: f64,
    /// Speed for the priming layers
    pub first_layer: f64,
    /// Slow segment speed within the calibration pattern
    pub slow: f64,
    /// Fast segment speed within the calibration pattern
    pub fast: f64,
}

impl Default for SpeedSettings {
    fn default() -> Self {
        Self {
            travel: 500.0,
            first_layer: 50.0,
            slow: 20.0,
            fast: 120.0,
        }
    }
}

/// Calibration object dimensions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PatternSettings {
    /// Number of calibration layers, one pressure-advance value each
    pub layers: u32,
    /// Total width of the printed object (mm)
    pub object_width: f64,
    /// Number of fast/slow transitions per calibration line
    pub num_patterns: u32,
    /// Width of each slow segment (mm)
    pub pattern_width: f64,
}

impl PatternSettings {
    /// Width of one fast/slow/fast repetition (mm).
    pub fn segment_width(&self) -> f64 {
        self.object_width / self.num_patterns as f64
    }
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self {
            layers: 100,
            object_width: 90.0,
            num_patterns: 4,
            pattern_width: 5.0,
        }
    }
}

/// Pressure advance gradient over the calibration layers (seconds).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PressureAdvanceSettings {
    /// Advance at the first calibration layer
    pub min: f64,
    /// Upper bound of the gradient, approached but never reached
    pub max: f64,
}

impl Default for PressureAdvanceSettings {
    fn default() -> Self {
        Self {
            min: 0.03,
            max: 0.05,
        }
    }
}

/// Retraction settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetractionSettings {
    /// Retraction distance (mm)
    pub length: f64,
    /// Retraction speed (mm/s)
    pub speed: f64,
}

impl Default for RetractionSettings {
    fn default() -> Self {
        Self {
            length: 0.5,
            speed: 30.0,
        }
    }
}

/// Complete calibration configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// The defaults reproduce the stock calibration print.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Config {
    /// Temperatures
    pub temperatures: TemperatureSettings,
    /// Bed geometry
    pub bed: BedSettings,
    /// Extrusion geometry
    pub extrusion: ExtrusionSettings,
    /// Print speeds
    pub speeds: SpeedSettings,
    /// Calibration pattern dimensions
    pub pattern: PatternSettings,
    /// Pressure advance gradient
    pub pressure_advance: PressureAdvanceSettings,
    /// Retraction
    pub retraction: RetractionSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnknownExtension(path.display().to_string()));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(ConfigError::UnknownExtension(path.display().to_string()));
        };

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// Rejects every value the generator would otherwise divide by or
    /// loop on, so generation itself cannot fault.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange {
                    name,
                    value,
                    reason: "must be positive and finite",
                })
            }
        }

        positive("extrusion.width", self.extrusion.width)?;
        positive("extrusion.layer_height", self.extrusion.layer_height)?;
        positive("extrusion.filament_diameter", self.extrusion.filament_diameter)?;

        positive("speeds.travel", self.speeds.travel)?;
        positive("speeds.first_layer", self.speeds.first_layer)?;
        positive("speeds.slow", self.speeds.slow)?;
        positive("speeds.fast", self.speeds.fast)?;

        positive("pattern.object_width", self.pattern.object_width)?;
        positive("pattern.pattern_width", self.pattern.pattern_width)?;
        if self.pattern.layers == 0 {
            return Err(ConfigError::OutOfRange {
                name: "pattern.layers",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.pattern.num_patterns == 0 {
            return Err(ConfigError::OutOfRange {
                name: "pattern.num_patterns",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.pattern.pattern_width > self.pattern.segment_width() {
            return Err(ConfigError::Incompatible(format!(
                "pattern_width {} exceeds the {} mm segment ({} patterns over {} mm)",
                self.pattern.pattern_width,
                self.pattern.segment_width(),
                self.pattern.num_patterns,
                self.pattern.object_width
            )));
        }

        if !self.bed.center_is_zero {
            positive("bed.size_x", self.bed.size_x)?;
            positive("bed.size_y", self.bed.size_y)?;
        }

        if self.pressure_advance.min < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "pressure_advance.min",
                value: self.pressure_advance.min,
                reason: "must not be negative",
            });
        }
        if self.pressure_advance.max < self.pressure_advance.min {
            return Err(ConfigError::Incompatible(format!(
                "pressure_advance.max {} is below pressure_advance.min {}",
                self.pressure_advance.max, self.pressure_advance.min
            )));
        }

        if self.retraction.length < 0.0 {
            return Err(ConfigError::OutOfRange {
                name: "retraction.length",
                value: self.retraction.length,
                reason: "must not be negative",
            });
        }
        positive("retraction.speed", self.retraction.speed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.temperatures.hotend, 240);
        assert_eq!(config.temperatures.bed, 80);
        assert_eq!(config.pattern.layers, 100);
        assert_eq!(config.pressure_advance.min, 0.03);
        assert_eq!(config.pressure_advance.max, 0.05);
    }

    #[test]
    fn test_zero_filament_diameter_rejected() {
        let mut config = Config::default();
        config.extrusion.filament_diameter = 0.0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                name: "extrusion.filament_diameter",
                ..
            }
        ));
    }

    #[test]
    fn test_inverted_advance_range_rejected() {
        let mut config = Config::default();
        config.pressure_advance.min = 0.08;
        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Incompatible(_)
        ));
    }

    #[test]
    fn test_pattern_wider_than_segment_rejected() {
        let mut config = Config::default();
        // 4 patterns over 90 mm leaves 22.5 mm per segment
        config.pattern.pattern_width = 30.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_offsets() {
        let mut config = Config::default();
        config.bed.size_x = 200.0;
        config.bed.size_y = 200.0;
        assert_eq!(config.bed.offsets(), (100.0, 100.0));

        config.bed.center_is_zero = true;
        assert_eq!(config.bed.offsets(), (0.0, 0.0));
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pacal.json");

        let mut config = Config::default();
        config.temperatures.hotend = 215;
        config.pattern.layers = 50;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.temperatures.hotend, 215);
        assert_eq!(loaded.pattern.layers, 50);
        assert_eq!(loaded.extrusion.filament_diameter, 1.75);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pacal.toml");

        let mut config = Config::default();
        config.speeds.fast = 150.0;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.speeds.fast, 150.0);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pacal.yaml");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            Config::load_from_file(&path).unwrap_err(),
            ConfigError::UnknownExtension(_)
        ));
    }

    #[test]
    fn test_invalid_file_content_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pacal.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::load_from_file(&path).unwrap_err(),
            ConfigError::JsonError(_)
        ));
    }
}
