//! Pacal Settings Crate
//!
//! Handles the calibration configuration: defaults, validation, and
//! persistence to JSON or TOML files.

pub mod config;

pub use config::{
    BedSettings, Config, ExtrusionSettings, PatternSettings, PressureAdvanceSettings,
    RetractionSettings, SpeedSettings, TemperatureSettings,
};
