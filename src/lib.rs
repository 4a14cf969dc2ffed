//! # Pacal
//!
//! A pressure-advance calibration G-code generator for Klipper-style
//! 3D printer firmwares.
//!
//! ## Architecture
//!
//! Pacal is organized as a workspace with multiple crates:
//!
//! 1. **pacal-core** - Errors, unit conversion, toolhead position
//! 2. **pacal-settings** - Calibration configuration, JSON/TOML persistence
//! 3. **pacal-gcode** - Toolpath geometry and G-code emission
//! 4. **pacal** - Main binary that ties the crates together
//!
//! The generated script prints a tower of zig-zag lines with
//! alternating fast and slow segments; the firmware's pressure-advance
//! value steps linearly from layer to layer, so the height of the
//! cleanest layer identifies the value to configure.

pub use pacal_core::{ConfigError, Error, Result, Toolhead};
pub use pacal_gcode::{generator::generate, GcodeBuilder, PaTestGenerator};
pub use pacal_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    // Log to stderr so redirecting stdout never captures log lines.
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
