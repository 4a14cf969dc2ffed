//! # Pacal Core
//!
//! Core types, errors, and unit helpers shared by the pacal crates.
//! Provides the fundamental abstractions for configuration validation,
//! toolhead position tracking, and feedrate conversion.

pub mod error;
pub mod position;
pub mod units;

pub use error::{ConfigError, Error, Result};
pub use position::Toolhead;
pub use units::{format_feedrate, to_mm_per_min};
