//! # Pacal G-code
//!
//! This crate generates the pressure-advance calibration toolpath:
//! a tower of zig-zag lines printed with alternating fast and slow
//! segments while the firmware's pressure-advance value is stepped
//! linearly from layer to layer. Reading the tower afterwards (the
//! layer with the cleanest speed transitions) gives the value to
//! configure.
//!
//! ## Modules
//!
//! - **flow**: conversion of planar travel distance into extruded
//!   filament length
//! - **builder**: G-code emission buffer with explicit toolhead state
//! - **generator**: the calibration print sequence

pub mod builder;
pub mod flow;
pub mod generator;

pub use builder::GcodeBuilder;
pub use flow::extrusion_for_length;
pub use generator::PaTestGenerator;
