//! Extrusion flow math.

use pacal_settings::ExtrusionSettings;
use std::f64::consts::PI;

/// Filament length to extrude for a planar move of `length` mm.
///
/// The extruded bead is modeled as a rectangle of `width` ×
/// `layer_height`; the feed distance is the bead volume divided by the
/// filament cross-section. Pure arithmetic; callers guarantee a
/// positive filament diameter (enforced by `Config::validate`).
pub fn extrusion_for_length(length: f64, extrusion: &ExtrusionSettings) -> f64 {
    let bead_area = extrusion.width * extrusion.layer_height;
    let filament_area = PI * (extrusion.filament_diameter / 2.0).powi(2);
    bead_area * length / filament_area
}
