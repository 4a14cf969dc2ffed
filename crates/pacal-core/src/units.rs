//! Unit conversion utilities
//!
//! All lengths in pacal are millimeters and all configured speeds are
//! mm/s. G-code feedrates (`F` words) are mm/min, so every emitted
//! feedrate goes through the conversion here.

/// Convert a speed in mm/s to a G-code feedrate in mm/min.
pub fn to_mm_per_min(mm_per_sec: f64) -> f64 {
    mm_per_sec * 60.0
}

/// Format a speed in mm/s as an `F` word value (mm/min, no decimals).
///
/// Firmwares accept fractional feedrates but the generated script never
/// needs them, matching the whole-number `F` words of hand-written
/// calibration macros.
pub fn format_feedrate(mm_per_sec: f64) -> String {
    format!("{:.0}", to_mm_per_min(mm_per_sec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_mm_per_min() {
        assert_eq!(to_mm_per_min(500.0), 30000.0);
        assert_eq!(to_mm_per_min(0.5), 30.0);
    }

    #[test]
    fn test_format_feedrate() {
        assert_eq!(format_feedrate(500.0), "30000");
        assert_eq!(format_feedrate(50.0), "3000");
        assert_eq!(format_feedrate(30.0), "1800");
    }
}
