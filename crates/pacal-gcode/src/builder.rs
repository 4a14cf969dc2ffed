//! G-code emission with explicit toolhead state.
//!
//! `GcodeBuilder` owns the output buffer and the current toolhead
//! position. Every move-emitting method updates the position first and
//! then writes the absolute coordinates, so the emitted script and the
//! tracked state can never disagree.

use crate::flow::extrusion_for_length;
use pacal_core::units::format_feedrate;
use pacal_core::Toolhead;
use pacal_settings::Config;

/// Builds the calibration script line by line.
pub struct GcodeBuilder {
    config: Config,
    offset_x: f64,
    offset_y: f64,
    head: Toolhead,
    buffer: String,
}

impl GcodeBuilder {
    /// Create a builder positioned at the centered start point of the
    /// first layer.
    pub fn new(config: Config) -> Self {
        let (offset_x, offset_y) = config.bed.offsets();
        Self {
            config,
            offset_x,
            offset_y,
            head: Toolhead::new(offset_x, offset_y, config.extrusion.layer_height),
            buffer: String::new(),
        }
    }

    /// Current toolhead position.
    pub fn head(&self) -> Toolhead {
        self.head
    }

    /// Append one raw command line.
    pub fn emit(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// Consume the builder and return the finished script.
    pub fn finish(self) -> String {
        self.buffer
    }

    /// `START_PRINT` macro with the configured temperatures.
    pub fn start_print(&mut self) {
        let t = self.config.temperatures;
        self.emit(&format!(
            "START_PRINT BED_TEMP={} EXTRUDER_TEMP={}",
            t.bed, t.hotend
        ));
    }

    /// Put the extruder into relative distance mode.
    pub fn relative_extrusion(&mut self) {
        self.emit("M83 ; extruder relative mode");
    }

    /// Zero the firmware's extrusion distance counter.
    pub fn reset_extrusion(&mut self, note: &str) {
        self.emit(&format!("G92 E0 ; {}", note));
    }

    /// Initial travel to the tracked start position, including Z.
    pub fn initial_move(&mut self) {
        let line = format!(
            "G1 X{:.3} Y{:.3} Z{:.3} F{}",
            self.head.x,
            self.head.y,
            self.head.z,
            format_feedrate(self.config.speeds.travel)
        );
        self.emit(&line);
    }

    /// Relative move by (dx, dy).
    ///
    /// A positive `speed` (mm/s) prints the move, extruding filament
    /// proportional to the planar distance. A zero or negative speed
    /// emits a travel move at the configured travel speed, with no
    /// extrusion.
    pub fn draw_line(&mut self, dx: f64, dy: f64, speed: f64) {
        let length = Toolhead::planar_length(dx, dy);
        self.head.advance(dx, dy);
        let line = if speed > 0.0 {
            let extrude = extrusion_for_length(length, &self.config.extrusion);
            format!(
                "G1 X{:.3} Y{:.3} E{:.4} F{}",
                self.head.x,
                self.head.y,
                extrude,
                format_feedrate(speed)
            )
        } else {
            format!(
                "G1 X{:.3} Y{:.3} F{}",
                self.head.x,
                self.head.y,
                format_feedrate(self.config.speeds.travel)
            )
        };
        self.emit(&line);
    }

    /// Absolute move to (x, y) in pattern coordinates; the bed
    /// centering offset is applied here. No extrusion, no feedrate.
    pub fn travel_to(&mut self, x: f64, y: f64) {
        self.head.x = x + self.offset_x;
        self.head.y = y + self.offset_y;
        let line = format!("G1 X{:.3} Y{:.3}", self.head.x, self.head.y);
        self.emit(&line);
    }

    /// Step up one layer, then push the retracted filament back.
    pub fn raise_layer(&mut self) {
        self.head.raise(self.config.extrusion.layer_height);
        let line = format!("G1 Z{:.3}", self.head.z);
        self.emit(&line);
        self.deretract();
    }

    /// Pull filament back to stop oozing during travel.
    pub fn retract(&mut self) {
        let r = self.config.retraction;
        self.emit(&format!(
            "G1 E-{:.3} F{} ; retract",
            r.length,
            format_feedrate(r.speed)
        ));
    }

    /// Undo a retraction before printing resumes.
    pub fn deretract(&mut self) {
        let r = self.config.retraction;
        self.emit(&format!(
            "G1 E{:.3} F{} ; detract",
            r.length,
            format_feedrate(r.speed)
        ));
    }

    /// `SET_PRESSURE_ADVANCE` macro, with a leading comment naming the
    /// layer it applies to.
    pub fn set_pressure_advance(&mut self, layer: u32, advance: f64) {
        self.emit(&format!(
            "; layer {}, pressure advance: {:.3}",
            layer, advance
        ));
        self.emit(&format!("SET_PRESSURE_ADVANCE ADVANCE={:.3}", advance));
    }

    /// `END_PRINT` macro.
    pub fn end_print(&mut self) {
        self.emit("END_PRINT");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered_builder() -> GcodeBuilder {
        let mut config = Config::default();
        config.bed.center_is_zero = true;
        GcodeBuilder::new(config)
    }

    #[test]
    fn test_draw_line_updates_cursor_regardless_of_speed() {
        let mut b = centered_builder();
        b.draw_line(10.0, 5.0, 120.0);
        assert_eq!(b.head().x, 10.0);
        assert_eq!(b.head().y, 5.0);

        b.draw_line(-4.0, 2.0, 0.0);
        assert_eq!(b.head().x, 6.0);
        assert_eq!(b.head().y, 7.0);
    }

    #[test]
    fn test_printing_move_carries_extrusion_and_speed() {
        let mut b = centered_builder();
        b.draw_line(10.0, 0.0, 120.0);
        let script = b.finish();
        assert_eq!(script, "G1 X10.000 Y0.000 E0.4989 F7200\n");
    }

    #[test]
    fn test_travel_move_has_no_extrusion() {
        let mut b = centered_builder();
        b.draw_line(10.0, 0.0, 0.0);
        let script = b.finish();
        assert_eq!(script, "G1 X10.000 Y0.000 F30000\n");
    }

    #[test]
    fn test_travel_to_applies_bed_offset() {
        let mut config = Config::default();
        config.bed.size_x = 200.0;
        config.bed.size_y = 200.0;
        let mut b = GcodeBuilder::new(config);
        b.travel_to(-45.0, 0.0);
        assert_eq!(b.head().x, 55.0);
        assert_eq!(b.head().y, 100.0);
        assert_eq!(b.finish(), "G1 X55.000 Y100.000\n");
    }

    #[test]
    fn test_raise_layer_steps_z_and_deretracts() {
        let mut b = centered_builder();
        let z0 = b.head().z;
        b.raise_layer();
        assert!((b.head().z - (z0 + 0.2)).abs() < 1e-12);
        let script = b.finish();
        assert_eq!(script, "G1 Z0.400\nG1 E0.500 F1800 ; detract\n");
    }

    #[test]
    fn test_retract_line_format() {
        let mut b = centered_builder();
        b.retract();
        assert_eq!(b.finish(), "G1 E-0.500 F1800 ; retract\n");
    }

    #[test]
    fn test_set_pressure_advance_format() {
        let mut b = centered_builder();
        b.set_pressure_advance(0, 0.03);
        let script = b.finish();
        assert_eq!(
            script,
            "; layer 0, pressure advance: 0.030\nSET_PRESSURE_ADVANCE ADVANCE=0.030\n"
        );
    }

    #[test]
    fn test_start_print_temperatures() {
        let mut b = centered_builder();
        b.start_print();
        assert_eq!(b.finish(), "START_PRINT BED_TEMP=80 EXTRUDER_TEMP=240\n");
    }
}
