//! The calibration print sequence.

use crate::builder::GcodeBuilder;
use pacal_core::{Error, Result};
use pacal_settings::Config;
use tracing::{debug, info};

/// Number of priming layers printed before the calibration tower.
const PRIMING_LAYERS: u32 = 2;

/// Number of nested contour passes per priming layer.
const PRIMING_PASSES: u32 = 5;

/// Generator for the pressure-advance calibration script.
///
/// The print is a tower: two solid priming layers for adhesion, then
/// one layer per pressure-advance step. Each calibration layer draws a
/// forward zig-zag alternating fast and slow feed, steps sideways by
/// one line width, and traces the same zig-zag back.
pub struct PaTestGenerator {
    config: Config,
}

impl PaTestGenerator {
    /// Create a generator, validating the configuration up front.
    pub fn new(config: Config) -> Result<Self> {
        config.validate().map_err(Error::Config)?;
        Ok(Self { config })
    }

    /// Generate the full G-code script.
    ///
    /// Output is a pure function of the configuration: identical
    /// configs produce byte-identical scripts.
    pub fn generate(&self) -> Result<String> {
        let c = &self.config;
        info!(
            layers = c.pattern.layers,
            advance_min = c.pressure_advance.min,
            advance_max = c.pressure_advance.max,
            "generating pressure advance calibration print"
        );

        let mut b = GcodeBuilder::new(self.config);

        b.start_print();
        b.relative_extrusion();
        b.initial_move();
        b.reset_extrusion("reset extrusion distance");

        self.priming_layers(&mut b);
        self.calibration_layers(&mut b);

        b.end_print();

        let head = b.head();
        let script = b.finish();
        info!(
            lines = script.lines().count(),
            final_z = head.z,
            "calibration script complete"
        );
        Ok(script)
    }

    /// Two solid first layers: nested picture-frame contours widening
    /// outward, giving the tower a brim to stick with.
    fn priming_layers(&self, b: &mut GcodeBuilder) {
        let ex = self.config.extrusion;
        let speed = self.config.speeds.first_layer;
        let width = self.config.pattern.object_width;

        // Travel to the left edge of the pattern.
        b.draw_line(-width / 2.0, 0.0, 0.0);

        for layer in 0..PRIMING_LAYERS {
            debug!(layer, "priming layer");
            for pass in 0..PRIMING_PASSES {
                let offset = pass as f64 * ex.width;
                b.draw_line(width + offset, 0.0, speed);
                b.draw_line(0.0, ex.width + offset * 2.0, speed);
                b.draw_line(-width - offset * 2.0, 0.0, speed);
                b.draw_line(0.0, -ex.width - offset * 2.0, speed);
                b.draw_line(offset, 0.0, speed);
                b.draw_line(0.0, -ex.width, 0.0);
            }
            self.finish_layer(b);
        }
    }

    /// The calibration tower: one pressure-advance step per layer.
    fn calibration_layers(&self, b: &mut GcodeBuilder) {
        let pattern = self.config.pattern;
        let speeds = self.config.speeds;
        let line_width = self.config.extrusion.width;
        let advance = self.config.pressure_advance;

        let segment = pattern.segment_width();
        let space = segment - pattern.pattern_width;

        for layer in 0..pattern.layers {
            let fraction = layer as f64 / pattern.layers as f64;
            let pa = advance.min + fraction * (advance.max - advance.min);
            debug!(layer, advance = pa, "calibration layer");
            b.set_pressure_advance(layer, pa);

            for _ in 0..pattern.num_patterns {
                b.draw_line(space / 2.0, 0.0, speeds.fast);
                b.draw_line(pattern.pattern_width, 0.0, speeds.slow);
                b.draw_line(space / 2.0, 0.0, speeds.fast);
            }
            b.draw_line(0.0, line_width, speeds.fast);

            for _ in 0..pattern.num_patterns {
                b.draw_line(-space / 2.0, 0.0, speeds.fast);
                b.draw_line(-pattern.pattern_width, 0.0, speeds.slow);
                b.draw_line(-space / 2.0, 0.0, speeds.fast);
            }
            b.draw_line(0.0, -line_width, speeds.fast);

            self.finish_layer(b);
            // finish_layer leaves the filament retracted; prime it
            // again before the next layer's zig-zag.
            b.deretract();
        }
    }

    /// End-of-layer housekeeping: retract, zero the extrusion counter,
    /// step up one layer, and travel back to the pattern's left edge.
    fn finish_layer(&self, b: &mut GcodeBuilder) {
        b.retract();
        b.reset_extrusion("reset extrusion distance");
        b.raise_layer();
        b.travel_to(-self.config.pattern.object_width / 2.0, 0.0);
        b.reset_extrusion("reset extrusion distance after move");
    }

    /// Final toolhead position for a given config, without generating
    /// text. Used by the binary to report the print height.
    pub fn final_height(&self) -> f64 {
        let layers = PRIMING_LAYERS + self.config.pattern.layers;
        self.config.extrusion.layer_height * (1 + layers) as f64
    }
}

/// Convenience wrapper: validate, generate, and return the script.
pub fn generate(config: Config) -> Result<String> {
    PaTestGenerator::new(config)?.generate()
}
