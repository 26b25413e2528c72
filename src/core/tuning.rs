//! Curve-shape constants for the flight model.
//!
//! Everything that controls the "feel" of a generated path lives in
//! [`ShapeTuning`], so the shape can be adjusted without touching the
//! algorithm in `flight.rs`.

use serde::{Deserialize, Serialize};

pub const SAMPLE_COUNT: usize = 200;
pub const GLIDE_GAIN: f64 = 0.5;
pub const FADE_LENGTH_FRAC: f64 = 0.4;
pub const TURN_GAIN: f64 = 0.08;
pub const TURN_MAG_SCALE: f64 = 5.0;
pub const PEAK_FRAC: f64 = 0.95;
pub const RETURN_FRAC: f64 = 0.95;
pub const RETURN_SOFTNESS: f64 = 2.2;
pub const FADE_BASE_CURVE: f64 = 3.0;
pub const FADE_PER_UNIT: f64 = 1.15;
pub const FADE_MIN_STEPS: usize = 24;
pub const FADE_STEPS_PER_FRAC: f64 = 160.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeTuning {
    /// Points sampled along the turn arc, origin included.
    pub sample_count: usize,
    /// Share of the remaining reach (up to 1.0) that full glide adds.
    pub glide_gain: f64,
    /// Fraction of total forward reach spent in the fade phase.
    pub fade_length_frac: f64,
    /// Peak lateral excursion per unit of forward reach at full turn.
    pub turn_gain: f64,
    /// `|turn|` value that counts as full turn magnitude.
    pub turn_mag_scale: f64,
    /// Arc progress at which the lateral excursion peaks.
    pub peak_frac: f64,
    /// Fraction of the peak excursion still held at the end of the arc.
    pub return_frac: f64,
    /// Exponent applied to post-peak progress; larger is a slower return.
    pub return_softness: f64,
    /// Fade curvature at `fade == 0`.
    pub fade_base_curve: f64,
    /// Extra fade curvature per unit of `fade`.
    pub fade_per_unit: f64,
    pub fade_min_steps: usize,
    pub fade_steps_per_frac: f64,
}

impl Default for ShapeTuning {
    fn default() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            glide_gain: GLIDE_GAIN,
            fade_length_frac: FADE_LENGTH_FRAC,
            turn_gain: TURN_GAIN,
            turn_mag_scale: TURN_MAG_SCALE,
            peak_frac: PEAK_FRAC,
            return_frac: RETURN_FRAC,
            return_softness: RETURN_SOFTNESS,
            fade_base_curve: FADE_BASE_CURVE,
            fade_per_unit: FADE_PER_UNIT,
            fade_min_steps: FADE_MIN_STEPS,
            fade_steps_per_frac: FADE_STEPS_PER_FRAC,
        }
    }
}

impl ShapeTuning {
    /// Number of integration steps in the fade phase.
    pub fn fade_steps(&self) -> usize {
        let scaled = (self.fade_steps_per_frac * self.fade_length_frac)
            .round()
            .max(0.0) as usize;
        scaled.max(self.fade_min_steps)
    }

    /// Fade curvature for a given `fade` input; negative input counts as zero.
    pub fn fade_strength(&self, fade: f64) -> f64 {
        self.fade_base_curve + self.fade_per_unit * fade.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::ShapeTuning;

    #[test]
    fn default_fade_step_count() {
        assert_eq!(ShapeTuning::default().fade_steps(), 64);
    }

    #[test]
    fn short_fade_uses_minimum_steps() {
        let tuning = ShapeTuning {
            fade_length_frac: 0.05,
            ..ShapeTuning::default()
        };
        assert_eq!(tuning.fade_steps(), 24);
    }

    #[test]
    fn fade_strength_ignores_negative_fade() {
        let tuning = ShapeTuning::default();
        assert_eq!(tuning.fade_strength(-3.0), 3.0);
        assert_eq!(tuning.fade_strength(0.0), 3.0);
        assert!((tuning.fade_strength(2.0) - 5.3).abs() < 1e-12);
    }
}
