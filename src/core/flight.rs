use std::f64::consts::{FRAC_PI_2, PI};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::core::geometry::Point;
use crate::core::tuning::ShapeTuning;

/// Offset used to fake a previous point when the arc holds a single sample.
const SYNTHETIC_PREV_DY: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// `value` rescaled so `min..max` maps onto `0..1`, clamped.
    pub fn normalize(&self, value: f64) -> f64 {
        clamp01((value - self.min) / (self.max - self.min))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightLimits {
    pub speed: ParamRange,
    pub glide: ParamRange,
    pub turn: ParamRange,
    pub fade: ParamRange,
}

pub const FLIGHT_LIMITS: FlightLimits = FlightLimits {
    speed: ParamRange {
        min: 1.0,
        max: 14.0,
        step: 1.0,
    },
    glide: ParamRange {
        min: 1.0,
        max: 7.0,
        step: 1.0,
    },
    turn: ParamRange {
        min: -5.0,
        max: 1.0,
        step: 1.0,
    },
    fade: ParamRange {
        min: 0.0,
        max: 5.0,
        step: 1.0,
    },
};

/// The four flight numbers printed on a disc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlightParams {
    pub speed: f64,
    pub glide: f64,
    pub turn: f64,
    pub fade: f64,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            glide: 1.0,
            turn: 0.0,
            fade: 0.0,
        }
    }
}

impl FlightParams {
    pub fn new(speed: f64, glide: f64, turn: f64, fade: f64) -> Self {
        Self {
            speed,
            glide,
            turn,
            fade,
        }
    }

    /// Copy with every field pulled into its documented range.
    pub fn clamped(&self) -> Self {
        Self {
            speed: FLIGHT_LIMITS.speed.clamp(self.speed),
            glide: FLIGHT_LIMITS.glide.clamp(self.glide),
            turn: FLIGHT_LIMITS.turn.clamp(self.turn),
            fade: FLIGHT_LIMITS.fade.clamp(self.fade),
        }
    }
}

/// Ordered world-space flight path. Index 0 is the throw origin.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trajectory(Vec<Point>);

impl Trajectory {
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

impl Deref for Trajectory {
    type Target = [Point];

    fn deref(&self) -> &[Point] {
        &self.0
    }
}

impl From<Vec<Point>> for Trajectory {
    fn from(points: Vec<Point>) -> Self {
        Self(points)
    }
}

fn clamp01(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

/// Total forward reach as a fraction of the drawable length.
fn forward_reach(params: FlightParams, tuning: &ShapeTuning) -> f64 {
    let speed_n = FLIGHT_LIMITS.speed.normalize(params.speed);
    let glide_n = FLIGHT_LIMITS.glide.normalize(params.glide);

    let base = 0.5 + 0.45 * speed_n;
    let glide_boost = (1.0 - base) * (tuning.glide_gain * glide_n);
    (base + glide_boost).min(1.0)
}

/// Lateral direction of the turn arc. Understable (negative) turn drifts to +x.
fn turn_direction(turn: f64) -> f64 {
    if turn < 0.0 {
        1.0
    } else if turn > 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Lateral profile of the arc in `0..=1` units of amplitude.
fn arc_profile(u: f64, tuning: &ShapeTuning) -> f64 {
    let peak = tuning.peak_frac;
    if u <= peak {
        if peak <= 0.0 {
            return 1.0;
        }
        let s = ((u / peak) * FRAC_PI_2).sin();
        s * s
    } else {
        let t = ((u - peak) / (1.0 - peak)).powf(tuning.return_softness);
        let c = (t * FRAC_PI_2).cos();
        tuning.return_frac + (1.0 - tuning.return_frac) * c * c
    }
}

fn sample_turn_arc(
    reach: f64,
    direction: f64,
    turn: f64,
    tuning: &ShapeTuning,
) -> Vec<Point> {
    let sample_count = tuning.sample_count.max(1);
    let forward_total = reach * (1.0 - tuning.fade_length_frac);
    let magnitude = clamp01(turn.abs() / tuning.turn_mag_scale);
    let amplitude = tuning.turn_gain * magnitude * reach;

    (0..sample_count)
        .map(|i| {
            let u = if sample_count == 1 {
                0.0
            } else {
                i as f64 / (sample_count - 1) as f64
            };
            Point::new(
                amplitude * direction * arc_profile(u, tuning),
                u * forward_total,
            )
        })
        .collect()
}

/// Appends the fade spiral, continuing from the last arc point.
fn extend_with_fade(
    points: &mut Vec<Point>,
    reach: f64,
    direction: f64,
    fade: f64,
    tuning: &ShapeTuning,
) {
    let Some(&last) = points.last() else {
        return;
    };
    let fade_forward_total = reach - last.y;
    if fade_forward_total <= 0.0 {
        return;
    }

    let prev = if points.len() >= 2 {
        points[points.len() - 2]
    } else {
        Point::new(last.x, last.y - SYNTHETIC_PREV_DY)
    };
    let mut heading = (last.y - prev.y).atan2(last.x - prev.x);

    let steps = tuning.fade_steps();
    let ds = fade_forward_total / steps as f64;
    let strength = tuning.fade_strength(fade);

    let mut x = last.x;
    let mut y = last.y;
    points.reserve(steps);
    for i in 0..steps {
        let ramp = if steps > 1 {
            0.5 - 0.5 * (PI * i as f64 / (steps - 1) as f64).cos()
        } else {
            1.0
        };
        heading += direction * strength * ramp * ds;
        x += heading.cos() * ds;
        y += heading.sin() * ds;
        points.push(Point::new(x, y));
    }
}

pub fn compute_trajectory(params: FlightParams) -> Trajectory {
    compute_trajectory_with(params, &ShapeTuning::default())
}

pub fn compute_trajectory_with(params: FlightParams, tuning: &ShapeTuning) -> Trajectory {
    let reach = forward_reach(params, tuning);
    let direction = turn_direction(params.turn);

    let mut points = sample_turn_arc(reach, direction, params.turn, tuning);
    let arc_len = points.len();
    extend_with_fade(&mut points, reach, direction, params.fade, tuning);

    tracing::debug!(
        speed = params.speed,
        glide = params.glide,
        turn = params.turn,
        fade = params.fade,
        reach,
        arc_points = arc_len,
        total_points = points.len(),
        "computed trajectory"
    );

    Trajectory(points)
}

/// Mirror a path by negating each point's `y` coordinate.
pub fn mirror_lateral(trajectory: &Trajectory) -> Trajectory {
    trajectory
        .iter()
        .map(|p| Point::new(p.x, -p.y))
        .collect::<Vec<_>>()
        .into()
}
