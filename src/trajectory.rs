//! Wheel and ball motion over the course of a spin, and reduction of the
//! final angles back to a pocket.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use crate::roulette::{SEGMENT_ANGLE, SEGMENT_COUNT};

/// Ball positions kept for the motion-blur trail.
pub const TRAIL_LEN: usize = 10;

/// Cubic ease-out: fast start, smooth stop.
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Fraction of the spin completed, clamped to `[0, 1]`.
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Returns `(wheel_angle, ball_angle)` after `elapsed_ms`.
pub fn sample(elapsed_ms: f64, duration_ms: f64, wheel_target: f64, ball_target: f64) -> (f64, f64) {
    let eased = ease_out(progress(elapsed_ms, duration_ms));
    (wheel_target * eased, ball_target * eased)
}

pub fn normalize(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Pocket under the ball, measured in the wheel's rotating frame.
pub fn resolve_landing(final_wheel: f64, final_ball: f64) -> usize {
    let relative = (normalize(final_ball) - normalize(final_wheel)).rem_euclid(TAU);
    let index = (relative / SEGMENT_ANGLE).floor() as i64;
    if index < 0 {
        SEGMENT_COUNT - 1
    } else if index >= SEGMENT_COUNT as i64 {
        // rem_euclid can round up to exactly TAU
        0
    } else {
        index as usize
    }
}

/// Recent ball angles, oldest first.
#[derive(Debug, Default, Clone)]
pub struct Trail {
    angles: VecDeque<f64>,
}

impl Trail {
    pub fn push(&mut self, ball_angle: f64) {
        if self.angles.len() == TRAIL_LEN {
            self.angles.pop_front();
        }
        self.angles.push_back(normalize(ball_angle));
    }

    pub fn clear(&mut self) {
        self.angles.clear();
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.angles.iter().copied().collect()
    }
}
