//! Commits a spin's result before any frame is drawn.
//!
//! The winning pocket is chosen first; the wheel and ball targets are then
//! derived from it so that the animation can only ever land there.

use std::f64::consts::{FRAC_PI_2, TAU};

use crate::rng::FairRng;
use crate::roulette::{SEGMENT_ANGLE, SEGMENT_COUNT};

/// Visual reference for the top of the wheel.
pub const POINTER_ANGLE: f64 = -FRAC_PI_2;

/// Full wheel turns before the winning pocket is aligned.
pub const WHEEL_TURNS: f64 = 6.0;

/// Largest in-pocket offset, as a fraction of the pocket width.
pub const OFFSET_FRACTION: f64 = 0.35;

pub const MIN_BALL_ORBITS: f64 = 10.0;
pub const MAX_BALL_ORBITS: f64 = 12.0;

pub const MIN_DURATION_MS: f64 = 4200.0;
pub const MAX_DURATION_MS: f64 = 4800.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinPlan {
    pub winning_index: usize,
    pub offset: f64,
    pub ball_orbits: f64,
    pub duration_ms: f64,
    pub wheel_target: f64,
    pub ball_target: f64,
}

/// Draws every random quantity of a spin, in a fixed order.
pub fn commit<R: FairRng + ?Sized>(rng: &mut R) -> SpinPlan {
    let winning_index = rng.index_below(SEGMENT_COUNT);
    let max_offset = SEGMENT_ANGLE * OFFSET_FRACTION;
    let offset = rng.between(-max_offset, max_offset);
    let ball_orbits = rng.between(MIN_BALL_ORBITS, MAX_BALL_ORBITS);
    let duration_ms = rng.below(MIN_DURATION_MS, MAX_DURATION_MS);
    plan(winning_index, offset, ball_orbits, duration_ms)
}

/// Builds the targets for an already chosen pocket.
///
/// The ball runs backwards `ball_orbits` times and comes to rest at a fixed
/// table angle. The wheel then turns [`WHEEL_TURNS`] times plus whatever
/// brings the winning pocket (shifted by `offset`) under that rest angle, so
/// the ball's angle relative to the wheel is exactly the pocket angle.
pub fn plan(winning_index: usize, offset: f64, ball_orbits: f64, duration_ms: f64) -> SpinPlan {
    let pocket = winning_index as f64 * SEGMENT_ANGLE + SEGMENT_ANGLE / 2.0 + offset;
    let ball_target = -(TAU * ball_orbits) + pocket - POINTER_ANGLE;
    let alignment = (ball_target.rem_euclid(TAU) - pocket).rem_euclid(TAU);
    let wheel_target = TAU * WHEEL_TURNS + alignment;

    SpinPlan {
        winning_index,
        offset,
        ball_orbits,
        duration_ms,
        wheel_target,
        ball_target,
    }
}
