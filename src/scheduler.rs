//! Frame pacing for a spin.
//!
//! A spin is not a loop that sleeps: it asks a [`FrameSource`] for the next
//! repaint and advances the table once per frame until the ball lands.

use anyhow::Result;
use log::warn;
use std::time::Duration;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::presenter::Presenter;
use crate::rng::FairRng;
use crate::table::{FrameUpdate, Settlement, Table, Transition};

#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Waits for the next repaint and returns its timestamp in milliseconds.
    async fn next_frame(&mut self) -> f64;
}

/// Fixed-rate frames from a tokio interval.
pub struct IntervalFrames {
    interval: Interval,
    origin: Instant,
}

impl IntervalFrames {
    pub fn new(period_ms: u64) -> Self {
        let origin = Instant::now();
        let mut interval = time::interval_at(origin, Duration::from_millis(period_ms.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        IntervalFrames { interval, origin }
    }
}

impl FrameSource for IntervalFrames {
    async fn next_frame(&mut self) -> f64 {
        // a tick's deadline can be long stale after the prompt sat idle
        self.interval.tick().await;
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Starts a spin and runs it to completion. Returns `None` without drawing
/// anything when the table has no bet waiting.
pub async fn run_spin<R, F, P>(
    table: &mut Table<R>,
    frames: &mut F,
    presenter: &mut P,
) -> Option<Settlement>
where
    R: FairRng,
    F: FrameSource,
    P: Presenter,
{
    if table.start_spin() == Transition::Ignored {
        return None;
    }
    loop {
        let now = frames.next_frame().await;
        match table.advance(now)? {
            FrameUpdate::Moving(frame) => shown(presenter.on_frame(&frame), "frame"),
            FrameUpdate::Landed {
                last,
                settled,
                settlement,
            } => {
                shown(presenter.on_frame(&last), "frame");
                shown(presenter.on_frame(&settled), "landed frame");
                shown(presenter.on_outcome(&settlement, table.balance()), "outcome");
                return Some(settlement);
            }
        }
    }
}

/// Presentation never holds up the table.
fn shown(result: Result<()>, what: &str) {
    if let Err(err) = result {
        warn!("presenter failed to show {}: {:#}", what, err);
    }
}
