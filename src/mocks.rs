//! Test doubles for the frame source and the presentation boundary.

use anyhow::{anyhow, Result};

use crate::presenter::Presenter;
use crate::scheduler::FrameSource;
use crate::table::{Frame, Settlement};

/// Frames that arrive immediately, `step_ms` apart.
pub struct SteppedFrames {
    now: f64,
    step_ms: f64,
    requested: usize,
}

impl SteppedFrames {
    pub fn new(step_ms: f64) -> Self {
        SteppedFrames {
            now: 0.0,
            step_ms,
            requested: 0,
        }
    }

    pub fn requested(&self) -> usize {
        self.requested
    }
}

impl FrameSource for SteppedFrames {
    async fn next_frame(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step_ms;
        self.requested += 1;
        now
    }
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub frames: Vec<Frame>,
    pub outcomes: Vec<(Settlement, i64)>,
}

impl Presenter for RecordingPresenter {
    fn on_frame(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn on_outcome(&mut self, settlement: &Settlement, balance: i64) -> Result<()> {
        self.outcomes.push((*settlement, balance));
        Ok(())
    }
}

/// Fails every call, like a display that went away.
#[derive(Default)]
pub struct FailingPresenter {
    pub calls: usize,
}

impl Presenter for FailingPresenter {
    fn on_frame(&mut self, _frame: &Frame) -> Result<()> {
        self.calls += 1;
        Err(anyhow!("canvas unavailable"))
    }

    fn on_outcome(&mut self, _settlement: &Settlement, _balance: i64) -> Result<()> {
        self.calls += 1;
        Err(anyhow!("canvas unavailable"))
    }
}
