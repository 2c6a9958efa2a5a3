//! The two callbacks the table reports through, and a terminal rendition.

use anyhow::Result;
use std::io::Write;

use crate::roulette::{SEGMENT_ANGLE, SEGMENT_COUNT};
use crate::table::{Frame, Settlement};
use crate::trajectory::resolve_landing;

pub trait Presenter {
    /// Draws one frame. Called every animation frame and once more with the
    /// landed pocket highlighted.
    fn on_frame(&mut self, frame: &Frame) -> Result<()>;

    /// Reports the settled bet. Called exactly once per spin.
    fn on_outcome(&mut self, settlement: &Settlement, balance: i64) -> Result<()>;
}

/// `$20`, or `-$20` below zero.
pub fn format_money(amount: i64) -> String {
    if amount < 0 {
        format!("-${}", amount.unsigned_abs())
    } else {
        format!("${}", amount)
    }
}

/// One line per frame: the pockets as seen from the rotating wheel, with the
/// ball, its trail and any highlighted pocket.
pub fn render_ring(frame: &Frame) -> String {
    let mut ring = vec!['.'; SEGMENT_COUNT];
    for (i, angle) in frame.trail.iter().enumerate() {
        // newer samples draw over older ones
        let mark = if i * 2 < frame.trail.len() { ':' } else { '*' };
        ring[resolve_landing(frame.wheel_angle, *angle)] = mark;
    }
    ring[resolve_landing(frame.wheel_angle, frame.ball_angle)] = 'o';

    let mut line = String::with_capacity(SEGMENT_COUNT + 32);
    line.push('|');
    for (index, mark) in ring.iter().enumerate() {
        if frame.highlighted == Some(index) {
            line.push('[');
            line.push(*mark);
            line.push(']');
        } else {
            line.push(*mark);
        }
    }
    line.push('|');
    line.push_str(&format!(
        " wheel {:>3.0}° ball {:>3.0}°",
        frame.wheel_angle.to_degrees(),
        frame.ball_angle.to_degrees()
    ));
    line
}

pub struct TerminalPresenter<W> {
    out: W,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        TerminalPresenter { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn on_frame(&mut self, frame: &Frame) -> Result<()> {
        write!(self.out, "\r{}", render_ring(frame))?;
        if let Some(index) = frame.highlighted {
            let center = (index as f64 + 0.5) * SEGMENT_ANGLE;
            writeln!(self.out, "  <- {} ({:.0}°)", index, center.to_degrees())?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn on_outcome(&mut self, settlement: &Settlement, balance: i64) -> Result<()> {
        let landed = settlement.landed();
        writeln!(self.out, "Winning number: {} ({})", landed.number, landed.color)?;
        match settlement {
            Settlement::Won { payout, .. } => {
                writeln!(self.out, "You won {}!", format_money(*payout))?
            }
            Settlement::Lost { stake, .. } => {
                writeln!(self.out, "You lost {}.", format_money(*stake))?
            }
        }
        writeln!(self.out, "Balance: {}", format_money(balance))?;
        self.out.flush()?;
        Ok(())
    }
}
