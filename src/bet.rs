use std::fmt;
use thiserror::Error;

use crate::roulette::{Color, Segment, SEGMENT_COUNT};

/// Straight-up bets pay a flat 100x the stake.
pub const NUMBER_MULTIPLIER: i64 = 100;
pub const COLOR_MULTIPLIER: i64 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BetError {
    #[error("stake must be a whole number, got '{0}'")]
    NotANumber(String),
    #[error("stake must be positive, got {0}")]
    NonPositiveStake(i64),
    #[error("no pocket numbered {0} (pick 0-36)")]
    NoSuchNumber(u8),
    #[error("unknown color '{0}' (pick red, black or green)")]
    UnknownColor(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Number(u8),
    Color(Color),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Number(number) => write!(f, "number {}", number),
            Selection::Color(color) => write!(f, "{}", color),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bet {
    pub selection: Selection,
    pub stake: i64,
}

impl Bet {
    pub fn new(selection: Selection, stake: i64) -> Result<Self, BetError> {
        if stake <= 0 {
            return Err(BetError::NonPositiveStake(stake));
        }
        if let Selection::Number(number) = selection {
            if number as usize >= SEGMENT_COUNT {
                return Err(BetError::NoSuchNumber(number));
            }
        }
        Ok(Bet { selection, stake })
    }

    /// Validates a stake as typed by the player.
    pub fn from_input(selection: Selection, stake: &str) -> Result<Self, BetError> {
        let stake = stake
            .trim()
            .parse::<i64>()
            .map_err(|_| BetError::NotANumber(stake.to_string()))?;
        Self::new(selection, stake)
    }

    pub fn wins(&self, landed: Segment) -> bool {
        match self.selection {
            Selection::Number(number) => number == landed.number,
            Selection::Color(color) => color == landed.color,
        }
    }

    fn multiplier(&self) -> i64 {
        match self.selection {
            Selection::Number(_) => NUMBER_MULTIPLIER,
            Selection::Color(_) => COLOR_MULTIPLIER,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetOutcome {
    pub won: bool,
    /// Credited on a win, on top of the stake already taken. Zero on a loss.
    pub payout: i64,
}

pub fn resolve(bet: &Bet, landed: Segment) -> BetOutcome {
    if bet.wins(landed) {
        BetOutcome {
            won: true,
            payout: bet.stake.saturating_mul(bet.multiplier()),
        }
    } else {
        BetOutcome {
            won: false,
            payout: 0,
        }
    }
}
