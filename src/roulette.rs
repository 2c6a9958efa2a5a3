use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::bet::BetError;

pub const SEGMENT_COUNT: usize = 37;

/// Angular width of one pocket.
pub const SEGMENT_ANGLE: f64 = TAU / SEGMENT_COUNT as f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
    Black,
}

impl Color {
    pub fn of(number: u8) -> Self {
        if number == 0 {
            Color::Green
        } else if number % 2 == 1 {
            Color::Red
        } else {
            Color::Black
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Green => "green",
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = BetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(Color::Green),
            "red" => Ok(Color::Red),
            "black" => Ok(Color::Black),
            other => Err(BetError::UnknownColor(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub number: u8,
    pub color: Color,
}

/// The 37 pockets in wheel order. Pocket `i` carries the number `i`.
pub struct Wheel {
    pub segments: Vec<Segment>,
}

impl Wheel {
    pub fn new() -> Self {
        Wheel {
            segments: (0..SEGMENT_COUNT as u8)
                .map(|number| Segment {
                    number,
                    color: Color::of(number),
                })
                .collect(),
        }
    }

    /// Panics if `index` is not a valid pocket; landing always yields one.
    pub fn segment(&self, index: usize) -> Segment {
        self.segments[index]
    }
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new()
    }
}
