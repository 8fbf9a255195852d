use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{RoundError, WEDGE_COUNT};

/// Betting color. Every wedge carries exactly one.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red = 0,
    White = 1,
    Blue = 2,
    Gold = 3,
}

impl Color {
    /// All colors in display order.
    pub const ALL: [Color; 4] = [Color::Red, Color::White, Color::Blue, Color::Gold];

    /// Position of the color in [`Color::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::White => "White",
            Color::Blue => "Blue",
            Color::Gold => "Gold",
        }
    }
}

impl TryFrom<u8> for Color {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::Red),
            1 => Ok(Color::White),
            2 => Ok(Color::Blue),
            3 => Ok(Color::Gold),
            _ => Err(()),
        }
    }
}

impl FromStr for Color {
    type Err = RoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Color::Red),
            "white" | "w" => Ok(Color::White),
            "blue" | "b" => Ok(Color::Blue),
            "gold" | "g" => Ok(Color::Gold),
            _ => Err(RoundError::UnknownColor(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segment of the wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wedge {
    pub color: Color,
    pub multiplier: u32,
}

impl Wedge {
    pub const fn new(color: Color, multiplier: u32) -> Self {
        Self { color, multiplier }
    }

    /// Text drawn on the wedge, e.g. `x20`.
    pub fn label(&self) -> String {
        format!("x{}", self.multiplier)
    }
}

/// The wheel, in layout order. Wedge `i` is centered at `i * SLICE_ANGLE_DEG`.
pub const WEDGE_TABLE: [Wedge; WEDGE_COUNT] = [
    Wedge::new(Color::Gold, 20),
    Wedge::new(Color::Red, 2),
    Wedge::new(Color::White, 3),
    Wedge::new(Color::Red, 2),
    Wedge::new(Color::White, 3),
    Wedge::new(Color::Blue, 2),
    Wedge::new(Color::Red, 3),
    Wedge::new(Color::White, 5),
    Wedge::new(Color::Red, 2),
    Wedge::new(Color::Blue, 5),
    Wedge::new(Color::White, 2),
    Wedge::new(Color::Red, 2),
    Wedge::new(Color::White, 4),
    Wedge::new(Color::Blue, 2),
    Wedge::new(Color::Red, 3),
    Wedge::new(Color::Blue, 2),
    Wedge::new(Color::White, 3),
    Wedge::new(Color::Red, 2),
    Wedge::new(Color::Blue, 3),
    Wedge::new(Color::Red, 2),
    Wedge::new(Color::Gold, 15),
    Wedge::new(Color::Red, 3),
    Wedge::new(Color::Blue, 2),
    Wedge::new(Color::Red, 3),
    Wedge::new(Color::White, 2),
    Wedge::new(Color::Blue, 3),
    Wedge::new(Color::Red, 2),
    Wedge::new(Color::White, 2),
    Wedge::new(Color::Blue, 4),
    Wedge::new(Color::White, 2),
    Wedge::new(Color::Red, 4),
    Wedge::new(Color::White, 2),
    Wedge::new(Color::Blue, 4),
    Wedge::new(Color::White, 3),
    Wedge::new(Color::Red, 2),
    Wedge::new(Color::Blue, 10),
    Wedge::new(Color::White, 2),
    Wedge::new(Color::Red, 3),
    Wedge::new(Color::White, 4),
    Wedge::new(Color::Red, 2),
];

/// All wedges in layout order.
pub fn wedges() -> &'static [Wedge] {
    &WEDGE_TABLE
}

/// Wedge at `index`, or `None` past the end of the wheel.
pub fn wedge(index: usize) -> Option<&'static Wedge> {
    WEDGE_TABLE.get(index)
}

/// Number of wedges painted `color`.
pub fn wedge_count(color: Color) -> usize {
    WEDGE_TABLE.iter().filter(|w| w.color == color).count()
}

/// Sum of multipliers over the wedges painted `color`.
pub fn multiplier_sum(color: Color) -> u32 {
    WEDGE_TABLE
        .iter()
        .filter(|w| w.color == color)
        .map(|w| w.multiplier)
        .sum()
}

/// Long-run return per unit staked on `color`.
///
/// A stake on `color` returns `stake * multiplier` when a wedge of that color
/// lands, so the expectation is the multiplier sum over the wheel size.
pub fn expected_return(color: Color) -> f64 {
    multiplier_sum(color) as f64 / WEDGE_COUNT as f64
}
