//! Color wheel domain types.
//!
//! Defines the fixed wedge table, its layout geometry, bet/round state and the
//! events exchanged between the round engine and presentation layers.

mod constants;
mod error;
mod geometry;
mod round;
mod table;

pub use constants::*;
pub use error::*;
pub use geometry::*;
pub use round::*;
pub use table::*;

#[cfg(test)]
mod tests;
