//! Common types used throughout the color wheel workspace.

pub mod wheel;

#[cfg(feature = "root-reexports")]
pub use wheel::*;
