//! Color wheel table service.
//!
//! Owns the single player's session: the [`RoundEngine`](colorwheel_execution::RoundEngine)
//! behind a mutex, the one-shot timers that move a spin through settlement and
//! reset, and a broadcast channel carrying every [`RoundEvent`](colorwheel_types::wheel::RoundEvent)
//! to presentation layers.

mod config;
mod session;

pub use config::TableConfig;
pub use session::TableSession;
