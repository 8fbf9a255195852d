//! Color wheel round engine.
//!
//! This crate contains the deterministic game logic: the bet ledger, outcome
//! selection, round phase scheduling and the [`RoundEngine`] that ties them
//! together. It performs no I/O and never reads the wall clock; the table
//! service owns timers and feeds the engine a monotonic millisecond clock.
//!
//! ## Minimal round (example)
//! ```rust
//! use colorwheel_execution::{PhaseConfig, RoundEngine, WheelSelector};
//! use colorwheel_types::wheel::{Color, RoundPhase};
//!
//! let mut engine = RoundEngine::with_selector(
//!     PhaseConfig::default(),
//!     500,
//!     WheelSelector::from_seed(7),
//! );
//! engine.place_bet(Color::Red, 10).unwrap();
//! engine.spin(0).unwrap();
//! engine.tick(4_500); // settle
//! assert_eq!(engine.phase(), RoundPhase::Settled);
//! engine.tick(7_500); // reset
//! assert_eq!(engine.phase(), RoundPhase::Idle);
//! assert_eq!(engine.total_staked(), 0);
//! ```

pub mod engine;
pub mod ledger;
pub mod outcome;
pub mod round_scheduler;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use engine::RoundEngine;
pub use ledger::BetLedger;
pub use outcome::{OutcomeSelector, SpinPlan, WheelSelector};
pub use round_scheduler::{PhaseConfig, RoundScheduler, TransitionResult};
