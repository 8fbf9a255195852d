//! Round scheduler state machine for the wheel.
//!
//! This module holds the phase transition logic and timing calculations for a
//! round, separately from the ledger and from whatever clock drives it.
//!
//! ## Phases
//!
//! A round cycles through three phases:
//! 1. **Idle** - Bets may be placed or cleared; waits for an explicit spin
//! 2. **Spinning** - Outcome chosen, bets frozen, wheel in motion
//! 3. **Settled** - Outcome revealed and paid, shown until the display period ends
//!
//! ## Clock
//!
//! All times are milliseconds on a caller-supplied monotonic clock. Deadlines
//! are anchored on the previous deadline, so a late tick still yields the same
//! schedule as an on-time one.
//!
//! ## Usage
//!
//! ```rust
//! use colorwheel_execution::round_scheduler::{PhaseConfig, RoundScheduler, TransitionResult};
//! use colorwheel_types::wheel::RoundPhase;
//!
//! let scheduler = RoundScheduler::new(PhaseConfig::new(4_500, 3_000));
//! let spin_ends = scheduler.spin_phase_timing(1_000);
//! assert_eq!(spin_ends, 5_500);
//!
//! assert_eq!(
//!     scheduler.check_transition(RoundPhase::Spinning, Some(spin_ends), 5_500),
//!     TransitionResult::TransitionTo {
//!         phase: RoundPhase::Settled,
//!         phase_ends_at_ms: Some(8_500),
//!     }
//! );
//! ```

use colorwheel_types::wheel::{RoundPhase, DISPLAY_DURATION_MS, SPIN_DURATION_MS};
use serde::{Deserialize, Serialize};

/// Phase configuration with durations in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// How long the wheel spins before the outcome is revealed.
    pub spin_ms: u64,
    /// How long the settled outcome is displayed before the round resets.
    pub display_ms: u64,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self::new(SPIN_DURATION_MS, DISPLAY_DURATION_MS)
    }
}

impl PhaseConfig {
    pub fn new(spin_ms: u64, display_ms: u64) -> Self {
        Self { spin_ms, display_ms }
    }

    /// Validate the configuration (all durations must be > 0).
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.spin_ms == 0 {
            return Err("spin_ms must be greater than zero");
        }
        if self.display_ms == 0 {
            return Err("display_ms must be greater than zero");
        }
        Ok(())
    }

    /// Get the duration for a specific phase. Idle has no deadline.
    pub fn duration_for_phase(&self, phase: RoundPhase) -> Option<u64> {
        match phase {
            RoundPhase::Idle => None,
            RoundPhase::Spinning => Some(self.spin_ms),
            RoundPhase::Settled => Some(self.display_ms),
        }
    }

    /// Time from a successful spin until the table is open again.
    pub fn total_round_duration_ms(&self) -> u64 {
        self.spin_ms.saturating_add(self.display_ms)
    }
}

/// Result of a phase transition check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionResult {
    /// No transition needed, remain in current phase.
    NoTransition,
    /// Transition to the specified phase with its deadline (none for Idle).
    TransitionTo {
        phase: RoundPhase,
        phase_ends_at_ms: Option<u64>,
    },
}

/// Pure state machine for round phase timing.
#[derive(Clone, Debug, Default)]
pub struct RoundScheduler {
    config: PhaseConfig,
}

impl RoundScheduler {
    pub fn new(config: PhaseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PhaseConfig {
        &self.config
    }

    /// Phase that follows `phase` when its timer fires.
    ///
    /// Returns `None` for Idle, which only leaves on an explicit spin.
    pub fn next_phase(phase: RoundPhase) -> Option<RoundPhase> {
        match phase {
            RoundPhase::Idle => None,
            RoundPhase::Spinning => Some(RoundPhase::Settled),
            RoundPhase::Settled => Some(RoundPhase::Idle),
        }
    }

    /// Check if a timed transition out of `current_phase` is due.
    pub fn check_transition(
        &self,
        current_phase: RoundPhase,
        phase_ends_at_ms: Option<u64>,
        now_ms: u64,
    ) -> TransitionResult {
        let Some(ends_at) = phase_ends_at_ms else {
            return TransitionResult::NoTransition;
        };
        if now_ms < ends_at {
            return TransitionResult::NoTransition;
        }
        let Some(next_phase) = Self::next_phase(current_phase) else {
            return TransitionResult::NoTransition;
        };

        let next_ends_at = self
            .config
            .duration_for_phase(next_phase)
            .map(|duration| ends_at.saturating_add(duration));
        TransitionResult::TransitionTo {
            phase: next_phase,
            phase_ends_at_ms: next_ends_at,
        }
    }

    /// Bets may change only while Idle.
    pub fn is_betting_open(&self, current_phase: RoundPhase) -> bool {
        matches!(current_phase, RoundPhase::Idle)
    }

    /// Deadline of the Spinning phase for a spin started at `now_ms`.
    pub fn spin_phase_timing(&self, now_ms: u64) -> u64 {
        now_ms.saturating_add(self.config.spin_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PhaseConfig {
        PhaseConfig {
            spin_ms: 4_500,
            display_ms: 3_000,
        }
    }

    #[test]
    fn test_phase_config_defaults() {
        assert_eq!(PhaseConfig::default(), test_config());
    }

    #[test]
    fn test_phase_config_validation() {
        let valid = test_config();
        assert!(valid.validate().is_ok());

        let invalid_spin = PhaseConfig { spin_ms: 0, ..valid };
        assert!(invalid_spin.validate().is_err());

        let invalid_display = PhaseConfig { display_ms: 0, ..valid };
        assert!(invalid_display.validate().is_err());
    }

    #[test]
    fn test_phase_config_duration_for_phase() {
        let config = test_config();
        assert_eq!(config.duration_for_phase(RoundPhase::Idle), None);
        assert_eq!(config.duration_for_phase(RoundPhase::Spinning), Some(4_500));
        assert_eq!(config.duration_for_phase(RoundPhase::Settled), Some(3_000));
        assert_eq!(config.total_round_duration_ms(), 7_500);
    }

    #[test]
    fn test_next_phase() {
        assert_eq!(RoundScheduler::next_phase(RoundPhase::Idle), None);
        assert_eq!(
            RoundScheduler::next_phase(RoundPhase::Spinning),
            Some(RoundPhase::Settled)
        );
        assert_eq!(
            RoundScheduler::next_phase(RoundPhase::Settled),
            Some(RoundPhase::Idle)
        );
    }

    #[test]
    fn test_check_transition_not_time_yet() {
        let scheduler = RoundScheduler::new(test_config());
        let result = scheduler.check_transition(RoundPhase::Spinning, Some(4_500), 4_499);
        assert_eq!(result, TransitionResult::NoTransition);
    }

    #[test]
    fn test_check_transition_spinning_to_settled() {
        let scheduler = RoundScheduler::new(test_config());
        let result = scheduler.check_transition(RoundPhase::Spinning, Some(4_500), 4_500);
        assert_eq!(
            result,
            TransitionResult::TransitionTo {
                phase: RoundPhase::Settled,
                phase_ends_at_ms: Some(7_500),
            }
        );
    }

    #[test]
    fn test_check_transition_settled_to_idle() {
        let scheduler = RoundScheduler::new(test_config());
        let result = scheduler.check_transition(RoundPhase::Settled, Some(7_500), 7_600);
        assert_eq!(
            result,
            TransitionResult::TransitionTo {
                phase: RoundPhase::Idle,
                phase_ends_at_ms: None,
            }
        );
    }

    #[test]
    fn test_late_check_anchors_on_deadline() {
        let scheduler = RoundScheduler::new(test_config());
        // Woken 10 seconds late: the display deadline is still spin end + 3s.
        let result = scheduler.check_transition(RoundPhase::Spinning, Some(4_500), 14_500);
        assert_eq!(
            result,
            TransitionResult::TransitionTo {
                phase: RoundPhase::Settled,
                phase_ends_at_ms: Some(7_500),
            }
        );
    }

    #[test]
    fn test_idle_never_auto_transitions() {
        let scheduler = RoundScheduler::new(test_config());
        assert_eq!(
            scheduler.check_transition(RoundPhase::Idle, None, u64::MAX),
            TransitionResult::NoTransition
        );
        assert_eq!(
            scheduler.check_transition(RoundPhase::Idle, Some(0), u64::MAX),
            TransitionResult::NoTransition
        );
    }

    #[test]
    fn test_is_betting_open() {
        let scheduler = RoundScheduler::new(test_config());
        assert!(scheduler.is_betting_open(RoundPhase::Idle));
        assert!(!scheduler.is_betting_open(RoundPhase::Spinning));
        assert!(!scheduler.is_betting_open(RoundPhase::Settled));
    }

    #[test]
    fn test_full_round_cycle() {
        let scheduler = RoundScheduler::new(test_config());
        let mut phase = RoundPhase::Idle;

        // Spin at t=1s
        let mut ends = Some(scheduler.spin_phase_timing(1_000));
        phase = match scheduler.check_transition(phase, None, 1_000) {
            TransitionResult::NoTransition => RoundPhase::Spinning,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(ends, Some(5_500));

        // Reveal
        match scheduler.check_transition(phase, ends, 5_500) {
            TransitionResult::TransitionTo { phase: next, phase_ends_at_ms } => {
                phase = next;
                ends = phase_ends_at_ms;
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(phase, RoundPhase::Settled);
        assert_eq!(ends, Some(8_500));

        // Reset
        match scheduler.check_transition(phase, ends, 8_500) {
            TransitionResult::TransitionTo { phase: next, phase_ends_at_ms } => {
                phase = next;
                ends = phase_ends_at_ms;
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(phase, RoundPhase::Idle);
        assert_eq!(ends, None);
    }

    #[test]
    fn test_overflow_protection() {
        let scheduler = RoundScheduler::new(PhaseConfig::new(u64::MAX, u64::MAX));
        assert_eq!(scheduler.spin_phase_timing(u64::MAX), u64::MAX);
        match scheduler.check_transition(RoundPhase::Spinning, Some(1), u64::MAX) {
            TransitionResult::TransitionTo { phase_ends_at_ms, .. } => {
                assert_eq!(phase_ends_at_ms, Some(u64::MAX));
            }
            _ => panic!("Expected transition"),
        }
    }
}
