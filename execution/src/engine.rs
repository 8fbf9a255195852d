//! Round engine: sequences betting, spinning, settlement and reset.
//!
//! The engine is a deterministic state machine. It never reads the wall clock;
//! callers pass a monotonic `now_ms` to [`RoundEngine::spin`] and
//! [`RoundEngine::tick`], and a driver (see the table service) calls `tick`
//! when a deadline passes. All mutations go through the commands below, and
//! each returns the [`RoundEvent`]s a presentation layer needs to redraw.

use colorwheel_types::wheel::{
    BetState, Color, RoundError, RoundEvent, RoundOutcome, RoundPhase, TableSnapshot, WEDGE_COUNT,
    WEDGE_TABLE,
};
use tracing::info;

use crate::ledger::BetLedger;
use crate::outcome::{OutcomeSelector, SpinPlan, WheelSelector};
use crate::round_scheduler::{PhaseConfig, RoundScheduler, TransitionResult};

#[derive(Clone, Debug)]
enum RoundState {
    Idle,
    Spinning { plan: SpinPlan, ends_at_ms: u64 },
    Settled { outcome: RoundOutcome, ends_at_ms: u64 },
}

#[derive(Clone, Debug)]
pub struct RoundEngine<S = WheelSelector> {
    scheduler: RoundScheduler,
    ledger: BetLedger,
    selector: S,
    state: RoundState,
    rotation_deg: f64,
    round_id: u64,
}

impl RoundEngine<WheelSelector> {
    /// Engine with a fair, entropy-seeded selector.
    pub fn new(config: PhaseConfig, starting_balance: u64) -> Self {
        Self::with_selector(config, starting_balance, WheelSelector::from_entropy())
    }
}

impl<S: OutcomeSelector> RoundEngine<S> {
    pub fn with_selector(config: PhaseConfig, starting_balance: u64, selector: S) -> Self {
        Self {
            scheduler: RoundScheduler::new(config),
            ledger: BetLedger::new(starting_balance),
            selector,
            state: RoundState::Idle,
            rotation_deg: 0.0,
            round_id: 1,
        }
    }

    pub fn config(&self) -> &PhaseConfig {
        self.scheduler.config()
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn bets(&self) -> &BetState {
        self.ledger.bets()
    }

    pub fn total_staked(&self) -> u64 {
        self.ledger.total_staked()
    }

    pub fn phase(&self) -> RoundPhase {
        match self.state {
            RoundState::Idle => RoundPhase::Idle,
            RoundState::Spinning { .. } => RoundPhase::Spinning,
            RoundState::Settled { .. } => RoundPhase::Settled,
        }
    }

    pub fn phase_ends_at_ms(&self) -> Option<u64> {
        match self.state {
            RoundState::Idle => None,
            RoundState::Spinning { ends_at_ms, .. } | RoundState::Settled { ends_at_ms, .. } => {
                Some(ends_at_ms)
            }
        }
    }

    /// Published outcome; only present while Settled.
    pub fn outcome(&self) -> Option<&RoundOutcome> {
        match &self.state {
            RoundState::Settled { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    /// Wedge to highlight; only present while Settled.
    pub fn highlighted_wedge(&self) -> Option<usize> {
        self.outcome().map(|o| o.winning_index)
    }

    /// Cumulative wheel rotation in degrees. Never rewinds between rounds.
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    pub fn round_id(&self) -> u64 {
        self.round_id
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            round_id: self.round_id,
            phase: self.phase(),
            phase_ends_at_ms: self.phase_ends_at_ms(),
            balance: self.balance(),
            bets: *self.bets(),
            total_staked: self.total_staked(),
            rotation_deg: self.rotation_deg,
            highlighted_wedge: self.highlighted_wedge(),
            outcome: self.outcome().copied(),
        }
    }

    pub fn place_bet(&mut self, color: Color, amount: u64) -> Result<RoundEvent, RoundError> {
        self.ensure_betting_open()?;
        self.ledger.place_bet(color, amount)?;
        Ok(self.bets_changed())
    }

    /// Refund all stakes. Succeeds (as a no-op) when nothing is staked.
    pub fn clear_bets(&mut self) -> Result<RoundEvent, RoundError> {
        self.ensure_betting_open()?;
        self.ledger.clear_bets();
        Ok(self.bets_changed())
    }

    /// Start a spin at `now_ms`. The outcome stays hidden until [`Self::tick`]
    /// passes the spin deadline.
    pub fn spin(&mut self, now_ms: u64) -> Result<RoundEvent, RoundError> {
        self.ensure_betting_open()?;
        if self.ledger.total_staked() == 0 {
            return Err(RoundError::NoActiveBet);
        }

        let plan = self.selector.select_outcome(self.rotation_deg);
        assert!(
            plan.winning_index < WEDGE_COUNT,
            "selector returned wedge {} of {WEDGE_COUNT}",
            plan.winning_index
        );
        let ends_at_ms = self.scheduler.spin_phase_timing(now_ms);
        self.rotation_deg = plan.final_rotation;
        self.state = RoundState::Spinning { plan, ends_at_ms };
        info!(
            round = self.round_id,
            staked = self.ledger.total_staked(),
            rotation = self.rotation_deg,
            "spin started"
        );
        Ok(self.phase_changed())
    }

    /// Apply every timed transition that is due at `now_ms`, in order.
    pub fn tick(&mut self, now_ms: u64) -> Vec<RoundEvent> {
        let mut events = Vec::new();
        loop {
            let transition =
                self.scheduler
                    .check_transition(self.phase(), self.phase_ends_at_ms(), now_ms);
            let TransitionResult::TransitionTo {
                phase,
                phase_ends_at_ms,
            } = transition
            else {
                break;
            };
            match (phase, phase_ends_at_ms) {
                (RoundPhase::Settled, Some(ends_at_ms)) => events.extend(self.settle(ends_at_ms)),
                (RoundPhase::Idle, _) => events.extend(self.reset()),
                _ => break,
            }
        }
        events
    }

    fn settle(&mut self, ends_at_ms: u64) -> Vec<RoundEvent> {
        let RoundState::Spinning { plan, .. } = self.state else {
            return Vec::new();
        };
        let wedge = WEDGE_TABLE[plan.winning_index];
        let wager = self.ledger.stake(wedge.color);
        let winnings = self.ledger.winnings_for(&wedge);
        if winnings > 0 {
            self.ledger.credit(winnings);
        }

        let outcome = RoundOutcome {
            round_id: self.round_id,
            winning_index: plan.winning_index,
            color: wedge.color,
            multiplier: wedge.multiplier,
            wager,
            winnings,
        };
        self.state = RoundState::Settled {
            outcome,
            ends_at_ms,
        };
        info!(
            round = self.round_id,
            wedge = outcome.winning_index,
            color = %outcome.color,
            multiplier = outcome.multiplier,
            winnings,
            balance = self.ledger.balance(),
            "round settled"
        );

        vec![
            self.phase_changed(),
            RoundEvent::OutcomePublished {
                outcome,
                balance: self.ledger.balance(),
            },
        ]
    }

    fn reset(&mut self) -> Vec<RoundEvent> {
        self.ledger.reset_after_round();
        self.state = RoundState::Idle;
        self.round_id = self.round_id.saturating_add(1);
        info!(
            round = self.round_id,
            balance = self.ledger.balance(),
            "round reset"
        );

        vec![
            self.phase_changed(),
            RoundEvent::RoundReset {
                round_id: self.round_id,
                balance: self.ledger.balance(),
                bets: *self.ledger.bets(),
            },
        ]
    }

    fn ensure_betting_open(&self) -> Result<(), RoundError> {
        let phase = self.phase();
        if self.scheduler.is_betting_open(phase) {
            Ok(())
        } else {
            Err(RoundError::WrongPhase { phase })
        }
    }

    fn bets_changed(&self) -> RoundEvent {
        RoundEvent::BetsChanged {
            bets: *self.ledger.bets(),
            balance: self.ledger.balance(),
        }
    }

    fn phase_changed(&self) -> RoundEvent {
        RoundEvent::PhaseChanged {
            round_id: self.round_id,
            phase: self.phase(),
            phase_ends_at_ms: self.phase_ends_at_ms(),
            rotation_deg: self.rotation_deg,
        }
    }
}
