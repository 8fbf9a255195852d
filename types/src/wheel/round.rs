use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

use super::Color;

/// Lifecycle phase of the single active round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    /// Bets may be placed or cleared; a spin may start.
    #[default]
    Idle,
    /// Outcome chosen but not yet revealed; bets are frozen.
    Spinning,
    /// Outcome revealed and paid; waiting for the display period to end.
    Settled,
}

impl RoundPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::Spinning => "spinning",
            RoundPhase::Settled => "settled",
        }
    }
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-color stakes for the current round. Every color is always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Color, u64>", into = "BTreeMap<Color, u64>")]
pub struct BetState {
    stakes: [u64; Color::ALL.len()],
}

impl BetState {
    pub fn stake(&self, color: Color) -> u64 {
        self.stakes[color.index()]
    }

    pub fn add(&mut self, color: Color, amount: u64) {
        let slot = &mut self.stakes[color.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Sum of all four stakes.
    pub fn total(&self) -> u64 {
        self.stakes.iter().fold(0u64, |acc, s| acc.saturating_add(*s))
    }

    pub fn is_empty(&self) -> bool {
        self.stakes.iter().all(|s| *s == 0)
    }

    /// Zero every stake.
    pub fn clear(&mut self) {
        self.stakes = [0; Color::ALL.len()];
    }

    /// `(color, stake)` pairs in [`Color::ALL`] order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Color, u64)> + '_ {
        Color::ALL.iter().map(move |c| (*c, self.stake(*c)))
    }
}

impl Index<Color> for BetState {
    type Output = u64;

    fn index(&self, color: Color) -> &Self::Output {
        &self.stakes[color.index()]
    }
}

impl From<BTreeMap<Color, u64>> for BetState {
    fn from(map: BTreeMap<Color, u64>) -> Self {
        let mut bets = BetState::default();
        for (color, amount) in map {
            bets.add(color, amount);
        }
        bets
    }
}

impl From<BetState> for BTreeMap<Color, u64> {
    fn from(bets: BetState) -> Self {
        bets.iter().collect()
    }
}

/// Result of one completed spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round_id: u64,
    pub winning_index: usize,
    pub color: Color,
    pub multiplier: u32,
    /// Stake that was riding on `color`.
    pub wager: u64,
    pub winnings: u64,
}

impl RoundOutcome {
    pub fn is_win(&self) -> bool {
        self.winnings > 0
    }
}

/// Notification emitted to presentation layers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoundEvent {
    BetsChanged {
        bets: BetState,
        balance: u64,
    },
    PhaseChanged {
        round_id: u64,
        phase: RoundPhase,
        #[serde(skip_serializing_if = "Option::is_none")]
        phase_ends_at_ms: Option<u64>,
        rotation_deg: f64,
    },
    OutcomePublished {
        outcome: RoundOutcome,
        balance: u64,
    },
    RoundReset {
        round_id: u64,
        balance: u64,
        bets: BetState,
    },
}

/// Everything a view needs to redraw the table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub round_id: u64,
    pub phase: RoundPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_ends_at_ms: Option<u64>,
    pub balance: u64,
    pub bets: BetState,
    pub total_staked: u64,
    pub rotation_deg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_wedge: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RoundOutcome>,
}
