//! Balance and per-color stakes for the active session.
//!
//! The ledger does not know about round phases; the engine decides when each
//! operation is allowed. Every operation either applies fully or not at all.

use colorwheel_types::wheel::{BetState, Color, RoundError, Wedge, STARTING_BALANCE};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BetLedger {
    balance: u64,
    bets: BetState,
}

impl Default for BetLedger {
    fn default() -> Self {
        Self::new(STARTING_BALANCE)
    }
}

impl BetLedger {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            bets: BetState::default(),
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bets(&self) -> &BetState {
        &self.bets
    }

    pub fn stake(&self, color: Color) -> u64 {
        self.bets.stake(color)
    }

    /// Sum of the four stakes.
    pub fn total_staked(&self) -> u64 {
        self.bets.total()
    }

    /// Move `amount` from the balance onto `color`.
    pub fn place_bet(&mut self, color: Color, amount: u64) -> Result<(), RoundError> {
        if amount == 0 {
            return Err(RoundError::InvalidAmount);
        }
        let remaining = self
            .balance
            .checked_sub(amount)
            .ok_or(RoundError::InsufficientFunds {
                balance: self.balance,
                amount,
            })?;
        self.balance = remaining;
        self.bets.add(color, amount);
        debug!(%color, amount, balance = self.balance, "bet placed");
        Ok(())
    }

    /// Pre-spin cancellation: refund every stake and zero the bets.
    ///
    /// Returns the refunded amount (zero when nothing was staked).
    pub fn clear_bets(&mut self) -> u64 {
        let refund = self.bets.total();
        if refund == 0 {
            return 0;
        }
        self.balance = self.balance.saturating_add(refund);
        self.bets.clear();
        debug!(refund, balance = self.balance, "bets cleared");
        refund
    }

    /// Post-spin cleanup: zero the bets without refunding them.
    pub fn reset_after_round(&mut self) {
        self.bets.clear();
    }

    /// Winnings owed if `wedge` lands: only the stake on its color pays.
    pub fn winnings_for(&self, wedge: &Wedge) -> u64 {
        self.stake(wedge.color)
            .saturating_mul(u64::from(wedge.multiplier))
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }
}
