use thiserror::Error;

use super::RoundPhase;

/// Rejections reported by round commands.
///
/// A command that returns one of these has not changed any state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoundError {
    #[error("bet amount must be greater than zero")]
    InvalidAmount,
    #[error("insufficient funds (balance={balance}, amount={amount})")]
    InsufficientFunds { balance: u64, amount: u64 },
    #[error("no active bet: place at least one bet before spinning")]
    NoActiveBet,
    #[error("not allowed while {phase}")]
    WrongPhase { phase: RoundPhase },
    #[error("unknown color: {0}")]
    UnknownColor(String),
}

impl RoundError {
    /// Stable code for presentation layers.
    pub fn code(&self) -> &'static str {
        match self {
            RoundError::InvalidAmount => "INVALID_AMOUNT",
            RoundError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            RoundError::NoActiveBet => "NO_ACTIVE_BET",
            RoundError::WrongPhase { .. } => "WRONG_PHASE",
            RoundError::UnknownColor(_) => "UNKNOWN_COLOR",
        }
    }
}
