use thiserror::Error as ThisError;

use super::BetType;

/// Errors returned by table operations.
///
/// Every error is scoped to the single operation that produced it; state is left
/// exactly as it was before the call.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid amount (got={amount})")]
    InvalidAmount { amount: u64 },
    #[error("insufficient funds (needed={needed}, available={available})")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error(transparent)]
    InvalidBet(#[from] InvalidBet),
    #[error("ledger is locked for settlement")]
    LedgerLocked,
}

/// Reasons a bet cannot be resolved against the catalog.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum InvalidBet {
    #[error("unknown bet type {name:?}")]
    UnknownType { name: String },
    #[error("selector {selector} is not valid for {bet_type}")]
    Selector { bet_type: BetType, selector: u8 },
}

#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
#[error("invalid pocket label {label:?}")]
pub struct ParsePocketError {
    pub label: String,
}

/// Errors loading or validating a [`super::TableConfig`].
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse table config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid table config: {0}")]
    Invalid(&'static str),
}
