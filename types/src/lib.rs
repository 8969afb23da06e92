//! Common types used throughout spinhall.
//!
//! Everything here is plain data: wheel pockets, bet descriptors, spin and settlement
//! results, round history and table configuration. Behavior (catalog lookups, the ledger,
//! settlement, the wallet) lives in `spinhall-execution`.

pub mod casino;

pub use casino::{
    Bet, BetId, BetKey, BetOutcome, BetSummary, BetType, ClaimConfig, Color, ConfigError,
    GameError, History, InvalidBet, Pocket, PocketSet, RoundRecord, SettlementResult, SpinResult,
    TableConfig,
};
