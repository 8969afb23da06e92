//! Spinhall execution layer.
//!
//! This crate contains the roulette table: bet catalog, wheel, ledger, settlement,
//! wallet and statistics. Plain data types live in `spinhall-types`.
//!
//! ## Determinism requirements
//! - Do not use wall-clock time inside execution; callers pass `now_ms` where time matters.
//! - Randomness only comes from the table's [`RandomSource`].
//! - Settlement is a pure function of the ledger snapshot and the spin.
//!
//! ## Minimal round (example)
//! ```rust
//! use spinhall_execution::{ScriptedSource, Table};
//! use spinhall_types::{BetType, Pocket, TableConfig};
//!
//! let mut table = Table::seeded(TableConfig::default(), 42).unwrap();
//! table.place_bet(BetType::StraightUp, 17, 10).unwrap();
//! table.place_bet(BetType::Red, 0, 10).unwrap();
//!
//! let mut wheel = ScriptedSource::landing_on(&[Pocket::number(17).unwrap()]);
//! let result = table.play_round_with(&mut wheel).unwrap();
//! assert_eq!(result.total_winnings, 360);
//! assert_eq!(table.wallet_balance(), 1000 - 20 + 360);
//! ```

pub mod casino;

pub use casino::statistics::{
    betting_patterns, number_patterns, performance_chart, player_stats, BettingPatterns,
    NumberPatterns, PlayerStats,
};
pub use casino::{
    settle, spin, CatalogEntry, Claim, ClaimClock, Ledger, LedgerPhase, RandomSource,
    Reduction, RngSource, ScriptedSource, Table, Wallet,
};
