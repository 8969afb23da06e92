//! American roulette engine.
//!
//! - `catalog`: betting spots and the pockets they cover
//! - `wheel`: random sources and the spin
//! - `ledger`: bets for the round in progress
//! - `settlement`: pure evaluation of bets against a spin
//! - `wallet`: token balance and the hourly claim clock
//! - `table`: one player session tying the above together
//! - `statistics`: read-only views over the round history

pub mod catalog;
pub mod ledger;
mod logging;
pub mod settlement;
pub mod statistics;
pub mod table;
pub mod wallet;
pub mod wheel;

pub use catalog::CatalogEntry;
pub use ledger::{Ledger, LedgerPhase, Reduction};
pub use settlement::settle;
pub use table::Table;
pub use wallet::{Claim, ClaimClock, Wallet};
pub use wheel::{spin, RandomSource, RngSource, ScriptedSource};
