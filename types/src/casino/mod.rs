//! Casino domain types.
//!
//! Defines the wheel, bet, settlement, history and configuration types shared by the
//! execution layer and UI shells.

mod bet;
mod config;
mod constants;
mod error;
mod history;
mod layout;
mod pocket;

pub use bet::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use history::*;
pub use pocket::*;
