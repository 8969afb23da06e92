//! Bet catalog: resolves a (bet type, selector) pair to the pockets it covers and
//! what it pays.
//!
//! The layout rules live on [`BetType::covered`]; see `spinhall_types` for the selector
//! format of each bet type. Lookups are pure and used for both placement and settlement.

use spinhall_types::casino::{BetType, GameError, InvalidBet, Pocket, PocketSet};
use std::ops::RangeInclusive;

/// What a betting spot covers and how it pays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    pub covered: PocketSet,
    pub payout_ratio: u64,
}

/// Valid selectors for `bet_type`.
pub fn selectors(bet_type: BetType) -> RangeInclusive<u8> {
    bet_type.selectors()
}

/// Resolve a betting spot.
pub fn resolve(bet_type: BetType, selector: u8) -> Result<CatalogEntry, GameError> {
    bet_type
        .covered(selector)
        .map(|covered| CatalogEntry {
            covered,
            payout_ratio: bet_type.payout_ratio(),
        })
        .ok_or(GameError::InvalidBet(InvalidBet::Selector {
            bet_type,
            selector,
        }))
}

/// Every spot of `bet_type` with its catalog entry, in selector order.
pub fn entries(bet_type: BetType) -> impl Iterator<Item = (u8, CatalogEntry)> {
    selectors(bet_type).filter_map(move |selector| {
        resolve(bet_type, selector)
            .ok()
            .map(|entry| (selector, entry))
    })
}

/// Selector of the `bet_type` spot covering exactly `pockets`.
///
/// Lets a UI that knows the clicked cells (e.g. 17 and 20 for a split) find the spot.
pub fn find_selector(
    bet_type: BetType,
    pockets: impl IntoIterator<Item = Pocket>,
) -> Option<u8> {
    let target: PocketSet = pockets.into_iter().collect();
    entries(bet_type)
        .find(|(_, entry)| entry.covered == target)
        .map(|(selector, _)| selector)
}
