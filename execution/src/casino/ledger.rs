//! Bet ledger for the round in progress.
//!
//! Bets are kept in id order (ids are handed out in placement order) and indexed by
//! their betting spot, so a second placement on the same spot merges into the first.
//! Covered pockets are resolved from the catalog once, at insert time.
//!
//! ## Phases
//! 1. **Open** - bets may be added, reduced, removed or cleared
//! 2. **Settled** - the winning pocket is being resolved; every mutation fails with
//!    [`GameError::LedgerLocked`] until [`Ledger::reopen`] empties the ledger

use super::catalog;
use spinhall_types::casino::{Bet, BetId, BetKey, BetType, GameError};
use std::collections::BTreeMap;

/// Ledger phase within a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LedgerPhase {
    #[default]
    Open,
    Settled,
}

/// Result of [`Ledger::reduce_bet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    pub key: BetKey,
    /// Tokens taken off the table (to be refunded by the caller).
    pub released: u64,
    /// The bet after the reduction, or `None` when it was removed.
    pub remaining: Option<Bet>,
}

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    phase: LedgerPhase,
    bets: BTreeMap<BetId, Bet>,
    by_key: BTreeMap<BetKey, BetId>,
    last_id: u64,
    total_staked: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> LedgerPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == LedgerPhase::Open
    }

    fn ensure_open(&self) -> Result<(), GameError> {
        match self.phase {
            LedgerPhase::Open => Ok(()),
            LedgerPhase::Settled => Err(GameError::LedgerLocked),
        }
    }

    /// Stake `amount` on a spot, merging with an existing bet on the same spot.
    pub fn add_bet(
        &mut self,
        bet_type: BetType,
        selector: u8,
        amount: u64,
    ) -> Result<Bet, GameError> {
        self.ensure_open()?;
        if amount == 0 {
            return Err(GameError::InvalidAmount { amount });
        }
        catalog::resolve(bet_type, selector)?;
        let total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(GameError::InvalidAmount { amount })?;

        let key = BetKey::new(bet_type, selector);
        if let Some(bet) = self
            .by_key
            .get(&key)
            .and_then(|id| self.bets.get_mut(id))
        {
            bet.raise(amount)?;
            self.total_staked = total_staked;
            return Ok(bet.clone());
        }

        let bet = Bet::new(BetId(self.last_id + 1), bet_type, selector, amount)?;
        self.last_id += 1;
        self.by_key.insert(key, bet.id());
        self.bets.insert(bet.id(), bet.clone());
        self.total_staked = total_staked;
        Ok(bet)
    }

    /// Remove a bet by id. Absent ids are not an error.
    pub fn remove_bet(&mut self, id: BetId) -> Result<Option<Bet>, GameError> {
        self.ensure_open()?;
        Ok(self.take(id))
    }

    /// Take `amount` off a spot; the bet is removed when `amount` covers all of it.
    ///
    /// Returns `Ok(None)` when nothing is staked on the spot.
    pub fn reduce_bet(
        &mut self,
        bet_type: BetType,
        selector: u8,
        amount: u64,
    ) -> Result<Option<Reduction>, GameError> {
        self.ensure_open()?;
        if amount == 0 {
            return Err(GameError::InvalidAmount { amount });
        }
        let key = BetKey::new(bet_type, selector);
        let Some(&id) = self.by_key.get(&key) else {
            return Ok(None);
        };
        let Some(bet) = self.bets.get_mut(&id) else {
            return Ok(None);
        };

        if bet.amount() > amount {
            bet.lower(amount)?;
            self.total_staked -= amount;
            return Ok(Some(Reduction {
                key,
                released: amount,
                remaining: Some(bet.clone()),
            }));
        }

        Ok(self.take(id).map(|removed| Reduction {
            key,
            released: removed.amount(),
            remaining: None,
        }))
    }

    /// Empty the ledger, returning the cleared bets so the caller can refund them.
    pub fn clear(&mut self) -> Result<Vec<Bet>, GameError> {
        self.ensure_open()?;
        Ok(self.drain())
    }

    /// Close the ledger for settlement and return its snapshot.
    pub fn lock(&mut self) -> Result<Vec<Bet>, GameError> {
        self.ensure_open()?;
        self.phase = LedgerPhase::Settled;
        Ok(self.bets())
    }

    /// Start the next round: drop the settled bets and accept new ones.
    pub fn reopen(&mut self) -> Vec<Bet> {
        let settled = self.drain();
        self.phase = LedgerPhase::Open;
        settled
    }

    pub fn total_staked(&self) -> u64 {
        self.total_staked
    }

    /// Tokens on a spot; 0 when nothing is staked there.
    pub fn amount_on(&self, bet_type: BetType, selector: u8) -> u64 {
        self.find(bet_type, selector)
            .map(Bet::amount)
            .unwrap_or(0)
    }

    pub fn find(&self, bet_type: BetType, selector: u8) -> Option<&Bet> {
        self.by_key
            .get(&BetKey::new(bet_type, selector))
            .and_then(|id| self.bets.get(id))
    }

    pub fn get(&self, id: BetId) -> Option<&Bet> {
        self.bets.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bet> {
        self.bets.values()
    }

    /// Owned snapshot in placement order.
    pub fn bets(&self) -> Vec<Bet> {
        self.bets.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.bets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    fn take(&mut self, id: BetId) -> Option<Bet> {
        let bet = self.bets.remove(&id)?;
        self.by_key.remove(&bet.key());
        self.total_staked -= bet.amount();
        Some(bet)
    }

    fn drain(&mut self) -> Vec<Bet> {
        self.by_key.clear();
        self.total_staked = 0;
        std::mem::take(&mut self.bets).into_values().collect()
    }
}
