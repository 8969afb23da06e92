//! Token wallet and the hourly claim clock.

use spinhall_types::casino::{ClaimConfig, GameError};

/// Non-negative token balance for one session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    balance: u64,
}

impl Wallet {
    pub const fn new(balance: u64) -> Self {
        Self { balance }
    }

    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Check that `amount` could be debited right now.
    pub fn validate(&self, amount: u64) -> Result<(), GameError> {
        if amount == 0 {
            return Err(GameError::InvalidAmount { amount });
        }
        if amount > self.balance {
            return Err(GameError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    /// Subtract `amount`, returning the new balance.
    pub fn debit(&mut self, amount: u64) -> Result<u64, GameError> {
        self.validate(amount)?;
        self.balance -= amount;
        Ok(self.balance)
    }

    /// Add `amount` (saturating), returning the new balance.
    pub fn credit(&mut self, amount: u64) -> u64 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }
}

/// Result of evaluating the claim clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claim {
    pub tokens: u64,
    /// Claim time after this claim is applied.
    pub claimed_at_ms: u64,
    /// Earliest time the next interval completes.
    pub next_claim_ms: u64,
}

/// Tracks when tokens were last claimed.
///
/// Every completed interval since the last claim is worth `hourly_tokens`. Claims only
/// top a wallet up to `initial_tokens + hourly_tokens * max_accumulated_intervals`; a
/// balance already at or above that line claims nothing. The clock is not started
/// until [`ClaimClock::starting_at`] or the first [`ClaimClock::claim`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimClock {
    last_claim_ms: Option<u64>,
}

impl ClaimClock {
    pub const fn starting_at(now_ms: u64) -> Self {
        Self {
            last_claim_ms: Some(now_ms),
        }
    }

    pub const fn last_claim_ms(&self) -> Option<u64> {
        self.last_claim_ms
    }

    /// Evaluate a claim at `now_ms` without applying it.
    pub fn claimable(
        &self,
        balance: u64,
        now_ms: u64,
        initial_tokens: u64,
        config: &ClaimConfig,
    ) -> Claim {
        let interval = config.interval_ms.max(1);
        let Some(last) = self.last_claim_ms else {
            return Claim {
                tokens: 0,
                claimed_at_ms: now_ms,
                next_claim_ms: now_ms.saturating_add(interval),
            };
        };
        let unchanged = Claim {
            tokens: 0,
            claimed_at_ms: last,
            next_claim_ms: last.saturating_add(interval),
        };

        let intervals = now_ms.saturating_sub(last) / interval;
        if intervals == 0 {
            return unchanged;
        }

        let accumulated = balance as i128 - initial_tokens as i128;
        let cap = config.accumulation_cap() as i128;
        if accumulated >= cap {
            return unchanged;
        }

        let potential = (intervals as u128).saturating_mul(config.hourly_tokens as u128);
        let remaining = (cap - accumulated) as u128;
        let tokens = u64::try_from(potential.min(remaining)).unwrap_or(u64::MAX);
        Claim {
            tokens,
            claimed_at_ms: now_ms,
            next_claim_ms: now_ms.saturating_add(interval),
        }
    }

    /// Apply a claim at `now_ms`, returning the tokens granted.
    pub fn claim(
        &mut self,
        balance: u64,
        now_ms: u64,
        initial_tokens: u64,
        config: &ClaimConfig,
    ) -> u64 {
        let claim = self.claimable(balance, now_ms, initial_tokens, config);
        self.last_claim_ms = Some(claim.claimed_at_ms);
        claim.tokens
    }

    /// Milliseconds until the next interval completes (0 when one already has).
    pub fn time_until_next(&self, now_ms: u64, config: &ClaimConfig) -> u64 {
        match self.last_claim_ms {
            Some(last) => last
                .saturating_add(config.interval_ms)
                .saturating_sub(now_ms),
            None => config.interval_ms,
        }
    }
}
