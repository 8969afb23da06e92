use serde::{Deserialize, Serialize};

use super::{
    ConfigError, CHIP_DENOMINATIONS, CLAIM_INTERVAL_MS, HISTORY_LIMIT, HOURLY_TOKENS,
    INITIAL_TOKENS, MAX_ACCUMULATED_INTERVALS,
};

/// Hourly token claim configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClaimConfig {
    /// Tokens granted per elapsed interval.
    pub hourly_tokens: u64,
    /// Length of one claim interval in milliseconds.
    pub interval_ms: u64,
    /// Intervals worth of tokens that may accumulate above the initial balance.
    pub max_accumulated_intervals: u64,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            hourly_tokens: HOURLY_TOKENS,
            interval_ms: CLAIM_INTERVAL_MS,
            max_accumulated_intervals: MAX_ACCUMULATED_INTERVALS,
        }
    }
}

impl ClaimConfig {
    /// Maximum tokens that claims may add above the initial balance.
    pub fn accumulation_cap(&self) -> u64 {
        self.hourly_tokens
            .saturating_mul(self.max_accumulated_intervals)
    }
}

/// Per-session table configuration.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    /// Wallet balance for a new session.
    pub initial_tokens: u64,
    /// Chip values offered to the player.
    pub chip_denominations: Vec<u64>,
    /// Reject stakes that are not a single chip denomination.
    pub enforce_chip_denominations: bool,
    /// Rounds kept in the history.
    pub history_limit: usize,
    pub claim: ClaimConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_tokens: INITIAL_TOKENS,
            chip_denominations: CHIP_DENOMINATIONS.to_vec(),
            enforce_chip_denominations: false,
            history_limit: HISTORY_LIMIT,
            claim: ClaimConfig::default(),
        }
    }
}

impl TableConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chip_denominations.is_empty() {
            return Err(ConfigError::Invalid("chip_denominations must not be empty"));
        }
        if self.chip_denominations.contains(&0) {
            return Err(ConfigError::Invalid(
                "chip_denominations must be greater than zero",
            ));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be greater than zero"));
        }
        if self.claim.hourly_tokens == 0 {
            return Err(ConfigError::Invalid(
                "claim.hourly_tokens must be greater than zero",
            ));
        }
        if self.claim.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "claim.interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Whether `amount` is acceptable as a single placement under this config.
    pub fn accepts_stake(&self, amount: u64) -> bool {
        amount > 0
            && (!self.enforce_chip_denominations || self.chip_denominations.contains(&amount))
    }
}
