use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{BetOutcome, BetType, Color, Pocket, SettlementResult, SpinResult, HISTORY_LIMIT};

/// Compact view of one settled bet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetSummary {
    pub bet_type: BetType,
    pub selector: u8,
    pub amount: u64,
    pub won: bool,
}

impl From<&BetOutcome> for BetSummary {
    fn from(outcome: &BetOutcome) -> Self {
        Self {
            bet_type: outcome.bet.bet_type(),
            selector: outcome.bet.selector(),
            amount: outcome.bet.amount(),
            won: outcome.won(),
        }
    }
}

/// One settled round.
///
/// Deserialization rejects records whose `net_profit` is not `winnings - staked`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRoundRecord")]
pub struct RoundRecord {
    pub round: u64,
    pub spin: SpinResult,
    pub staked: u64,
    pub winnings: u64,
    pub net_profit: i64,
    pub bets: Vec<BetSummary>,
}

#[derive(Deserialize)]
struct RawRoundRecord {
    round: u64,
    spin: SpinResult,
    staked: u64,
    winnings: u64,
    net_profit: i64,
    bets: Vec<BetSummary>,
}

impl TryFrom<RawRoundRecord> for RoundRecord {
    type Error = String;

    fn try_from(raw: RawRoundRecord) -> Result<Self, Self::Error> {
        let expected = net_profit(raw.staked, raw.winnings);
        if raw.net_profit != expected {
            return Err(format!(
                "round {} net_profit {} does not match winnings - staked ({})",
                raw.round, raw.net_profit, expected
            ));
        }
        Ok(Self {
            round: raw.round,
            spin: raw.spin,
            staked: raw.staked,
            winnings: raw.winnings,
            net_profit: raw.net_profit,
            bets: raw.bets,
        })
    }
}

/// `winnings - staked`, clamped to `i64`.
pub fn net_profit(staked: u64, winnings: u64) -> i64 {
    let net = winnings as i128 - staked as i128;
    net.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

impl RoundRecord {
    pub fn from_settlement(round: u64, settlement: &SettlementResult) -> Self {
        Self {
            round,
            spin: settlement.spin,
            staked: settlement.total_staked,
            winnings: settlement.total_winnings,
            net_profit: settlement.net_profit,
            bets: settlement
                .outcomes()
                .into_iter()
                .map(BetSummary::from)
                .collect(),
        }
    }

    pub const fn pocket(&self) -> Pocket {
        self.spin.pocket()
    }

    pub const fn color(&self) -> Color {
        self.spin.color()
    }

    /// A round counts as a win when anything was paid back.
    pub const fn is_win(&self) -> bool {
        self.winnings > 0
    }
}

/// Bounded round history, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    limit: usize,
    records: VecDeque<RoundRecord>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            limit,
            records: VecDeque::with_capacity(limit),
        }
    }

    /// Record a round, dropping the oldest entry once the limit is reached.
    pub fn push(&mut self, record: RoundRecord) {
        self.records.push_front(record);
        self.records.truncate(self.limit);
    }

    /// Records from newest to oldest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &RoundRecord> + ExactSizeIterator + Clone {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&RoundRecord> {
        self.records.front()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load a history blob; entries beyond the stored limit are dropped.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut history: Self = serde_json::from_str(json)?;
        history.limit = history.limit.max(1);
        history.records.truncate(history.limit);
        Ok(history)
    }
}
