//! Bet descriptors and round outcomes.
//!
//! Bet types and payouts (to-one):
//! - Straight Up (35), Split (17), Street (11), Corner (8), Five Number (6), Six Line (5)
//! - Column (2), Dozen (2)
//! - Red, Black, Even, Odd, Low 1-18, High 19-36 (1)
//!
//! Winnings are quoted including the returned stake: a winning bet pays
//! `amount * (payout_ratio + 1)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Color, GameError, InvalidBet, Pocket, PocketSet};

/// Roulette bet types.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetType {
    StraightUp = 0, // Single number (35:1)
    Split = 1,      // Two adjacent numbers (17:1)
    Street = 2,     // Three numbers in a row (11:1)
    Corner = 3,     // Four numbers in a square (8:1)
    FiveNumber = 4, // 0, 00, 1, 2, 3 (6:1)
    SixLine = 5,    // Two adjacent rows (5:1)
    Column = 6,     // 12-number column (2:1)
    Dozen = 7,      // 1-12, 13-24, 25-36 (2:1)
    Red = 8,        // Red (1:1)
    Black = 9,      // Black (1:1)
    Even = 10,      // Even (1:1)
    Odd = 11,       // Odd (1:1)
    Low = 12,       // 1-18 (1:1)
    High = 13,      // 19-36 (1:1)
}

impl BetType {
    pub const ALL: [Self; 14] = [
        Self::StraightUp,
        Self::Split,
        Self::Street,
        Self::Corner,
        Self::FiveNumber,
        Self::SixLine,
        Self::Column,
        Self::Dozen,
        Self::Red,
        Self::Black,
        Self::Even,
        Self::Odd,
        Self::Low,
        Self::High,
    ];

    /// Payout multiplier (excludes the original bet).
    pub const fn payout_ratio(self) -> u64 {
        match self {
            Self::StraightUp => 35,
            Self::Split => 17,
            Self::Street => 11,
            Self::Corner => 8,
            Self::FiveNumber => 6,
            Self::SixLine => 5,
            Self::Column | Self::Dozen => 2,
            Self::Red | Self::Black | Self::Even | Self::Odd | Self::Low | Self::High => 1,
        }
    }

    /// Number of pockets covered by inside bets; `None` for outside bets.
    pub const fn arity(self) -> Option<usize> {
        match self {
            Self::StraightUp => Some(1),
            Self::Split => Some(2),
            Self::Street => Some(3),
            Self::Corner => Some(4),
            Self::FiveNumber => Some(5),
            Self::SixLine => Some(6),
            _ => None,
        }
    }

    pub const fn is_inside(self) -> bool {
        self.arity().is_some()
    }

    /// Wire/serde spelling, e.g. `STRAIGHT_UP`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::StraightUp => "STRAIGHT_UP",
            Self::Split => "SPLIT",
            Self::Street => "STREET",
            Self::Corner => "CORNER",
            Self::FiveNumber => "FIVE_NUMBER",
            Self::SixLine => "SIX_LINE",
            Self::Column => "COLUMN",
            Self::Dozen => "DOZEN",
            Self::Red => "RED",
            Self::Black => "BLACK",
            Self::Even => "EVEN",
            Self::Odd => "ODD",
            Self::Low => "LOW",
            Self::High => "HIGH",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::StraightUp => "Straight Up",
            Self::Split => "Split",
            Self::Street => "Street",
            Self::Corner => "Corner",
            Self::FiveNumber => "Five Number",
            Self::SixLine => "Six Line",
            Self::Column => "Column",
            Self::Dozen => "Dozen",
            Self::Red => "Red",
            Self::Black => "Black",
            Self::Even => "Even",
            Self::Odd => "Odd",
            Self::Low => "1-18",
            Self::High => "19-36",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::StraightUp => "Single number",
            Self::Split => "Two adjacent numbers",
            Self::Street => "Three numbers in a row",
            Self::Corner => "Four numbers in a square",
            Self::FiveNumber => "0, 00, 1, 2, 3",
            Self::SixLine => "Six numbers in two rows",
            Self::Column => "Entire column",
            Self::Dozen => "1st 12, 2nd 12, or 3rd 12",
            Self::Red => "All red numbers",
            Self::Black => "All black numbers",
            Self::Even => "All even numbers",
            Self::Odd => "All odd numbers",
            Self::Low => "Numbers 1-18",
            Self::High => "Numbers 19-36",
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BetType {
    type Err = InvalidBet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bet_type| bet_type.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InvalidBet::UnknownType {
                name: s.to_string(),
            })
    }
}

impl TryFrom<u8> for BetType {
    type Error = InvalidBet;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| InvalidBet::UnknownType {
                name: value.to_string(),
            })
    }
}

/// Ledger-assigned bet identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BetId(pub u64);

impl fmt::Display for BetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a betting spot: two bets with the same key merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BetKey {
    pub bet_type: BetType,
    pub selector: u8,
}

impl BetKey {
    pub const fn new(bet_type: BetType, selector: u8) -> Self {
        Self {
            bet_type,
            selector,
        }
    }
}

/// A wager on one betting spot.
///
/// Always holds a positive stake and the exact pocket set of its spot. Deserialization
/// re-resolves the spot and rejects bets whose stored `covered` set disagrees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBet")]
pub struct Bet {
    id: BetId,
    bet_type: BetType,
    selector: u8,
    amount: u64,
    covered: PocketSet,
}

impl Bet {
    /// Build a bet, resolving the pockets its spot covers.
    pub fn new(id: BetId, bet_type: BetType, selector: u8, amount: u64) -> Result<Self, GameError> {
        if amount == 0 {
            return Err(GameError::InvalidAmount { amount });
        }
        let covered = bet_type
            .covered(selector)
            .ok_or(InvalidBet::Selector { bet_type, selector })?;
        Ok(Self {
            id,
            bet_type,
            selector,
            amount,
            covered,
        })
    }

    pub const fn id(&self) -> BetId {
        self.id
    }

    pub const fn bet_type(&self) -> BetType {
        self.bet_type
    }

    /// Spot within the bet type (number, split index, dozen...).
    pub const fn selector(&self) -> u8 {
        self.selector
    }

    /// Tokens staked, always > 0.
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    /// Pockets this bet wins on.
    pub const fn covered(&self) -> PocketSet {
        self.covered
    }

    pub const fn key(&self) -> BetKey {
        BetKey::new(self.bet_type, self.selector)
    }

    pub const fn covers(&self, pocket: Pocket) -> bool {
        self.covered.contains(pocket)
    }

    /// Amount returned when this bet wins, stake included.
    pub const fn winnings(&self) -> u64 {
        self.amount
            .saturating_mul(self.bet_type.payout_ratio().saturating_add(1))
    }

    /// Add `amount` to the stake, returning the new stake.
    pub fn raise(&mut self, amount: u64) -> Result<u64, GameError> {
        if amount == 0 {
            return Err(GameError::InvalidAmount { amount });
        }
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(GameError::InvalidAmount { amount })?;
        Ok(self.amount)
    }

    /// Take `amount` off the stake, which must stay positive. Returns the new stake.
    pub fn lower(&mut self, amount: u64) -> Result<u64, GameError> {
        if amount == 0 || amount >= self.amount {
            return Err(GameError::InvalidAmount { amount });
        }
        self.amount -= amount;
        Ok(self.amount)
    }
}

#[derive(Deserialize)]
struct RawBet {
    id: BetId,
    bet_type: BetType,
    selector: u8,
    amount: u64,
    covered: PocketSet,
}

impl TryFrom<RawBet> for Bet {
    type Error = String;

    fn try_from(raw: RawBet) -> Result<Self, Self::Error> {
        let bet = Self::new(raw.id, raw.bet_type, raw.selector, raw.amount)
            .map_err(|err| err.to_string())?;
        if bet.covered != raw.covered {
            return Err(format!(
                "{}:{} covers {:?}, not {:?}",
                bet.bet_type, bet.selector, bet.covered, raw.covered
            ));
        }
        Ok(bet)
    }
}

/// Outcome of one spin. Immutable once produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSpin")]
pub struct SpinResult {
    pocket: Pocket,
    color: Color,
}

impl SpinResult {
    pub const fn new(pocket: Pocket) -> Self {
        Self {
            pocket,
            color: pocket.color(),
        }
    }

    pub const fn pocket(&self) -> Pocket {
        self.pocket
    }

    pub const fn color(&self) -> Color {
        self.color
    }
}

impl From<Pocket> for SpinResult {
    fn from(pocket: Pocket) -> Self {
        Self::new(pocket)
    }
}

#[derive(Deserialize)]
struct RawSpin {
    pocket: Pocket,
    color: Color,
}

impl TryFrom<RawSpin> for SpinResult {
    type Error = String;

    fn try_from(raw: RawSpin) -> Result<Self, Self::Error> {
        let spin = Self::new(raw.pocket);
        if spin.color != raw.color {
            return Err(format!(
                "pocket {} is {}, not {}",
                raw.pocket, spin.color, raw.color
            ));
        }
        Ok(spin)
    }
}

/// A single bet after settlement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetOutcome {
    pub bet: Bet,
    /// Stake plus profit for winning bets, 0 for losing ones.
    pub winnings: u64,
}

impl BetOutcome {
    pub const fn won(&self) -> bool {
        self.winnings > 0
    }
}

/// Result of settling a ledger snapshot against a spin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementResult {
    pub spin: SpinResult,
    pub total_staked: u64,
    /// Sum of winnings (stake included) over winning bets.
    pub total_winnings: u64,
    /// `total_winnings - total_staked`.
    pub net_profit: i64,
    pub winning: Vec<BetOutcome>,
    pub losing: Vec<BetOutcome>,
}

impl SettlementResult {
    pub fn bet_count(&self) -> usize {
        self.winning.len() + self.losing.len()
    }

    /// Outcomes ordered by bet id.
    pub fn outcomes(&self) -> Vec<&BetOutcome> {
        let mut all: Vec<&BetOutcome> = self.winning.iter().chain(self.losing.iter()).collect();
        all.sort_by_key(|outcome| outcome.bet.id());
        all
    }
}
