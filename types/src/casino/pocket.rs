use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ParsePocketError, DOUBLE_ZERO_INDEX, POCKET_COUNT, RED_NUMBERS};

/// Pocket color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Black => "black",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn is_red_number(number: u8) -> bool {
    let mut i = 0;
    while i < RED_NUMBERS.len() {
        if RED_NUMBERS[i] == number {
            return true;
        }
        i += 1;
    }
    false
}

/// A single wheel slot: `0`, `00` or 1-36.
///
/// Stored as an index in `0..=37`, where 0 is `0`, 1-36 are themselves and 37 is `00`.
/// Serialized as its table label (`"0"`, `"00"`, `"17"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Pocket(u8);

impl Pocket {
    pub const ZERO: Self = Self(0);
    pub const DOUBLE_ZERO: Self = Self(DOUBLE_ZERO_INDEX);

    /// Pocket for an index in `0..=37`.
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < POCKET_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Pocket for a table number in `1..=36`.
    pub const fn number(number: u8) -> Option<Self> {
        if number >= 1 && number <= 36 {
            Some(Self(number))
        } else {
            None
        }
    }

    /// All 38 pockets in index order (`0`, 1-36, `00`).
    pub fn all() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..POCKET_COUNT as u8).map(Self)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Table number for 1-36, `None` for either zero.
    pub const fn value(self) -> Option<u8> {
        if self.is_zero() {
            None
        } else {
            Some(self.0)
        }
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0 || self.0 == DOUBLE_ZERO_INDEX
    }

    pub const fn color(self) -> Color {
        if self.is_zero() {
            Color::Green
        } else if is_red_number(self.0) {
            Color::Red
        } else {
            Color::Black
        }
    }

    /// Zeros are neither even nor odd.
    pub const fn is_even(self) -> bool {
        !self.is_zero() && self.0 % 2 == 0
    }

    pub const fn is_odd(self) -> bool {
        !self.is_zero() && self.0 % 2 == 1
    }

    /// Column 1-3 (pocket `p` sits in column `((p - 1) mod 3) + 1`).
    pub const fn column(self) -> Option<u8> {
        if self.is_zero() {
            None
        } else {
            Some((self.0 - 1) % 3 + 1)
        }
    }

    /// Dozen 1-3.
    pub const fn dozen(self) -> Option<u8> {
        if self.is_zero() {
            None
        } else {
            Some((self.0 - 1) / 12 + 1)
        }
    }

    /// Street 0-11 (the table row).
    pub const fn street(self) -> Option<u8> {
        if self.is_zero() {
            None
        } else {
            Some((self.0 - 1) / 3)
        }
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == DOUBLE_ZERO_INDEX {
            f.write_str("00")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for Pocket {
    type Err = ParsePocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "00" => Ok(Self::DOUBLE_ZERO),
            "0" => Ok(Self::ZERO),
            _ => trimmed
                .parse::<u8>()
                .ok()
                .and_then(Self::number)
                .filter(|_| !trimmed.starts_with('0'))
                .ok_or_else(|| ParsePocketError {
                    label: s.to_string(),
                }),
        }
    }
}

impl From<Pocket> for String {
    fn from(pocket: Pocket) -> Self {
        pocket.to_string()
    }
}

impl TryFrom<String> for Pocket {
    type Error = ParsePocketError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A set of pockets backed by a 38-bit mask.
///
/// Serialized as a list of pocket labels in index order.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Pocket>", from = "Vec<Pocket>")]
pub struct PocketSet(u64);

impl PocketSet {
    pub const EMPTY: Self = Self(0);

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Const-friendly builder: returns the set with `pocket` added.
    pub const fn with(self, pocket: Pocket) -> Self {
        Self(self.0 | (1u64 << pocket.0))
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Inserts `pocket`, returning whether it was newly added.
    pub fn insert(&mut self, pocket: Pocket) -> bool {
        let added = !self.contains(pocket);
        self.0 |= 1u64 << pocket.0;
        added
    }

    pub const fn contains(self, pocket: Pocket) -> bool {
        self.0 & (1u64 << pocket.0) != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Pockets in index order.
    pub fn iter(self) -> impl Iterator<Item = Pocket> + Clone {
        Pocket::all().filter(move |pocket| self.contains(*pocket))
    }

    /// Every pocket matching `predicate`.
    pub fn matching(predicate: impl Fn(Pocket) -> bool) -> Self {
        Pocket::all().filter(|pocket| predicate(*pocket)).collect()
    }
}

impl fmt::Debug for PocketSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|pocket| pocket.to_string()))
            .finish()
    }
}

impl FromIterator<Pocket> for PocketSet {
    fn from_iter<I: IntoIterator<Item = Pocket>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl From<PocketSet> for Vec<Pocket> {
    fn from(set: PocketSet) -> Self {
        set.iter().collect()
    }
}

impl From<Vec<Pocket>> for PocketSet {
    fn from(pockets: Vec<Pocket>) -> Self {
        pockets.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Pocket::ZERO.to_string(), "0");
        assert_eq!(Pocket::DOUBLE_ZERO.to_string(), "00");
        assert_eq!(Pocket::number(17).unwrap().to_string(), "17");

        assert_eq!("00".parse::<Pocket>().unwrap(), Pocket::DOUBLE_ZERO);
        assert_eq!("0".parse::<Pocket>().unwrap(), Pocket::ZERO);
        assert_eq!("36".parse::<Pocket>().unwrap(), Pocket::number(36).unwrap());
        assert!("37".parse::<Pocket>().is_err());
        assert!("07".parse::<Pocket>().is_err());
        assert!("000".parse::<Pocket>().is_err());
        assert!("red".parse::<Pocket>().is_err());
    }

    #[test]
    fn test_zero_has_no_table_properties() {
        for zero in [Pocket::ZERO, Pocket::DOUBLE_ZERO] {
            assert!(zero.is_zero());
            assert_eq!(zero.color(), Color::Green);
            assert!(!zero.is_even());
            assert!(!zero.is_odd());
            assert_eq!(zero.column(), None);
            assert_eq!(zero.dozen(), None);
            assert_eq!(zero.street(), None);
            assert_eq!(zero.value(), None);
        }
    }

    #[test]
    fn test_column_and_dozen() {
        let p = |n| Pocket::number(n).unwrap();
        assert_eq!(p(1).column(), Some(1));
        assert_eq!(p(2).column(), Some(2));
        assert_eq!(p(36).column(), Some(3));
        assert_eq!(p(12).dozen(), Some(1));
        assert_eq!(p(13).dozen(), Some(2));
        assert_eq!(p(36).dozen(), Some(3));
        assert_eq!(p(34).street(), Some(11));
    }

    #[test]
    fn test_pocket_set_membership() {
        let mut set = PocketSet::new();
        assert!(set.is_empty());
        assert!(set.insert(Pocket::DOUBLE_ZERO));
        assert!(!set.insert(Pocket::DOUBLE_ZERO));
        assert!(set.insert(Pocket::number(5).unwrap()));
        assert_eq!(set.len(), 2);
        assert!(set.contains(Pocket::DOUBLE_ZERO));
        assert!(!set.contains(Pocket::ZERO));
        let labels: Vec<String> = set.iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["5", "00"]);
    }
}
