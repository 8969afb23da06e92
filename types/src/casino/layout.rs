//! Table layout: which pockets each betting spot covers.
//!
//! Selector format per bet type:
//! - Straight Up: pocket index 0-37 (0 = `0`, 1-36, 37 = `00`)
//! - Split: 0-61. Indices 0-56 walk the table by lower number, horizontal pair
//!   (n, n+1) before vertical pair (n, n+3). Indices 57-61 are the zero splits
//!   0-00, 0-1, 0-2, 00-2, 00-3.
//! - Street: row 0-11 ({3k+1, 3k+2, 3k+3})
//! - Corner: 0-21, ordered by top-left number ({n, n+1, n+3, n+4})
//! - Five Number: 0 ({0, 00, 1, 2, 3})
//! - Six Line: 0-10 (rows k and k+1)
//! - Column / Dozen: 1-3
//! - Red / Black / Even / Odd / Low / High: 0

use std::ops::RangeInclusive;

use super::{BetType, Color, Pocket, PocketSet, DOUBLE_ZERO_INDEX};

const ZERO_SPLITS: [(u8, u8); 5] = [
    (0, DOUBLE_ZERO_INDEX),
    (0, 1),
    (0, 2),
    (DOUBLE_ZERO_INDEX, 2),
    (DOUBLE_ZERO_INDEX, 3),
];

const FIVE_NUMBER: PocketSet = PocketSet::new()
    .with(Pocket::ZERO)
    .with(Pocket::DOUBLE_ZERO)
    .with(numbered(1))
    .with(numbered(2))
    .with(numbered(3));

const fn numbered(number: u8) -> Pocket {
    match Pocket::number(number) {
        Some(pocket) => pocket,
        None => Pocket::ZERO,
    }
}

fn set_of(indices: &[u8]) -> PocketSet {
    indices.iter().filter_map(|&index| Pocket::from_index(index)).collect()
}

fn splits() -> impl Iterator<Item = PocketSet> {
    (1u8..=36)
        .flat_map(|n| {
            let horizontal = (n % 3 != 0).then_some((n, n + 1));
            let vertical = (n <= 33).then_some((n, n + 3));
            horizontal.into_iter().chain(vertical)
        })
        .chain(ZERO_SPLITS)
        .map(|(a, b)| set_of(&[a, b]))
}

fn corners() -> impl Iterator<Item = PocketSet> {
    (1u8..=32)
        .filter(|n| n % 3 != 0)
        .map(|n| set_of(&[n, n + 1, n + 3, n + 4]))
}

fn street(row: u8) -> PocketSet {
    let first = row * 3 + 1;
    set_of(&[first, first + 1, first + 2])
}

impl BetType {
    /// Valid selectors for this bet type.
    pub fn selectors(self) -> RangeInclusive<u8> {
        match self {
            Self::StraightUp => 0..=DOUBLE_ZERO_INDEX,
            Self::Split => 0..=61,
            Self::Street => 0..=11,
            Self::Corner => 0..=21,
            Self::SixLine => 0..=10,
            Self::Column | Self::Dozen => 1..=3,
            Self::FiveNumber | Self::Red | Self::Black | Self::Even | Self::Odd | Self::Low
            | Self::High => 0..=0,
        }
    }

    /// Pockets covered by the spot at `selector`, or `None` if there is no such spot.
    pub fn covered(self, selector: u8) -> Option<PocketSet> {
        if !self.selectors().contains(&selector) {
            return None;
        }
        match self {
            Self::StraightUp => Pocket::from_index(selector).map(|pocket| PocketSet::new().with(pocket)),
            Self::Split => splits().nth(selector as usize),
            Self::Street => Some(street(selector)),
            Self::Corner => corners().nth(selector as usize),
            Self::FiveNumber => Some(FIVE_NUMBER),
            Self::SixLine => Some(street(selector).union(street(selector + 1))),
            Self::Column => Some(PocketSet::matching(|p| p.column() == Some(selector))),
            Self::Dozen => Some(PocketSet::matching(|p| p.dozen() == Some(selector))),
            Self::Red => Some(PocketSet::matching(|p| p.color() == Color::Red)),
            Self::Black => Some(PocketSet::matching(|p| p.color() == Color::Black)),
            Self::Even => Some(PocketSet::matching(Pocket::is_even)),
            Self::Odd => Some(PocketSet::matching(Pocket::is_odd)),
            Self::Low => Some(PocketSet::matching(|p| matches!(p.value(), Some(1..=18)))),
            Self::High => Some(PocketSet::matching(|p| matches!(p.value(), Some(19..=36)))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_walk() {
        let all: Vec<PocketSet> = splits().collect();
        assert_eq!(all.len(), 62);
        assert_eq!(all[0], set_of(&[1, 2]));
        assert_eq!(all[1], set_of(&[1, 4]));
        assert_eq!(all[56], set_of(&[35, 36]));
        assert_eq!(all[61], set_of(&[DOUBLE_ZERO_INDEX, 3]));
    }

    #[test]
    fn test_out_of_range_selectors() {
        assert_eq!(BetType::Corner.covered(22), None);
        assert_eq!(BetType::Dozen.covered(0), None);
        assert_eq!(BetType::Red.covered(1), None);
        assert_eq!(BetType::FiveNumber.covered(0), Some(FIVE_NUMBER));
    }
}
