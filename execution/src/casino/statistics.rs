//! Derived statistics over a round [`History`].
//!
//! All functions are read-only views; nothing here feeds back into settlement.
//! A round counts as a win when it paid anything back (`winnings > 0`).

use spinhall_types::casino::{
    Color, History, Pocket, RoundRecord, MIN_ROUNDS_FOR_PATTERNS, POCKET_COUNT,
};
use std::fmt;

use super::logging::clamp_i64;

/// Current run of consecutive results, newest round last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Streak {
    #[default]
    None,
    Win(usize),
    Lose(usize),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerStats {
    pub total_rounds: usize,
    pub total_wins: usize,
    pub total_staked: u64,
    pub total_winnings: u64,
    /// Percentage, rounded to two decimals.
    pub win_rate: f64,
    pub average_bet: u64,
    /// Average payout over winning rounds.
    pub average_winning: u64,
    pub biggest_win: u64,
    pub longest_win_streak: usize,
    pub longest_lose_streak: usize,
    pub current_streak: Streak,
    pub profit_loss: i64,
    /// Percentage of total staked, rounded to two decimals.
    pub roi: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColorDistribution {
    pub red: u32,
    pub black: u32,
    pub green: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParityDistribution {
    pub even: u32,
    pub odd: u32,
    pub zero: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberPatterns {
    /// Rounds actually analyzed.
    pub sample_size: usize,
    /// Hits per pocket, indexed by [`Pocket::index`].
    pub frequency: [u32; POCKET_COUNT],
    pub hot: Vec<Pocket>,
    pub cold: Vec<Pocket>,
    pub colors: ColorDistribution,
    pub parity: ParityDistribution,
}

impl NumberPatterns {
    pub fn frequency_of(&self, pocket: Pocket) -> u32 {
        self.frequency[pocket.index() as usize]
    }
}

/// One point of the running profit chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartPoint {
    /// 1-based position within the chart.
    pub round: usize,
    /// Cumulative net profit up to and including this round.
    pub balance: i64,
    pub win: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BetSizeVariation {
    VeryStable,
    Stable,
    Moderate,
    HighlyVariable,
}

impl BetSizeVariation {
    /// Classify a coefficient of variation.
    pub fn from_coefficient(cv: f64) -> Self {
        if cv < 0.1 {
            Self::VeryStable
        } else if cv < 0.3 {
            Self::Stable
        } else if cv < 0.5 {
            Self::Moderate
        } else {
            Self::HighlyVariable
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryStable => "very stable",
            Self::Stable => "stable",
            Self::Moderate => "moderate",
            Self::HighlyVariable => "highly variable",
        }
    }
}

impl fmt::Display for BetSizeVariation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiskLevel {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskLevel {
    /// Classify by the largest round stake.
    pub const fn from_max_bet(max_bet: u64) -> Self {
        if max_bet <= 100 {
            Self::Conservative
        } else if max_bet <= 500 {
            Self::Moderate
        } else {
            Self::Aggressive
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recommendation {
    KeepStrategy,
    AdjustStrategy,
    TakeABreak,
}

impl Recommendation {
    /// Pick a recommendation from a win rate in `[0, 1]`.
    pub fn from_win_rate(win_rate: f64) -> Self {
        if win_rate > 0.4 {
            Self::KeepStrategy
        } else if win_rate > 0.2 {
            Self::AdjustStrategy
        } else {
            Self::TakeABreak
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::KeepStrategy => {
                "Your win rate is good! Consider maintaining your current strategy."
            }
            Self::AdjustStrategy => {
                "Your win rate is average. Consider adjusting your betting strategy."
            }
            Self::TakeABreak => {
                "Your win rate is low. Consider taking a break or reducing bet sizes."
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BettingPatterns {
    pub average_bet: u64,
    pub coefficient_of_variation: f64,
    pub variation: BetSizeVariation,
    pub risk_level: RiskLevel,
    pub recommendation: Recommendation,
    pub max_bet: u64,
    pub min_bet: u64,
    pub bet_range: u64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Integer average rounded half up; 0 for an empty set.
fn rounded_average(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u128;
    ((total as u128 + count / 2) / count) as u64
}

/// Longest win run, longest lose run and the current run, walking oldest to newest.
fn streaks(history: &History) -> (usize, usize, Streak) {
    let mut longest_win = 0;
    let mut longest_lose = 0;
    let mut current = Streak::None;
    for record in history.iter().rev() {
        current = match (current, record.is_win()) {
            (Streak::Win(n), true) => Streak::Win(n + 1),
            (_, true) => Streak::Win(1),
            (Streak::Lose(n), false) => Streak::Lose(n + 1),
            (_, false) => Streak::Lose(1),
        };
        match current {
            Streak::Win(n) => longest_win = longest_win.max(n),
            Streak::Lose(n) => longest_lose = longest_lose.max(n),
            Streak::None => {}
        }
    }
    (longest_win, longest_lose, current)
}

pub fn player_stats(history: &History) -> PlayerStats {
    if history.is_empty() {
        return PlayerStats::default();
    }
    let total_rounds = history.len();
    let total_wins = history.iter().filter(|r| r.is_win()).count();
    let total_staked = history
        .iter()
        .fold(0u64, |sum, r| sum.saturating_add(r.staked));
    let total_winnings = history
        .iter()
        .fold(0u64, |sum, r| sum.saturating_add(r.winnings));
    let biggest_win = history.iter().map(|r| r.winnings).max().unwrap_or(0);
    let profit_loss = clamp_i64(total_winnings as i128 - total_staked as i128);
    let roi = if total_staked > 0 {
        round2(profit_loss as f64 / total_staked as f64 * 100.0)
    } else {
        0.0
    };
    let (longest_win_streak, longest_lose_streak, current_streak) = streaks(history);

    PlayerStats {
        total_rounds,
        total_wins,
        total_staked,
        total_winnings,
        win_rate: round2(total_wins as f64 / total_rounds as f64 * 100.0),
        average_bet: rounded_average(total_staked, total_rounds),
        average_winning: rounded_average(total_winnings, total_wins),
        biggest_win,
        longest_win_streak,
        longest_lose_streak,
        current_streak,
        profit_loss,
        roi,
    }
}

/// Pocket frequencies and distributions over the newest `sample` rounds.
///
/// Hot pockets are the five most frequent, cold the five least; ties keep pocket
/// index order. With no rounds, both lists are empty.
pub fn number_patterns(history: &History, sample: usize) -> NumberPatterns {
    let mut patterns = NumberPatterns {
        sample_size: 0,
        frequency: [0; POCKET_COUNT],
        hot: Vec::new(),
        cold: Vec::new(),
        colors: ColorDistribution::default(),
        parity: ParityDistribution::default(),
    };

    for record in history.iter().take(sample) {
        let pocket = record.pocket();
        patterns.sample_size += 1;
        patterns.frequency[pocket.index() as usize] += 1;
        match pocket.color() {
            Color::Red => patterns.colors.red += 1,
            Color::Black => patterns.colors.black += 1,
            Color::Green => patterns.colors.green += 1,
        }
        if pocket.is_zero() {
            patterns.parity.zero += 1;
        } else if pocket.is_even() {
            patterns.parity.even += 1;
        } else {
            patterns.parity.odd += 1;
        }
    }
    if patterns.sample_size == 0 {
        return patterns;
    }

    let mut ranked: Vec<Pocket> = Pocket::all().collect();
    ranked.sort_by(|a, b| patterns.frequency_of(*b).cmp(&patterns.frequency_of(*a)));
    patterns.hot = ranked.iter().take(5).copied().collect();
    patterns.cold = ranked[ranked.len() - 5..].to_vec();
    patterns
}

/// Running net profit over the newest `max_points` rounds, oldest first.
pub fn performance_chart(history: &History, max_points: usize) -> Vec<ChartPoint> {
    let recent: Vec<&RoundRecord> = history.iter().take(max_points).collect();
    let mut balance: i64 = 0;
    recent
        .into_iter()
        .rev()
        .enumerate()
        .map(|(index, record)| {
            balance = balance.saturating_add(record.net_profit);
            ChartPoint {
                round: index + 1,
                balance,
                win: record.is_win(),
            }
        })
        .collect()
}

/// Stake sizing analysis; `None` until enough rounds have been played.
pub fn betting_patterns(history: &History) -> Option<BettingPatterns> {
    if history.len() < MIN_ROUNDS_FOR_PATTERNS {
        return None;
    }
    let stakes: Vec<u64> = history.iter().map(|r| r.staked).collect();
    let count = stakes.len() as f64;
    let mean = stakes.iter().map(|&s| s as f64).sum::<f64>() / count;
    let variance = stakes
        .iter()
        .map(|&s| (s as f64 - mean).powi(2))
        .sum::<f64>()
        / count;
    let coefficient_of_variation = if mean > 0.0 {
        variance.sqrt() / mean
    } else {
        0.0
    };
    let max_bet = stakes.iter().copied().max().unwrap_or(0);
    let min_bet = stakes.iter().copied().min().unwrap_or(0);
    let wins = history.iter().filter(|r| r.is_win()).count();

    Some(BettingPatterns {
        average_bet: mean.round() as u64,
        coefficient_of_variation,
        variation: BetSizeVariation::from_coefficient(coefficient_of_variation),
        risk_level: RiskLevel::from_max_bet(max_bet),
        recommendation: Recommendation::from_win_rate(wins as f64 / count),
        max_bet,
        min_bet,
        bet_range: max_bet - min_bet,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinhall_types::casino::SpinResult;

    fn record(round: u64, pocket: Pocket, staked: u64, winnings: u64) -> RoundRecord {
        RoundRecord {
            round,
            spin: SpinResult::new(pocket),
            staked,
            winnings,
            net_profit: winnings as i64 - staked as i64,
            bets: Vec::new(),
        }
    }

    fn p(n: u8) -> Pocket {
        Pocket::number(n).unwrap()
    }

    /// Builds a history from `(pocket, staked, winnings)` rows, oldest first.
    fn history_of(rows: &[(Pocket, u64, u64)]) -> History {
        let mut history = History::new(100);
        for (i, &(pocket, staked, winnings)) in rows.iter().enumerate() {
            history.push(record(i as u64 + 1, pocket, staked, winnings));
        }
        history
    }

    #[test]
    fn test_empty_history() {
        let history = History::new(10);
        assert_eq!(player_stats(&history), PlayerStats::default());
        let patterns = number_patterns(&history, 100);
        assert_eq!(patterns.sample_size, 0);
        assert!(patterns.hot.is_empty() && patterns.cold.is_empty());
        assert!(performance_chart(&history, 20).is_empty());
        assert_eq!(betting_patterns(&history), None);
    }

    #[test]
    fn test_player_stats() {
        // Oldest to newest: W L L W W
        let history = history_of(&[
            (p(1), 10, 20),
            (p(2), 10, 0),
            (p(3), 10, 0),
            (p(4), 10, 30),
            (p(5), 20, 360),
        ]);
        let stats = player_stats(&history);
        assert_eq!(stats.total_rounds, 5);
        assert_eq!(stats.total_wins, 3);
        assert_eq!(stats.total_staked, 60);
        assert_eq!(stats.total_winnings, 410);
        assert_eq!(stats.win_rate, 60.0);
        assert_eq!(stats.average_bet, 12);
        assert_eq!(stats.average_winning, 137);
        assert_eq!(stats.biggest_win, 360);
        assert_eq!(stats.longest_win_streak, 2);
        assert_eq!(stats.longest_lose_streak, 2);
        assert_eq!(stats.current_streak, Streak::Win(2));
        assert_eq!(stats.profit_loss, 350);
        assert_eq!(stats.roi, 583.33);
    }

    #[test]
    fn test_current_losing_streak() {
        let history = history_of(&[(p(1), 10, 20), (p(2), 10, 0), (p(3), 10, 0), (p(4), 10, 0)]);
        let stats = player_stats(&history);
        assert_eq!(stats.current_streak, Streak::Lose(3));
        assert_eq!(stats.win_rate, 25.0);
        assert_eq!(stats.roi, -50.0);
    }

    #[test]
    fn test_number_patterns() {
        let history = history_of(&[
            (p(7), 1, 0),
            (p(7), 1, 0),
            (Pocket::DOUBLE_ZERO, 1, 0),
            (p(7), 1, 0),
            (p(12), 1, 0),
            (Pocket::ZERO, 1, 0),
        ]);
        let patterns = number_patterns(&history, 100);
        assert_eq!(patterns.sample_size, 6);
        assert_eq!(patterns.frequency_of(p(7)), 3);
        assert_eq!(patterns.hot, vec![p(7), Pocket::ZERO, p(12), Pocket::DOUBLE_ZERO, p(1)]);
        assert_eq!(patterns.cold, vec![p(32), p(33), p(34), p(35), p(36)]);
        assert_eq!(
            patterns.colors,
            ColorDistribution {
                red: 4,
                black: 0,
                green: 2
            }
        );
        assert_eq!(
            patterns.parity,
            ParityDistribution {
                even: 1,
                odd: 3,
                zero: 2
            }
        );

        // Sampling only looks at the newest rounds.
        let newest = number_patterns(&history, 2);
        assert_eq!(newest.sample_size, 2);
        assert_eq!(newest.frequency_of(p(7)), 0);
        assert_eq!(newest.frequency_of(Pocket::ZERO), 1);
    }

    #[test]
    fn test_performance_chart() {
        let history = history_of(&[(p(1), 10, 0), (p(2), 10, 20), (p(3), 10, 0), (p(4), 5, 0)]);
        let chart = performance_chart(&history, 3);
        assert_eq!(
            chart,
            vec![
                ChartPoint {
                    round: 1,
                    balance: 10,
                    win: true
                },
                ChartPoint {
                    round: 2,
                    balance: 0,
                    win: false
                },
                ChartPoint {
                    round: 3,
                    balance: -5,
                    win: false
                },
            ]
        );
    }

    #[test]
    fn test_betting_patterns() {
        let nine = vec![(p(1), 10, 0); 9];
        assert_eq!(betting_patterns(&history_of(&nine)), None);

        let mut rows = vec![(p(1), 10, 20); 5];
        rows.extend(vec![(p(2), 10, 0); 5]);
        let steady = betting_patterns(&history_of(&rows)).unwrap();
        assert_eq!(steady.average_bet, 10);
        assert_eq!(steady.variation, BetSizeVariation::VeryStable);
        assert_eq!(steady.risk_level, RiskLevel::Conservative);
        assert_eq!(steady.recommendation, Recommendation::KeepStrategy);
        assert_eq!(steady.bet_range, 0);

        let mut rows = vec![(p(1), 10, 0); 9];
        rows.push((p(2), 1000, 2000));
        let swingy = betting_patterns(&history_of(&rows)).unwrap();
        assert_eq!(swingy.average_bet, 109);
        assert_eq!(swingy.variation, BetSizeVariation::HighlyVariable);
        assert_eq!(swingy.risk_level, RiskLevel::Aggressive);
        assert_eq!(swingy.recommendation, Recommendation::TakeABreak);
        assert_eq!((swingy.min_bet, swingy.max_bet, swingy.bet_range), (10, 1000, 990));
    }

    #[test]
    fn test_classifier_boundaries() {
        assert_eq!(RiskLevel::from_max_bet(100), RiskLevel::Conservative);
        assert_eq!(RiskLevel::from_max_bet(500), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_max_bet(501), RiskLevel::Aggressive);
        assert_eq!(BetSizeVariation::from_coefficient(0.3), BetSizeVariation::Moderate);
        assert_eq!(Recommendation::from_win_rate(0.3), Recommendation::AdjustStrategy);
        assert_eq!(Recommendation::from_win_rate(0.2), Recommendation::TakeABreak);
        assert_eq!(RiskLevel::Moderate.to_string(), "moderate");
    }
}
