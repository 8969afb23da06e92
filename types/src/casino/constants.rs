/// Number of pockets on an American wheel (1-36, 0 and 00).
pub const POCKET_COUNT: usize = 38;

/// Index used for the `00` pocket.
pub const DOUBLE_ZERO_INDEX: u8 = 37;

/// Red numbers on a roulette wheel.
pub const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

/// Black numbers on a roulette wheel.
pub const BLACK_NUMBERS: [u8; 18] = [
    2, 4, 6, 8, 10, 11, 13, 15, 17, 20, 22, 24, 26, 28, 29, 31, 33, 35,
];

/// Physical pocket order, clockwise from 0 (pocket indices; 37 is `00`).
pub const WHEEL_ORDER: [u8; POCKET_COUNT] = [
    0, 28, 9, 26, 30, 11, 7, 20, 32, 17, 5, 22, 34, 15, 3, 24, 36, 13, 1, DOUBLE_ZERO_INDEX, 27,
    10, 25, 29, 12, 8, 19, 31, 18, 6, 21, 33, 16, 4, 23, 35, 14, 2,
];

/// Starting tokens for a new wallet
pub const INITIAL_TOKENS: u64 = 1_000;

/// Chip denominations offered by the table
pub const CHIP_DENOMINATIONS: [u64; 5] = [1, 5, 10, 25, 50];

/// Rounds kept in the history
pub const HISTORY_LIMIT: usize = 100;

/// Tokens granted per elapsed claim interval
pub const HOURLY_TOKENS: u64 = 200;

/// Claim interval in milliseconds (1 hour)
pub const CLAIM_INTERVAL_MS: u64 = 60 * 60 * 1000;

/// Claim intervals that may accumulate above the initial balance (1 day)
pub const MAX_ACCUMULATED_INTERVALS: u64 = 24;

/// Rounds required before betting patterns are analyzed
pub const MIN_ROUNDS_FOR_PATTERNS: usize = 10;

/// Default sample size for number pattern analysis
pub const PATTERN_SAMPLE_SIZE: usize = 100;

/// Default number of points in a performance chart
pub const CHART_POINTS: usize = 20;
