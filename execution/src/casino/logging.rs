use spinhall_types::casino::{Bet, PocketSet};
use std::fmt::Write;

pub fn clamp_i64(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

pub fn format_pocket_list(pockets: PocketSet) -> String {
    let mut out = String::with_capacity(pockets.len().saturating_mul(3));
    for (idx, pocket) in pockets.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", pocket);
    }
    out
}

/// Short label for a bet in log lines, e.g. `SPLIT:12`.
pub fn bet_label(bet: &Bet) -> String {
    format!("{}:{}", bet.bet_type(), bet.selector())
}

pub fn push_resolved_entry(out: &mut String, label: &str, pnl: i64) {
    if !out.is_empty() {
        out.push(',');
    }
    let _ = write!(out, r#"{{"label":"{}","pnl":{}}}"#, label, pnl);
}

#[cfg(test)]
mod tests {
    use super::*;
    use spinhall_types::casino::{BetId, BetType, Pocket};

    #[test]
    fn test_clamp_i64() {
        assert_eq!(clamp_i64(-5), -5);
        assert_eq!(clamp_i64(i128::MAX), i64::MAX);
        assert_eq!(clamp_i64(i128::MIN), i64::MIN);
    }

    #[test]
    fn test_format_helpers() {
        let set = PocketSet::new()
            .with(Pocket::DOUBLE_ZERO)
            .with(Pocket::number(3).unwrap());
        assert_eq!(format_pocket_list(set), "3,00");
        assert_eq!(format_pocket_list(PocketSet::EMPTY), "");

        let bet = Bet::new(BetId(4), BetType::Split, 12, 5).unwrap();
        assert_eq!(bet_label(&bet), "SPLIT:12");

        let mut out = String::new();
        push_resolved_entry(&mut out, "RED:0", 50);
        push_resolved_entry(&mut out, "STRAIGHT_UP:17", -10);
        assert_eq!(
            out,
            r#"{"label":"RED:0","pnl":50},{"label":"STRAIGHT_UP:17","pnl":-10}"#
        );
    }
}
