//! Settlement engine.
//!
//! Pure evaluation of a ledger snapshot against a spin. A bet wins iff the winning
//! pocket is in its covered set, and a winning bet returns `amount * (payout_ratio + 1)`.
//! Bets are evaluated independently; the wallet is never touched here.

use super::logging::{bet_label, clamp_i64, push_resolved_entry};
use spinhall_types::casino::{Bet, BetOutcome, SettlementResult, SpinResult};

/// Settle `bets` against `spin`.
pub fn settle(bets: &[Bet], spin: &SpinResult) -> SettlementResult {
    let pocket = spin.pocket();
    let mut winning = Vec::new();
    let mut losing = Vec::new();
    let mut total_staked: u64 = 0;
    let mut total_winnings: u64 = 0;

    for bet in bets {
        total_staked = total_staked.saturating_add(bet.amount());
        if bet.covers(pocket) {
            let winnings = bet.winnings();
            total_winnings = total_winnings.saturating_add(winnings);
            winning.push(BetOutcome {
                bet: bet.clone(),
                winnings,
            });
        } else {
            losing.push(BetOutcome {
                bet: bet.clone(),
                winnings: 0,
            });
        }
    }

    SettlementResult {
        spin: *spin,
        total_staked,
        total_winnings,
        net_profit: clamp_i64(total_winnings as i128 - total_staked as i128),
        winning,
        losing,
    }
}

/// Compact `[{"label":..,"pnl":..}]` list of every outcome, for log lines.
pub fn resolved_summary(result: &SettlementResult) -> String {
    let mut out = String::new();
    for outcome in result.outcomes() {
        let pnl = clamp_i64(outcome.winnings as i128 - outcome.bet.amount() as i128);
        push_resolved_entry(&mut out, &bet_label(&outcome.bet), pnl);
    }
    format!("[{out}]")
}
