//! Session-scoped roulette table.
//!
//! A [`Table`] owns the wallet, the bet ledger, the random source and the round
//! history for one player session. Stakes are debited when a bet is placed and
//! refunded when it is removed, reduced or cleared; settlement credits winnings
//! (stake included) and reopens the ledger for the next round.
//!
//! The table is synchronous and does no I/O. Hosts serving several threads wrap it
//! in a single `Mutex<Table>`.

use super::ledger::{Ledger, Reduction};
use super::logging::{bet_label, format_pocket_list};
use super::settlement::{self, resolved_summary};
use super::wallet::{Claim, ClaimClock, Wallet};
use super::wheel::{self, RandomSource, RngSource};
use rand_chacha::ChaCha20Rng;
use spinhall_types::casino::{
    Bet, BetId, BetType, ConfigError, GameError, History, RoundRecord, SettlementResult,
    SpinResult, TableConfig,
};

pub struct Table<R: RandomSource = RngSource<ChaCha20Rng>> {
    config: TableConfig,
    wallet: Wallet,
    ledger: Ledger,
    rng: R,
    history: History,
    claim_clock: ClaimClock,
    rounds: u64,
}

impl Table {
    /// Table with a deterministic ChaCha20 source.
    pub fn seeded(config: TableConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, RngSource::seeded(seed))
    }

    pub fn from_entropy(config: TableConfig) -> Result<Self, ConfigError> {
        Self::new(config, RngSource::from_entropy())
    }
}

impl<R: RandomSource> Table<R> {
    pub fn new(config: TableConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            wallet: Wallet::new(config.initial_tokens),
            ledger: Ledger::new(),
            history: History::new(config.history_limit),
            claim_clock: ClaimClock::default(),
            rounds: 0,
            rng,
            config,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Stake `amount` on a spot and debit it from the wallet.
    ///
    /// Placing on a spot that already holds a bet merges the two.
    pub fn place_bet(
        &mut self,
        bet_type: BetType,
        selector: u8,
        amount: u64,
    ) -> Result<Bet, GameError> {
        match self.try_place_bet(bet_type, selector, amount) {
            Ok(bet) => {
                tracing::debug!(
                    bet_id = %bet.id(),
                    bet = %bet_label(&bet),
                    amount = amount,
                    stake = bet.amount(),
                    pockets = %format_pocket_list(bet.covered()),
                    balance = self.wallet.balance(),
                    "bet placed"
                );
                Ok(bet)
            }
            Err(err) => {
                tracing::warn!(
                    bet_type = %bet_type,
                    selector = selector,
                    amount = amount,
                    balance = self.wallet.balance(),
                    ?err,
                    "bet rejected"
                );
                Err(err)
            }
        }
    }

    fn try_place_bet(
        &mut self,
        bet_type: BetType,
        selector: u8,
        amount: u64,
    ) -> Result<Bet, GameError> {
        if !self.ledger.is_open() {
            return Err(GameError::LedgerLocked);
        }
        if !self.config.accepts_stake(amount) {
            return Err(GameError::InvalidAmount { amount });
        }
        self.wallet.validate(amount)?;
        let bet = self.ledger.add_bet(bet_type, selector, amount)?;
        self.wallet.debit(amount)?;
        Ok(bet)
    }

    /// Remove a bet and refund its stake.
    pub fn remove_bet(&mut self, id: BetId) -> Result<Option<Bet>, GameError> {
        let removed = self.ledger.remove_bet(id)?;
        if let Some(bet) = &removed {
            let balance = self.wallet.credit(bet.amount());
            tracing::debug!(
                bet_id = %bet.id(),
                bet = %bet_label(bet),
                refunded = bet.amount(),
                balance = balance,
                "bet removed"
            );
        }
        Ok(removed)
    }

    /// Take up to `amount` off a spot and refund what was released.
    pub fn reduce_bet(
        &mut self,
        bet_type: BetType,
        selector: u8,
        amount: u64,
    ) -> Result<Option<Reduction>, GameError> {
        let reduction = self.ledger.reduce_bet(bet_type, selector, amount)?;
        if let Some(reduction) = &reduction {
            let balance = self.wallet.credit(reduction.released);
            tracing::debug!(
                bet_type = %bet_type,
                selector = selector,
                refunded = reduction.released,
                remaining = reduction.remaining.as_ref().map_or(0, Bet::amount),
                balance = balance,
                "bet reduced"
            );
        }
        Ok(reduction)
    }

    /// Remove every bet and refund the total stake.
    pub fn clear_bets(&mut self) -> Result<Vec<Bet>, GameError> {
        let cleared = self.ledger.clear()?;
        let refunded = cleared
            .iter()
            .fold(0u64, |sum, bet| sum.saturating_add(bet.amount()));
        if !cleared.is_empty() {
            let balance = self.wallet.credit(refunded);
            tracing::debug!(
                bets = cleared.len(),
                refunded = refunded,
                balance = balance,
                "bets cleared"
            );
        }
        Ok(cleared)
    }

    pub fn bets(&self) -> Vec<Bet> {
        self.ledger.bets()
    }

    pub fn bet(&self, id: BetId) -> Option<&Bet> {
        self.ledger.get(id)
    }

    pub fn total_staked(&self) -> u64 {
        self.ledger.total_staked()
    }

    pub fn amount_on(&self, bet_type: BetType, selector: u8) -> u64 {
        self.ledger.amount_on(bet_type, selector)
    }

    /// Spin with the table's own source.
    pub fn spin(&mut self) -> SpinResult {
        wheel::spin(&mut self.rng)
    }

    /// Settle the current bets against `spin`.
    ///
    /// Locks the ledger, evaluates the snapshot, credits winnings, records the round
    /// and reopens the ledger empty. Rounds without bets are settled but not recorded.
    pub fn settle(&mut self, spin: SpinResult) -> Result<SettlementResult, GameError> {
        let snapshot = self.ledger.lock()?;
        let result = settlement::settle(&snapshot, &spin);
        let balance = self.wallet.credit(result.total_winnings);
        self.rounds += 1;
        if !snapshot.is_empty() {
            self.history
                .push(RoundRecord::from_settlement(self.rounds, &result));
        }
        self.ledger.reopen();

        tracing::info!(
            round = self.rounds,
            pocket = %spin.pocket(),
            color = %spin.color(),
            staked = result.total_staked,
            winnings = result.total_winnings,
            net = result.net_profit,
            balance = balance,
            resolved = %resolved_summary(&result),
            "round settled"
        );
        Ok(result)
    }

    /// Spin with the table's source and settle.
    pub fn play_round(&mut self) -> Result<SettlementResult, GameError> {
        let spin = self.spin();
        self.settle(spin)
    }

    pub fn play_round_with<S: RandomSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<SettlementResult, GameError> {
        let spin = wheel::spin(source);
        self.settle(spin)
    }

    pub fn wallet_balance(&self) -> u64 {
        self.wallet.balance()
    }

    /// Credit the wallet from outside the table (deposits, rewards).
    pub fn credit_wallet(&mut self, amount: u64) -> u64 {
        self.wallet.credit(amount)
    }

    /// Debit the wallet from outside the table.
    pub fn debit_wallet(&mut self, amount: u64) -> Result<u64, GameError> {
        self.wallet.debit(amount)
    }

    /// Tokens an hourly claim at `now_ms` would grant.
    pub fn claimable(&self, now_ms: u64) -> Claim {
        self.claim_clock.claimable(
            self.wallet.balance(),
            now_ms,
            self.config.initial_tokens,
            &self.config.claim,
        )
    }

    /// Claim hourly tokens at `now_ms` and credit them, returning the tokens granted.
    pub fn claim_hourly(&mut self, now_ms: u64) -> u64 {
        let tokens = self.claim_clock.claim(
            self.wallet.balance(),
            now_ms,
            self.config.initial_tokens,
            &self.config.claim,
        );
        if tokens > 0 {
            let balance = self.wallet.credit(tokens);
            tracing::info!(tokens = tokens, balance = balance, "hourly tokens claimed");
        }
        tokens
    }

    pub fn time_until_next_claim(&self, now_ms: u64) -> u64 {
        self.claim_clock.time_until_next(now_ms, &self.config.claim)
    }

    pub fn claim_clock(&self) -> ClaimClock {
        self.claim_clock
    }

    /// Restore a persisted claim clock.
    pub fn set_claim_clock(&mut self, clock: ClaimClock) {
        self.claim_clock = clock;
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Replace the history with a persisted one, re-bounded to this table's limit.
    pub fn restore_history(&mut self, history: History) {
        let mut restored = History::new(self.config.history_limit);
        for record in history.iter().rev() {
            restored.push(record.clone());
        }
        self.rounds = self.rounds.max(restored.latest().map_or(0, |r| r.round));
        self.history = restored;
    }

    /// Rounds settled at this table, including rounds without bets.
    pub fn rounds_played(&self) -> u64 {
        self.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casino::wheel::ScriptedSource;
    use spinhall_types::casino::Pocket;

    fn table() -> Table {
        Table::seeded(TableConfig::default(), 7).unwrap()
    }

    fn on(n: u8) -> SpinResult {
        SpinResult::new(Pocket::number(n).unwrap())
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TableConfig {
            history_limit: 0,
            ..TableConfig::default()
        };
        assert!(matches!(
            Table::seeded(config, 1),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_place_debits_wallet() {
        let mut table = table();
        table.place_bet(BetType::Red, 0, 50).unwrap();
        table.place_bet(BetType::Red, 0, 25).unwrap();
        assert_eq!(table.wallet_balance(), 925);
        assert_eq!(table.total_staked(), 75);
        assert_eq!(table.bets().len(), 1);
    }

    #[test]
    fn test_failed_place_changes_nothing() {
        let mut table = table();
        assert_eq!(
            table.place_bet(BetType::Red, 0, 1001),
            Err(GameError::InsufficientFunds {
                needed: 1001,
                available: 1000
            })
        );
        assert!(table.place_bet(BetType::Street, 12, 5).is_err());
        assert_eq!(
            table.place_bet(BetType::Red, 0, 0),
            Err(GameError::InvalidAmount { amount: 0 })
        );
        assert_eq!(table.wallet_balance(), 1000);
        assert_eq!(table.total_staked(), 0);
        assert!(table.bets().is_empty());
    }

    #[test]
    fn test_chip_denominations_enforced() {
        let config = TableConfig {
            enforce_chip_denominations: true,
            ..TableConfig::default()
        };
        let mut table = Table::seeded(config, 1).unwrap();
        assert_eq!(
            table.place_bet(BetType::Odd, 0, 7),
            Err(GameError::InvalidAmount { amount: 7 })
        );
        // Chips stack: two 25 chips on the same spot.
        table.place_bet(BetType::Odd, 0, 25).unwrap();
        table.place_bet(BetType::Odd, 0, 25).unwrap();
        assert_eq!(table.amount_on(BetType::Odd, 0), 50);
    }

    #[test]
    fn test_refunds() {
        let mut table = table();
        let bet = table.place_bet(BetType::StraightUp, 17, 100).unwrap();
        table.place_bet(BetType::Dozen, 2, 50).unwrap();
        table.place_bet(BetType::Black, 0, 10).unwrap();
        assert_eq!(table.wallet_balance(), 840);

        table.remove_bet(bet.id()).unwrap();
        assert_eq!(table.wallet_balance(), 940);
        assert_eq!(table.remove_bet(bet.id()).unwrap(), None);
        assert_eq!(table.wallet_balance(), 940);

        let reduction = table.reduce_bet(BetType::Dozen, 2, 20).unwrap().unwrap();
        assert_eq!(reduction.released, 20);
        assert_eq!(table.wallet_balance(), 960);
        assert_eq!(table.amount_on(BetType::Dozen, 2), 30);

        let cleared = table.clear_bets().unwrap();
        assert_eq!(cleared.len(), 2);
        assert_eq!(table.wallet_balance(), 1000);
        assert_eq!(table.total_staked(), 0);
    }

    #[test]
    fn test_settle_credits_and_reopens() {
        let mut table = table();
        table.place_bet(BetType::StraightUp, 17, 10).unwrap();
        table.place_bet(BetType::Red, 0, 10).unwrap();
        // 17 is black.
        let result = table.settle(on(17)).unwrap();
        assert_eq!(result.total_winnings, 360);
        assert_eq!(result.net_profit, 340);
        assert_eq!(table.wallet_balance(), 980 + 360);
        assert!(table.bets().is_empty());
        assert_eq!(table.total_staked(), 0);
        assert_eq!(table.rounds_played(), 1);

        let record = table.history().latest().unwrap();
        assert_eq!(record.round, 1);
        assert_eq!(record.pocket(), Pocket::number(17).unwrap());
        assert_eq!(record.bets.len(), 2);
        assert!(record.bets[0].won && !record.bets[1].won);

        // Next round accepts bets again.
        assert!(table.place_bet(BetType::Red, 0, 10).is_ok());
    }

    #[test]
    fn test_empty_round_is_not_recorded() {
        let mut table = table();
        let result = table.settle(on(3)).unwrap();
        assert_eq!(result.net_profit, 0);
        assert_eq!(table.rounds_played(), 1);
        assert!(table.history().is_empty());
        assert_eq!(table.wallet_balance(), 1000);
    }

    #[test]
    fn test_play_round_with_scripted_source() {
        let mut table = table();
        let mut source = ScriptedSource::landing_on(&[Pocket::DOUBLE_ZERO]);
        table.place_bet(BetType::FiveNumber, 0, 10).unwrap();
        let result = table.play_round_with(&mut source).unwrap();
        assert_eq!(result.spin.pocket(), Pocket::DOUBLE_ZERO);
        assert_eq!(table.wallet_balance(), 1060);
        assert_eq!(wheel::spin(&mut source).pocket(), Pocket::DOUBLE_ZERO);
    }

    #[test]
    fn test_seeded_tables_play_identically() {
        let mut a = table();
        let mut b = table();
        for _ in 0..20 {
            a.place_bet(BetType::Even, 0, 5).unwrap();
            b.place_bet(BetType::Even, 0, 5).unwrap();
            assert_eq!(a.play_round().unwrap(), b.play_round().unwrap());
        }
        assert_eq!(a.wallet_balance(), b.wallet_balance());
    }

    #[test]
    fn test_external_wallet_ops() {
        let mut table = table();
        assert_eq!(table.credit_wallet(500), 1500);
        assert_eq!(table.debit_wallet(1500), Ok(0));
        assert_eq!(
            table.place_bet(BetType::Red, 0, 1),
            Err(GameError::InsufficientFunds {
                needed: 1,
                available: 0
            })
        );
    }

    #[test]
    fn test_claim_hourly_credits_wallet() {
        let mut table = table();
        table.set_claim_clock(ClaimClock::starting_at(0));
        assert_eq!(table.claimable(2 * 3_600_000).tokens, 400);
        assert_eq!(table.claim_hourly(2 * 3_600_000), 400);
        assert_eq!(table.wallet_balance(), 1400);
        assert_eq!(table.claim_hourly(2 * 3_600_000 + 5), 0);
        assert_eq!(table.time_until_next_claim(2 * 3_600_000 + 5), 3_600_000 - 5);
    }

    #[test]
    fn test_restore_history() {
        let mut table = table();
        for n in [1, 2, 3] {
            table.place_bet(BetType::Low, 0, 5).unwrap();
            table.settle(on(n)).unwrap();
        }
        let saved = History::from_json(&table.history().to_json().unwrap()).unwrap();

        let config = TableConfig {
            history_limit: 2,
            ..TableConfig::default()
        };
        let mut restored = Table::seeded(config, 1).unwrap();
        restored.restore_history(saved);
        assert_eq!(restored.history().len(), 2);
        assert_eq!(restored.history().latest().unwrap().round, 3);
        assert_eq!(restored.rounds_played(), 3);
    }
}
