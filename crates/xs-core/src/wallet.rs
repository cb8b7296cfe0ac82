//! Balance store: the single entry point for balance mutation
//!
//! The engine reads balances for validation and mutates them only through
//! [`BalanceStore::apply_delta`].

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::{XsError, XsResult};
use crate::player::PlayerId;

/// External balance collaborator
pub trait BalanceStore: Send {
    /// Current balance (0 for unknown players)
    fn balance(&self, player: &PlayerId) -> u64;

    /// Apply a signed delta, returning the new balance
    ///
    /// A debit larger than the balance fails with `InsufficientFunds`
    /// and leaves the balance unchanged.
    fn apply_delta(&mut self, player: &PlayerId, delta: i64) -> XsResult<u64>;

    /// Add `amount`; fails with `AmountOverflow` past `i64::MAX`
    fn credit(&mut self, player: &PlayerId, amount: u64) -> XsResult<u64> {
        let delta = i64::try_from(amount).map_err(|_| XsError::AmountOverflow(amount))?;
        self.apply_delta(player, delta)
    }

    /// Remove `amount`; fails with `AmountOverflow` past `i64::MAX`
    fn debit(&mut self, player: &PlayerId, amount: u64) -> XsResult<u64> {
        let delta = i64::try_from(amount).map_err(|_| XsError::AmountOverflow(amount))?;
        self.apply_delta(player, -delta)
    }
}

/// One applied balance change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub player: PlayerId,
    pub delta: i64,
    pub balance_after: u64,
}

/// In-memory balance store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wallet {
    balances: HashMap<PlayerId, u64>,
    history: Vec<BalanceEntry>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or top up to) an account with an initial balance
    pub fn open(&mut self, player: PlayerId, initial: u64) {
        self.balances.insert(player, initial);
    }

    pub fn has_account(&self, player: &PlayerId) -> bool {
        self.balances.contains_key(player)
    }

    /// Every applied delta, oldest first
    pub fn history(&self) -> &[BalanceEntry] {
        &self.history
    }

    /// Applied deltas for one player
    pub fn history_for<'a>(&'a self, player: &'a PlayerId) -> impl Iterator<Item = &'a BalanceEntry> {
        self.history.iter().filter(move |e| &e.player == player)
    }

    /// Sum of all balances
    pub fn total(&self) -> u64 {
        self.balances.values().sum()
    }
}

impl BalanceStore for Wallet {
    fn balance(&self, player: &PlayerId) -> u64 {
        self.balances.get(player).copied().unwrap_or(0)
    }

    fn apply_delta(&mut self, player: &PlayerId, delta: i64) -> XsResult<u64> {
        let current = self.balance(player);
        let next = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs())
        } else {
            let debit = delta.unsigned_abs();
            current
                .checked_sub(debit)
                .ok_or(XsError::InsufficientFunds {
                    needed: debit,
                    available: current,
                })?
        };

        self.balances.insert(player.clone(), next);
        self.history.push(BalanceEntry {
            player: player.clone(),
            delta,
            balance_after: next,
        });
        log::debug!("balance {player}: {current} -> {next} ({delta:+})");
        Ok(next)
    }
}

/// Wallet shared between rooms and tournaments of one session
#[derive(Debug, Clone, Default)]
pub struct SharedWallet(Arc<Mutex<Wallet>>);

impl SharedWallet {
    pub fn new(wallet: Wallet) -> Self {
        Self(Arc::new(Mutex::new(wallet)))
    }

    pub fn open(&self, player: PlayerId, initial: u64) {
        self.0.lock().open(player, initial);
    }

    pub fn has_account(&self, player: &PlayerId) -> bool {
        self.0.lock().has_account(player)
    }

    /// Copy of the underlying wallet
    pub fn snapshot(&self) -> Wallet {
        self.0.lock().clone()
    }

    /// Number of applied deltas for a player
    pub fn entry_count(&self, player: &PlayerId) -> usize {
        self.0.lock().history_for(player).count()
    }
}

impl BalanceStore for SharedWallet {
    fn balance(&self, player: &PlayerId) -> u64 {
        self.0.lock().balance(player)
    }

    fn apply_delta(&mut self, player: &PlayerId, delta: i64) -> XsResult<u64> {
        self.0.lock().apply_delta(player, delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_and_credit() {
        let mut wallet = Wallet::new();
        let id = PlayerId::new("p1");
        wallet.open(id.clone(), 100);

        assert_eq!(wallet.apply_delta(&id, -40).unwrap(), 60);
        assert_eq!(wallet.apply_delta(&id, 15).unwrap(), 75);
        assert_eq!(wallet.history().len(), 2);
    }

    #[test]
    fn test_overdraft_rejected_without_change() {
        let mut wallet = Wallet::new();
        let id = PlayerId::new("p1");
        wallet.open(id.clone(), 30);

        let err = wallet.apply_delta(&id, -50).unwrap_err();
        assert!(matches!(
            err,
            XsError::InsufficientFunds {
                needed: 50,
                available: 30
            }
        ));
        assert_eq!(wallet.balance(&id), 30);
        assert!(wallet.history().is_empty());
    }

    #[test]
    fn test_oversized_credit_rejected() {
        let mut wallet = Wallet::new();
        let id = PlayerId::new("p1");
        wallet.open(id.clone(), 10);

        assert!(matches!(
            wallet.credit(&id, u64::MAX),
            Err(XsError::AmountOverflow(u64::MAX))
        ));
        assert!(matches!(wallet.debit(&id, u64::MAX), Err(XsError::AmountOverflow(_))));
        assert_eq!(wallet.balance(&id), 10);
        assert!(wallet.history().is_empty());

        assert_eq!(wallet.credit(&id, 5).unwrap(), 15);
        assert_eq!(wallet.debit(&id, 15).unwrap(), 0);
        assert_eq!(wallet.total(), 0);
    }

    #[test]
    fn test_shared_wallet_clones_see_same_state() {
        let shared = SharedWallet::default();
        let id = PlayerId::new("p1");
        shared.open(id.clone(), 10);

        let mut other = shared.clone();
        other.apply_delta(&id, 5).unwrap();
        assert_eq!(shared.balance(&id), 15);
        assert_eq!(shared.entry_count(&id), 1);
    }
}
