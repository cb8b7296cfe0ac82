//! Bet Ledger: per-player bet state, pot snapshot and payouts
//!
//! The ledger owns the seated players of one room or group. Balance changes
//! go through the [`BalanceStore`]: a debit at `confirm`, and one settlement
//! per round (credit to the winner, or refunds when nobody matched).

use rand::Rng;
use serde::{Deserialize, Serialize};

use xs_core::{BalanceStore, Player, PlayerId, PlayerStatus, Segment, XsError, XsResult};
use xs_stage::Refund;

/// Default minimum bet
pub const DEFAULT_MIN_BET: u64 = 10;

/// Bet amount bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetLimits {
    pub min_bet: u64,
    /// None = bounded only by balance
    #[serde(default)]
    pub max_bet: Option<u64>,
}

impl Default for BetLimits {
    fn default() -> Self {
        Self {
            min_bet: DEFAULT_MIN_BET,
            max_bet: None,
        }
    }
}

/// How a committed segment maps to a winner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionRule {
    /// Confirmed player holding the segment color (random pick among several)
    ColorMatch,
    /// Confirmed player seated at `segment.value`
    SeatValue,
}

/// Outcome of a round against the locked pot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Winner {
        player_id: PlayerId,
        username: String,
        amount: u64,
        pot: u64,
    },
    /// Pot returned: every confirmed stake goes back to its owner
    NoWinner { pot: u64, refunds: Vec<Refund> },
}

impl Resolution {
    pub fn winner_id(&self) -> Option<&PlayerId> {
        match self {
            Self::Winner { player_id, .. } => Some(player_id),
            Self::NoWinner { .. } => None,
        }
    }

    pub fn pot(&self) -> u64 {
        match self {
            Self::Winner { pot, .. } | Self::NoWinner { pot, .. } => *pot,
        }
    }
}

/// Bet book for one round
#[derive(Debug, Clone)]
pub struct BetLedger {
    players: Vec<Player>,
    limits: BetLimits,
    /// Pot captured at LOCKED entry
    locked_pot: Option<u64>,
    /// Settlement latch
    settled: bool,
}

impl BetLedger {
    pub fn new(players: Vec<Player>, limits: BetLimits) -> Self {
        Self {
            players,
            limits,
            locked_pot: None,
            settled: false,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn limits(&self) -> BetLimits {
        self.limits
    }

    fn index_of(&self, id: &PlayerId) -> XsResult<usize> {
        self.players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| XsError::UnknownPlayer(id.to_string()))
    }

    fn expect_status(player: &Player, expected: PlayerStatus) -> XsResult<()> {
        if player.status != expected {
            return Err(XsError::InvalidBetStatus {
                expected,
                actual: player.status,
            });
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // BET OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// IDLE → PLACED. Validates the amount; no debit.
    pub fn place(
        &mut self,
        id: &PlayerId,
        amount: u64,
        balances: &dyn BalanceStore,
    ) -> XsResult<()> {
        let idx = self.index_of(id)?;
        Self::expect_status(&self.players[idx], PlayerStatus::Idle)?;

        let balance = balances.balance(id);
        let max = self.limits.max_bet.map_or(balance, |m| m.min(balance));
        if amount < self.limits.min_bet || amount > max {
            return Err(XsError::InvalidBetAmount {
                amount,
                min: self.limits.min_bet,
                max,
            });
        }

        let player = &mut self.players[idx];
        player.bet_amount = amount;
        player.status = PlayerStatus::Placed;
        Ok(())
    }

    /// PLACED → CONFIRMED, debiting the stake
    pub fn confirm(&mut self, id: &PlayerId, balances: &mut dyn BalanceStore) -> XsResult<u64> {
        let idx = self.index_of(id)?;
        Self::expect_status(&self.players[idx], PlayerStatus::Placed)?;

        let amount = self.players[idx].bet_amount;
        balances.debit(id, amount)?;
        self.players[idx].status = PlayerStatus::Confirmed;
        Ok(amount)
    }

    /// PLACED → IDLE
    pub fn cancel(&mut self, id: &PlayerId) -> XsResult<()> {
        let idx = self.index_of(id)?;
        Self::expect_status(&self.players[idx], PlayerStatus::Placed)?;
        self.players[idx].reset_bet();
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // POT
    // ═══════════════════════════════════════════════════════════════════════

    /// Sum of confirmed bets right now
    pub fn confirmed_total(&self) -> u64 {
        self.players
            .iter()
            .filter(|p| p.is_confirmed())
            .map(|p| p.bet_amount)
            .sum()
    }

    pub fn confirmed_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_confirmed()).count()
    }

    /// Snapshot the pot; later calls return the first snapshot
    pub fn lock(&mut self) -> u64 {
        *self.locked_pot.get_or_insert_with(|| {
            self.players
                .iter()
                .filter(|p| p.is_confirmed())
                .map(|p| p.bet_amount)
                .sum()
        })
    }

    /// Locked pot, or the running total before lock
    pub fn pot(&self) -> u64 {
        self.locked_pot.unwrap_or_else(|| self.confirmed_total())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RESOLUTION
    // ═══════════════════════════════════════════════════════════════════════

    /// Match the committed segment against confirmed players
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        segment: &Segment,
        rule: ResolutionRule,
        rng: &mut R,
    ) -> Resolution {
        let pot = self.pot();
        let candidates: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| p.is_confirmed())
            .filter(|p| match rule {
                ResolutionRule::ColorMatch => p.assigned_color == segment.color,
                ResolutionRule::SeatValue => p.seat == segment.value,
            })
            .collect();

        let winner = match candidates.len() {
            0 => None,
            1 => Some(candidates[0]),
            n => Some(candidates[rng.random_range(0..n)]),
        };

        match winner {
            Some(player) => Resolution::Winner {
                player_id: player.id.clone(),
                username: player.username.clone(),
                amount: pot.saturating_mul(segment.multiplier),
                pot,
            },
            None => Resolution::NoWinner {
                pot,
                refunds: self.refunds(),
            },
        }
    }

    /// Refund for every confirmed stake
    pub fn refunds(&self) -> Vec<Refund> {
        self.players
            .iter()
            .filter(|p| p.is_confirmed() && p.bet_amount > 0)
            .map(|p| Refund {
                player_id: p.id.clone(),
                amount: p.bet_amount,
            })
            .collect()
    }

    /// Apply a resolution to balances. Returns false if already settled.
    pub fn settle(
        &mut self,
        resolution: &Resolution,
        balances: &mut dyn BalanceStore,
    ) -> XsResult<bool> {
        if self.settled {
            log::debug!("ledger: round already settled, ignoring");
            return Ok(false);
        }
        self.settled = true;

        match resolution {
            Resolution::Winner {
                player_id, amount, ..
            } => {
                balances.credit(player_id, *amount)?;
            }
            Resolution::NoWinner { refunds, .. } => {
                for refund in refunds {
                    balances.credit(&refund.player_id, refund.amount)?;
                }
            }
        }
        Ok(true)
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Clear statuses, pot and latch for the next round
    pub fn reset_round(&mut self) {
        for player in &mut self.players {
            player.reset_bet();
        }
        self.locked_pot = None;
        self.settled = false;
    }
}
