//! Players, seats and bet status

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::rank::{Profile, UserRank};

/// Stable player identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Bet status for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    /// No bet
    #[default]
    Idle,
    /// Bet placed, reversible, not yet debited
    Placed,
    /// Bet debited and binding for the round
    Confirmed,
}

/// Decision parameters for a simulated opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotProfile {
    /// Chance per bot tick that an idle bot places and confirms a bet
    pub confirm_probability: f64,
    /// Inclusive bet range (min, max)
    pub bet_range: (u64, u64),
}

impl Default for BotProfile {
    fn default() -> Self {
        Self {
            confirm_probability: 0.4,
            bet_range: (50, 549),
        }
    }
}

impl BotProfile {
    /// A bot that always bets exactly `amount` on its first tick
    pub fn fixed(amount: u64) -> Self {
        Self {
            confirm_probability: 1.0,
            bet_range: (amount, amount),
        }
    }

    /// A bot that never bets
    pub fn passive() -> Self {
        Self {
            confirm_probability: 0.0,
            bet_range: (0, 0),
        }
    }

    /// Probability must be a number in [0, 1]
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.confirm_probability) {
            return Err(format!(
                "confirm_probability must be within 0..=1, got {}",
                self.confirm_probability
            ));
        }
        Ok(())
    }
}

/// Who controls a seat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Bot(BotProfile),
}

/// A seated player for one round or group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub username: String,
    pub avatar: String,
    /// Display rank (cosmetic)
    pub rank: UserRank,
    pub kind: PlayerKind,
    /// Seat index within the room (1v1 resolution uses this)
    pub seat: usize,
    /// Color this player is entitled to bet for the round
    pub assigned_color: Color,
    pub bet_amount: u64,
    pub status: PlayerStatus,
}

impl Player {
    /// Seat a human from their profile
    pub fn human(profile: &Profile, seat: usize, color: Color) -> Self {
        Self {
            id: profile.id.clone(),
            username: profile.username.clone(),
            avatar: profile.avatar.clone(),
            rank: profile.rank,
            kind: PlayerKind::Human,
            seat,
            assigned_color: color,
            bet_amount: 0,
            status: PlayerStatus::Idle,
        }
    }

    /// Seat a simulated opponent
    pub fn bot(
        id: impl Into<String>,
        username: impl Into<String>,
        seat: usize,
        color: Color,
        profile: BotProfile,
    ) -> Self {
        let username = username.into();
        Self {
            id: PlayerId::new(id),
            avatar: format!("https://api.dicebear.com/7.x/pixel-art/svg?seed={username}"),
            username,
            rank: UserRank::Rookie,
            kind: PlayerKind::Bot(profile),
            seat,
            assigned_color: color,
            bet_amount: 0,
            status: PlayerStatus::Idle,
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.kind, PlayerKind::Bot(_))
    }

    pub fn is_human(&self) -> bool {
        matches!(self.kind, PlayerKind::Human)
    }

    pub fn bot_profile(&self) -> Option<&BotProfile> {
        match &self.kind {
            PlayerKind::Bot(profile) => Some(profile),
            PlayerKind::Human => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == PlayerStatus::Confirmed
    }

    /// Clear bet state for a new round
    pub fn reset_bet(&mut self) {
        self.bet_amount = 0;
        self.status = PlayerStatus::Idle;
    }
}
