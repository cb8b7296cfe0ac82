//! Player profiles and rank progression
//!
//! Every fifth tournament win promotes a profile one tier, capped at LEGEND.

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Tournament wins required per tier step
pub const WINS_PER_RANK: u32 = 5;

/// Rank tier, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRank {
    #[default]
    Rookie,
    Pro,
    Master,
    Legend,
}

impl UserRank {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rookie => "ROOKIE",
            Self::Pro => "PRO",
            Self::Master => "MASTER",
            Self::Legend => "LEGEND",
        }
    }

    /// Next tier, or None at the top
    pub fn next(&self) -> Option<UserRank> {
        match self {
            Self::Rookie => Some(Self::Pro),
            Self::Pro => Some(Self::Master),
            Self::Master => Some(Self::Legend),
            Self::Legend => None,
        }
    }

    /// Minimum tournament wins shown for this tier
    pub fn min_wins(&self) -> u32 {
        match self {
            Self::Rookie => 0,
            Self::Pro => WINS_PER_RANK,
            Self::Master => WINS_PER_RANK * 2,
            Self::Legend => WINS_PER_RANK * 3,
        }
    }
}

/// Promotion produced by a championship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankUp {
    pub from: UserRank,
    pub to: UserRank,
    pub rank_xp: u32,
}

/// Identity supplied by the external auth/profile service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: PlayerId,
    pub username: String,
    pub avatar: String,
    pub rank: UserRank,
    /// Tournament wins this session
    pub rank_xp: u32,
}

impl Profile {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: PlayerId::new(id),
            avatar: format!("https://api.dicebear.com/7.x/pixel-art/svg?seed={username}"),
            username,
            rank: UserRank::Rookie,
            rank_xp: 0,
        }
    }

    pub fn with_rank(mut self, rank: UserRank, rank_xp: u32) -> Self {
        self.rank = rank;
        self.rank_xp = rank_xp;
        self
    }

    /// Count a tournament win; returns the promotion on every fifth win
    ///
    /// `rank_xp` only ever increases. At LEGEND the counter keeps growing
    /// but no further promotion is produced.
    pub fn record_tournament_win(&mut self) -> Option<RankUp> {
        self.rank_xp = self.rank_xp.saturating_add(1);
        if self.rank_xp % WINS_PER_RANK != 0 {
            return None;
        }
        let next = self.rank.next()?;
        let rank_up = RankUp {
            from: self.rank,
            to: next,
            rank_xp: self.rank_xp,
        };
        self.rank = next;
        Some(rank_up)
    }
}
