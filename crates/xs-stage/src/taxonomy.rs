//! Taxonomy: shared value types carried by events and snapshots

use serde::{Deserialize, Serialize};
use xs_core::{Color, Player, PlayerId, PlayerStatus, UserRank};

/// Room game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomMode {
    /// The human alone against the wheel
    Solo,
    /// Multi-player color-match room
    #[default]
    Blitz,
    /// Head-to-head, resolved by seat value
    Duel,
}

impl RoomMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Solo => "SOLO",
            Self::Blitz => "BLITZ",
            Self::Duel => "1v1 DUEL",
        }
    }

    /// Winner is chosen by segment value instead of color
    pub fn resolves_by_seat(&self) -> bool {
        matches!(self, Self::Duel)
    }
}

/// Stake handed back to a bettor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    pub player_id: PlayerId,
    pub amount: u64,
}

/// Terminal result of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub target_index: usize,
    pub winning_color: Color,
    pub winning_value: usize,
    /// None when no confirmed player matched the outcome
    pub winner_id: Option<PlayerId>,
    pub winner_name: Option<String>,
    /// Credited to the winner (0 when the pot was returned)
    pub amount: u64,
    pub pot: u64,
    pub is_user_win: bool,
    /// Stakes returned when nobody won
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refunds: Vec<Refund>,
}

impl RoundResult {
    pub fn pot_returned(&self) -> bool {
        self.winner_id.is_none()
    }
}

/// Per-player row pushed to the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub username: String,
    pub rank: UserRank,
    pub seat: usize,
    pub color: Color,
    pub bet_amount: u64,
    pub status: PlayerStatus,
    pub is_bot: bool,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id.clone(),
            username: p.username.clone(),
            rank: p.rank,
            seat: p.seat,
            color: p.assigned_color.clone(),
            bet_amount: p.bet_amount,
            status: p.status,
            is_bot: p.is_bot(),
        }
    }
}

/// One group roster as shown on the bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRoster {
    pub group_number: u32,
    pub players: Vec<PlayerView>,
    pub total_pot: u64,
}

/// Human progress through a Grand Prix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Groups not yet resolved
    #[default]
    Competing,
    /// Won their group
    Advanced,
    /// Knocked out in the group stage
    Eliminated,
    /// Won the final
    Champion,
    /// Reached the final but lost it
    RunnerUp,
}

impl Standing {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Eliminated | Self::Champion | Self::RunnerUp)
    }
}
