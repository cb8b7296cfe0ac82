//! GameEvent: what the engine pushes to the UI layer
//!
//! Events are wrapped in an [`EventRecord`] carrying a per-room sequence
//! number, the virtual-clock timestamp and the round they belong to.

use serde::{Deserialize, Serialize};
use xs_core::{Color, PlayerId, RankUp};

use crate::phase::{RoomPhase, TournamentPhase};
use crate::taxonomy::{GroupRoster, PlayerView, Refund, RoundResult};

/// Canonical engine event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    // ═══════════════════════════════════════════════════════════════════════
    // ROOM LIFECYCLE
    // ═══════════════════════════════════════════════════════════════════════
    /// Room phase changed
    PhaseChanged {
        from: RoomPhase,
        to: RoomPhase,
        /// Length of the new phase when it is timed
        #[serde(default)]
        duration_secs: Option<u32>,
    },

    /// Player received their color for the round
    ColorAssigned { player_id: PlayerId, color: Color },

    /// New round started after "play again"
    RoundReset { round: u32 },

    // ═══════════════════════════════════════════════════════════════════════
    // BETTING
    // ═══════════════════════════════════════════════════════════════════════
    BetPlaced { player_id: PlayerId, amount: u64 },

    BetCancelled { player_id: PlayerId },

    BetConfirmed { player_id: PlayerId, amount: u64 },

    /// Human is close to the kick deadline without a confirmed bet
    InactivityWarning {
        player_id: PlayerId,
        seconds_remaining: u32,
    },

    /// Human was removed for inactivity
    PlayerEvicted { player_id: PlayerId },

    /// Confirmed stakes handed back because the round closed unresolved
    StakesReturned { refunds: Vec<Refund> },

    // ═══════════════════════════════════════════════════════════════════════
    // SPIN
    // ═══════════════════════════════════════════════════════════════════════
    /// Pot frozen at lock time
    PotLocked { pot: u64, confirmed_players: usize },

    /// Outcome committed ahead of the spin
    OutcomeCommitted {
        target_index: usize,
        label: String,
        color: Color,
        value: usize,
    },

    SpinStarted { target_index: usize },

    SpinCompleted,

    // ═══════════════════════════════════════════════════════════════════════
    // RESULT
    // ═══════════════════════════════════════════════════════════════════════
    RoundResolved { result: RoundResult },

    /// Commentary line (fallback text when the service failed)
    Commentary { text: String, fallback: bool },

    PlayAgainOffered,

    // ═══════════════════════════════════════════════════════════════════════
    // GRAND PRIX
    // ═══════════════════════════════════════════════════════════════════════
    TournamentPhaseChanged {
        from: TournamentPhase,
        to: TournamentPhase,
        #[serde(default)]
        duration_secs: Option<u32>,
    },

    GroupsComposed { groups: Vec<GroupRoster> },

    GroupOutcomeCommitted {
        group_number: u32,
        target_index: usize,
        color: Color,
    },

    GroupResolved {
        group_number: u32,
        winning_color: Color,
        #[serde(default)]
        winner: Option<PlayerView>,
    },

    GroupWinnersDeclared { winners: Vec<PlayerView> },

    PlayerEliminated { player_id: PlayerId },

    FinalistsAssigned { finalists: Vec<PlayerView> },

    GrandWinnerDeclared {
        #[serde(default)]
        winner: Option<PlayerView>,
        amount: u64,
        is_user_win: bool,
    },

    RankUp { player_id: PlayerId, rank_up: RankUp },
}

impl GameEvent {
    /// Simple string name for this event type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PhaseChanged { .. } => "phase_changed",
            Self::ColorAssigned { .. } => "color_assigned",
            Self::RoundReset { .. } => "round_reset",
            Self::BetPlaced { .. } => "bet_placed",
            Self::BetCancelled { .. } => "bet_cancelled",
            Self::BetConfirmed { .. } => "bet_confirmed",
            Self::InactivityWarning { .. } => "inactivity_warning",
            Self::PlayerEvicted { .. } => "player_evicted",
            Self::StakesReturned { .. } => "stakes_returned",
            Self::PotLocked { .. } => "pot_locked",
            Self::OutcomeCommitted { .. } => "outcome_committed",
            Self::SpinStarted { .. } => "spin_started",
            Self::SpinCompleted => "spin_completed",
            Self::RoundResolved { .. } => "round_resolved",
            Self::Commentary { .. } => "commentary",
            Self::PlayAgainOffered => "play_again_offered",
            Self::TournamentPhaseChanged { .. } => "tournament_phase_changed",
            Self::GroupsComposed { .. } => "groups_composed",
            Self::GroupOutcomeCommitted { .. } => "group_outcome_committed",
            Self::GroupResolved { .. } => "group_resolved",
            Self::GroupWinnersDeclared { .. } => "group_winners_declared",
            Self::PlayerEliminated { .. } => "player_eliminated",
            Self::FinalistsAssigned { .. } => "finalists_assigned",
            Self::GrandWinnerDeclared { .. } => "grand_winner_declared",
            Self::RankUp { .. } => "rank_up",
        }
    }

    /// Phase transitions (room or tournament)
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Self::PhaseChanged { .. } | Self::TournamentPhaseChanged { .. }
        )
    }
}

/// An event with ordering metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Strictly increasing per stream
    pub seq: u64,
    /// Virtual clock (ms since the room was created)
    pub timestamp_ms: u64,
    /// Round the event belongs to
    pub round: u32,
    pub event: GameEvent,
}

impl EventRecord {
    pub fn type_name(&self) -> &'static str {
        self.event.type_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::BetConfirmed {
            player_id: PlayerId::new("p1"),
            amount: 50,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("bet_confirmed"));

        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_transition_flag() {
        let event = GameEvent::PhaseChanged {
            from: RoomPhase::Betting,
            to: RoomPhase::Locked,
            duration_secs: Some(3),
        };
        assert!(event.is_transition());
        assert!(!GameEvent::SpinCompleted.is_transition());
        assert_eq!(event.type_name(), "phase_changed");
    }
}
