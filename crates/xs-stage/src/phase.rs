//! Phases: the authoritative states of a room round and of a Grand Prix
//!
//! A phase is NOT an animation. It is the semantic state the engine is in;
//! renderers follow phases, never the other way around.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a room session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// Human did not confirm before the betting window closed
    Evicted,
    /// Human left mid-round
    Left,
    /// Human chose to return to the lobby after a result
    ExitedToLobby,
    /// Round could not be spun (no segments)
    Aborted,
}

/// Room round phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomPhase {
    /// Entry bet and color assignment
    PreGame,
    /// Betting window open
    Betting,
    /// Bets frozen, pot snapshotted
    Locked,
    /// Wheel in motion, waiting for the spin-complete signal
    Spinning,
    /// Payout applied, dwelling before the next round
    Result,
    /// Session over
    Closed(CloseReason),
}

impl RoomPhase {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::PreGame => "PRE_GAME",
            Self::Betting => "BETTING",
            Self::Locked => "LOCKED",
            Self::Spinning => "SPINNING",
            Self::Result => "RESULT",
            Self::Closed(_) => "CLOSED",
        }
    }

    /// Phase ends on a timer rather than on a signal or user action
    pub fn is_timed(&self) -> bool {
        matches!(self, Self::Betting | Self::Locked | Self::Result)
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed(_))
    }

    /// Legal successor check for the round state machine
    pub fn can_transition_to(&self, next: RoomPhase) -> bool {
        match (self, next) {
            (Self::Closed(_), _) => false,
            (_, Self::Closed(_)) => true,
            (Self::PreGame, Self::Betting)
            | (Self::Betting, Self::Locked)
            | (Self::Locked, Self::Spinning)
            | (Self::Spinning, Self::Result)
            | (Self::Result, Self::PreGame)
            | (Self::Result, Self::Betting) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RoomPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Grand Prix phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentPhase {
    /// Groups composed, entry fees being collected
    Registration,
    /// Bracket shown before the group spins
    BracketView,
    /// Shared countdown for all group wheels
    GroupCountdown,
    /// All group wheels in motion
    GroupSpinning,
    /// Group winners announced (cosmetic dwell)
    GroupResult,
    /// Finalists receive fresh colors (cosmetic dwell)
    FinalColorAssign,
    /// Countdown before the final wheel
    FinalCountdown,
    /// Final wheel in motion
    FinalSpinning,
    /// Champion announced
    FinalResult,
    /// Terminal
    Complete,
}

impl TournamentPhase {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Registration => "REGISTRATION",
            Self::BracketView => "BRACKET_VIEW",
            Self::GroupCountdown => "GROUP_COUNTDOWN",
            Self::GroupSpinning => "GROUP_SPINNING",
            Self::GroupResult => "GROUP_RESULT",
            Self::FinalColorAssign => "FINAL_COLOR_ASSIGN",
            Self::FinalCountdown => "FINAL_COUNTDOWN",
            Self::FinalSpinning => "FINAL_SPINNING",
            Self::FinalResult => "FINAL_RESULT",
            Self::Complete => "COMPLETE",
        }
    }

    pub fn is_timed(&self) -> bool {
        !matches!(
            self,
            Self::Registration | Self::GroupSpinning | Self::FinalSpinning | Self::Complete
        )
    }
}

impl fmt::Display for TournamentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
