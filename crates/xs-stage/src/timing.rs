//! Timing: phase durations for rooms and the Grand Prix
//!
//! Phases carry no inherent length. A [`TimingConfig`] supplies every window
//! and dwell in milliseconds of virtual time; presets cover the common
//! pacing profiles.

use serde::{Deserialize, Serialize};

use crate::phase::{RoomPhase, TournamentPhase};

/// Timing profile identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal gameplay speed
    #[default]
    Normal,
    /// Halved windows
    Turbo,
    /// Short windows for previews and simulations
    Studio,
}

impl TimingProfile {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Turbo => "Turbo",
            Self::Studio => "Studio",
        }
    }
}

/// Phase durations (all ms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub profile: TimingProfile,

    /// BETTING window
    pub betting_window_ms: u64,

    /// LOCKED pause before the outcome is committed
    pub locked_ms: u64,

    /// RESULT dwell before play-again/exit
    pub result_dwell_ms: u64,

    /// Bot decision cadence
    pub bot_tick_ms: u64,

    /// Fraction of the betting window after which the inactivity warning fires
    pub warning_fraction: f64,

    pub bracket_view_ms: u64,
    pub group_countdown_ms: u64,
    pub group_result_ms: u64,
    pub final_color_assign_ms: u64,
    pub final_countdown_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}

impl TimingConfig {
    /// Create normal timing config
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            betting_window_ms: 15_000,
            locked_ms: 3_000,
            result_dwell_ms: 6_000,
            bot_tick_ms: 2_500,
            warning_fraction: 2.0 / 3.0,
            bracket_view_ms: 10_000,
            group_countdown_ms: 3_000,
            group_result_ms: 5_000,
            final_color_assign_ms: 5_000,
            final_countdown_ms: 3_000,
        }
    }

    /// Create turbo timing config
    pub fn turbo() -> Self {
        let normal = Self::normal();
        Self {
            profile: TimingProfile::Turbo,
            betting_window_ms: normal.betting_window_ms / 2,
            locked_ms: normal.locked_ms / 2,
            result_dwell_ms: normal.result_dwell_ms / 2,
            bot_tick_ms: normal.bot_tick_ms / 2,
            bracket_view_ms: normal.bracket_view_ms / 2,
            group_countdown_ms: normal.group_countdown_ms / 2,
            group_result_ms: normal.group_result_ms / 2,
            final_color_assign_ms: normal.final_color_assign_ms / 2,
            final_countdown_ms: normal.final_countdown_ms / 2,
            ..normal
        }
    }

    /// Create studio timing config
    pub fn studio() -> Self {
        Self {
            profile: TimingProfile::Studio,
            betting_window_ms: 3_000,
            locked_ms: 500,
            result_dwell_ms: 1_000,
            bot_tick_ms: 250,
            warning_fraction: 2.0 / 3.0,
            bracket_view_ms: 1_000,
            group_countdown_ms: 500,
            group_result_ms: 500,
            final_color_assign_ms: 500,
            final_countdown_ms: 500,
        }
    }

    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Studio => Self::studio(),
        }
    }

    /// Offset into the betting window at which the inactivity warning fires
    pub fn warning_at_ms(&self) -> u64 {
        (self.betting_window_ms as f64 * self.warning_fraction).round() as u64
    }

    /// Duration of a timed room phase
    pub fn room_phase_ms(&self, phase: RoomPhase) -> Option<u64> {
        match phase {
            RoomPhase::Betting => Some(self.betting_window_ms),
            RoomPhase::Locked => Some(self.locked_ms),
            RoomPhase::Result => Some(self.result_dwell_ms),
            _ => None,
        }
    }

    /// Duration of a timed tournament phase
    pub fn tournament_phase_ms(&self, phase: TournamentPhase) -> Option<u64> {
        match phase {
            TournamentPhase::BracketView => Some(self.bracket_view_ms),
            TournamentPhase::GroupCountdown => Some(self.group_countdown_ms),
            TournamentPhase::GroupResult => Some(self.group_result_ms),
            TournamentPhase::FinalColorAssign => Some(self.final_color_assign_ms),
            TournamentPhase::FinalCountdown => Some(self.final_countdown_ms),
            TournamentPhase::FinalResult => Some(self.result_dwell_ms),
            _ => None,
        }
    }

    /// Reject configurations the scheduler cannot run
    pub fn validate(&self) -> Result<(), String> {
        if self.betting_window_ms == 0 {
            return Err("betting_window_ms must be > 0".into());
        }
        if self.bot_tick_ms == 0 {
            return Err("bot_tick_ms must be > 0".into());
        }
        if !(self.warning_fraction > 0.0 && self.warning_fraction < 1.0) {
            return Err(format!(
                "warning_fraction must be in (0, 1), got {}",
                self.warning_fraction
            ));
        }
        Ok(())
    }
}

/// Whole seconds for display (rounded up, so 14_001ms shows as 15)
pub fn secs(ms: u64) -> u32 {
    ms.div_ceil(1000).min(u32::MAX as u64) as u32
}
