//! Engine configuration
//!
//! Everything is serde-backed with defaults, so a config file only needs
//! the fields it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use xs_core::{BotProfile, Palette, Segment, XsError, XsResult};
use xs_stage::{RoomMode, TimingConfig};

use crate::ledger::BetLimits;

/// Wheel layout for a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "preset", content = "segments", rename_all = "snake_case")]
pub enum WheelPreset {
    /// Every palette color three times
    Blitz,
    /// Red/black with one x14 green
    Classic,
    /// Alternating seat slices
    Duel,
    Custom(Vec<Segment>),
}

/// Single room settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub mode: RoomMode,

    /// Total seats; None = mode default (solo 1, blitz palette size, duel 2)
    pub capacity: Option<usize>,

    pub limits: BetLimits,

    pub palette: Palette,

    /// None = mode default
    pub wheel: Option<WheelPreset>,

    pub bot_profile: BotProfile,

    /// Balance given to bots without an account
    pub bot_starting_balance: u64,

    /// What happens at the end of the RESULT dwell without a choice
    pub auto_play_again: bool,

    /// RNG seed (None = entropy)
    pub seed: Option<u64>,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            mode: RoomMode::Blitz,
            capacity: None,
            limits: BetLimits::default(),
            palette: Palette::default(),
            wheel: None,
            bot_profile: BotProfile::default(),
            bot_starting_balance: 10_000,
            auto_play_again: true,
            seed: None,
        }
    }
}

impl RoomConfig {
    pub fn solo() -> Self {
        Self {
            mode: RoomMode::Solo,
            ..Self::default()
        }
    }

    pub fn duel() -> Self {
        Self {
            mode: RoomMode::Duel,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn effective_capacity(&self) -> usize {
        self.capacity.unwrap_or(match self.mode {
            RoomMode::Solo => 1,
            RoomMode::Blitz => self.palette.len(),
            RoomMode::Duel => 2,
        })
    }

    pub fn effective_wheel(&self) -> WheelPreset {
        self.wheel.clone().unwrap_or(match self.mode {
            RoomMode::Solo | RoomMode::Blitz => WheelPreset::Blitz,
            RoomMode::Duel => WheelPreset::Duel,
        })
    }

    pub fn validate(&self) -> XsResult<()> {
        let capacity = self.effective_capacity();
        if capacity == 0 {
            return Err(XsError::InvalidRoster("room needs at least one seat".into()));
        }
        if capacity > self.palette.len() {
            return Err(XsError::InvalidRoster(format!(
                "{capacity} seats but only {} palette colors",
                self.palette.len()
            )));
        }
        self.bot_profile.validate().map_err(XsError::Config)?;
        match self.mode {
            RoomMode::Solo if capacity != 1 => Err(XsError::InvalidRoster(
                "solo rooms have exactly one seat".into(),
            )),
            RoomMode::Duel if capacity != 2 => Err(XsError::InvalidRoster(
                "duel rooms have exactly two seats".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Grand Prix settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub groups: usize,
    pub players_per_group: usize,
    pub entry_fee: u64,
    pub palette: Palette,
    pub bot_starting_balance: u64,
    pub seed: Option<u64>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            groups: 10,
            players_per_group: 10,
            entry_fee: 10,
            palette: Palette::default(),
            bot_starting_balance: 1_000,
            seed: None,
        }
    }
}

impl TournamentConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> XsResult<()> {
        if self.groups == 0 || self.players_per_group == 0 {
            return Err(XsError::InvalidRoster("empty bracket".into()));
        }
        if self.players_per_group > self.palette.len() {
            return Err(XsError::InvalidRoster(format!(
                "{} players per group but only {} palette colors",
                self.players_per_group,
                self.palette.len()
            )));
        }
        if self.groups > self.palette.len() {
            return Err(XsError::InvalidRoster(format!(
                "{} finalists cannot get distinct colors from {} palette colors",
                self.groups,
                self.palette.len()
            )));
        }
        if self.entry_fee == 0 {
            return Err(XsError::Config("entry_fee must be > 0".into()));
        }
        Ok(())
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub timing: TimingConfig,
    pub room: RoomConfig,
    pub tournament: TournamentConfig,
}

impl GameConfig {
    pub fn from_yaml_str(yaml: &str) -> XsResult<Self> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> XsResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load by extension (.yaml/.yml or .json)
    pub fn load(path: impl AsRef<Path>) -> XsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(XsError::Config(format!(
                "unsupported config extension: {other:?}"
            ))),
        }
    }

    pub fn to_json(&self) -> XsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> XsResult<()> {
        self.timing.validate().map_err(XsError::Config)?;
        self.room.validate()?;
        self.tournament.validate()
    }
}
