//! Wheel segments

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Payout multiplier applied when no per-segment override is configured
pub const DEFAULT_MULTIPLIER: u64 = 2;

/// One slice of the wheel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    pub color: Color,
    /// Opaque resolution value (seat index in 1v1 mode)
    pub value: usize,
    /// Pot multiplier paid when this segment wins
    #[serde(default = "default_multiplier")]
    pub multiplier: u64,
}

fn default_multiplier() -> u64 {
    DEFAULT_MULTIPLIER
}

impl Segment {
    pub fn new(label: impl Into<String>, color: Color, value: usize) -> Self {
        Self {
            label: label.into(),
            color,
            value,
            multiplier: DEFAULT_MULTIPLIER,
        }
    }

    pub fn with_multiplier(mut self, multiplier: u64) -> Self {
        self.multiplier = multiplier;
        self
    }
}
