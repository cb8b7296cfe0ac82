//! xs-core: Shared types for the X Spin round engine
//!
//! Players, colors, wheel segments, profiles, the balance store seam and
//! the error taxonomy used across all X Spin crates.

mod color;
mod error;
mod player;
mod rank;
mod segment;
mod wallet;

pub use color::*;
pub use error::*;
pub use player::*;
pub use rank::*;
pub use segment::*;
pub use wallet::*;

/// Room/session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id ("room-xxxxxxxx")
    pub fn generate() -> Self {
        Self::generate_with_prefix("room")
    }

    /// Fresh random id ("{prefix}-xxxxxxxx")
    pub fn generate_with_prefix(prefix: &str) -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{prefix}-{}", &uuid[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
