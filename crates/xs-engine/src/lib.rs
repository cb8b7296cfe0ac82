//! # xs-engine: X Spin game engine
//!
//! Drives color-wheel betting rooms and the Grand Prix tournament on a
//! virtual clock. Hosts call `tick` with elapsed time, forward the human's
//! actions, and signal when the wheel animation has stopped; the engine
//! publishes every state change to its event stream.
//!
//! ## Features
//!
//! - **Rooms**: Solo, Blitz and 1v1 Duel modes with bots and a shared pot
//! - **Committed Outcomes**: The landing slice is fixed before the wheel turns
//! - **Grand Prix**: 10 groups of 10, group winners meet in a final
//! - **Deterministic**: Seeded generators and forced outcomes for replays
//!
//! ## Architecture
//!
//! ```text
//! RoomSession / GrandPrix
//!     │
//!     ├── PhaseScheduler (one timer, virtual clock)
//!     ├── BetLedger (place → confirm → lock → resolve → settle)
//!     ├── WheelGenerator (commit before spin)
//!     ├── InactivityMonitor (warn, then evict)
//!     └── CommentaryService (best effort)
//!           │
//!           v
//!     EventStream → Vec<EventRecord>
//! ```

pub mod bots;
pub mod commentary;
pub mod config;
pub mod inactivity;
pub mod ledger;
pub mod room;
pub mod scheduler;
pub mod tournament;
pub mod wheel;

pub use commentary::*;
pub use config::*;
pub use inactivity::*;
pub use ledger::*;
pub use room::*;
pub use scheduler::*;
pub use tournament::*;
pub use wheel::{Commitment, WheelGenerator};
