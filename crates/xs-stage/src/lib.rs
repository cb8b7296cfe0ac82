//! # xs-stage: X Spin phase and event vocabulary
//!
//! Defines the phases a room round and a Grand Prix pass through, the events
//! the engine pushes while moving between them, and the timing that paces
//! every timed phase.
//!
//! ## Philosophy
//!
//! Renderers never drive the game. They subscribe to an ordered stream of
//! events and follow the phases:
//! - Betting opens → Pot locks → Outcome committed → Wheel spins → Result
//!
//! This crate holds the vocabulary; `xs-engine` decides when each event fires.

pub mod event;
pub mod phase;
pub mod stream;
pub mod taxonomy;
pub mod timing;
pub mod trace;

pub use event::*;
pub use phase::*;
pub use stream::*;
pub use taxonomy::*;
pub use timing::*;
pub use trace::*;
