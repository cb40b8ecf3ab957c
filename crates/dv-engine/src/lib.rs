//! Game state machine for Delver.
//!
//! Interprets player actions against an immutable compiled [`Dungeon`]
//! plus a per-session overlay of statuses. Transitions are pure functions
//! from one [`GameState`] to the next; a [`Session`] keeps the latest one
//! and renders each step into an [`Output`] record holding only what the
//! player may know.
//!
//! [`Dungeon`]: dv_core::Dungeon

pub mod action;
pub mod error;
pub mod output;
pub mod session;
pub mod state;
pub mod transition;

pub use action::{Action, SoftError};
pub use error::{EngineError, EngineResult};
pub use output::{ExitView, Imperative, Output, render};
pub use session::Session;
pub use state::{DoorState, DoorStatus, GameState, NoteStatus, RoomState, RoomStatus};
pub use transition::transition;
