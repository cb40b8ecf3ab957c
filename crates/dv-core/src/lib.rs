//! Core types for Delver: geometry, doors, rooms, notes, and the compiled dungeon.
//!
//! This crate defines the data model shared by the classifier, the compiler,
//! and the interpreter. It is independent of all of them: a [`Dungeon`] can be
//! built by hand in tests or deserialized from JSON, and a
//! [`DungeonDocument`] is the raw input the compiler consumes.

/// Raw input document as authored by a dungeon generator.
pub mod document;
/// Doors, door kinds, and door ids.
pub mod door;
/// The compiled dungeon graph with id indexes.
pub mod dungeon;
/// Error types used throughout the crate.
pub mod error;
/// Grid geometry: rectangles, points, and compass directions.
pub mod geometry;
/// Typed annotations attached to rooms.
pub mod note;
/// Explicit random source threaded through flavor generation.
pub mod random;
/// Rooms and their derived exits.
pub mod room;
/// Helpers for composing English prose.
pub mod text;

/// Re-export document types.
pub use document::DungeonDocument;
/// Re-export door types.
pub use door::{Door, DoorId, DoorKind};
/// Re-export the compiled dungeon.
pub use dungeon::Dungeon;
/// Re-export error types.
pub use error::{DvError, DvResult};
/// Re-export geometry types.
pub use geometry::{Direction, Point, Rect};
/// Re-export note types.
pub use note::{CuriousEffect, Note, NoteId, NoteKind};
/// Re-export the random source.
pub use random::RandomSource;
/// Re-export room types.
pub use room::{Destination, Exit, Room, RoomId, RoomKind};
