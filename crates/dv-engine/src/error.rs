//! Error types for the game engine.

use dv_core::{DoorId, DvError, NoteId, RoomId};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Fatal errors: the caller and the compiled dungeon disagree.
///
/// Nothing a player types produces one of these; player mistakes are
/// reported in the output message instead.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An action other than `init` arrived before the session started.
    #[error("session not started: the first action must be init")]
    NotStarted,

    /// Room id absent from the dungeon.
    #[error("room not found: {0}")]
    UnknownRoom(RoomId),

    /// Door id absent from the dungeon.
    #[error("door not found: {0}")]
    UnknownDoor(DoorId),

    /// Note id absent from the room, or a continuation id.
    #[error("note {note} not found in room {room}")]
    UnknownNote {
        /// Room searched.
        room: RoomId,
        /// Missing note.
        note: NoteId,
    },

    /// Core data error.
    #[error("{0}")]
    Core(#[from] DvError),
}
