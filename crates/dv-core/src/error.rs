use crate::door::DoorId;
use crate::room::RoomId;

/// Alias for `Result<T, DvError>`.
pub type DvResult<T> = Result<T, DvError>;

/// Errors that can occur when reading or querying a dungeon.
#[derive(Debug, thiserror::Error)]
pub enum DvError {
    /// The requested room ID does not exist in the dungeon.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The requested door ID does not exist in the dungeon.
    #[error("door not found: {0}")]
    DoorNotFound(DoorId),

    /// The input document could not be parsed.
    #[error("malformed dungeon document: {0}")]
    Document(#[from] serde_json::Error),
}
