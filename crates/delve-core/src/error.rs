//! Error types for the world model.

use crate::id::{ObjectId, RoomId};

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Invariant violations raised by the world model.
///
/// None of these are reachable through normal play; they indicate broken
/// content data or a bug in a handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The requested room ID does not exist in the world.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// The requested object ID does not exist in the world.
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// A content key could not be resolved.
    #[error("unknown {kind} key \"{key}\"")]
    UnknownKey {
        /// What the key was supposed to name ("room" or "object").
        kind: &'static str,
        /// The unresolved key.
        key: String,
    },

    /// Two records share the same key.
    #[error("duplicate key \"{0}\"")]
    DuplicateKey(String),

    /// An object was placed inside something that is not a container.
    #[error("{object} cannot be placed in {container}: not a container")]
    NotAContainer {
        /// The object being placed.
        object: ObjectId,
        /// The would-be container.
        container: ObjectId,
    },

    /// The container does not have enough remaining capacity.
    #[error("{container} has no room for {object}")]
    ContainerFull {
        /// The object being placed.
        object: ObjectId,
        /// The full container.
        container: ObjectId,
    },

    /// The player cannot carry the extra weight.
    #[error("{object} is too heavy to carry")]
    TooHeavy {
        /// The object being picked up.
        object: ObjectId,
    },

    /// Placing the object would make it (indirectly) contain itself.
    #[error("{object} cannot be placed inside itself")]
    ContainmentCycle {
        /// The object being placed.
        object: ObjectId,
    },

    /// An object's recorded location disagrees with its holder's contents.
    #[error("{object} is recorded in more than one place")]
    DuplicatePlacement {
        /// The misplaced object.
        object: ObjectId,
    },

    /// Content or snapshot data could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WorldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
