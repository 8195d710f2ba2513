//! Numeric identifiers for rooms and objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a room, allocated by the world builder in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

/// Identifier of a game object, allocated by the world builder in record order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

impl RoomId {
    /// Index of this room in the world's room table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ObjectId {
    /// Index of this object in the world's object table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "room#{}", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}
