//! Plain content records supplied by a content provider.
//!
//! Records name each other by string key. They carry no behavior; the
//! [`WorldBuilder`](crate::builder::WorldBuilder) turns them into a validated
//! [`World`](crate::World).

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::direction::Direction;
use crate::flags::{ObjectFlags, RoomFlags};
use crate::room::ConditionalText;

/// A complete set of content tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldRecords {
    /// Name of the world.
    pub name: String,
    /// Key of the room the player starts in.
    pub start: String,
    /// Room table.
    pub rooms: Vec<RoomRecord>,
    /// Object table. Objects are placed in table order.
    pub objects: Vec<ObjectRecord>,
}

/// One room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomRecord {
    /// Unique key.
    pub key: String,
    /// Title line.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Terse description for brief mode.
    pub short_description: Option<String>,
    /// Room flags.
    pub flags: RoomFlags,
    /// Exits in display order.
    pub exits: Vec<ExitRecord>,
    /// Conditional replacements for the description.
    pub texts: Vec<ConditionalText>,
}

/// One exit out of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitRecord {
    /// Direction of travel.
    pub direction: Direction,
    /// Key of the destination room. `None` blocks the exit permanently.
    #[serde(default)]
    pub to: Option<String>,
    /// Message shown when passage is refused.
    #[serde(default)]
    pub message: Option<String>,
    /// Gate on traversal.
    #[serde(default)]
    pub condition: Condition,
}

impl ExitRecord {
    /// An unconditional exit.
    pub fn to(direction: Direction, room: &str) -> Self {
        Self {
            direction,
            to: Some(room.to_string()),
            message: None,
            condition: Condition::Always,
        }
    }

    /// An exit that never lets anyone through.
    pub fn blocked(direction: Direction, message: &str) -> Self {
        Self {
            direction,
            to: None,
            message: Some(message.to_string()),
            condition: Condition::Always,
        }
    }

    /// An exit usable only while `condition` holds.
    pub fn gated(direction: Direction, room: &str, condition: Condition, message: &str) -> Self {
        Self {
            direction,
            to: Some(room.to_string()),
            message: Some(message.to_string()),
            condition,
        }
    }
}

/// Where an object starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "in", content = "key", rename_all = "snake_case")]
pub enum Placement {
    /// Out of play until something brings it in.
    #[default]
    Nowhere,
    /// In the room with this key.
    Room(String),
    /// Inside the object with this key.
    Object(String),
    /// Carried by the player.
    Player,
}

/// One object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectRecord {
    /// Unique key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Nouns that refer to it.
    pub synonyms: Vec<String>,
    /// Adjectives that refer to it.
    pub adjectives: Vec<String>,
    /// EXAMINE text.
    pub description: String,
    /// Listing text until first handled.
    pub initial_description: Option<String>,
    /// READ text.
    pub text: Option<String>,
    /// Starting location.
    pub location: Placement,
    /// Flags.
    pub flags: ObjectFlags,
    /// Container volume. `None` is unlimited.
    pub capacity: Option<u32>,
    /// Size.
    pub size: u32,
    /// Points for first taking it.
    pub value: i32,
    /// Points while in the trophy case.
    pub case_value: i32,
    /// Conditional replacements for the description.
    pub texts: Vec<ConditionalText>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_records_fill_defaults() {
        let json = r#"{
            "key": "leaflet",
            "name": "leaflet",
            "location": { "in": "object", "key": "mailbox" }
        }"#;
        let record: ObjectRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.location, Placement::Object("mailbox".to_string()));
        assert_eq!(record.size, 0);
        assert!(record.flags.is_empty());
    }

    #[test]
    fn exits_default_to_unconditional() {
        let json = r#"{ "direction": "north", "to": "forest" }"#;
        let exit: ExitRecord = serde_json::from_str(json).unwrap();
        assert_eq!(exit, ExitRecord::to(Direction::North, "forest"));
    }
}
