//! Rooms, exits, and condition-gated text.

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::direction::Direction;
use crate::flags::RoomFlags;
use crate::id::{ObjectId, RoomId};
use crate::world::World;

/// Text shown in place of a default description while its condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalText {
    /// When this variant applies.
    pub condition: Condition,
    /// The replacement text.
    pub text: String,
}

impl ConditionalText {
    /// Pick the first variant whose condition holds, falling back to `default`.
    pub fn select<'a>(variants: &'a [ConditionalText], default: &'a str, world: &World) -> &'a str {
        variants
            .iter()
            .find(|v| v.condition.evaluate(world))
            .map_or(default, |v| v.text.as_str())
    }
}

/// A one-way passage out of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exit {
    /// Direction of travel.
    pub direction: Direction,
    /// Where the exit leads. `None` means permanently blocked.
    pub destination: Option<RoomId>,
    /// Message shown when the exit refuses passage.
    pub message: Option<String>,
    /// Gate that must hold for the exit to be usable.
    pub condition: Condition,
}

impl Exit {
    /// The room this exit currently leads to, if passable.
    pub fn passable(&self, world: &World) -> Option<RoomId> {
        self.destination.filter(|_| self.condition.evaluate(world))
    }

    /// The message shown when the exit is blocked.
    pub fn blocked_message(&self) -> &str {
        self.message.as_deref().unwrap_or("You can't go that way.")
    }
}

/// A location in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Identifier.
    pub id: RoomId,
    /// Content key the room was built from.
    pub key: String,
    /// Title line.
    pub name: String,
    /// Terse description used when revisiting in brief mode.
    pub short_description: Option<String>,
    /// Full description.
    pub long_description: String,
    /// Exits in declaration order.
    pub exits: Vec<Exit>,
    /// Objects directly in the room, in arrival order.
    pub contents: Vec<ObjectId>,
    /// Static and dynamic room properties.
    pub flags: RoomFlags,
    /// Whether the player has been here before.
    pub visited: bool,
    /// Conditional replacements for the long description.
    pub texts: Vec<ConditionalText>,
}

impl Room {
    /// Find the exit leading in a direction.
    pub fn exit(&self, direction: Direction) -> Option<&Exit> {
        self.exits.iter().find(|e| e.direction == direction)
    }

    /// Check a room flag.
    pub fn is(&self, flag: RoomFlags) -> bool {
        self.flags.contains(flag)
    }

    /// The long description, with any conditional variant applied.
    pub fn describe<'a>(&'a self, world: &World) -> &'a str {
        ConditionalText::select(&self.texts, &self.long_description, world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_world;
    use crate::flags::GameFlag;

    #[test]
    fn exit_lookup_by_direction() {
        let world = demo_world().unwrap();
        let room = world.room_by_key("west-of-house").unwrap();
        assert!(room.exit(Direction::North).is_some());
        assert!(room.exit(Direction::Up).is_none());
    }

    #[test]
    fn blocked_exit_has_message() {
        let world = demo_world().unwrap();
        let room = world.room_by_key("west-of-house").unwrap();
        let east = room.exit(Direction::East).unwrap();
        assert_eq!(east.passable(&world), None);
        assert!(east.blocked_message().contains("boarded"));
    }

    #[test]
    fn conditional_exit_opens_with_flag() {
        let mut world = demo_world().unwrap();
        let room = world.room_by_key("behind-house").unwrap().id;
        let gated = |w: &World| {
            w.room(room)
                .unwrap()
                .exit(Direction::West)
                .unwrap()
                .passable(w)
        };
        assert_eq!(gated(&world), None);
        world.state.set_flag(GameFlag::KitchenWindowOpen);
        assert_eq!(gated(&world), world.room_by_key("kitchen").map(|r| r.id));
    }

    #[test]
    fn conditional_description_overrides_default() {
        let mut world = demo_world().unwrap();
        let room = world.room_by_key("living-room").unwrap().id;
        let before = world.room(room).unwrap().describe(&world).to_string();
        world.state.set_flag(GameFlag::RugMoved);
        let after = world.room(room).unwrap().describe(&world).to_string();
        assert_ne!(before, after);
        assert!(after.contains("trap door"));
    }
}
