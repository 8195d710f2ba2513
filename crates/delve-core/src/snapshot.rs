//! Serializable snapshots of a world's mutable state.
//!
//! Static content (names, descriptions, exits) is not captured; a snapshot is
//! restored onto a world built from the same records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{WorldError, WorldResult};
use crate::flags::{ObjectFlags, RoomFlags};
use crate::id::ObjectId;
use crate::object::Location;
use crate::player::Player;
use crate::state::GlobalState;
use crate::world::World;

/// Mutable state of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    /// Room key, checked on restore.
    pub key: String,
    /// Room flags.
    pub flags: RoomFlags,
    /// Visited marker.
    pub visited: bool,
    /// Contents in order.
    pub contents: Vec<ObjectId>,
}

/// Mutable state of one object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectState {
    /// Object key, checked on restore.
    pub key: String,
    /// Location.
    pub location: Location,
    /// Flags.
    pub flags: ObjectFlags,
    /// Whether the take value has been awarded.
    pub value_claimed: bool,
    /// Contents in order.
    pub contents: Vec<ObjectId>,
}

/// Everything needed to put a world back exactly as it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the world the snapshot was taken from.
    pub world: String,
    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,
    /// Per-room state, in id order.
    pub rooms: Vec<RoomState>,
    /// Per-object state, in id order.
    pub objects: Vec<ObjectState>,
    /// The inventory.
    pub player: Player,
    /// Global state.
    pub state: GlobalState,
}

impl Snapshot {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> WorldResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> WorldResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl World {
    /// Capture the world's mutable state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            world: self.name.clone(),
            taken_at: Utc::now(),
            rooms: self
                .rooms
                .iter()
                .map(|r| RoomState {
                    key: r.key.clone(),
                    flags: r.flags,
                    visited: r.visited,
                    contents: r.contents.clone(),
                })
                .collect(),
            objects: self
                .objects
                .iter()
                .map(|o| ObjectState {
                    key: o.key.clone(),
                    location: o.location,
                    flags: o.flags,
                    value_claimed: o.value_claimed,
                    contents: o.contents.clone(),
                })
                .collect(),
            player: self.player.clone(),
            state: self.state.clone(),
        }
    }

    /// Restore a snapshot taken from a world built from the same records.
    ///
    /// The snapshot is validated before it replaces anything; on error the
    /// world is left untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> WorldResult<()> {
        if snapshot.world != self.name {
            return Err(WorldError::Serialization(format!(
                "snapshot is of world \"{}\", not \"{}\"",
                snapshot.world, self.name
            )));
        }
        if snapshot.rooms.len() != self.rooms.len() || snapshot.objects.len() != self.objects.len() {
            return Err(WorldError::Serialization(
                "snapshot does not match the world's tables".to_string(),
            ));
        }

        let mut restored = self.clone();
        for (room, saved) in restored.rooms.iter_mut().zip(&snapshot.rooms) {
            if room.key != saved.key {
                return Err(WorldError::UnknownKey {
                    kind: "room",
                    key: saved.key.clone(),
                });
            }
            room.flags = saved.flags;
            room.visited = saved.visited;
            room.contents.clone_from(&saved.contents);
        }
        for (object, saved) in restored.objects.iter_mut().zip(&snapshot.objects) {
            if object.key != saved.key {
                return Err(WorldError::UnknownKey {
                    kind: "object",
                    key: saved.key.clone(),
                });
            }
            object.location = saved.location;
            object.flags = saved.flags;
            object.value_claimed = saved.value_claimed;
            object.contents.clone_from(&saved.contents);
        }
        restored.player = snapshot.player.clone();
        restored.state = snapshot.state.clone();
        restored.validate()?;

        *self = restored;
        info!(world = %self.name, taken_at = %snapshot.taken_at, "restored snapshot");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_world;
    use crate::flags::GameFlag;

    #[test]
    fn snapshot_restores_mutations() {
        let mut world = demo_world().unwrap();
        let pristine = world.snapshot();

        let leaflet = world.object_id("leaflet").unwrap();
        world.move_object(leaflet, Location::Player).unwrap();
        world.state.moves = 12;
        world.state.set_flag(GameFlag::RugMoved);

        let saved = world.snapshot();
        world.restore(&pristine).unwrap();
        assert!(world.player.is_empty());
        assert_eq!(world.state.moves, 0);

        world.restore(&saved).unwrap();
        assert!(world.player.has_item(leaflet));
        assert!(world.state.has_flag(GameFlag::RugMoved));
    }

    #[test]
    fn snapshot_survives_json() {
        let world = demo_world().unwrap();
        let snapshot = world.snapshot();
        let json = snapshot.to_json().unwrap();
        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn corrupt_snapshot_leaves_world_untouched() {
        let mut world = demo_world().unwrap();
        let mut snapshot = world.snapshot();
        let leaflet = world.object_id("leaflet").unwrap();
        snapshot.player.inventory.push(leaflet);

        let err = world.restore(&snapshot).unwrap_err();
        assert_eq!(err, WorldError::DuplicatePlacement { object: leaflet });
        assert!(world.player.is_empty());
    }

    #[test]
    fn snapshot_of_another_world_is_rejected() {
        let mut world = demo_world().unwrap();
        let mut snapshot = world.snapshot();
        snapshot.world = "elsewhere".to_string();
        assert!(matches!(world.restore(&snapshot), Err(WorldError::Serialization(_))));
    }
}
