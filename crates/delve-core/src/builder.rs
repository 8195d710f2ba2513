//! Turns content records into a validated [`World`].

use std::collections::HashMap;

use tracing::debug;

use crate::error::{WorldError, WorldResult};
use crate::flags::Variable;
use crate::id::{ObjectId, RoomId};
use crate::object::{GameObject, Location};
use crate::records::{Placement, WorldRecords};
use crate::room::{Exit, Room};
use crate::state::GlobalState;
use crate::world::World;

/// Default carrying capacity of the player.
pub const DEFAULT_CARRY_CAPACITY: u32 = 100;

/// Builds a [`World`] from [`WorldRecords`].
///
/// Building happens in two passes:
/// 1. **Allocation pass**: assign ids to every room and object in table
///    order, rejecting duplicate keys
/// 2. **Linking pass**: resolve exit destinations and object placements by
///    key, then place objects through [`World::move_object`] so every
///    containment invariant is checked
pub struct WorldBuilder {
    records: WorldRecords,
    carry_capacity: u32,
}

impl WorldBuilder {
    /// Start building from a set of records.
    pub fn from_records(records: WorldRecords) -> Self {
        Self {
            records,
            carry_capacity: DEFAULT_CARRY_CAPACITY,
        }
    }

    /// Set the player's carrying capacity.
    pub fn carry_capacity(mut self, capacity: u32) -> Self {
        self.carry_capacity = capacity;
        self
    }

    /// Build and validate the world.
    pub fn build(self) -> WorldResult<World> {
        let WorldRecords {
            name,
            start,
            rooms: room_records,
            objects: object_records,
        } = self.records;

        // Pass 1: allocate ids
        let mut room_ids: HashMap<&str, RoomId> = HashMap::new();
        for (index, record) in room_records.iter().enumerate() {
            let id = RoomId(index_u32(index)?);
            if room_ids.insert(record.key.as_str(), id).is_some() {
                return Err(WorldError::DuplicateKey(record.key.clone()));
            }
        }
        let mut object_ids: HashMap<&str, ObjectId> = HashMap::new();
        for (index, record) in object_records.iter().enumerate() {
            let id = ObjectId(index_u32(index)?);
            if object_ids.insert(record.key.as_str(), id).is_some() {
                return Err(WorldError::DuplicateKey(record.key.clone()));
            }
        }

        let lookup_room = |key: &str| {
            room_ids
                .get(key)
                .copied()
                .ok_or_else(|| WorldError::UnknownKey {
                    kind: "room",
                    key: key.to_string(),
                })
        };
        let lookup_object = |key: &str| {
            object_ids
                .get(key)
                .copied()
                .ok_or_else(|| WorldError::UnknownKey {
                    kind: "object",
                    key: key.to_string(),
                })
        };

        // Pass 2: link
        let mut rooms = Vec::with_capacity(room_records.len());
        for (index, record) in room_records.iter().enumerate() {
            let mut exits = Vec::with_capacity(record.exits.len());
            for exit in &record.exits {
                let destination = exit.to.as_deref().map(lookup_room).transpose()?;
                exits.push(Exit {
                    direction: exit.direction,
                    destination,
                    message: exit.message.clone(),
                    condition: exit.condition.clone(),
                });
            }
            rooms.push(Room {
                id: RoomId(index_u32(index)?),
                key: record.key.clone(),
                name: record.name.clone(),
                short_description: record.short_description.clone(),
                long_description: record.description.clone(),
                exits,
                contents: Vec::new(),
                flags: record.flags,
                visited: false,
                texts: record.texts.clone(),
            });
        }

        let mut objects = Vec::with_capacity(object_records.len());
        let mut placements = Vec::with_capacity(object_records.len());
        for (index, record) in object_records.iter().enumerate() {
            let id = ObjectId(index_u32(index)?);
            let placement = match &record.location {
                Placement::Nowhere => Location::Nowhere,
                Placement::Room(key) => Location::Room(lookup_room(key.as_str())?),
                Placement::Object(key) => Location::Object(lookup_object(key.as_str())?),
                Placement::Player => Location::Player,
            };
            placements.push((id, placement));
            objects.push(GameObject {
                id,
                key: record.key.clone(),
                name: record.name.clone(),
                synonyms: record.synonyms.iter().map(|s| s.to_lowercase()).collect(),
                adjectives: record.adjectives.iter().map(|s| s.to_lowercase()).collect(),
                description: record.description.clone(),
                initial_description: record.initial_description.clone(),
                text: record.text.clone(),
                location: Location::Nowhere,
                flags: record.flags,
                capacity: record.capacity,
                size: record.size,
                value: record.value,
                case_value: record.case_value,
                value_claimed: false,
                contents: Vec::new(),
                texts: record.texts.clone(),
            });
        }

        let mut state = GlobalState::new(lookup_room(start.as_str())?);
        state.max_score = objects.iter().map(|o| o.value + o.case_value).sum();
        state.set_variable(Variable::LoadAllowed, i64::from(self.carry_capacity));

        let mut world = World::from_parts(name, rooms, objects, state);
        for (id, placement) in placements {
            world.move_object(id, placement)?;
        }
        let start = world.state.current_room;
        world.room_mut(start)?.visited = true;
        world.validate()?;

        debug!(
            world = %world.name,
            rooms = world.rooms().count(),
            objects = world.objects().count(),
            "built world"
        );
        Ok(world)
    }
}

fn index_u32(index: usize) -> WorldResult<u32> {
    u32::try_from(index).map_err(|_| WorldError::Serialization(format!("table index {index} out of range")))
}

impl World {
    /// Build a world from records with the default carrying capacity.
    pub fn from_records(records: WorldRecords) -> WorldResult<World> {
        WorldBuilder::from_records(records).build()
    }

    /// Build a world from a JSON document of [`WorldRecords`].
    pub fn from_records_json(json: &str) -> WorldResult<World> {
        let records: WorldRecords = serde_json::from_str(json)?;
        Self::from_records(records)
    }
}
