//! The world model and its containment invariants.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{WorldError, WorldResult};
use crate::flags::{ObjectFlags, RoomFlags, Variable};
use crate::id::{ObjectId, RoomId};
use crate::object::{GameObject, Location};
use crate::player::Player;
use crate::room::Room;
use crate::state::GlobalState;

/// The central world model. Owns every room, object, and the global state.
///
/// Rooms and objects are stored densely and addressed by id; the content keys
/// they were built from are indexed for lookups by name.
#[derive(Debug, Clone)]
pub struct World {
    /// Name of the world, carried into snapshots.
    pub name: String,
    pub(crate) rooms: Vec<Room>,
    pub(crate) objects: Vec<GameObject>,
    /// The player's inventory.
    pub player: Player,
    /// Global flags, counters, score, and position.
    pub state: GlobalState,

    // Indexes
    room_keys: HashMap<String, RoomId>,
    object_keys: HashMap<String, ObjectId>,
}

impl World {
    /// Assemble a world from already-allocated rooms and objects.
    ///
    /// Objects must start out `Nowhere` with empty contents; place them with
    /// [`World::move_object`].
    pub(crate) fn from_parts(
        name: String,
        rooms: Vec<Room>,
        objects: Vec<GameObject>,
        state: GlobalState,
    ) -> Self {
        let room_keys = rooms.iter().map(|r| (r.key.clone(), r.id)).collect();
        let object_keys = objects.iter().map(|o| (o.key.clone(), o.id)).collect();
        Self {
            name,
            rooms,
            objects,
            player: Player::default(),
            state,
            room_keys,
            object_keys,
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Get a room by ID.
    pub fn room(&self, id: RoomId) -> WorldResult<&Room> {
        self.rooms.get(id.index()).ok_or(WorldError::RoomNotFound(id))
    }

    /// Get a mutable room by ID.
    pub fn room_mut(&mut self, id: RoomId) -> WorldResult<&mut Room> {
        self.rooms
            .get_mut(id.index())
            .ok_or(WorldError::RoomNotFound(id))
    }

    /// Get an object by ID.
    pub fn object(&self, id: ObjectId) -> WorldResult<&GameObject> {
        self.objects
            .get(id.index())
            .ok_or(WorldError::ObjectNotFound(id))
    }

    /// Get a mutable object by ID.
    pub fn object_mut(&mut self, id: ObjectId) -> WorldResult<&mut GameObject> {
        self.objects
            .get_mut(id.index())
            .ok_or(WorldError::ObjectNotFound(id))
    }

    /// Iterate over all rooms in id order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// Iterate over all objects in id order.
    pub fn objects(&self) -> impl Iterator<Item = &GameObject> {
        self.objects.iter()
    }

    /// Find a room by content key.
    pub fn room_by_key(&self, key: &str) -> Option<&Room> {
        self.room_keys.get(key).and_then(|id| self.rooms.get(id.index()))
    }

    /// Find an object by content key.
    pub fn object_by_key(&self, key: &str) -> Option<&GameObject> {
        self.object_keys
            .get(key)
            .and_then(|id| self.objects.get(id.index()))
    }

    /// Resolve a room key to its ID.
    pub fn room_id(&self, key: &str) -> WorldResult<RoomId> {
        self.room_keys
            .get(key)
            .copied()
            .ok_or_else(|| WorldError::UnknownKey {
                kind: "room",
                key: key.to_string(),
            })
    }

    /// Resolve an object key to its ID.
    pub fn object_id(&self, key: &str) -> WorldResult<ObjectId> {
        self.object_keys
            .get(key)
            .copied()
            .ok_or_else(|| WorldError::UnknownKey {
                kind: "object",
                key: key.to_string(),
            })
    }

    /// The room the player is in.
    pub fn current_room(&self) -> WorldResult<&Room> {
        self.room(self.state.current_room)
    }

    /// Objects held directly at a location.
    pub fn contents(&self, location: Location) -> WorldResult<&[ObjectId]> {
        match location {
            Location::Nowhere => Ok(&[]),
            Location::Room(id) => Ok(&self.room(id)?.contents),
            Location::Object(id) => Ok(&self.object(id)?.contents),
            Location::Player => Ok(&self.player.inventory),
        }
    }

    // -----------------------------------------------------------------------
    // Containment
    // -----------------------------------------------------------------------

    /// Whether `id` is (transitively) inside `ancestor`.
    pub fn is_within(&self, id: ObjectId, ancestor: ObjectId) -> bool {
        let mut location = self.objects.get(id.index()).map(|o| o.location);
        for _ in 0..self.objects.len() {
            match location {
                Some(Location::Object(holder)) if holder == ancestor => return true,
                Some(Location::Object(holder)) => {
                    location = self.objects.get(holder.index()).map(|o| o.location);
                }
                _ => return false,
            }
        }
        false
    }

    /// The outermost location of an object: a room, the player, or nowhere.
    pub fn outer_location(&self, id: ObjectId) -> Location {
        let mut location = self
            .objects
            .get(id.index())
            .map_or(Location::Nowhere, |o| o.location);
        for _ in 0..self.objects.len() {
            match location {
                Location::Object(holder) => {
                    location = self
                        .objects
                        .get(holder.index())
                        .map_or(Location::Nowhere, |o| o.location);
                }
                other => return other,
            }
        }
        Location::Nowhere
    }

    /// The room an object is in, counting the player's room for held things.
    pub fn room_of(&self, id: ObjectId) -> Option<RoomId> {
        match self.outer_location(id) {
            Location::Room(room) => Some(room),
            Location::Player => Some(self.state.current_room),
            _ => None,
        }
    }

    /// Whether the player carries the object, directly or inside something.
    pub fn is_held(&self, id: ObjectId) -> bool {
        self.outer_location(id) == Location::Player
    }

    /// Weight of an object: its own size plus everything inside it.
    pub fn weight(&self, id: ObjectId) -> WorldResult<u32> {
        let object = self.object(id)?;
        let mut total = object.size;
        for &inner in &object.contents {
            total += self.weight(inner)?;
        }
        Ok(total)
    }

    /// Total weight of the player's inventory.
    pub fn inventory_weight(&self) -> WorldResult<u32> {
        let mut total = 0;
        for &id in &self.player.inventory {
            total += self.weight(id)?;
        }
        Ok(total)
    }

    /// The most the player may carry.
    pub fn carry_limit(&self) -> u32 {
        u32::try_from(self.state.variable(Variable::LoadAllowed).max(0)).unwrap_or(u32::MAX)
    }

    /// Whether picking up `id` keeps the inventory within the carry limit.
    pub fn can_carry(&self, id: ObjectId) -> WorldResult<bool> {
        if self.is_held(id) {
            return Ok(true);
        }
        Ok(self.inventory_weight()? + self.weight(id)? <= self.carry_limit())
    }

    fn contained_weight(&self, container: ObjectId) -> WorldResult<u32> {
        let mut total = 0;
        for &id in &self.object(container)?.contents {
            total += self.weight(id)?;
        }
        Ok(total)
    }

    /// Whether `id` fits in `container` alongside what is already there.
    ///
    /// Every enclosing container's capacity is checked too, since the added
    /// weight counts against all of them.
    pub fn fits_in(&self, id: ObjectId, container: ObjectId) -> WorldResult<bool> {
        let weight = self.weight(id)?;
        let mut current = Some(container);
        for _ in 0..self.objects.len() {
            let Some(holder_id) = current else {
                break;
            };
            let holder = self.object(holder_id)?;
            if holder.contents.contains(&id) || self.is_within(id, holder_id) {
                return Ok(true);
            }
            if let Some(capacity) = holder.capacity {
                if self.contained_weight(holder_id)? + weight > capacity {
                    return Ok(false);
                }
            }
            current = match holder.location {
                Location::Object(parent) => Some(parent),
                _ => None,
            };
        }
        Ok(true)
    }

    /// Move an object to a new location, keeping every holder's contents
    /// list in step with the object's own `location`.
    ///
    /// Fails without mutating anything if the move would break a containment
    /// invariant: the target must exist, a container target must have the
    /// container capability and room to spare, nothing may contain itself,
    /// and the player's carry limit holds.
    pub fn move_object(&mut self, id: ObjectId, to: Location) -> WorldResult<()> {
        let from = self.object(id)?.location;
        match to {
            Location::Nowhere | Location::Player => {}
            Location::Room(room) => {
                self.room(room)?;
            }
            Location::Object(container) => {
                let holder = self.object(container)?;
                if container == id || self.is_within(container, id) {
                    return Err(WorldError::ContainmentCycle { object: id });
                }
                if !holder.is(ObjectFlags::CONTAINER) {
                    return Err(WorldError::NotAContainer {
                        object: id,
                        container,
                    });
                }
                if !self.fits_in(id, container)? {
                    return Err(WorldError::ContainerFull {
                        object: id,
                        container,
                    });
                }
            }
        }
        let into_inventory = match to {
            Location::Player => true,
            Location::Object(container) => self.is_held(container),
            _ => false,
        };
        if into_inventory && !self.can_carry(id)? {
            return Err(WorldError::TooHeavy { object: id });
        }

        self.detach(id, from)?;
        self.attach(id, to)?;
        self.object_mut(id)?.location = to;
        debug!(object = %id, %from, %to, "moved object");
        Ok(())
    }

    fn detach(&mut self, id: ObjectId, from: Location) -> WorldResult<()> {
        match from {
            Location::Nowhere => {}
            Location::Room(room) => self.room_mut(room)?.contents.retain(|&o| o != id),
            Location::Object(holder) => self.object_mut(holder)?.contents.retain(|&o| o != id),
            Location::Player => {
                self.player.remove_item(id);
            }
        }
        Ok(())
    }

    fn attach(&mut self, id: ObjectId, to: Location) -> WorldResult<()> {
        match to {
            Location::Nowhere => {}
            Location::Room(room) => self.room_mut(room)?.contents.push(id),
            Location::Object(holder) => self.object_mut(holder)?.contents.push(id),
            Location::Player => self.player.add_item(id),
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Visibility
    // -----------------------------------------------------------------------

    fn collect_visible(&self, roots: &[ObjectId], out: &mut Vec<ObjectId>) {
        for &id in roots {
            let Some(object) = self.objects.get(id.index()) else {
                continue;
            };
            if object.is(ObjectFlags::INVISIBLE) {
                continue;
            }
            out.push(id);
            if object.shows_contents() {
                self.collect_visible(&object.contents, out);
            }
        }
    }

    /// Objects visible in a room, descending into open or transparent
    /// containers. Does not include the player's inventory.
    pub fn visible_in_room(&self, room: RoomId) -> Vec<ObjectId> {
        let mut out = Vec::new();
        if let Some(room) = self.rooms.get(room.index()) {
            self.collect_visible(&room.contents, &mut out);
        }
        out
    }

    /// The player's inventory, descending into open or transparent containers.
    pub fn visible_in_inventory(&self) -> Vec<ObjectId> {
        let mut out = Vec::new();
        self.collect_visible(&self.player.inventory, &mut out);
        out
    }

    /// Whether a room has light, either its own or from a burning source
    /// there (including one the player carries in).
    pub fn is_lit(&self, room: RoomId) -> bool {
        if self.rooms.get(room.index()).is_some_and(|r| r.is(RoomFlags::LIT)) {
            return true;
        }
        let glowing = |id: &ObjectId| self.objects.get(id.index()).is_some_and(GameObject::gives_light);
        if room == self.state.current_room && self.visible_in_inventory().iter().any(glowing) {
            return true;
        }
        self.visible_in_room(room).iter().any(glowing)
    }

    /// Whether the player's current room is lit.
    pub fn player_has_light(&self) -> bool {
        self.is_lit(self.state.current_room)
    }

    /// Objects the parser may bind a noun phrase to: the inventory, plus
    /// the current room's visible contents when there is light to see by.
    pub fn in_scope(&self) -> Vec<ObjectId> {
        let mut scope = self.visible_in_inventory();
        if self.player_has_light() {
            scope.extend(self.visible_in_room(self.state.current_room));
        }
        scope
    }

    /// Whether the player can touch an object: it is held or in the current
    /// room, and no closed container stands in the way.
    pub fn is_reachable(&self, id: ObjectId) -> bool {
        let Some(object) = self.objects.get(id.index()) else {
            return false;
        };
        let mut location = object.location;
        for _ in 0..self.objects.len() {
            match location {
                Location::Player => return true,
                Location::Room(room) => return room == self.state.current_room,
                Location::Nowhere => return false,
                Location::Object(holder) => match self.objects.get(holder.index()) {
                    Some(h) if h.is_open_container() => location = h.location,
                    _ => return false,
                },
            }
        }
        false
    }

    // -----------------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------------

    /// Check every structural invariant of the world.
    ///
    /// Each object must be listed exactly once, by the holder its `location`
    /// names; holders must exist; containers must have the capability and
    /// the capacity; nothing may contain itself; the player's load must be
    /// within the carry limit.
    pub fn validate(&self) -> WorldResult<()> {
        self.room(self.state.current_room)?;

        let mut listed: HashMap<ObjectId, Location> = HashMap::new();
        let mut note = |id: ObjectId, holder: Location| -> WorldResult<()> {
            if listed.insert(id, holder).is_some() {
                return Err(WorldError::DuplicatePlacement { object: id });
            }
            Ok(())
        };
        for room in &self.rooms {
            for &id in &room.contents {
                note(id, Location::Room(room.id))?;
            }
        }
        for object in &self.objects {
            for &id in &object.contents {
                note(id, Location::Object(object.id))?;
            }
        }
        for &id in &self.player.inventory {
            note(id, Location::Player)?;
        }

        for object in &self.objects {
            let expected = match object.location {
                Location::Nowhere => None,
                other => Some(other),
            };
            if listed.get(&object.id).copied() != expected {
                return Err(WorldError::DuplicatePlacement { object: object.id });
            }
            match object.location {
                Location::Room(room) => {
                    self.room(room)?;
                }
                Location::Object(container) => {
                    let holder = self.object(container)?;
                    if !holder.is(ObjectFlags::CONTAINER) {
                        return Err(WorldError::NotAContainer {
                            object: object.id,
                            container,
                        });
                    }
                    if self.is_within(container, object.id) || container == object.id {
                        return Err(WorldError::ContainmentCycle { object: object.id });
                    }
                }
                Location::Nowhere | Location::Player => {}
            }
        }
        for id in listed.keys() {
            self.object(*id)?;
        }

        for object in &self.objects {
            if let (Some(capacity), Some(&first)) = (object.capacity, object.contents.first()) {
                if self.contained_weight(object.id)? > capacity {
                    return Err(WorldError::ContainerFull {
                        object: first,
                        container: object.id,
                    });
                }
            }
        }
        if let Some(&first) = self.player.inventory.first() {
            if self.inventory_weight()? > self.carry_limit() {
                return Err(WorldError::TooHeavy { object: first });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_world;

    fn id(world: &World, key: &str) -> ObjectId {
        world.object_id(key).unwrap()
    }

    #[test]
    fn lookup_by_key() {
        let world = demo_world().unwrap();
        assert!(world.room_by_key("west-of-house").is_some());
        assert!(world.object_by_key("mailbox").is_some());
        assert!(matches!(
            world.room_id("narnia"),
            Err(WorldError::UnknownKey { kind: "room", .. })
        ));
        assert!(matches!(
            world.object(ObjectId(9999)),
            Err(WorldError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn move_object_keeps_contents_in_step() {
        let mut world = demo_world().unwrap();
        let leaflet = id(&world, "leaflet");
        let mailbox = id(&world, "mailbox");
        assert!(world.object(mailbox).unwrap().contents.contains(&leaflet));

        world.move_object(leaflet, Location::Player).unwrap();
        assert!(world.player.has_item(leaflet));
        assert!(!world.object(mailbox).unwrap().contents.contains(&leaflet));
        assert_eq!(world.object(leaflet).unwrap().location, Location::Player);
        world.validate().unwrap();
    }

    #[test]
    fn move_into_non_container_fails() {
        let mut world = demo_world().unwrap();
        let leaflet = id(&world, "leaflet");
        let lamp = id(&world, "lamp");
        let err = world.move_object(leaflet, Location::Object(lamp)).unwrap_err();
        assert!(matches!(err, WorldError::NotAContainer { .. }));
        world.validate().unwrap();
    }

    #[test]
    fn containment_cycles_are_rejected() {
        let mut world = demo_world().unwrap();
        let sack = id(&world, "sack");
        let err = world.move_object(sack, Location::Object(sack)).unwrap_err();
        assert_eq!(err, WorldError::ContainmentCycle { object: sack });
    }

    #[test]
    fn container_capacity_is_enforced() {
        let mut world = demo_world().unwrap();
        let mailbox = id(&world, "mailbox");
        let rope = id(&world, "rope");
        let before = world.object(rope).unwrap().location;
        let err = world.move_object(rope, Location::Object(mailbox)).unwrap_err();
        assert!(matches!(err, WorldError::ContainerFull { .. }));
        assert_eq!(world.object(rope).unwrap().location, before);
        world.validate().unwrap();
    }

    #[test]
    fn weight_includes_contents() {
        let world = demo_world().unwrap();
        let sack = id(&world, "sack");
        let garlic = id(&world, "garlic");
        let sack_size = world.object(sack).unwrap().size;
        let garlic_size = world.object(garlic).unwrap().size;
        assert_eq!(world.weight(sack).unwrap(), sack_size + garlic_size);
    }

    #[test]
    fn carry_limit_rejects_heavy_loads() {
        let mut world = demo_world().unwrap();
        world.state.set_variable(Variable::LoadAllowed, 5);
        let rope = id(&world, "rope");
        assert!(!world.can_carry(rope).unwrap());
        let err = world.move_object(rope, Location::Player).unwrap_err();
        assert_eq!(err, WorldError::TooHeavy { object: rope });
        assert!(world.player.is_empty());
    }

    #[test]
    fn dark_room_limits_scope_to_inventory() {
        let mut world = demo_world().unwrap();
        let cellar = world.room_id("cellar").unwrap();
        let lamp = id(&world, "lamp");
        world.move_object(lamp, Location::Player).unwrap();
        world.state.current_room = cellar;

        assert!(!world.player_has_light());
        assert_eq!(world.in_scope(), vec![lamp]);

        world.object_mut(lamp).unwrap().flags.insert(ObjectFlags::LIT);
        assert!(world.player_has_light());
    }

    #[test]
    fn closed_containers_block_reach_but_not_sight_when_transparent() {
        let mut world = demo_world().unwrap();
        let living = world.room_id("living-room").unwrap();
        world.state.current_room = living;
        let case = id(&world, "trophy-case");
        let sword = id(&world, "sword");
        world.object_mut(case).unwrap().flags.insert(ObjectFlags::OPEN);
        world.move_object(sword, Location::Object(case)).unwrap();
        world.object_mut(case).unwrap().flags.remove(ObjectFlags::OPEN);

        assert!(world.in_scope().contains(&sword));
        assert!(!world.is_reachable(sword));
    }

    #[test]
    fn validate_catches_desynced_contents() {
        let mut world = demo_world().unwrap();
        let leaflet = id(&world, "leaflet");
        world.player.inventory.push(leaflet);
        assert_eq!(
            world.validate(),
            Err(WorldError::DuplicatePlacement { object: leaflet })
        );
    }

    #[test]
    fn room_of_follows_containers() {
        let world = demo_world().unwrap();
        let leaflet = id(&world, "leaflet");
        assert_eq!(world.room_of(leaflet), Some(world.room_id("west-of-house").unwrap()));
        assert!(!world.is_held(leaflet));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn random_moves_never_break_invariants(
                moves in prop::collection::vec((0usize..64, 0usize..80), 1..40)
            ) {
                let mut world = demo_world().unwrap();
                let objects = world.objects().count();
                let rooms = world.rooms().count();
                for (obj, target) in moves {
                    let id = ObjectId((obj % objects) as u32);
                    let to = match target % 4 {
                        0 => Location::Room(RoomId((target % rooms) as u32)),
                        1 => Location::Object(ObjectId((target % objects) as u32)),
                        2 => Location::Player,
                        _ => Location::Nowhere,
                    };
                    let _ = world.move_object(id, to);
                    prop_assert!(world.validate().is_ok());
                }
            }
        }
    }
}
