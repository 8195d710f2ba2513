//! Fixed text templates for rooms, objects and the inventory.

use delve_core::{GameObject, Location, ObjectFlags, ObjectId, RoomId, World, WorldResult};

use super::config::{NarratorConfig, Verbosity};

/// Shown instead of a room when there is no light.
pub const DARKNESS: &str = "It is pitch black. You are likely to be eaten by a grue.";

/// Renders the world as text.
#[derive(Debug, Clone, Default)]
pub struct Narrator {
    config: NarratorConfig,
}

impl Narrator {
    /// Create a narrator with the given config.
    pub fn new(config: NarratorConfig) -> Self {
        Self { config }
    }

    /// The current verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.config.verbosity
    }

    /// Change the verbosity.
    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.config.verbosity = verbosity;
    }

    /// Describe the player's room after walking into it. `first_visit` is
    /// whether the room had been seen before this arrival.
    pub fn describe_arrival(&self, world: &World, first_visit: bool) -> WorldResult<String> {
        let full = self.config.verbosity.full_on_arrival(first_visit);
        self.describe_room(world, world.state.current_room, full)
    }

    /// Describe a room as seen from inside it.
    ///
    /// Without light only the darkness warning is shown. Otherwise the name,
    /// then the long description when `full`, then what lies about.
    pub fn describe_room(&self, world: &World, id: RoomId, full: bool) -> WorldResult<String> {
        if !world.player_has_light() {
            return Ok(DARKNESS.to_string());
        }
        let room = world.room(id)?;
        let mut lines = vec![room.name.clone()];
        if full {
            lines.push(room.describe(world).to_string());
        }
        for &object in &room.contents {
            self.describe_present(world, object, &mut lines)?;
        }
        Ok(lines.join("\n"))
    }

    /// One or more lines for an object lying in a room.
    fn describe_present(&self, world: &World, id: ObjectId, lines: &mut Vec<String>) -> WorldResult<()> {
        let object = world.object(id)?;
        if object.is(ObjectFlags::INVISIBLE) {
            return Ok(());
        }
        if object.is(ObjectFlags::ACTOR) {
            lines.push(object.describe(world).to_string());
            return Ok(());
        }
        if object.is(ObjectFlags::FIXED) && !object.is(ObjectFlags::CONTAINER) {
            // Scenery is part of the room description.
            return Ok(());
        }
        match (&object.initial_description, object.is(ObjectFlags::TOUCHED)) {
            (Some(first_sight), false) => lines.push(first_sight.clone()),
            _ => lines.push(format!("There is {} here.", object.a_name())),
        }
        if object.shows_contents() {
            self.list_contents(world, object, 0, lines)?;
        }
        Ok(())
    }

    /// "The X contains:" followed by the visible contents, indented by
    /// `depth` levels. Nothing when the container is empty.
    fn list_contents(
        &self,
        world: &World,
        container: &GameObject,
        depth: usize,
        lines: &mut Vec<String>,
    ) -> WorldResult<()> {
        let visible: Vec<&GameObject> = world
            .contents(Location::Object(container.id))?
            .iter()
            .filter_map(|&id| world.object(id).ok())
            .filter(|o| !o.is(ObjectFlags::INVISIBLE))
            .collect();
        if visible.is_empty() {
            return Ok(());
        }
        let indent = "  ".repeat(depth);
        lines.push(format!("{indent}The {} contains:", container.name));
        for item in visible {
            lines.push(format!("{indent}  {}", capitalize(&item.a_name())));
            if item.shows_contents() {
                self.list_contents(world, item, depth + 1, lines)?;
            }
        }
        Ok(())
    }

    /// EXAMINE text: the description, plus the contents of anything that
    /// shows them and the state of a light source.
    pub fn describe_object(&self, world: &World, id: ObjectId) -> WorldResult<String> {
        let object = world.object(id)?;
        let mut lines = vec![object.describe(world).to_string()];
        if object.is(ObjectFlags::LIGHT_SOURCE) && !object.is(ObjectFlags::BURNED_OUT) {
            let state = if object.is(ObjectFlags::LIT) { "on" } else { "off" };
            lines.push(format!("The {} is turned {state}.", object.name));
        }
        if object.is(ObjectFlags::CONTAINER) && !object.is(ObjectFlags::ACTOR) {
            if object.shows_contents() {
                let before = lines.len();
                self.list_contents(world, object, 0, &mut lines)?;
                if lines.len() == before {
                    lines.push(format!("The {} is empty.", object.name));
                }
            } else {
                lines.push(format!("The {} is closed.", object.name));
            }
        }
        Ok(lines.join("\n"))
    }

    /// The inventory listing.
    pub fn inventory(&self, world: &World) -> WorldResult<String> {
        if world.player.is_empty() {
            return Ok("You are empty-handed.".to_string());
        }
        let mut lines = vec!["You are carrying:".to_string()];
        for &id in &world.player.inventory {
            let object = world.object(id)?;
            lines.push(format!("  {}", capitalize(&object.a_name())));
            if object.shows_contents() {
                self.list_contents(world, object, 1, &mut lines)?;
            }
        }
        Ok(lines.join("\n"))
    }
}

/// Upper-case the first letter.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::demo::demo_world;

    fn at(key: &str) -> World {
        let mut world = demo_world().unwrap();
        world.state.current_room = world.room_id(key).unwrap();
        world
    }

    #[test]
    fn first_sight_descriptions_until_touched() {
        let mut world = at("living-room");
        let narrator = Narrator::default();
        let room = world.state.current_room;
        let text = narrator.describe_room(&world, room, false).unwrap();
        assert!(text.starts_with("Living Room"));
        assert!(text.contains("A battery-powered brass lantern is on the trophy case."));
        assert!(!text.contains("oriental rug"));

        let lamp = world.object_id("lamp").unwrap();
        world.object_mut(lamp).unwrap().flags.insert(ObjectFlags::TOUCHED);
        let text = narrator.describe_room(&world, room, false).unwrap();
        assert!(text.contains("There is a brass lantern here."));
    }

    #[test]
    fn darkness_hides_everything() {
        let world = at("attic");
        let narrator = Narrator::default();
        let text = narrator.describe_room(&world, world.state.current_room, true).unwrap();
        assert_eq!(text, DARKNESS);
    }

    #[test]
    fn open_containers_list_contents() {
        let mut world = at("west-of-house");
        let mailbox = world.object_id("mailbox").unwrap();
        world.object_mut(mailbox).unwrap().flags.insert(ObjectFlags::OPEN);
        let narrator = Narrator::default();
        let text = narrator.describe_room(&world, world.state.current_room, false).unwrap();
        assert!(text.contains("There is a small mailbox here.\nThe small mailbox contains:\n  A leaflet"));
    }

    #[test]
    fn examine_reports_closed_and_empty() {
        let mut world = at("west-of-house");
        let mailbox = world.object_id("mailbox").unwrap();
        let narrator = Narrator::default();
        assert_eq!(
            narrator.describe_object(&world, mailbox).unwrap(),
            "It's a small mailbox.\nThe small mailbox is closed."
        );
        let leaflet = world.object_id("leaflet").unwrap();
        world.object_mut(mailbox).unwrap().flags.insert(ObjectFlags::OPEN);
        world.move_object(leaflet, Location::Player).unwrap();
        assert_eq!(
            narrator.describe_object(&world, mailbox).unwrap(),
            "It's a small mailbox.\nThe small mailbox is empty."
        );
    }

    #[test]
    fn inventory_listing() {
        let mut world = at("west-of-house");
        let narrator = Narrator::default();
        assert_eq!(narrator.inventory(&world).unwrap(), "You are empty-handed.");
        let leaflet = world.object_id("leaflet").unwrap();
        world.move_object(leaflet, Location::Player).unwrap();
        assert_eq!(narrator.inventory(&world).unwrap(), "You are carrying:\n  A leaflet");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("a leaflet"), "A leaflet");
        assert_eq!(capitalize(""), "");
    }
}
