//! Game objects and where they are.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flags::ObjectFlags;
use crate::id::{ObjectId, RoomId};
use crate::room::ConditionalText;
use crate::world::World;

/// Where an object currently is. An object has exactly one location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "in", content = "id", rename_all = "snake_case")]
pub enum Location {
    /// Out of play.
    #[default]
    Nowhere,
    /// Directly in a room.
    Room(RoomId),
    /// Inside (or on) another object.
    Object(ObjectId),
    /// Carried by the player.
    Player,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nowhere => f.write_str("nowhere"),
            Self::Room(id) => write!(f, "{id}"),
            Self::Object(id) => write!(f, "in {id}"),
            Self::Player => f.write_str("player"),
        }
    }
}

/// Anything the player can refer to: items, scenery, containers, creatures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    /// Identifier.
    pub id: ObjectId,
    /// Content key the object was built from.
    pub key: String,
    /// Display name, e.g. "small mailbox".
    pub name: String,
    /// Nouns the parser accepts for this object.
    pub synonyms: Vec<String>,
    /// Adjectives the parser accepts for this object.
    pub adjectives: Vec<String>,
    /// Text shown by EXAMINE.
    pub description: String,
    /// Room-listing text shown until the object is first handled.
    pub initial_description: Option<String>,
    /// Text shown by READ.
    pub text: Option<String>,
    /// Current location.
    pub location: Location,
    /// Capability and state flags.
    pub flags: ObjectFlags,
    /// Volume available to contents. `None` means unlimited.
    pub capacity: Option<u32>,
    /// Own size, counted towards weight.
    pub size: u32,
    /// Points awarded when first taken.
    pub value: i32,
    /// Points held while the object sits in the trophy case.
    pub case_value: i32,
    /// Whether `value` has already been awarded.
    pub value_claimed: bool,
    /// Objects directly inside, in arrival order.
    pub contents: Vec<ObjectId>,
    /// Conditional replacements for `description`.
    pub texts: Vec<ConditionalText>,
}

impl GameObject {
    /// Check whether all the given flags are set.
    pub fn is(&self, flags: ObjectFlags) -> bool {
        self.flags.contains(flags)
    }

    /// A treasure is anything worth points.
    pub fn is_treasure(&self) -> bool {
        self.value > 0 || self.case_value > 0
    }

    /// Whether the object can currently hold things.
    pub fn is_open_container(&self) -> bool {
        self.is(ObjectFlags::CONTAINER) && (self.is(ObjectFlags::OPEN) || self.is(ObjectFlags::SURFACE))
    }

    /// Whether the object's contents can be seen.
    pub fn shows_contents(&self) -> bool {
        self.is_open_container() || self.is(ObjectFlags::TRANSPARENT)
    }

    /// Whether the object is a burning light source.
    pub fn gives_light(&self) -> bool {
        self.is(ObjectFlags::LIGHT_SOURCE | ObjectFlags::LIT)
    }

    /// Whether `word` is one of this object's nouns.
    pub fn has_noun(&self, word: &str) -> bool {
        self.synonyms.iter().any(|s| s == word)
    }

    /// Whether every adjective in `words` describes this object.
    pub fn has_adjectives(&self, words: &[String]) -> bool {
        words.iter().all(|w| self.adjectives.contains(w))
    }

    /// EXAMINE text, with any conditional variant applied.
    pub fn describe<'a>(&'a self, world: &World) -> &'a str {
        ConditionalText::select(&self.texts, &self.description, world)
    }

    /// The name with an indefinite article.
    pub fn a_name(&self) -> String {
        let article = match self.name.chars().next() {
            Some(c) if "aeiou".contains(c.to_ascii_lowercase()) => "an",
            _ => "a",
        };
        format!("{article} {}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_world;

    #[test]
    fn treasures_are_worth_points() {
        let world = demo_world().unwrap();
        assert!(world.object_by_key("painting").unwrap().is_treasure());
        assert!(!world.object_by_key("leaflet").unwrap().is_treasure());
    }

    #[test]
    fn nouns_and_adjectives_match() {
        let world = demo_world().unwrap();
        let mailbox = world.object_by_key("mailbox").unwrap();
        assert!(mailbox.has_noun("mailbox"));
        assert!(mailbox.has_noun("box"));
        assert!(mailbox.has_adjectives(&["small".to_string()]));
        assert!(!mailbox.has_adjectives(&["brass".to_string()]));
    }

    #[test]
    fn articles() {
        let world = demo_world().unwrap();
        assert_eq!(world.object_by_key("egg").unwrap().a_name(), "a jewel-encrusted egg");
        assert_eq!(world.object_by_key("leaflet").unwrap().a_name(), "a leaflet");
        assert_eq!(world.object_by_key("axe").unwrap().a_name(), "an axe");
    }

    #[test]
    fn closed_container_hides_contents() {
        let world = demo_world().unwrap();
        let mailbox = world.object_by_key("mailbox").unwrap();
        assert!(!mailbox.shows_contents());
        let case = world.object_by_key("trophy-case").unwrap();
        assert!(case.shows_contents());
    }

    #[test]
    fn location_serializes_tagged() {
        let json = serde_json::to_string(&Location::Room(RoomId(2))).unwrap();
        assert_eq!(json, r#"{"in":"room","id":2}"#);
        let player: Location = serde_json::from_str(r#"{"in":"player"}"#).unwrap();
        assert_eq!(player, Location::Player);
    }
}
