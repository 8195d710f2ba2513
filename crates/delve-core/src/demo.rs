//! A small classic map: the white house, its forest, and the cellar below.
//!
//! Used by tests and by the CLI.

use crate::condition::Condition;
use crate::direction::Direction::{self, *};
use crate::error::WorldResult;
use crate::flags::{GameFlag, ObjectFlags as O, RoomFlags as R};
use crate::records::{ExitRecord, ObjectRecord, Placement, RoomRecord, WorldRecords};
use crate::room::ConditionalText;
use crate::world::World;

/// Key of the room where the player wakes after dying.
pub const RESPAWN_ROOM: &str = "forest";
/// Key of the room a ghost is sent to.
pub const GHOST_ROOM: &str = "land-of-the-dead";
/// Key of the object treasures are scored in.
pub const TROPHY_CASE: &str = "trophy-case";

fn room(key: &str, name: &str, flags: R, description: &str, exits: Vec<ExitRecord>) -> RoomRecord {
    RoomRecord {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        short_description: None,
        flags,
        exits,
        texts: Vec::new(),
    }
}

fn to(direction: Direction, key: &str) -> ExitRecord {
    ExitRecord::to(direction, key)
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

struct Item<'a> {
    key: &'a str,
    name: &'a str,
    nouns: &'a [&'a str],
    adjectives: &'a [&'a str],
    flags: O,
    size: u32,
    description: &'a str,
    location: Placement,
}

impl Item<'_> {
    fn record(self) -> ObjectRecord {
        ObjectRecord {
            key: self.key.to_string(),
            name: self.name.to_string(),
            synonyms: words(self.nouns),
            adjectives: words(self.adjectives),
            description: self.description.to_string(),
            location: self.location,
            flags: self.flags,
            size: self.size,
            ..Default::default()
        }
    }
}

fn in_room(key: &str) -> Placement {
    Placement::Room(key.to_string())
}

fn rooms() -> Vec<RoomRecord> {
    let overland = R::LIT | R::LAND | R::ABOVE_GROUND;
    let window_open = Condition::flag(GameFlag::KitchenWindowOpen);
    let trap_open = Condition::flag(GameFlag::TrapDoorOpen);
    let grate_open = Condition::flag(GameFlag::GrateOpen);
    let troll_gone = Condition::flag(GameFlag::TrollDefeated);

    let mut behind = room(
        "behind-house",
        "Behind House",
        overland,
        "You are behind the white house. A path leads into the forest to the east. \
         In one corner of the house there is a small window which is slightly ajar.",
        vec![
            to(North, "north-of-house"),
            to(South, "south-of-house"),
            to(East, "clearing"),
            ExitRecord::gated(West, "kitchen", window_open.clone(), "The kitchen window is closed."),
            ExitRecord::gated(In, "kitchen", window_open.clone(), "The kitchen window is closed."),
        ],
    );
    behind.texts.push(ConditionalText {
        condition: window_open.clone(),
        text: "You are behind the white house. A path leads into the forest to the east. \
               In one corner of the house there is a small window which is open."
            .to_string(),
    });

    let mut living = room(
        "living-room",
        "Living Room",
        R::LIT | R::ABOVE_GROUND,
        "You are in the living room. There is a doorway to the east, a wooden door with \
         strange gothic lettering to the west, which appears to be nailed shut, a trophy \
         case, and a large oriental rug in the center of the room.",
        vec![
            to(East, "kitchen"),
            ExitRecord::blocked(West, "The door is nailed shut."),
            ExitRecord::gated(Down, "cellar", trap_open.clone(), "The trap door is closed."),
        ],
    );
    living.short_description = Some("You are in the living room.".to_string());
    living.texts = vec![
        ConditionalText {
            condition: Condition::all(vec![Condition::flag(GameFlag::RugMoved), trap_open.clone()]),
            text: "You are in the living room. There is a doorway to the east, a wooden door \
                   to the west, a trophy case, and a rug lying beside an open trap door."
                .to_string(),
        },
        ConditionalText {
            condition: Condition::flag(GameFlag::RugMoved),
            text: "You are in the living room. There is a doorway to the east, a wooden door \
                   to the west, a trophy case, and a closed trap door at your feet."
                .to_string(),
        },
    ];

    vec![
        room(
            "west-of-house",
            "West of House",
            overland,
            "You are standing in an open field west of a white house, with a boarded front door.",
            vec![
                to(North, "north-of-house"),
                to(South, "south-of-house"),
                to(West, "forest"),
                ExitRecord::blocked(East, "The door is boarded and you can't remove the boards."),
            ],
        ),
        room(
            "north-of-house",
            "North of House",
            overland,
            "You are facing the north side of a white house. There is no door here, and all \
             the windows are boarded up. To the north a narrow path winds through the trees.",
            vec![
                to(West, "west-of-house"),
                to(East, "behind-house"),
                to(North, "forest-path"),
                ExitRecord::blocked(South, "The windows are all boarded."),
            ],
        ),
        room(
            "south-of-house",
            "South of House",
            overland,
            "You are facing the south side of a white house. There is no door here, and all \
             the windows are boarded.",
            vec![
                to(West, "west-of-house"),
                to(East, "behind-house"),
                to(South, "forest"),
                ExitRecord::blocked(North, "The windows are all boarded."),
            ],
        ),
        behind,
        room(
            "kitchen",
            "Kitchen",
            R::LIT | R::ABOVE_GROUND,
            "You are in the kitchen of the white house. A table seems to have been used \
             recently for the preparation of food. A passage leads to the west and a dark \
             staircase can be seen leading upward. To the east is a small window which is open.",
            vec![
                ExitRecord::gated(East, "behind-house", window_open.clone(), "The window is closed."),
                ExitRecord::gated(Out, "behind-house", window_open, "The window is closed."),
                to(West, "living-room"),
                to(Up, "attic"),
            ],
        ),
        room(
            "attic",
            "Attic",
            R::ABOVE_GROUND,
            "This is the attic. The only exit is a stairway leading down.",
            vec![to(Down, "kitchen")],
        ),
        living,
        room(
            "cellar",
            "Cellar",
            R::UNDERGROUND,
            "You are in a dark and damp cellar with a narrow passageway leading north, and a \
             crawlway to the south. Above you is a trap door.",
            vec![
                ExitRecord::gated(Up, "living-room", trap_open, "The trap door is closed."),
                to(North, "troll-room"),
                to(South, "gallery"),
            ],
        ),
        room(
            "troll-room",
            "The Troll Room",
            R::UNDERGROUND,
            "This is a small room with passages to the east and south. Bloodstains and deep \
             scratches (perhaps made by an axe) mar the walls.",
            vec![
                to(South, "cellar"),
                ExitRecord::gated(
                    East,
                    "east-west-passage",
                    troll_gone,
                    "The troll fends you off with a menacing gesture.",
                ),
            ],
        ),
        room(
            "east-west-passage",
            "East-West Passage",
            R::UNDERGROUND,
            "This is a narrow east-west passageway.",
            vec![to(West, "troll-room"), to(East, "treasure-room")],
        ),
        room(
            "treasure-room",
            "Treasure Room",
            R::UNDERGROUND,
            "This is a large room, whose east wall is solid granite. A number of discarded \
             bags, which crumble at your touch, are scattered about on the floor.",
            vec![to(West, "east-west-passage")],
        ),
        room(
            "gallery",
            "Gallery",
            R::LIT | R::UNDERGROUND,
            "This is an art gallery. Most of the paintings have been stolen by vandals with \
             exceptional taste. The vandals left through either the north or west exits.",
            vec![to(North, "cellar"), to(West, "grating-room")],
        ),
        room(
            "grating-room",
            "Grating Room",
            R::UNDERGROUND,
            "You are in a small room near the maze. There are twisty passages in the immediate \
             vicinity. Above you is a grating.",
            vec![
                ExitRecord::gated(Up, "clearing", grate_open.clone(), "The grating is closed."),
                to(East, "gallery"),
            ],
        ),
        room(
            "forest",
            "Forest",
            overland,
            "This is a forest, with trees in all directions. To the east, there appears to be \
             sunlight.",
            vec![
                to(East, "west-of-house"),
                to(North, "south-of-house"),
                to(West, "clearing"),
            ],
        ),
        room(
            "forest-path",
            "Forest Path",
            overland,
            "This is a path winding through a dimly lit forest. The path heads north-south here.",
            vec![to(South, "north-of-house"), to(North, "clearing")],
        ),
        room(
            "clearing",
            "Clearing",
            overland,
            "You are in a clearing, with a forest surrounding you on all sides. A path leads \
             south. In the middle of the clearing is a metal grating.",
            vec![
                to(South, "forest-path"),
                to(West, "behind-house"),
                to(East, "forest"),
                ExitRecord::gated(Down, "grating-room", grate_open, "The grating is closed."),
            ],
        ),
        room(
            "land-of-the-dead",
            "Land of the Dead",
            R::SACRED,
            "You have entered the Land of the Living Dead. Thousands of lost souls can be heard \
             weeping and moaning. Everything is dim and shadowy.",
            vec![ExitRecord::blocked(Up, "Some invisible force prevents you from leaving.")],
        ),
    ]
}

fn objects() -> Vec<ObjectRecord> {
    let takeable = O::TAKEABLE;
    let scenery = O::FIXED;

    let mut mailbox = Item {
        key: "mailbox",
        name: "small mailbox",
        nouns: &["mailbox", "box"],
        adjectives: &["small"],
        flags: O::CONTAINER | O::OPENABLE | scenery,
        size: 50,
        description: "It's a small mailbox.",
        location: in_room("west-of-house"),
    }
    .record();
    mailbox.capacity = Some(10);

    let mut leaflet = Item {
        key: "leaflet",
        name: "leaflet",
        nouns: &["leaflet", "paper", "booklet"],
        adjectives: &[],
        flags: takeable | O::READABLE,
        size: 2,
        description: "A small leaflet with printing on it.",
        location: Placement::Object("mailbox".to_string()),
    }
    .record();
    leaflet.text = Some(
        "\"WELCOME TO DELVE!\n\nDelve is a game of adventure, danger, and low cunning. In it \
         you will explore some of the most amazing territory ever seen by mortals. No \
         computer should be without one!\""
            .to_string(),
    );

    let window = Item {
        key: "window",
        name: "kitchen window",
        nouns: &["window"],
        adjectives: &["kitchen", "small"],
        flags: scenery | O::OPENABLE,
        size: 0,
        description: "The window is slightly ajar, but not enough to allow entry.",
        location: in_room("behind-house"),
    }
    .record();

    let mut sack = Item {
        key: "sack",
        name: "brown sack",
        nouns: &["sack", "bag"],
        adjectives: &["brown", "elongated"],
        flags: takeable | O::CONTAINER | O::OPENABLE,
        size: 3,
        description: "An elongated brown sack, smelling of hot peppers.",
        location: in_room("kitchen"),
    }
    .record();
    sack.capacity = Some(9);
    sack.initial_description =
        Some("On the table is an elongated brown sack, smelling of hot peppers.".to_string());

    let garlic = Item {
        key: "garlic",
        name: "clove of garlic",
        nouns: &["garlic", "clove"],
        adjectives: &[],
        flags: takeable,
        size: 2,
        description: "It's a clove of garlic.",
        location: Placement::Object("sack".to_string()),
    }
    .record();

    let rope = Item {
        key: "rope",
        name: "rope",
        nouns: &["rope", "coil"],
        adjectives: &["large"],
        flags: takeable,
        size: 10,
        description: "It's a large coil of rope.",
        location: in_room("attic"),
    }
    .record();

    let knife = Item {
        key: "knife",
        name: "nasty knife",
        nouns: &["knife", "blade"],
        adjectives: &["nasty", "rusty"],
        flags: takeable | O::WEAPON,
        size: 5,
        description: "It's a nasty-looking knife.",
        location: in_room("attic"),
    }
    .record();

    let mut case = Item {
        key: TROPHY_CASE,
        name: "trophy case",
        nouns: &["case"],
        adjectives: &["trophy", "glass"],
        flags: O::CONTAINER | O::OPENABLE | O::TRANSPARENT | scenery,
        size: 0,
        description: "It's a glass-fronted trophy case, built into the wall.",
        location: in_room("living-room"),
    }
    .record();
    case.capacity = Some(10000);

    let mut lamp = Item {
        key: "lamp",
        name: "brass lantern",
        nouns: &["lamp", "lantern", "light"],
        adjectives: &["brass"],
        flags: takeable | O::LIGHT_SOURCE,
        size: 15,
        description: "It's a battery-powered brass lantern.",
        location: in_room("living-room"),
    }
    .record();
    lamp.initial_description = Some("A battery-powered brass lantern is on the trophy case.".to_string());
    lamp.texts.push(ConditionalText {
        condition: Condition::ObjectHas {
            object: "lamp".to_string(),
            flags: O::BURNED_OUT,
        },
        text: "The lamp has burned out.".to_string(),
    });

    let mut sword = Item {
        key: "sword",
        name: "elvish sword",
        nouns: &["sword", "blade"],
        adjectives: &["elvish", "old", "antique"],
        flags: takeable | O::WEAPON,
        size: 30,
        description: "It's an elvish sword of great antiquity.",
        location: in_room("living-room"),
    }
    .record();
    sword.initial_description =
        Some("Above the trophy case hangs an elvish sword of great antiquity.".to_string());

    let rug = Item {
        key: "rug",
        name: "oriental rug",
        nouns: &["rug", "carpet"],
        adjectives: &["large", "oriental"],
        flags: scenery,
        size: 0,
        description: "The rug is extremely heavy and cannot be carried.",
        location: in_room("living-room"),
    }
    .record();

    let trap_door = Item {
        key: "trap-door",
        name: "trap door",
        nouns: &["door", "trapdoor"],
        adjectives: &["trap", "dusty"],
        flags: scenery | O::OPENABLE | O::INVISIBLE,
        size: 0,
        description: "It's a dusty trap door set into the floor.",
        location: in_room("living-room"),
    }
    .record();

    let troll = Item {
        key: "troll",
        name: "troll",
        nouns: &["troll"],
        adjectives: &["nasty"],
        flags: O::ACTOR | scenery,
        size: 100,
        description: "A nasty-looking troll, brandishing a bloody axe, blocks all passages out of the room.",
        location: in_room("troll-room"),
    }
    .record();

    let axe = Item {
        key: "axe",
        name: "axe",
        nouns: &["axe"],
        adjectives: &["bloody"],
        flags: takeable | O::WEAPON,
        size: 25,
        description: "It's a bloody axe.",
        location: Placement::Nowhere,
    }
    .record();

    let mut painting = Item {
        key: "painting",
        name: "painting",
        nouns: &["painting", "art"],
        adjectives: &["beautiful"],
        flags: takeable,
        size: 15,
        description: "It's a painting by a neglected genius.",
        location: in_room("gallery"),
    }
    .record();
    painting.value = 4;
    painting.case_value = 6;

    let mut chalice = Item {
        key: "chalice",
        name: "silver chalice",
        nouns: &["chalice", "cup"],
        adjectives: &["silver"],
        flags: takeable,
        size: 10,
        description: "It's an intricately engraved silver chalice.",
        location: in_room("treasure-room"),
    }
    .record();
    chalice.value = 10;
    chalice.case_value = 5;

    let thief = Item {
        key: "thief",
        name: "thief",
        nouns: &["thief", "robber", "man"],
        adjectives: &["seedy", "suspicious"],
        flags: O::ACTOR | scenery | O::CONTAINER,
        size: 100,
        description: "There is a suspicious-looking individual, holding a large bag, leaning \
                      against one wall. He is armed with a deadly stiletto.",
        location: in_room("treasure-room"),
    }
    .record();

    let mut egg = Item {
        key: "egg",
        name: "jewel-encrusted egg",
        nouns: &["egg"],
        adjectives: &["jeweled", "encrusted"],
        flags: takeable,
        size: 5,
        description: "It's a large egg, covered with precious jewels.",
        location: in_room("forest-path"),
    }
    .record();
    egg.value = 5;
    egg.case_value = 5;

    let grating = Item {
        key: "grating",
        name: "grating",
        nouns: &["grating", "grate"],
        adjectives: &["metal"],
        flags: scenery | O::OPENABLE,
        size: 0,
        description: "It's a sturdy metal grating, set into the ground.",
        location: in_room("clearing"),
    }
    .record();

    let mut coins = Item {
        key: "coins",
        name: "bag of coins",
        nouns: &["coins", "bag"],
        adjectives: &["leather"],
        flags: takeable,
        size: 15,
        description: "It's an old leather bag, bulging with coins.",
        location: in_room("grating-room"),
    }
    .record();
    coins.value = 10;
    coins.case_value = 5;

    vec![
        mailbox, leaflet, window, sack, garlic, rope, knife, case, lamp, sword, rug, trap_door,
        troll, axe, painting, chalice, thief, egg, grating, coins,
    ]
}

/// The demo content tables.
pub fn demo_records() -> WorldRecords {
    WorldRecords {
        name: "Delve".to_string(),
        start: "west-of-house".to_string(),
        rooms: rooms(),
        objects: objects(),
    }
}

/// The demo world with the default carrying capacity.
pub fn demo_world() -> WorldResult<World> {
    World::from_records(demo_records())
}
