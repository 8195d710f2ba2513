//! Closed flag sets for objects, rooms, and global game state.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Capabilities and transient state of a game object.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ObjectFlags: u32 {
        /// Can be picked up.
        const TAKEABLE = 1 << 0;
        /// Can hold other objects.
        const CONTAINER = 1 << 1;
        /// Container is currently open.
        const OPEN = 1 << 2;
        /// Can be opened and closed by the player.
        const OPENABLE = 1 << 3;
        /// Contents are visible even when closed.
        const TRANSPARENT = 1 << 4;
        /// Gives light when lit.
        const LIGHT_SOURCE = 1 << 5;
        /// Currently lit (the "on" capability of a light source).
        const LIT = 1 << 6;
        /// Animated by a non-player character.
        const ACTOR = 1 << 7;
        /// Fixed in place.
        const FIXED = 1 << 8;
        /// Has text that can be read.
        const READABLE = 1 << 9;
        /// Usable as a weapon.
        const WEAPON = 1 << 10;
        /// Has been handled by the player. Cleared on death.
        const TOUCHED = 1 << 11;
        /// Not visible to the parser until revealed.
        const INVISIBLE = 1 << 12;
        /// Light source whose fuel is exhausted.
        const BURNED_OUT = 1 << 13;
        /// Objects sit on it rather than in it.
        const SURFACE = 1 << 14;
    }
}

bitflags! {
    /// Static and dynamic properties of a room.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RoomFlags: u16 {
        /// Naturally lit.
        const LIT = 1 << 0;
        /// Valid landing point; treasures may be scattered here.
        const LAND = 1 << 1;
        /// Above ground; non-treasures may be scattered here.
        const ABOVE_GROUND = 1 << 2;
        /// Holy ground the thief will not enter.
        const SACRED = 1 << 3;
        /// Part of the thief's roaming range.
        const UNDERGROUND = 1 << 4;
    }
}

/// Quest milestones and other boolean game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameFlag {
    /// The troll no longer blocks the passages.
    TrollDefeated,
    /// The thief has been killed.
    ThiefDead,
    /// The rug in the living room has been moved aside.
    RugMoved,
    /// The trap door is open.
    TrapDoorOpen,
    /// The kitchen window is open.
    KitchenWindowOpen,
    /// The grating in the clearing is open.
    GrateOpen,
    /// The player is a spirit wandering after death.
    Ghost,
}

impl fmt::Display for GameFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TrollDefeated => "troll-defeated",
            Self::ThiefDead => "thief-dead",
            Self::RugMoved => "rug-moved",
            Self::TrapDoorOpen => "trap-door-open",
            Self::KitchenWindowOpen => "kitchen-window-open",
            Self::GrateOpen => "grate-open",
            Self::Ghost => "ghost",
        };
        f.write_str(name)
    }
}

/// Named numeric game variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    /// Carrying capacity currently allowed to the player.
    LoadAllowed,
    /// Wounds the player has taken and not yet healed.
    Wounds,
    /// Number of objects the thief has stolen.
    ThiefLootCount,
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LoadAllowed => "load-allowed",
            Self::Wounds => "wounds",
            Self::ThiefLootCount => "thief-loot-count",
        };
        f.write_str(name)
    }
}
