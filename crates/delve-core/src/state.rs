//! Global game state: position, score, counters, milestones.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::flags::{GameFlag, Variable};
use crate::id::RoomId;

/// Everything about the game that is not a room or an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Where the player is.
    pub current_room: RoomId,
    /// Current score. May go negative after deaths.
    pub score: i32,
    /// Highest reachable score.
    pub max_score: i32,
    /// Turns consumed so far.
    pub moves: u32,
    /// Milestones reached.
    pub flags: BTreeSet<GameFlag>,
    /// Named counters.
    pub variables: BTreeMap<Variable, i64>,
    /// How many times the player has died.
    pub deaths: u32,
    /// Terminal state: no further mutating commands are accepted.
    pub game_over: bool,
}

impl GlobalState {
    /// Fresh state with the player in `start`.
    pub fn new(start: RoomId) -> Self {
        Self {
            current_room: start,
            score: 0,
            max_score: 0,
            moves: 0,
            flags: BTreeSet::new(),
            variables: BTreeMap::new(),
            deaths: 0,
            game_over: false,
        }
    }

    /// Check a milestone.
    pub fn has_flag(&self, flag: GameFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Set a milestone. Returns `true` if it was not set before.
    pub fn set_flag(&mut self, flag: GameFlag) -> bool {
        self.flags.insert(flag)
    }

    /// Clear a milestone.
    pub fn clear_flag(&mut self, flag: GameFlag) -> bool {
        self.flags.remove(&flag)
    }

    /// Read a variable. Unset variables read as zero.
    pub fn variable(&self, variable: Variable) -> i64 {
        self.variables.get(&variable).copied().unwrap_or(0)
    }

    /// Set a variable.
    pub fn set_variable(&mut self, variable: Variable, value: i64) {
        self.variables.insert(variable, value);
    }

    /// Add `delta` to a variable and return the new value.
    pub fn adjust_variable(&mut self, variable: Variable, delta: i64) -> i64 {
        let value = self.variables.entry(variable).or_insert(0);
        *value += delta;
        *value
    }
}
