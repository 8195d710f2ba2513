//! Declarative predicates over the world model.
//!
//! Exit gates and conditional descriptions are plain data evaluated against an
//! explicit [`World`] reference, so they serialize with the content tables.

use serde::{Deserialize, Serialize};

use crate::flags::{GameFlag, ObjectFlags, Variable};
use crate::object::Location;
use crate::world::World;

/// A condition that can be evaluated against world state.
///
/// Objects are referred to by content key, the same way the records do.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "if", rename_all = "snake_case")]
pub enum Condition {
    /// Always true.
    #[default]
    Always,
    /// A game flag is set.
    FlagSet {
        /// The flag to test.
        flag: GameFlag,
    },
    /// A game flag is not set.
    FlagClear {
        /// The flag to test.
        flag: GameFlag,
    },
    /// A variable has exactly this value.
    VariableEquals {
        /// The variable to test.
        variable: Variable,
        /// Expected value.
        value: i64,
    },
    /// A variable is at least this value.
    VariableAtLeast {
        /// The variable to test.
        variable: Variable,
        /// Minimum value.
        value: i64,
    },
    /// An object has every one of the given flags.
    ObjectHas {
        /// Object key.
        object: String,
        /// Flags that must all be present.
        flags: ObjectFlags,
    },
    /// The player is holding an object.
    PlayerHolds {
        /// Object key.
        object: String,
    },
    /// Logical NOT.
    Not {
        /// The negated condition.
        condition: Box<Condition>,
    },
    /// Logical AND.
    And {
        /// Conditions that must all hold.
        all: Vec<Condition>,
    },
    /// Logical OR.
    Or {
        /// Conditions of which one must hold.
        any: Vec<Condition>,
    },
}

impl Condition {
    /// Shorthand for [`Condition::FlagSet`].
    pub fn flag(flag: GameFlag) -> Self {
        Self::FlagSet { flag }
    }

    /// Shorthand for [`Condition::FlagClear`].
    pub fn not_flag(flag: GameFlag) -> Self {
        Self::FlagClear { flag }
    }

    /// Shorthand for [`Condition::And`].
    pub fn all(all: Vec<Condition>) -> Self {
        Self::And { all }
    }

    /// Shorthand for [`Condition::Or`].
    pub fn any(any: Vec<Condition>) -> Self {
        Self::Or { any }
    }

    /// Shorthand for [`Condition::Not`].
    pub fn negate(condition: Condition) -> Self {
        Self::Not {
            condition: Box::new(condition),
        }
    }

    /// Evaluate the condition against the current state.
    ///
    /// A reference to an unknown object key evaluates to `false`.
    pub fn evaluate(&self, world: &World) -> bool {
        match self {
            Condition::Always => true,
            Condition::FlagSet { flag } => world.state.has_flag(*flag),
            Condition::FlagClear { flag } => !world.state.has_flag(*flag),
            Condition::VariableEquals { variable, value } => world.state.variable(*variable) == *value,
            Condition::VariableAtLeast { variable, value } => world.state.variable(*variable) >= *value,
            Condition::ObjectHas { object, flags } => world
                .object_by_key(object)
                .is_some_and(|o| o.flags.contains(*flags)),
            Condition::PlayerHolds { object } => world
                .object_by_key(object)
                .is_some_and(|o| o.location == Location::Player),
            Condition::Not { condition } => !condition.evaluate(world),
            Condition::And { all } => all.iter().all(|c| c.evaluate(world)),
            Condition::Or { any } => any.iter().any(|c| c.evaluate(world)),
        }
    }
}
