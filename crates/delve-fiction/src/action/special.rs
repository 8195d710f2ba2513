//! Per-object special behavior.
//!
//! The rug that hides a trap door, the window that lets you into the house:
//! objects whose verbs do more than the generic handler. Reactions are plain
//! data keyed by verb and object, built once when a session starts.

use std::collections::HashMap;

use delve_core::{Condition, GameFlag, ObjectFlags, ObjectId, World};
use tracing::debug;

use super::{ActionContext, ActionOutcome, StateChange};
use crate::error::FictionResult;
use crate::parser::Verb;

/// Something that happens when a verb is used on a particular object.
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// Refuse the action with a message while the condition holds.
    Refuse {
        /// When to refuse.
        when: Condition,
        /// What to say.
        message: String,
    },
    /// Make a hidden object visible.
    Reveal(ObjectId),
    /// Set a game flag.
    SetFlag(GameFlag),
    /// Clear a game flag.
    ClearFlag(GameFlag),
    /// Replace the handler's message.
    Describe(String),
}

/// Special reactions keyed by verb and object.
#[derive(Debug, Clone, Default)]
pub struct SpecialRegistry {
    reactions: HashMap<(Verb, ObjectId), Vec<Reaction>>,
}

impl SpecialRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The classic reactions, for whichever of their objects the world has.
    pub fn for_world(world: &World) -> Self {
        let mut registry = Self::new();
        let id = |key: &str| world.object_by_key(key).map(|o| o.id);

        if let Some(rug) = id("rug") {
            registry.add(
                Verb::Move,
                rug,
                Reaction::Refuse {
                    when: Condition::flag(GameFlag::RugMoved),
                    message: "Having moved the carpet previously, you find it impossible to move it again."
                        .to_string(),
                },
            );
            registry.add(Verb::Move, rug, Reaction::SetFlag(GameFlag::RugMoved));
            if let Some(trap_door) = id("trap-door") {
                registry.add(Verb::Move, rug, Reaction::Reveal(trap_door));
            }
            registry.add(
                Verb::Move,
                rug,
                Reaction::Describe(
                    "With a great effort, the rug is moved to one side of the room, revealing the \
                     dusty cover of a closed trap door."
                        .to_string(),
                ),
            );
        }

        if let Some(trap_door) = id("trap-door") {
            registry.add(Verb::Open, trap_door, Reaction::SetFlag(GameFlag::TrapDoorOpen));
            registry.add(
                Verb::Open,
                trap_door,
                Reaction::Describe(
                    "The door reluctantly opens to reveal a rickety staircase descending into darkness."
                        .to_string(),
                ),
            );
            registry.add(Verb::Close, trap_door, Reaction::ClearFlag(GameFlag::TrapDoorOpen));
            registry.add(
                Verb::Close,
                trap_door,
                Reaction::Describe("The door swings shut and closes.".to_string()),
            );
        }

        if let Some(window) = id("window") {
            registry.add(Verb::Open, window, Reaction::SetFlag(GameFlag::KitchenWindowOpen));
            registry.add(
                Verb::Open,
                window,
                Reaction::Describe(
                    "With great effort, you open the window far enough to allow entry.".to_string(),
                ),
            );
            registry.add(Verb::Close, window, Reaction::ClearFlag(GameFlag::KitchenWindowOpen));
            registry.add(
                Verb::Close,
                window,
                Reaction::Describe("The window closes (more easily than it opened).".to_string()),
            );
        }

        if let Some(grating) = id("grating") {
            registry.add(Verb::Open, grating, Reaction::SetFlag(GameFlag::GrateOpen));
            registry.add(Verb::Close, grating, Reaction::ClearFlag(GameFlag::GrateOpen));
        }

        if let Some(troll) = id("troll") {
            registry.add(
                Verb::Take,
                troll,
                Reaction::Refuse {
                    when: Condition::Always,
                    message: "The troll spits in your face, grunting \"Better luck next time\" in a \
                              rather barbarous accent."
                        .to_string(),
                },
            );
        }

        registry
    }

    /// Add a reaction. Reactions for the same verb and object run in the
    /// order added.
    pub fn add(&mut self, verb: Verb, object: ObjectId, reaction: Reaction) {
        self.reactions.entry((verb, object)).or_default().push(reaction);
    }

    /// The reactions for a verb on an object.
    pub fn reactions(&self, verb: Verb, object: ObjectId) -> &[Reaction] {
        self.reactions
            .get(&(verb, object))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the verb does anything special to the object.
    pub fn has(&self, verb: Verb, object: ObjectId) -> bool {
        !self.reactions(verb, object).is_empty()
    }

    /// The first refusal whose condition currently holds.
    pub fn refusal(&self, world: &World, verb: Verb, object: ObjectId) -> Option<&str> {
        self.reactions(verb, object).iter().find_map(|r| match r {
            Reaction::Refuse { when, message } if when.evaluate(world) => Some(message.as_str()),
            _ => None,
        })
    }

    /// Apply the non-refusal reactions after the handler succeeded.
    pub fn apply(
        &self,
        ctx: &mut ActionContext<'_>,
        verb: Verb,
        object: ObjectId,
        outcome: &mut ActionOutcome,
    ) -> FictionResult<()> {
        for reaction in self.reactions(verb, object) {
            match reaction {
                Reaction::Refuse { .. } => {}
                Reaction::Reveal(hidden) => {
                    ctx.clear_flags(*hidden, ObjectFlags::INVISIBLE, outcome)?;
                }
                Reaction::SetFlag(flag) => {
                    ctx.world_mut().state.set_flag(*flag);
                    outcome.changes.push(StateChange::GameFlagSet { flag: *flag });
                }
                Reaction::ClearFlag(flag) => {
                    ctx.world_mut().state.clear_flag(*flag);
                    outcome.changes.push(StateChange::GameFlagCleared { flag: *flag });
                }
                Reaction::Describe(text) => outcome.message = text.clone(),
            }
        }
        if self.has(verb, object) {
            debug!(verb = %verb, object = %object, "special reactions applied");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::parser::Command;

    #[test]
    fn moving_the_rug_reveals_the_trap_door_once() {
        let mut sim = sim_in("living-room", &[]);
        let rug = id(&sim, "rug");
        let trap_door = id(&sim, "trap-door");

        let outcome = act(&mut sim, &Command::new(Verb::Move).with_direct(rug));
        assert!(outcome.success);
        assert!(outcome.message.starts_with("With a great effort, the rug is moved"));
        assert!(sim.world().state.has_flag(GameFlag::RugMoved));
        assert!(!sim.world().object(trap_door).unwrap().is(ObjectFlags::INVISIBLE));
        assert!(outcome.changes.contains(&StateChange::GameFlagSet {
            flag: GameFlag::RugMoved
        }));

        let again = act(&mut sim, &Command::new(Verb::Move).with_direct(rug));
        assert!(!again.success);
        assert!(again.message.starts_with("Having moved the carpet previously"));
        assert!(again.changes.is_empty());
    }

    #[test]
    fn opening_the_window_opens_the_way_in() {
        let mut sim = sim_in("behind-house", &[]);
        let window = id(&sim, "window");
        let outcome = act(&mut sim, &Command::new(Verb::Open).with_direct(window));
        assert_eq!(
            outcome.message,
            "With great effort, you open the window far enough to allow entry."
        );
        assert!(sim.world().state.has_flag(GameFlag::KitchenWindowOpen));

        let outcome = act(&mut sim, &Command::new(Verb::Close).with_direct(window));
        assert!(outcome.success);
        assert!(!sim.world().state.has_flag(GameFlag::KitchenWindowOpen));
    }

    #[test]
    fn refusals_change_nothing() {
        let mut sim = sim_in("troll-room", &[]);
        let troll = id(&sim, "troll");
        let outcome = act(&mut sim, &Command::new(Verb::Take).with_direct(troll));
        assert!(!outcome.success);
        assert!(outcome.message.starts_with("The troll spits in your face"));
        assert!(!sim.world().player.has_item(troll));
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let registry = SpecialRegistry::new();
        assert!(!registry.has(Verb::Move, ObjectId(0)));
        assert!(registry.reactions(Verb::Move, ObjectId(0)).is_empty());
    }
}
