//! Verb handlers and their dispatch.
//!
//! Each verb has one handler. A handler either succeeds, with one canonical
//! message and a record of what it changed, or refuses with a specific
//! message and changes nothing. World invariant violations are logged and
//! reported to the player as a generic failure.

mod actors;
mod meta;
mod movement;
mod objects;
mod special;

use std::collections::HashMap;

use delve_core::{GameFlag, Location, ObjectFlags, ObjectId, RoomId, World};
use delve_simulation::{DaemonId, DeathOutcome, DeathReport, Simulation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::FictionResult;
use crate::narrator::Narrator;
use crate::parser::{Command, Verb};

pub use special::{Reaction, SpecialRegistry};

/// Shown when a handler trips over broken world data.
pub const GENERIC_FAILURE: &str = "Something seems to be wrong with the world here.";

/// A single mutation made by a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateChange {
    /// An object changed location.
    Moved {
        /// The object.
        object: ObjectId,
        /// Where it was.
        from: Location,
        /// Where it is now.
        to: Location,
    },
    /// Capability flags were set on an object.
    ObjectFlagSet {
        /// The object.
        object: ObjectId,
        /// The flags set.
        flags: ObjectFlags,
    },
    /// Capability flags were cleared on an object.
    ObjectFlagCleared {
        /// The object.
        object: ObjectId,
        /// The flags cleared.
        flags: ObjectFlags,
    },
    /// A milestone was reached.
    GameFlagSet {
        /// The flag.
        flag: GameFlag,
    },
    /// A milestone was undone.
    GameFlagCleared {
        /// The flag.
        flag: GameFlag,
    },
    /// The score changed.
    ScoreChanged {
        /// Points added (negative for points lost).
        delta: i32,
    },
    /// The player walked to another room.
    PlayerMoved {
        /// Room left.
        from: RoomId,
        /// Room entered.
        to: RoomId,
    },
    /// A daemon was started.
    DaemonArmed {
        /// Which daemon.
        daemon: DaemonId,
    },
    /// The player died.
    PlayerDied {
        /// How.
        cause: String,
    },
}

/// Result of running one handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Whether the action happened.
    pub success: bool,
    /// Text for the player.
    pub message: String,
    /// What changed, in order. Empty on failure.
    pub changes: Vec<StateChange>,
}

impl ActionOutcome {
    /// A successful action.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            changes: Vec::new(),
        }
    }

    /// A refused action.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            changes: Vec::new(),
        }
    }

    /// Record a change.
    pub fn with_change(mut self, change: StateChange) -> Self {
        self.changes.push(change);
        self
    }
}

/// Everything a handler may touch.
pub struct ActionContext<'a> {
    /// The simulation, which owns the world and the random source.
    pub sim: &'a mut Simulation,
    /// Per-object special reactions.
    pub specials: &'a SpecialRegistry,
    /// The narrator, for descriptions and verbosity changes.
    pub narrator: &'a mut Narrator,
    /// Set by QUIT.
    pub quit: bool,
}

impl ActionContext<'_> {
    /// The world.
    pub fn world(&self) -> &World {
        self.sim.world()
    }

    /// The world, mutably.
    pub fn world_mut(&mut self) -> &mut World {
        self.sim.world_mut()
    }

    /// Display name of an object.
    pub fn name(&self, id: ObjectId) -> FictionResult<String> {
        Ok(self.world().object(id)?.name.clone())
    }

    /// Set flags on an object, recording the change.
    pub fn set_flags(&mut self, id: ObjectId, flags: ObjectFlags, outcome: &mut ActionOutcome) -> FictionResult<()> {
        self.world_mut().object_mut(id)?.flags.insert(flags);
        outcome.changes.push(StateChange::ObjectFlagSet { object: id, flags });
        Ok(())
    }

    /// Clear flags on an object, recording the change.
    pub fn clear_flags(&mut self, id: ObjectId, flags: ObjectFlags, outcome: &mut ActionOutcome) -> FictionResult<()> {
        self.world_mut().object_mut(id)?.flags.remove(flags);
        outcome.changes.push(StateChange::ObjectFlagCleared { object: id, flags });
        Ok(())
    }

    /// Move an object, recording the change.
    pub fn move_object(&mut self, id: ObjectId, to: Location, outcome: &mut ActionOutcome) -> FictionResult<()> {
        let from = self.world().object(id)?.location;
        self.world_mut().move_object(id, to)?;
        outcome.changes.push(StateChange::Moved { object: id, from, to });
        Ok(())
    }

    /// Append the text for a death, and the room the player wakes in.
    pub fn narrate_death(&self, report: &DeathReport, lines: &mut Vec<String>) -> FictionResult<()> {
        lines.push(report.message.clone());
        if report.outcome != DeathOutcome::GameOver {
            let world = self.world();
            lines.push(self.narrator.describe_room(world, world.state.current_room, true)?);
        }
        Ok(())
    }
}

/// A verb handler.
pub type Handler = fn(&mut ActionContext<'_>, &Command) -> FictionResult<ActionOutcome>;

/// One handler per verb.
#[derive(Debug, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<Verb, Handler>,
}

impl HandlerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The classic verb set.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Verb::Look, movement::look);
        registry.register(Verb::Go, movement::go);
        registry.register(Verb::Examine, objects::examine);
        registry.register(Verb::Read, objects::read);
        registry.register(Verb::Take, objects::take);
        registry.register(Verb::Drop, objects::drop);
        registry.register(Verb::Put, objects::put);
        registry.register(Verb::Open, objects::open);
        registry.register(Verb::Close, objects::close);
        registry.register(Verb::Inventory, objects::inventory);
        registry.register(Verb::Light, objects::light);
        registry.register(Verb::Extinguish, objects::extinguish);
        registry.register(Verb::Move, objects::shift);
        registry.register(Verb::Attack, actors::attack);
        registry.register(Verb::Give, actors::give);
        registry.register(Verb::Wait, meta::wait);
        registry.register(Verb::Score, meta::score);
        registry.register(Verb::Diagnose, meta::diagnose);
        registry.register(Verb::Verbose, meta::verbosity);
        registry.register(Verb::Brief, meta::verbosity);
        registry.register(Verb::Superbrief, meta::verbosity);
        registry.register(Verb::Quit, meta::quit);
        registry.register(Verb::Help, meta::help);
        registry.register(Verb::Again, meta::again);
        registry
    }

    /// Register (or replace) the handler for a verb.
    pub fn register(&mut self, verb: Verb, handler: Handler) {
        self.handlers.insert(verb, handler);
    }

    /// Whether a verb has a handler.
    pub fn handles(&self, verb: Verb) -> bool {
        self.handlers.contains_key(&verb)
    }

    /// Run the handler for a command.
    ///
    /// Special refusals are checked before the handler runs; the other
    /// special reactions are applied after it succeeds. Errors never escape:
    /// they are logged and reported as [`GENERIC_FAILURE`].
    pub fn dispatch(&self, ctx: &mut ActionContext<'_>, command: &Command) -> ActionOutcome {
        let verb = command.verb;
        let Some(handler) = self.handlers.get(&verb) else {
            return ActionOutcome::failure(format!("I don't know how to {verb} things."));
        };

        let result = run(ctx, *handler, command);
        match result {
            Ok(outcome) => {
                debug!(
                    turn = ctx.world().state.moves,
                    verb = %verb,
                    success = outcome.success,
                    changes = outcome.changes.len(),
                    "action"
                );
                outcome
            }
            Err(err) => {
                error!(verb = %verb, error = %err, "action failed on world data");
                ActionOutcome::failure(GENERIC_FAILURE)
            }
        }
    }
}

fn run(ctx: &mut ActionContext<'_>, handler: Handler, command: &Command) -> FictionResult<ActionOutcome> {
    if let Some(direct) = command.direct {
        if let Some(message) = ctx.specials.refusal(ctx.world(), command.verb, direct) {
            return Ok(ActionOutcome::failure(message));
        }
    }
    let mut outcome = handler(ctx, command)?;
    if outcome.success {
        if let Some(direct) = command.direct {
            let specials = ctx.specials;
            specials.apply(ctx, command.verb, direct, &mut outcome)?;
        }
    }
    Ok(outcome)
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// "a leaflet", "a leaflet and a sword", "a leaflet, a sword and a lamp".
pub(crate) fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{} and {last}", rest.join(", ")),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use delve_core::World;
    use delve_core::demo::demo_world;
    use delve_simulation::{ScriptedRng, SimConfig, Simulation};

    use super::*;

    /// A demo simulation with a scripted random source and the player
    /// standing in `room`.
    pub fn sim_in(room: &str, rolls: &[u32]) -> Simulation {
        let mut world: World = demo_world().unwrap();
        world.state.current_room = world.room_id(room).unwrap();
        let rng = Box::new(ScriptedRng::new(rolls.iter().copied()));
        Simulation::with_rng(world, SimConfig::default(), rng)
    }

    /// Run one command through the standard handlers.
    pub fn act(sim: &mut Simulation, command: &Command) -> ActionOutcome {
        let specials = SpecialRegistry::for_world(sim.world());
        let mut narrator = Narrator::default();
        let mut ctx = ActionContext {
            sim,
            specials: &specials,
            narrator: &mut narrator,
            quit: false,
        };
        HandlerRegistry::standard().dispatch(&mut ctx, command)
    }

    pub fn id(sim: &Simulation, key: &str) -> ObjectId {
        sim.world().object_id(key).unwrap()
    }

    pub fn hold(sim: &mut Simulation, key: &str) -> ObjectId {
        let id = id(sim, key);
        sim.world_mut().move_object(id, Location::Player).unwrap();
        id
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn names_join_naturally() {
        let names = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_names(&names(&["a leaflet"])), "a leaflet");
        assert_eq!(join_names(&names(&["a", "b"])), "a and b");
        assert_eq!(join_names(&names(&["a", "b", "c"])), "a, b and c");
    }

    #[test]
    fn every_verb_has_a_handler() {
        let registry = HandlerRegistry::standard();
        for verb in [
            Verb::Look,
            Verb::Examine,
            Verb::Read,
            Verb::Take,
            Verb::Drop,
            Verb::Put,
            Verb::Open,
            Verb::Close,
            Verb::Inventory,
            Verb::Go,
            Verb::Light,
            Verb::Extinguish,
            Verb::Attack,
            Verb::Give,
            Verb::Move,
            Verb::Wait,
            Verb::Score,
            Verb::Diagnose,
            Verb::Verbose,
            Verb::Brief,
            Verb::Superbrief,
            Verb::Quit,
            Verb::Help,
            Verb::Again,
        ] {
            assert!(registry.handles(verb), "{verb} has no handler");
        }
    }

    #[test]
    fn missing_handler_refuses() {
        let mut sim = sim_in("west-of-house", &[]);
        let specials = SpecialRegistry::new();
        let mut narrator = Narrator::default();
        let mut ctx = ActionContext {
            sim: &mut sim,
            specials: &specials,
            narrator: &mut narrator,
            quit: false,
        };
        let outcome = HandlerRegistry::new().dispatch(&mut ctx, &Command::new(Verb::Wait));
        assert!(!outcome.success);
        assert_eq!(outcome.message, "I don't know how to wait things.");
    }

    #[test]
    fn broken_world_data_gives_the_generic_failure() {
        let mut sim = sim_in("west-of-house", &[]);
        let command = Command::new(Verb::Examine).with_direct(ObjectId(9999));
        let outcome = act(&mut sim, &command);
        assert!(!outcome.success);
        assert_eq!(outcome.message, GENERIC_FAILURE);
    }
}
