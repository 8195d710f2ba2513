use std::fmt;

use delve_core::{ObjectId, World};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ActorScope;
use crate::context::SimContext;
use crate::error::{SimError, SimResult};
use crate::event::SimEventKind;

/// Behavioral state of a non-player character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorState {
    /// Going about its business.
    Normal,
    /// Engaged with the player.
    Fighting,
    /// Running away to recover.
    Fleeing,
    /// Asleep or unconscious.
    Sleeping,
    /// Out of play for good.
    Dead,
}

impl fmt::Display for ActorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Fighting => "fighting",
            Self::Fleeing => "fleeing",
            Self::Sleeping => "sleeping",
            Self::Dead => "dead",
        })
    }
}

/// Combat statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorStats {
    /// Current strength. Zero is death.
    pub strength: u32,
    /// Strength when fully healed.
    pub max_strength: u32,
}

impl ActorStats {
    /// Stats at full strength.
    pub fn full(strength: u32) -> Self {
        Self {
            strength,
            max_strength: strength,
        }
    }
}

/// Saved state of one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// The object the actor animates.
    pub object: ObjectId,
    /// Behavioral state.
    pub state: ActorState,
    /// Combat stats.
    pub stats: ActorStats,
    /// Actor-specific counter.
    pub timer: u32,
}

/// The state every actor carries.
#[derive(Debug, Clone)]
pub struct ActorCore {
    /// The object this actor animates.
    pub object: ObjectId,
    /// Display name.
    pub name: String,
    /// Behavioral state.
    pub state: ActorState,
    /// Combat stats.
    pub stats: ActorStats,
    /// Actor-specific counter, such as turns left asleep.
    pub timer: u32,
}

impl ActorCore {
    /// A fresh actor in the normal state.
    pub fn new(object: ObjectId, name: impl Into<String>, strength: u32) -> Self {
        Self {
            object,
            name: name.into(),
            state: ActorState::Normal,
            stats: ActorStats::full(strength),
            timer: 0,
        }
    }

    /// Whether the actor shares the player's room.
    pub fn with_player(&self, world: &World) -> bool {
        world.room_of(self.object) == Some(world.state.current_room)
    }
}

/// A non-player character's behavior.
///
/// Actors refer to the object they animate by id. The roster calls
/// [`Actor::transition_state`] after each hook and records any change.
pub trait Actor: fmt::Debug {
    /// Shared actor state.
    fn core(&self) -> &ActorCore;

    /// Shared actor state, mutably.
    fn core_mut(&mut self) -> &mut ActorCore;

    /// The object this actor animates.
    fn object(&self) -> ObjectId {
        self.core().object
    }

    /// Display name.
    fn name(&self) -> &str {
        &self.core().name
    }

    /// Current behavioral state.
    fn state(&self) -> ActorState {
        self.core().state
    }

    /// Current combat stats.
    fn stats(&self) -> ActorStats {
        self.core().stats
    }

    /// Whether the actor takes a turn now.
    fn should_act(&self, _world: &World) -> bool {
        self.state() != ActorState::Dead
    }

    /// Take one turn.
    fn execute_turn(&mut self, ctx: &mut SimContext<'_>) -> SimResult<()>;

    /// React to the player attacking with `weapon` (bare hands if `None`).
    fn on_attacked(&mut self, ctx: &mut SimContext<'_>, weapon: Option<ObjectId>) -> SimResult<()>;

    /// React to the player handing over `item`.
    fn on_receive_item(&mut self, ctx: &mut SimContext<'_>, item: ObjectId) -> SimResult<()>;

    /// The state the actor should now be in.
    fn transition_state(&self, world: &World) -> ActorState;

    /// Save the actor's state.
    fn snapshot(&self) -> ActorSnapshot {
        let core = self.core();
        ActorSnapshot {
            object: core.object,
            state: core.state,
            stats: core.stats,
            timer: core.timer,
        }
    }

    /// Restore saved state.
    fn restore(&mut self, saved: &ActorSnapshot) {
        let core = self.core_mut();
        core.state = saved.state;
        core.stats = saved.stats;
        core.timer = saved.timer;
    }
}

fn settle(actor: &mut dyn Actor, ctx: &mut SimContext<'_>) {
    let from = actor.state();
    if from == ActorState::Dead {
        return;
    }
    let to = actor.transition_state(ctx.world);
    if to == from {
        return;
    }
    actor.core_mut().state = to;
    let object = actor.object();
    info!(turn = ctx.turn, actor = actor.name(), %from, %to, "actor changed state");
    ctx.emit(
        SimEventKind::ActorStateChanged {
            actor: object,
            from,
            to,
        },
        format!("the {} is now {to}", actor.name()),
    );
}

/// Every registered actor, consulted in registration order.
#[derive(Debug, Default)]
pub struct ActorRoster {
    actors: Vec<Box<dyn Actor>>,
}

impl ActorRoster {
    /// An empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor.
    pub fn register<A: Actor + 'static>(&mut self, actor: A) {
        self.actors.push(Box::new(actor));
    }

    /// Number of registered actors.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether no actors are registered.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// The actor animating `object`.
    pub fn get(&self, object: ObjectId) -> Option<&dyn Actor> {
        self.actors
            .iter()
            .find(|a| a.object() == object)
            .map(|a| a.as_ref())
    }

    fn get_mut(&mut self, object: ObjectId) -> SimResult<&mut Box<dyn Actor>> {
        self.actors
            .iter_mut()
            .find(|a| a.object() == object)
            .ok_or(SimError::UnknownActor(object))
    }

    /// Give each actor in scope its turn. Stops early if the player dies.
    pub fn run(&mut self, ctx: &mut SimContext<'_>, scope: ActorScope) -> SimResult<()> {
        for actor in &mut self.actors {
            if ctx.player_dead() {
                break;
            }
            if scope == ActorScope::SameRoomOnly && !actor.core().with_player(ctx.world) {
                continue;
            }
            if !actor.should_act(ctx.world) {
                continue;
            }
            actor.execute_turn(ctx)?;
            settle(actor.as_mut(), ctx);
        }
        Ok(())
    }

    /// The player attacks the actor animating `object`.
    pub fn attack(
        &mut self,
        ctx: &mut SimContext<'_>,
        object: ObjectId,
        weapon: Option<ObjectId>,
    ) -> SimResult<()> {
        let actor = self.get_mut(object)?;
        actor.on_attacked(ctx, weapon)?;
        settle(actor.as_mut(), ctx);
        Ok(())
    }

    /// The player gives `item` to the actor animating `object`.
    pub fn give(&mut self, ctx: &mut SimContext<'_>, object: ObjectId, item: ObjectId) -> SimResult<()> {
        let actor = self.get_mut(object)?;
        actor.on_receive_item(ctx, item)?;
        settle(actor.as_mut(), ctx);
        Ok(())
    }

    /// Save every actor's state.
    pub fn snapshot(&self) -> Vec<ActorSnapshot> {
        self.actors.iter().map(|a| a.snapshot()).collect()
    }

    /// Restore saved actor state, matching actors by object id.
    pub fn restore(&mut self, saved: &[ActorSnapshot]) -> SimResult<()> {
        if saved.len() != self.actors.len() {
            return Err(SimError::Snapshot(format!(
                "{} actors saved, {} registered",
                saved.len(),
                self.actors.len()
            )));
        }
        for entry in saved {
            let actor = self
                .get_mut(entry.object)
                .map_err(|_| SimError::Snapshot(format!("no actor animates {}", entry.object)))?;
            actor.restore(entry);
        }
        Ok(())
    }
}
