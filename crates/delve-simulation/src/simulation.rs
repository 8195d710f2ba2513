use delve_core::{ObjectId, World};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actor::{ActorRoster, ActorSnapshot, ActorState};
use crate::actors::{Thief, Troll};
use crate::config::SimConfig;
use crate::context::SimContext;
use crate::daemon::DaemonId;
use crate::daemons::{CureDaemon, LightDaemon, SwordGlowDaemon};
use crate::error::SimResult;
use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::mortality::{self, DeathReport, MortalityConfig};
use crate::rng::{GameRng, RandomSource, RngState};
use crate::scheduler::{DaemonSnapshot, Scheduler};

/// What a simulation step produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutput {
    /// Text for the player, in order.
    pub messages: Vec<String>,
    /// Set if the player died during the step.
    pub death: Option<DeathReport>,
}

impl TurnOutput {
    /// Whether nothing happened worth telling.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.death.is_none()
    }
}

/// Saved state of every daemon, actor and the random generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimSnapshot {
    /// Daemon schedules and memory.
    pub daemons: Vec<DaemonSnapshot>,
    /// Actor states.
    pub actors: Vec<ActorSnapshot>,
    /// Random generator position, if it can be saved.
    pub rng: Option<RngState>,
    /// The last turn the scheduler ran.
    pub last_turn: Option<u32>,
}

/// The top-level simulation orchestrator.
///
/// Owns the world, RNG, event log, daemons and actors. Each consumed turn
/// runs the daemons in registration order, then the actors, then applies
/// any death that resulted.
pub struct Simulation {
    world: World,
    rng: Box<dyn RandomSource>,
    events: EventLog,
    scheduler: Scheduler,
    actors: ActorRoster,
    config: SimConfig,
    mortality: MortalityConfig,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("moves", &self.world.state.moves)
            .field("daemons", &self.scheduler.len())
            .field("actors", &self.actors.len())
            .field("events", &self.events.len())
            .finish()
    }
}

impl Simulation {
    /// Create a simulation seeded from the configuration.
    pub fn new(world: World, config: SimConfig) -> Self {
        let rng = Box::new(GameRng::seeded(config.seed));
        Self::with_rng(world, config, rng)
    }

    /// Create a simulation drawing from the given random source.
    ///
    /// The lamp, sword glow and cure daemons and the troll and thief actors
    /// are registered for whichever of their objects the world has.
    pub fn with_rng(world: World, config: SimConfig, rng: Box<dyn RandomSource>) -> Self {
        let mut scheduler = Scheduler::new();
        let mut actors = ActorRoster::new();

        if let Some(lamp) = world.object_by_key("lamp") {
            scheduler.register(LightDaemon::lamp(lamp.id));
        }
        if let Some(sword) = world.object_by_key("sword") {
            scheduler.register(SwordGlowDaemon::new(sword.id));
        }
        scheduler.register(CureDaemon);

        if let Some(troll) = world.object_by_key("troll") {
            let axe = world.object_by_key("axe").map(|o| o.id);
            actors.register(Troll::new(troll.id, troll.name.clone(), axe));
        }
        if let Some(thief) = world.object_by_key("thief") {
            actors.register(Thief::new(thief.id, thief.name.clone()));
        }

        Self {
            world,
            rng,
            events: EventLog::new(config.max_events),
            scheduler,
            actors,
            config,
            mortality: MortalityConfig::default(),
        }
    }

    /// Replace the rules for dying.
    pub fn with_mortality(mut self, mortality: MortalityConfig) -> Self {
        self.mortality = mortality;
        self
    }

    fn step<F>(&mut self, f: F) -> SimResult<TurnOutput>
    where
        F: FnOnce(&mut Scheduler, &mut ActorRoster, &mut SimContext<'_>) -> SimResult<()>,
    {
        let turn = self.world.state.moves;
        let mut messages = Vec::new();
        let mut ctx = SimContext {
            world: &mut self.world,
            events: &mut self.events,
            rng: self.rng.as_mut(),
            turn,
            output: &mut messages,
            death: None,
        };
        f(&mut self.scheduler, &mut self.actors, &mut ctx)?;
        let cause = ctx.death.take();
        let death = match cause {
            Some(cause) => Some(self.kill_player(&cause)?),
            None => None,
        };
        Ok(TurnOutput { messages, death })
    }

    /// Run the daemons and actors for the current move.
    ///
    /// Does nothing once the game is over or if this move has already run.
    pub fn turn(&mut self) -> SimResult<TurnOutput> {
        if self.world.state.game_over {
            return Ok(TurnOutput::default());
        }
        let scope = self.config.actor_scope;
        self.step(|scheduler, actors, ctx| {
            if scheduler.run(ctx)? && !ctx.player_dead() {
                actors.run(ctx, scope)?;
            }
            Ok(())
        })
    }

    /// The player attacks the actor animating `target` with `weapon`.
    pub fn attack(&mut self, target: ObjectId, weapon: Option<ObjectId>) -> SimResult<TurnOutput> {
        self.step(|_, actors, ctx| actors.attack(ctx, target, weapon))
    }

    /// The player gives `item` to the actor animating `target`.
    pub fn give(&mut self, target: ObjectId, item: ObjectId) -> SimResult<TurnOutput> {
        self.step(|_, actors, ctx| actors.give(ctx, target, item))
    }

    /// Kill the player now.
    pub fn kill_player(&mut self, cause: &str) -> SimResult<DeathReport> {
        let report = mortality::kill_player(&mut self.world, cause, &self.mortality, self.rng.as_mut())?;
        self.events.push(SimEvent::new(
            self.world.state.moves,
            SimEventKind::PlayerDied {
                cause: cause.to_string(),
                outcome: report.outcome,
            },
            format!("the player died: {cause}"),
        ));
        Ok(report)
    }

    /// Re-arm a daemon from the start of its schedule.
    pub fn arm_daemon(&mut self, id: DaemonId) -> SimResult<()> {
        self.scheduler.arm(id)
    }

    /// Disable a daemon.
    pub fn disable_daemon(&mut self, id: DaemonId) -> SimResult<()> {
        self.scheduler.disable(id)
    }

    /// Whether `object` is animated by an actor.
    pub fn is_actor(&self, object: ObjectId) -> bool {
        self.actors.get(object).is_some()
    }

    /// The state of the actor animating `object`.
    pub fn actor_state(&self, object: ObjectId) -> Option<ActorState> {
        self.actors.get(object).map(|a| a.state())
    }

    /// Save daemon, actor and RNG state.
    pub fn save(&self) -> SimSnapshot {
        SimSnapshot {
            daemons: self.scheduler.snapshot(),
            actors: self.actors.snapshot(),
            rng: self.rng.save(),
            last_turn: self.scheduler.last_turn(),
        }
    }

    /// Restore state saved by [`Simulation::save`], matching daemons and
    /// actors by id.
    pub fn restore(&mut self, snapshot: &SimSnapshot) -> SimResult<()> {
        self.scheduler.restore(&snapshot.daemons, snapshot.last_turn)?;
        self.actors.restore(&snapshot.actors)?;
        if let Some(state) = snapshot.rng {
            self.rng.load(state);
        }
        debug!(
            daemons = snapshot.daemons.len(),
            actors = snapshot.actors.len(),
            "restored simulation state"
        );
        Ok(())
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The world, mutably.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The random source.
    pub fn rng(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    /// The event log.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// The daemon scheduler.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The actors.
    pub fn actors(&self) -> &ActorRoster {
        &self.actors
    }

    /// The configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The rules for dying.
    pub fn mortality(&self) -> &MortalityConfig {
        &self.mortality
    }

    /// Extract the world, consuming the simulation.
    pub fn into_world(self) -> World {
        self.world
    }
}
