//! A game in progress.
//!
//! [`Session::process_command`] is the whole surface for one turn: raw text
//! in, rendered text out. A line may hold several commands separated by
//! periods or THEN; they run in order and stop at the first one that fails.

use delve_core::{ObjectId, Snapshot, World, WorldBuilder, WorldRecords};
use delve_simulation::{MortalityConfig, RandomSource, SimSnapshot, Simulation};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::action::{ActionContext, GENERIC_FAILURE, HandlerRegistry, SpecialRegistry, StateChange};
use crate::config::SessionConfig;
use crate::error::{FictionError, FictionResult, ParseError};
use crate::narrator::{Narrator, NarratorConfig, Verbosity};
use crate::parser::{Command, Parser, Verb, Vocabulary, split_commands};

/// Shown for every command once the game has ended.
pub const GAME_OVER: &str = "The game is over. Restore a saved game or start a new one.";

/// What one line of input did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Text for the player.
    pub output: String,
    /// Whether at least one command consumed a turn.
    pub consumed_turn: bool,
    /// Every change made by the commands' handlers, in order.
    pub changes: Vec<StateChange>,
}

/// Everything needed to resume a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// World state.
    pub world: Snapshot,
    /// Daemons, actors and the random generator.
    pub sim: SimSnapshot,
    /// Verbosity in effect.
    pub verbosity: Verbosity,
}

impl SessionSnapshot {
    /// Serialize to JSON.
    pub fn to_json(&self) -> FictionResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> FictionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// An interactive fiction session.
#[derive(Debug)]
pub struct Session {
    sim: Simulation,
    vocabulary: Vocabulary,
    specials: SpecialRegistry,
    handlers: HandlerRegistry,
    narrator: Narrator,
    /// What "it" refers to.
    referent: Option<ObjectId>,
    /// The last line AGAIN repeats.
    last_input: Option<String>,
    quit: bool,
}

impl Session {
    /// Build a world from content records and start a session in it.
    pub fn new(records: WorldRecords, config: SessionConfig) -> FictionResult<Self> {
        let world = Self::build_world(records, &config)?;
        let sim = Simulation::new(world, config.sim.clone());
        Ok(Self::start(sim, &config))
    }

    /// Like [`Session::new`], drawing randomness from `rng`.
    pub fn with_rng(
        records: WorldRecords,
        config: SessionConfig,
        rng: Box<dyn RandomSource>,
    ) -> FictionResult<Self> {
        let world = Self::build_world(records, &config)?;
        let sim = Simulation::with_rng(world, config.sim.clone(), rng);
        Ok(Self::start(sim, &config))
    }

    /// A session in the built-in demo world.
    pub fn demo(config: SessionConfig) -> FictionResult<Self> {
        Self::new(delve_core::demo::demo_records(), config)
    }

    fn build_world(records: WorldRecords, config: &SessionConfig) -> FictionResult<World> {
        Ok(WorldBuilder::from_records(records)
            .carry_capacity(config.carry_capacity)
            .build()?)
    }

    fn start(sim: Simulation, config: &SessionConfig) -> Self {
        let mortality = MortalityConfig {
            max_deaths: config.max_deaths,
            ..MortalityConfig::default()
        };
        let mut sim = sim.with_mortality(mortality);
        let world = sim.world_mut();
        let start = world.state.current_room;
        if let Ok(room) = world.room_mut(start) {
            room.visited = true;
        }
        let vocabulary = Vocabulary::for_world(sim.world());
        let specials = SpecialRegistry::for_world(sim.world());
        info!(world = %sim.world().name, seed = config.sim.seed, "session started");
        Self {
            sim,
            vocabulary,
            specials,
            handlers: HandlerRegistry::standard(),
            narrator: Narrator::new(NarratorConfig::new().with_verbosity(config.verbosity)),
            referent: None,
            last_input: None,
            quit: false,
        }
    }

    /// The opening text: the world's name and the starting room.
    pub fn intro(&self) -> FictionResult<String> {
        Ok(format!("{}\n\n{}", self.sim.world().name, self.describe_here()?))
    }

    /// The full description of the player's room. Takes no turn.
    pub fn describe_here(&self) -> FictionResult<String> {
        let world = self.sim.world();
        Ok(self.narrator.describe_room(world, world.state.current_room, true)?)
    }

    /// The world.
    pub fn world(&self) -> &World {
        self.sim.world()
    }

    /// The simulation.
    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    /// Whether the player asked to quit.
    pub fn wants_quit(&self) -> bool {
        self.quit
    }

    /// Whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.sim.world().state.game_over
    }

    /// Run one line of input and return what the player sees.
    pub fn process_command(&mut self, text: &str) -> String {
        self.run_turn(text).output
    }

    /// Run one line of input, reporting what happened in detail.
    pub fn run_turn(&mut self, text: &str) -> TurnReport {
        let mut report = TurnReport::default();
        if self.is_over() {
            report.output = GAME_OVER.to_string();
            return report;
        }

        let pieces = split_commands(text);
        if pieces.is_empty() {
            report.output = ParseError::Empty.to_string();
            return report;
        }

        let mut lines = Vec::new();
        for piece in pieces {
            let command = match self.parse(&piece) {
                Ok(command) => command,
                Err(message) => {
                    lines.push(message);
                    break;
                }
            };
            if let Some(direct) = command.direct.filter(|_| command.all.is_none()) {
                self.referent = Some(direct);
            }

            let keep_going = self.execute(&command, &mut lines, &mut report);
            if !keep_going || self.quit || self.is_over() {
                break;
            }
        }
        report.output = lines.join("\n\n");
        report
    }

    /// Parse one command, substituting the previous input for AGAIN.
    fn parse(&mut self, input: &str) -> Result<Command, String> {
        let parser = Parser::new(&self.vocabulary, self.sim.world()).with_referent(self.referent);
        let command = parser.parse(input).map_err(|err| err.to_string())?;
        if command.verb != Verb::Again {
            self.last_input = Some(input.to_string());
            return Ok(command);
        }
        let Some(previous) = self.last_input.as_deref() else {
            return Err("There is nothing to repeat.".to_string());
        };
        parser.parse(previous).map_err(|err| err.to_string())
    }

    /// Dispatch a command and, if it consumed a turn, run the world's turn.
    /// Returns whether the next command on the line should run.
    fn execute(&mut self, command: &Command, lines: &mut Vec<String>, report: &mut TurnReport) -> bool {
        let mut ctx = ActionContext {
            sim: &mut self.sim,
            specials: &self.specials,
            narrator: &mut self.narrator,
            quit: false,
        };
        let outcome = self.handlers.dispatch(&mut ctx, command);
        self.quit |= ctx.quit;
        if !outcome.message.is_empty() {
            lines.push(outcome.message);
        }
        report.changes.extend(outcome.changes);
        if !outcome.success {
            return false;
        }
        if command.verb.is_meta() || ctx.world().state.game_over {
            return true;
        }

        ctx.world_mut().state.moves += 1;
        report.consumed_turn = true;
        let turn = match ctx.sim.turn() {
            Ok(turn) => turn,
            Err(err) => {
                error!(turn = ctx.world().state.moves, error = %err, "turn failed on world data");
                lines.push(GENERIC_FAILURE.to_string());
                return false;
            }
        };
        let mut said = turn.messages;
        if let Some(death) = turn.death {
            if let Err(err) = ctx.narrate_death(&death, &mut said) {
                error!(error = %err, "could not describe the respawn room");
            }
            report.changes.push(StateChange::PlayerDied {
                cause: death.cause,
            });
        }
        if !said.is_empty() {
            lines.push(said.join("\n"));
        }
        true
    }

    /// Capture the session for saving.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            world: self.sim.world().snapshot(),
            sim: self.sim.save(),
            verbosity: self.narrator.verbosity(),
        }
    }

    /// Put the session back as it was when `snapshot` was taken.
    ///
    /// Daemons and actors are matched by id. On error the session is left as
    /// it was.
    pub fn restore(&mut self, snapshot: &SessionSnapshot) -> FictionResult<()> {
        let world_before = self.sim.world().snapshot();
        let sim_before = self.sim.save();
        self.sim.world_mut().restore(&snapshot.world)?;
        if let Err(err) = self.sim.restore(&snapshot.sim) {
            self.sim.world_mut().restore(&world_before)?;
            self.sim.restore(&sim_before)?;
            return Err(FictionError::from(err));
        }
        self.narrator.set_verbosity(snapshot.verbosity);
        self.referent = None;
        self.last_input = None;
        self.quit = false;
        debug!(moves = self.sim.world().state.moves, "session restored");
        Ok(())
    }
}
