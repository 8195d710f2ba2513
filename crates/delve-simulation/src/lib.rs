//! Turn-based simulation for Delve.
//!
//! Everything that happens on its own once a command has consumed a turn
//! lives here: timed daemons such as the lamp's burn-down, the troll and
//! thief, combat, and the death and scoring rules. All of it mutates a
//! [`delve_core::World`] owned by the [`Simulation`] and draws randomness
//! from one injectable [`RandomSource`].

/// Actor trait, behavioral states and the roster.
pub mod actor;
/// The troll and the thief.
pub mod actors;
/// Blow resolution and player strength.
pub mod combat;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable context passed to daemons and actors each turn.
pub mod context;
/// The daemon trait and schedules.
pub mod daemon;
/// The built-in daemons.
pub mod daemons;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the event log.
pub mod event;
/// Death, resurrection and game over.
pub mod mortality;
/// The randomness seam.
pub mod rng;
/// Runs daemons once per turn.
pub mod scheduler;
/// Points, ranks and the score line.
pub mod scoring;
/// Top-level simulation orchestrator.
pub mod simulation;

/// Re-exports of the actor types.
pub use actor::{Actor, ActorCore, ActorRoster, ActorSnapshot, ActorState, ActorStats};
/// Re-exports of [`combat::BlowOutcome`] and [`combat::resolve_blow`].
pub use combat::{BlowOutcome, resolve_blow};
/// Re-exports of the configuration types.
pub use config::{ActorScope, SimConfig};
/// Re-export of [`context::SimContext`].
pub use context::SimContext;
/// Re-exports of the daemon types.
pub use daemon::{Daemon, DaemonId, Schedule};
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-exports of the mortality types.
pub use mortality::{DeathOutcome, DeathReport, MortalityConfig};
/// Re-exports of the randomness seam.
pub use rng::{GameRng, RandomSource, RngState, ScriptedRng};
/// Re-exports of the scheduler types.
pub use scheduler::{DaemonSnapshot, Scheduler};
/// Re-exports of [`simulation::Simulation`] and its outputs.
pub use simulation::{SimSnapshot, Simulation, TurnOutput};
