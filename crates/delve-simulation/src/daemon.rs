use std::fmt;

use delve_core::World;
use serde::{Deserialize, Serialize};

use crate::context::SimContext;
use crate::error::SimResult;

/// Identity of a registered daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaemonId {
    /// The lamp's fuel.
    Lamp,
    /// The elvish sword's warning glow.
    SwordGlow,
    /// Wound healing.
    Cure,
}

impl fmt::Display for DaemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lamp => "lamp",
            Self::SwordGlow => "sword-glow",
            Self::Cure => "cure",
        })
    }
}

/// When a daemon next fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Not running until re-armed.
    Disabled,
    /// Fires on every turn.
    EveryTurn,
    /// Fires when the countdown, decremented once per turn, reaches zero.
    Countdown(u32),
}

/// A timed world effect driven by the scheduler.
///
/// Daemons are run in registration order once per turn. A daemon owns no
/// game entities; it refers to them by id.
pub trait Daemon: fmt::Debug {
    /// Identity used for arming, disabling, and snapshots.
    fn id(&self) -> DaemonId;

    /// Human-readable name for this daemon.
    fn name(&self) -> &str;

    /// The schedule the daemon runs on when armed.
    fn schedule(&self) -> Schedule;

    /// Whether the daemon is armed at registration. A daemon that is not
    /// stays disabled until game logic arms it.
    fn starts_armed(&self) -> bool {
        true
    }

    /// Whether the daemon's countdown runs this turn. An inactive daemon is
    /// skipped entirely and its countdown is frozen.
    fn active(&self, _world: &World) -> bool {
        true
    }

    /// Do the daemon's work and say when it should fire next.
    fn fire(&mut self, ctx: &mut SimContext<'_>) -> SimResult<Schedule>;

    /// Reset internal state when game logic re-arms the daemon.
    fn rearm(&mut self) {}

    /// Internal state to persist.
    fn save(&self) -> u32 {
        0
    }

    /// Restore internal state saved by [`Daemon::save`].
    fn load(&mut self, _memory: u32) {}
}
