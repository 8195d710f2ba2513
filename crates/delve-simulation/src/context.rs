use delve_core::World;

use crate::event::{EventLog, SimEvent, SimEventKind};
use crate::rng::RandomSource;

/// Mutable context passed to each daemon and actor during a turn.
pub struct SimContext<'a> {
    /// The world being simulated.
    pub world: &'a mut World,
    /// The event log.
    pub events: &'a mut EventLog,
    /// The randomness seam.
    pub rng: &'a mut dyn RandomSource,
    /// The turn being run.
    pub turn: u32,
    /// Text for the player, in the order it was produced.
    pub output: &'a mut Vec<String>,
    /// Set when something killed the player this turn.
    pub death: Option<String>,
}

impl SimContext<'_> {
    /// Emit a simulation event at the current turn.
    pub fn emit(&mut self, kind: SimEventKind, description: impl Into<String>) {
        self.events.push(SimEvent::new(self.turn, kind, description));
    }

    /// Tell the player something.
    pub fn say(&mut self, text: impl Into<String>) {
        self.output.push(text.into());
    }

    /// Record that the player has been killed. The first cause wins.
    pub fn kill_player(&mut self, cause: impl Into<String>) {
        if self.death.is_none() {
            self.death = Some(cause.into());
        }
    }

    /// Whether the player has already died this turn.
    pub fn player_dead(&self) -> bool {
        self.death.is_some()
    }
}
