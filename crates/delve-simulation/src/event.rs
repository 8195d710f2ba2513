use delve_core::{ObjectId, RoomId};

use crate::actor::ActorState;
use crate::combat::BlowOutcome;
use crate::daemon::DaemonId;
use crate::mortality::DeathOutcome;

/// What kind of simulation event occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimEventKind {
    // Daemons
    /// A daemon fired.
    DaemonFired {
        /// Which daemon.
        daemon: DaemonId,
    },
    /// A light source moved to a dimmer stage.
    LightDimmed {
        /// The light source.
        object: ObjectId,
        /// The new stage index.
        stage: usize,
    },
    /// A light source ran out.
    LightExhausted {
        /// The light source.
        object: ObjectId,
    },
    /// The player healed a wound.
    Healed {
        /// Wounds left.
        wounds: i64,
    },

    // Actors
    /// An actor changed behavioral state.
    ActorStateChanged {
        /// The actor's object.
        actor: ObjectId,
        /// Previous state.
        from: ActorState,
        /// New state.
        to: ActorState,
    },
    /// An actor moved to another room.
    ActorMoved {
        /// The actor's object.
        actor: ObjectId,
        /// Where it went.
        to: RoomId,
    },
    /// An actor took an object.
    Stolen {
        /// The thief.
        actor: ObjectId,
        /// What was taken.
        item: ObjectId,
    },
    /// A blow was struck.
    Blow {
        /// Who struck. `None` is the player.
        attacker: Option<ObjectId>,
        /// Who was struck. `None` is the player.
        defender: Option<ObjectId>,
        /// What happened.
        outcome: BlowOutcome,
    },

    // Lifecycle
    /// The player died.
    PlayerDied {
        /// What killed the player.
        cause: String,
        /// Where that led.
        outcome: DeathOutcome,
    },
}

impl SimEventKind {
    /// Check whether a given object is involved in this event.
    pub fn involves(&self, id: ObjectId) -> bool {
        match self {
            Self::LightDimmed { object, .. } | Self::LightExhausted { object } => *object == id,
            Self::ActorStateChanged { actor, .. }
            | Self::ActorMoved { actor, .. } => *actor == id,
            Self::Stolen { actor, item } => *actor == id || *item == id,
            Self::Blow {
                attacker, defender, ..
            } => *attacker == Some(id) || *defender == Some(id),
            Self::DaemonFired { .. } | Self::Healed { .. } | Self::PlayerDied { .. } => false,
        }
    }
}

/// A record of something that happened during a turn.
#[derive(Debug, Clone)]
pub struct SimEvent {
    /// The turn on which this event occurred.
    pub turn: u32,
    /// The specific kind of event that occurred.
    pub kind: SimEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl SimEvent {
    /// Create a new simulation event with the given turn, kind, and description.
    pub fn new(turn: u32, kind: SimEventKind, description: impl Into<String>) -> Self {
        Self {
            turn,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events during a game.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    /// Return all events that occurred on the given turn.
    pub fn events_at_turn(&self, turn: u32) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.turn == turn).collect()
    }

    /// Return all events involving the given object.
    pub fn events_for_object(&self, id: ObjectId) -> Vec<&SimEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
