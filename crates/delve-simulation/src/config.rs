use serde::{Deserialize, Serialize};

/// Which actors the scheduler consults each turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorScope {
    /// Every registered actor, in registration order. Each decides for
    /// itself whether to act.
    #[default]
    AllActors,
    /// Only actors in the player's current room.
    SameRoomOnly,
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// RNG seed for deterministic play.
    pub seed: u64,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Actor activation scope.
    pub actor_scope: ActorScope,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_events: 0,
            actor_scope: ActorScope::AllActors,
        }
    }
}

impl SimConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set which actors are consulted each turn.
    pub fn with_actor_scope(mut self, scope: ActorScope) -> Self {
        self.actor_scope = scope;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let config = SimConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.max_events, 0);
        assert_eq!(config.actor_scope, ActorScope::AllActors);
    }

    #[test]
    fn config_builder_chain() {
        let config = SimConfig::default()
            .with_seed(123)
            .with_max_events(500)
            .with_actor_scope(ActorScope::SameRoomOnly);
        assert_eq!(config.seed, 123);
        assert_eq!(config.max_events, 500);
        assert_eq!(config.actor_scope, ActorScope::SameRoomOnly);
    }
}
