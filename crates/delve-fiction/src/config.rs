//! Session configuration.

use delve_core::builder::DEFAULT_CARRY_CAPACITY;
use delve_simulation::SimConfig;

use crate::narrator::Verbosity;

/// How a session is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Simulation settings: seed, event log size, actor scope.
    pub sim: SimConfig,
    /// Starting verbosity.
    pub verbosity: Verbosity,
    /// Total weight the player can carry.
    pub carry_capacity: u32,
    /// The death that ends the game.
    pub max_deaths: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            verbosity: Verbosity::default(),
            carry_capacity: DEFAULT_CARRY_CAPACITY,
            max_deaths: 3,
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.sim = self.sim.with_seed(seed);
        self
    }

    /// Replace the simulation settings.
    pub fn with_sim(mut self, sim: SimConfig) -> Self {
        self.sim = sim;
        self
    }

    /// Set the starting verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the carrying capacity.
    pub fn with_carry_capacity(mut self, capacity: u32) -> Self {
        self.carry_capacity = capacity;
        self
    }

    /// Set how many deaths end the game.
    pub fn with_max_deaths(mut self, max: u32) -> Self {
        self.max_deaths = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_classic() {
        let config = SessionConfig::default();
        assert_eq!(config.carry_capacity, 100);
        assert_eq!(config.max_deaths, 3);
        assert_eq!(config.verbosity, Verbosity::Brief);
        assert_eq!(config.sim, SimConfig::default());
    }

    #[test]
    fn builder_chain() {
        let config = SessionConfig::default()
            .with_seed(7)
            .with_verbosity(Verbosity::Verbose)
            .with_carry_capacity(20)
            .with_max_deaths(1);
        assert_eq!(config.sim.seed, 7);
        assert_eq!(config.verbosity, Verbosity::Verbose);
        assert_eq!(config.carry_capacity, 20);
        assert_eq!(config.max_deaths, 1);
    }
}
