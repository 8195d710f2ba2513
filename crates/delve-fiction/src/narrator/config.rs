//! Narrator configuration.

use serde::{Deserialize, Serialize};

/// How much of a room is described on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    /// Full descriptions every time.
    Verbose,
    /// Full descriptions on the first visit only.
    #[default]
    Brief,
    /// Room names only, unless the player looks.
    Superbrief,
}

impl Verbosity {
    /// Whether arriving in a room shows its long description.
    pub fn full_on_arrival(self, first_visit: bool) -> bool {
        match self {
            Self::Verbose => true,
            Self::Brief => first_visit,
            Self::Superbrief => false,
        }
    }

    /// The acknowledgement printed when the mode is selected.
    pub fn announcement(self) -> &'static str {
        match self {
            Self::Verbose => "Maximum verbosity.",
            Self::Brief => "Brief descriptions.",
            Self::Superbrief => "Superbrief descriptions.",
        }
    }
}

/// Configuration for the narrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarratorConfig {
    /// The verbosity level.
    pub verbosity: Verbosity,
}

impl NarratorConfig {
    /// Create a new narrator config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the verbosity.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NarratorConfig::new();
        assert_eq!(config.verbosity, Verbosity::Brief);
    }

    #[test]
    fn builder_pattern() {
        let config = NarratorConfig::new().with_verbosity(Verbosity::Superbrief);
        assert_eq!(config.verbosity, Verbosity::Superbrief);
    }

    #[test]
    fn arrival_detail_by_mode() {
        assert!(Verbosity::Verbose.full_on_arrival(false));
        assert!(Verbosity::Brief.full_on_arrival(true));
        assert!(!Verbosity::Brief.full_on_arrival(false));
        assert!(!Verbosity::Superbrief.full_on_arrival(true));
    }
}
