//! Error types for the fiction engine.

use delve_core::WorldError;
use delve_simulation::SimError;
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while running a session.
///
/// None of these come from ordinary play. A player's mistakes are either a
/// [`ParseError`] or a failed action outcome.
#[derive(Debug, Error)]
pub enum FictionError {
    /// The world model refused an operation.
    #[error("world error: {0}")]
    World(#[from] WorldError),

    /// Simulation error.
    #[error("simulation error: {0}")]
    Simulation(#[from] SimError),

    /// A session snapshot could not be read or written.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<serde_json::Error> for FictionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Snapshot(err.to_string())
    }
}

/// Why a line of input could not be turned into a command.
///
/// Always recoverable: the message is shown to the player and the turn does
/// not advance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing was typed.
    #[error("I beg your pardon?")]
    Empty,

    /// A word is not in the vocabulary.
    #[error("I don't know the word \"{word}\".{}", suggestion_text(.suggestion))]
    UnknownWord {
        /// The unknown word.
        word: String,
        /// A close vocabulary word, if any.
        suggestion: Option<String>,
    },

    /// The sentence has no verb.
    #[error("There was no verb in that sentence!")]
    NoVerb,

    /// A verb that needs an object was given none.
    #[error("{}", missing_direct_text(.verb))]
    MissingDirect {
        /// The verb.
        verb: String,
    },

    /// A prepositional verb was given no indirect object.
    #[error("What do you want to {verb} it {preposition}?")]
    MissingIndirect {
        /// The verb.
        verb: String,
        /// The preposition the verb expects.
        preposition: String,
    },

    /// More than one object in scope matches the noun phrase.
    #[error("Which {noun} do you mean, {}?", candidate_list(.candidates))]
    Ambiguous {
        /// The noun phrase as typed.
        noun: String,
        /// Names of every matching object.
        candidates: Vec<String>,
    },

    /// No object in scope matches the noun phrase.
    #[error("You can't see any {noun} here!")]
    NotInScope {
        /// The noun phrase as typed.
        noun: String,
    },

    /// A pronoun was used with nothing to refer to.
    #[error("I'm not sure what you're referring to.")]
    BadPronoun,

    /// A known word appeared where it makes no sense.
    #[error("I don't understand how \"{word}\" fits in that sentence.")]
    Unexpected {
        /// The out-of-place word.
        word: String,
    },
}

fn suggestion_text(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(word) => format!(" Did you mean \"{word}\"?"),
        None => String::new(),
    }
}

fn missing_direct_text(verb: &str) -> String {
    if verb == "go" {
        "Where do you want to go?".to_string()
    } else {
        format!("What do you want to {verb}?")
    }
}

fn candidate_list(candidates: &[String]) -> String {
    match candidates {
        [] => String::new(),
        [only] => format!("the {only}"),
        [rest @ .., last] => {
            let head: Vec<String> = rest.iter().map(|c| format!("the {c}")).collect();
            format!("{} or the {last}", head.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_word_offers_a_suggestion() {
        let err = ParseError::UnknownWord {
            word: "mailbx".to_string(),
            suggestion: Some("mailbox".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "I don't know the word \"mailbx\". Did you mean \"mailbox\"?"
        );
        let err = ParseError::UnknownWord {
            word: "xyzzy".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "I don't know the word \"xyzzy\".");
    }

    #[test]
    fn ambiguity_names_every_candidate() {
        let err = ParseError::Ambiguous {
            noun: "blade".to_string(),
            candidates: vec!["nasty knife".to_string(), "elvish sword".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Which blade do you mean, the nasty knife or the elvish sword?"
        );
        let err = ParseError::Ambiguous {
            noun: "bag".to_string(),
            candidates: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        assert_eq!(err.to_string(), "Which bag do you mean, the a, the b or the c?");
    }

    #[test]
    fn missing_objects_are_distinct() {
        let direct = ParseError::MissingDirect {
            verb: "take".to_string(),
        };
        let indirect = ParseError::MissingIndirect {
            verb: "put".to_string(),
            preposition: "in".to_string(),
        };
        assert_eq!(direct.to_string(), "What do you want to take?");
        assert_eq!(indirect.to_string(), "What do you want to put it in?");
        assert_ne!(direct, indirect);
        assert_eq!(
            ParseError::MissingDirect { verb: "go".to_string() }.to_string(),
            "Where do you want to go?"
        );
    }
}
