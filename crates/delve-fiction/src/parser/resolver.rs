//! Noun phrase resolution against the objects in scope.

use delve_core::{ObjectId, World};

/// A parsed noun phrase, e.g. "small brass lamp".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NounPhrase {
    /// Adjectives modifying the noun.
    pub adjectives: Vec<String>,
    /// The head noun.
    pub noun: String,
}

impl NounPhrase {
    /// A phrase with just a noun.
    pub fn new(noun: impl Into<String>) -> Self {
        Self {
            adjectives: Vec::new(),
            noun: noun.into(),
        }
    }

    /// Add an adjective.
    pub fn with_adjective(mut self, adjective: impl Into<String>) -> Self {
        self.adjectives.push(adjective.into());
        self
    }

    /// The phrase as the player typed it, without articles.
    pub fn text(&self) -> String {
        let mut words = self.adjectives.clone();
        words.push(self.noun.clone());
        words.join(" ")
    }
}

/// Outcome of matching a noun phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one object matches.
    Unique(ObjectId),
    /// Several objects match; the caller must ask which.
    Ambiguous(Vec<ObjectId>),
    /// Nothing in scope matches.
    NotFound,
}

/// Whether an object answers to a noun phrase: the noun is one of its
/// synonyms and every adjective is one of its adjectives.
pub fn matches(world: &World, id: ObjectId, phrase: &NounPhrase) -> bool {
    world
        .object(id)
        .is_ok_and(|o| o.has_noun(&phrase.noun) && o.has_adjectives(&phrase.adjectives))
}

/// Match a noun phrase against the objects in scope.
///
/// Never picks between several matches; that is the player's call.
pub fn resolve(world: &World, scope: &[ObjectId], phrase: &NounPhrase) -> Resolution {
    let mut found: Vec<ObjectId> = Vec::new();
    for &id in scope {
        if !found.contains(&id) && matches(world, id, phrase) {
            found.push(id);
        }
    }
    match found.as_slice() {
        [] => Resolution::NotFound,
        [only] => Resolution::Unique(*only),
        _ => Resolution::Ambiguous(found),
    }
}

/// Display names of the given objects, for an ambiguity prompt.
pub fn candidate_names(world: &World, ids: &[ObjectId]) -> Vec<String> {
    ids.iter()
        .filter_map(|&id| world.object(id).ok())
        .map(|o| o.name.clone())
        .collect()
}
