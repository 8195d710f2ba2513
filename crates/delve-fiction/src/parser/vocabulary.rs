//! The word registry: every word the parser knows and what kind it is.

use std::collections::{BTreeSet, HashMap};

use delve_core::{Direction, World};
use strsim::jaro_winkler;

use super::command::{Preposition, Verb};

/// Minimum similarity for a "did you mean" suggestion (0.0-1.0).
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Lexical category of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// An action word.
    Verb,
    /// A direction of travel.
    Direction,
    /// Names an object.
    Noun,
    /// Describes an object.
    Adjective,
    /// Links a verb's objects.
    Preposition,
    /// "the", "a", "an".
    Article,
    /// "it", "them".
    Pronoun,
    /// "all", "everything".
    All,
    /// "except", "but".
    Except,
    /// "and", ",".
    Conjunction,
    /// Not in the vocabulary.
    Unknown,
}

const VERBS: &[(&str, Verb)] = &[
    ("look", Verb::Look),
    ("l", Verb::Look),
    ("examine", Verb::Examine),
    ("x", Verb::Examine),
    ("inspect", Verb::Examine),
    ("describe", Verb::Examine),
    ("read", Verb::Read),
    ("take", Verb::Take),
    ("get", Verb::Take),
    ("grab", Verb::Take),
    ("carry", Verb::Take),
    ("pick", Verb::Take),
    ("drop", Verb::Drop),
    ("discard", Verb::Drop),
    ("put", Verb::Put),
    ("place", Verb::Put),
    ("insert", Verb::Put),
    ("open", Verb::Open),
    ("close", Verb::Close),
    ("shut", Verb::Close),
    ("inventory", Verb::Inventory),
    ("i", Verb::Inventory),
    ("go", Verb::Go),
    ("walk", Verb::Go),
    ("run", Verb::Go),
    ("light", Verb::Light),
    ("extinguish", Verb::Extinguish),
    ("douse", Verb::Extinguish),
    ("attack", Verb::Attack),
    ("hit", Verb::Attack),
    ("kill", Verb::Attack),
    ("fight", Verb::Attack),
    ("strike", Verb::Attack),
    ("give", Verb::Give),
    ("offer", Verb::Give),
    ("hand", Verb::Give),
    ("move", Verb::Move),
    ("push", Verb::Move),
    ("pull", Verb::Move),
    ("shift", Verb::Move),
    ("wait", Verb::Wait),
    ("z", Verb::Wait),
    ("score", Verb::Score),
    ("diagnose", Verb::Diagnose),
    ("verbose", Verb::Verbose),
    ("brief", Verb::Brief),
    ("superbrief", Verb::Superbrief),
    ("quit", Verb::Quit),
    ("q", Verb::Quit),
    ("help", Verb::Help),
    ("again", Verb::Again),
    ("g", Verb::Again),
];

/// Two-word verbs. The particle is consumed with the verb.
const PHRASAL_VERBS: &[(&str, &str, Verb)] = &[
    ("pick", "up", Verb::Take),
    ("look", "at", Verb::Examine),
    ("l", "at", Verb::Examine),
    ("look", "in", Verb::Examine),
    ("turn", "on", Verb::Light),
    ("switch", "on", Verb::Light),
    ("turn", "off", Verb::Extinguish),
    ("switch", "off", Verb::Extinguish),
    ("put", "out", Verb::Extinguish),
    ("blow", "out", Verb::Extinguish),
];

const PREPOSITIONS: &[(&str, Preposition)] = &[
    ("in", Preposition::In),
    ("into", Preposition::In),
    ("inside", Preposition::In),
    ("on", Preposition::On),
    ("onto", Preposition::On),
    ("with", Preposition::With),
    ("using", Preposition::With),
    ("to", Preposition::To),
    ("from", Preposition::From),
    ("off", Preposition::From),
    ("at", Preposition::At),
];

const ARTICLES: &[&str] = &["the", "a", "an", "some"];
const PRONOUNS: &[&str] = &["it", "them"];
const ALL_WORDS: &[&str] = &["all", "everything"];
const EXCEPT_WORDS: &[&str] = &["except", "but"];
const CONJUNCTIONS: &[&str] = &["and", ","];

/// Every word the parser understands.
///
/// Built once per world: the fixed grammar words plus every noun and
/// adjective the world's objects answer to. Lookups are pure.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    verbs: HashMap<&'static str, Verb>,
    phrasal: Vec<(&'static str, &'static str, Verb)>,
    prepositions: HashMap<&'static str, Preposition>,
    nouns: BTreeSet<String>,
    adjectives: BTreeSet<String>,
}

impl Vocabulary {
    /// The grammar words alone, with no object names.
    pub fn new() -> Self {
        Self {
            verbs: VERBS.iter().copied().collect(),
            phrasal: PHRASAL_VERBS.to_vec(),
            prepositions: PREPOSITIONS.iter().copied().collect(),
            nouns: BTreeSet::new(),
            adjectives: BTreeSet::new(),
        }
    }

    /// The grammar words plus every noun and adjective in the world.
    pub fn for_world(world: &World) -> Self {
        let mut vocabulary = Self::new();
        for object in world.objects() {
            vocabulary.nouns.extend(object.synonyms.iter().map(|w| w.to_lowercase()));
            vocabulary
                .adjectives
                .extend(object.adjectives.iter().map(|w| w.to_lowercase()));
        }
        vocabulary
    }

    /// The verb a single word stands for.
    pub fn verb(&self, word: &str) -> Option<Verb> {
        self.verbs.get(word).copied()
    }

    /// The verb a word pair stands for, e.g. "pick up".
    pub fn phrasal_verb(&self, word: &str, particle: &str) -> Option<Verb> {
        self.phrasal
            .iter()
            .find(|(verb, p, _)| *verb == word && *p == particle)
            .map(|&(_, _, meaning)| meaning)
    }

    /// The preposition a word stands for.
    pub fn preposition(&self, word: &str) -> Option<Preposition> {
        self.prepositions.get(word).copied()
    }

    /// Whether the word names some object.
    pub fn is_noun(&self, word: &str) -> bool {
        self.nouns.contains(word)
    }

    /// Whether the word describes some object.
    pub fn is_adjective(&self, word: &str) -> bool {
        self.adjectives.contains(word)
    }

    /// Every category the word belongs to, most verb-like first.
    pub fn categories(&self, word: &str) -> Vec<Category> {
        let mut found = Vec::new();
        let starts_phrase = self.phrasal.iter().any(|(verb, _, _)| *verb == word);
        if self.verbs.contains_key(word) || starts_phrase {
            found.push(Category::Verb);
        }
        if Direction::parse(word).is_some() {
            found.push(Category::Direction);
        }
        if self.is_noun(word) {
            found.push(Category::Noun);
        }
        if self.is_adjective(word) {
            found.push(Category::Adjective);
        }
        if self.prepositions.contains_key(word) {
            found.push(Category::Preposition);
        }
        if ARTICLES.contains(&word) {
            found.push(Category::Article);
        }
        if PRONOUNS.contains(&word) {
            found.push(Category::Pronoun);
        }
        if ALL_WORDS.contains(&word) {
            found.push(Category::All);
        }
        if EXCEPT_WORDS.contains(&word) {
            found.push(Category::Except);
        }
        if CONJUNCTIONS.contains(&word) {
            found.push(Category::Conjunction);
        }
        found
    }

    /// The primary category of a word; [`Category::Unknown`] if the word is
    /// not in the vocabulary.
    pub fn classify(&self, word: &str) -> Category {
        self.categories(word)
            .first()
            .copied()
            .unwrap_or(Category::Unknown)
    }

    /// Whether the word is known at all.
    pub fn knows(&self, word: &str) -> bool {
        self.classify(word) != Category::Unknown
    }

    /// Every known word, in no particular order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.verbs
            .keys()
            .copied()
            .chain(self.phrasal.iter().map(|(_, particle, _)| *particle))
            .chain(self.prepositions.keys().copied())
            .chain(self.nouns.iter().map(String::as_str))
            .chain(self.adjectives.iter().map(String::as_str))
            .chain(Direction::ALL.iter().map(|d| d.name()))
            .chain(ARTICLES.iter().copied())
            .chain(PRONOUNS.iter().copied())
            .chain(ALL_WORDS.iter().copied())
            .chain(EXCEPT_WORDS.iter().copied())
            .chain(CONJUNCTIONS.iter().copied())
    }

    /// The known word closest to `word`, if any is close enough.
    ///
    /// Ties go to the alphabetically first word so suggestions are stable.
    pub fn suggest(&self, word: &str) -> Option<String> {
        let mut best: Option<(&str, f64)> = None;
        for candidate in self.words() {
            // One-letter abbreviations match far too much.
            if candidate.len() < 3 {
                continue;
            }
            let score = jaro_winkler(word, candidate);
            if score < SUGGESTION_THRESHOLD {
                continue;
            }
            let better = match best {
                None => true,
                Some((current, best_score)) => {
                    score > best_score || (score == best_score && candidate < current)
                }
            };
            if better {
                best = Some((candidate, score));
            }
        }
        best.map(|(word, _)| word.to_string())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::demo::demo_world;

    fn vocabulary() -> Vocabulary {
        Vocabulary::for_world(&demo_world().unwrap())
    }

    #[test]
    fn abbreviations_expand() {
        let v = vocabulary();
        assert_eq!(v.verb("x"), Some(Verb::Examine));
        assert_eq!(v.verb("i"), Some(Verb::Inventory));
        assert_eq!(v.verb("z"), Some(Verb::Wait));
        assert_eq!(v.classify("n"), Category::Direction);
        assert_eq!(v.phrasal_verb("pick", "up"), Some(Verb::Take));
        assert_eq!(v.phrasal_verb("turn", "off"), Some(Verb::Extinguish));
    }

    #[test]
    fn world_words_are_learned() {
        let v = vocabulary();
        assert_eq!(v.classify("mailbox"), Category::Noun);
        assert_eq!(v.classify("brass"), Category::Adjective);
        assert!(v.categories("light").contains(&Category::Noun));
        assert_eq!(v.classify("light"), Category::Verb);
        assert_eq!(v.classify("the"), Category::Article);
        assert_eq!(v.classify("it"), Category::Pronoun);
        assert_eq!(v.classify("and"), Category::Conjunction);
        assert_eq!(v.classify(","), Category::Conjunction);
        assert_eq!(v.classify("xyzzy"), Category::Unknown);
    }

    #[test]
    fn in_is_both_direction_and_preposition() {
        let v = vocabulary();
        let categories = v.categories("in");
        assert!(categories.contains(&Category::Direction));
        assert!(categories.contains(&Category::Preposition));
    }

    #[test]
    fn suggestions_find_near_misses() {
        let v = vocabulary();
        assert_eq!(v.suggest("mailbx").as_deref(), Some("mailbox"));
        assert_eq!(v.suggest("lantren").as_deref(), Some("lantern"));
        assert_eq!(v.suggest("qqqqqq"), None);
    }

    #[test]
    fn grammar_alone_knows_no_objects() {
        let v = Vocabulary::new();
        assert!(!v.knows("mailbox"));
        assert!(v.knows("take"));
    }
}
