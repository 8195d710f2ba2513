//! Turning tokens into a resolved [`Command`].
//!
//! A command is a verb (one word or a verb-particle pair), an optional
//! direct noun phrase, and an optional preposition introducing an indirect
//! noun phrase. Noun phrases are bound to objects in scope as they are
//! parsed, so a successful parse always names real, visible objects.

use delve_core::{Direction, Location, ObjectFlags, ObjectId, World};
use tracing::debug;

use super::command::{Command, Preposition, Slot, Verb};
use super::lexer::{Token, lex};
use super::resolver::{NounPhrase, Resolution, candidate_names, resolve};
use super::vocabulary::{Category, Vocabulary};
use crate::error::ParseError;

/// Parses commands against a world's current scope.
#[derive(Debug)]
pub struct Parser<'a> {
    vocabulary: &'a Vocabulary,
    world: &'a World,
    scope: Vec<ObjectId>,
    referent: Option<ObjectId>,
}

impl<'a> Parser<'a> {
    /// A parser binding nouns to whatever is in scope in `world` right now.
    pub fn new(vocabulary: &'a Vocabulary, world: &'a World) -> Self {
        Self {
            vocabulary,
            world,
            scope: world.in_scope(),
            referent: None,
        }
    }

    /// Set the object "it" and "them" refer to.
    pub fn with_referent(mut self, referent: Option<ObjectId>) -> Self {
        self.referent = referent;
        self
    }

    /// Objects the parser may bind to.
    pub fn scope(&self) -> &[ObjectId] {
        &self.scope
    }

    /// Parse a single command.
    pub fn parse(&self, input: &str) -> Result<Command, ParseError> {
        let tokens = lex(self.vocabulary, input);
        let result = self.parse_tokens(&tokens);
        if let Err(err) = &result {
            debug!(input, error = %err, "parse failed");
        }
        result
    }

    /// Parse an already tokenized command.
    pub fn parse_tokens(&self, tokens: &[Token]) -> Result<Command, ParseError> {
        if tokens.is_empty() {
            return Err(ParseError::Empty);
        }
        if let Some(unknown) = tokens.iter().find(|t| t.category == Category::Unknown) {
            return Err(ParseError::UnknownWord {
                word: unknown.word.clone(),
                suggestion: self.vocabulary.suggest(&unknown.word),
            });
        }
        let words: Vec<&str> = tokens.iter().map(|t| t.word.as_str()).collect();

        let (verb, rest) = self.verb_of(&words)?;
        match verb {
            Verb::Go => self.parse_movement(rest),
            Verb::Look if !rest.is_empty() => self.parse_objects(Verb::Examine, rest),
            verb => self.parse_objects(verb, rest),
        }
    }

    /// Find the verb at the start of the sentence. A bare direction is a
    /// movement command.
    fn verb_of<'w>(&self, words: &'w [&'w str]) -> Result<(Verb, &'w [&'w str]), ParseError> {
        let first = words[0];
        if let Some(&particle) = words.get(1) {
            if let Some(verb) = self.vocabulary.phrasal_verb(first, particle) {
                return Ok((verb, &words[2..]));
            }
        }
        if let Some(verb) = self.vocabulary.verb(first) {
            return Ok((verb, &words[1..]));
        }
        if Direction::parse(first).is_some() {
            return Ok((Verb::Go, words));
        }
        if self.vocabulary.classify(first) == Category::Verb {
            // The first half of a verb-particle pair, without its particle.
            let word = words.get(1).unwrap_or(&first);
            return Err(ParseError::Unexpected {
                word: (*word).to_string(),
            });
        }
        Err(ParseError::NoVerb)
    }

    fn parse_movement(&self, rest: &[&str]) -> Result<Command, ParseError> {
        let Some((&word, extra)) = rest.split_first() else {
            return Err(ParseError::MissingDirect {
                verb: Verb::Go.name().to_string(),
            });
        };
        let direction = Direction::parse(word).ok_or_else(|| unexpected(word))?;
        if let Some(&word) = extra.first() {
            return Err(unexpected(word));
        }
        Ok(Command::go(direction))
    }

    fn parse_objects(&self, verb: Verb, rest: &[&str]) -> Result<Command, ParseError> {
        let (allowed, indirect_slot) = verb.indirect();

        if verb.direct_slot() == Slot::None {
            return match rest.first() {
                Some(&word) => Err(unexpected(word)),
                None => Ok(Command::new(verb)),
            };
        }

        let split = rest
            .iter()
            .position(|w| self.vocabulary.preposition(w).is_some());
        let (direct_words, indirect) = match split {
            Some(at) => (&rest[..at], Some((rest[at], &rest[at + 1..]))),
            None => (rest, None),
        };
        let direct_words = strip_articles(direct_words);

        if direct_words.is_empty() {
            if verb.direct_slot() == Slot::Required {
                return Err(ParseError::MissingDirect {
                    verb: verb.name().to_string(),
                });
            }
            if let Some((word, _)) = indirect {
                return Err(unexpected(word));
            }
            return Ok(Command::new(verb));
        }

        // Indirect object first: "put all in case" needs it to exclude the case.
        let mut command = Command::new(verb);
        match indirect {
            Some((word, words)) => {
                let preposition = self.vocabulary.preposition(word).ok_or_else(|| unexpected(word))?;
                if !allowed.contains(&preposition) {
                    return Err(unexpected(word));
                }
                let words = strip_articles(words);
                if words.is_empty() {
                    return Err(missing_indirect(verb, preposition));
                }
                let object = self.noun_phrase(&words)?;
                command.preposition = Some(preposition);
                command.indirect = Some(object);
            }
            None if indirect_slot == Slot::Required => {
                return Err(missing_indirect(verb, allowed[0]));
            }
            None => {}
        }

        if self.vocabulary.categories(direct_words[0]).contains(&Category::All) {
            if !verb.accepts_all() {
                return Err(unexpected(direct_words[0]));
            }
            let excluded = self.exceptions(&direct_words[1..])?;
            let all = self
                .all_candidates(verb, command.indirect)
                .into_iter()
                .filter(|id| !excluded.contains(id))
                .collect();
            command.all = Some(all);
        } else {
            command.direct = Some(self.noun_phrase(&direct_words)?);
        }
        Ok(command)
    }

    /// Objects named after "all except".
    fn exceptions(&self, words: &[&str]) -> Result<Vec<ObjectId>, ParseError> {
        let Some((&first, rest)) = words.split_first() else {
            return Ok(Vec::new());
        };
        if !self.vocabulary.categories(first).contains(&Category::Except) {
            return Err(unexpected(first));
        }
        let mut excluded = Vec::new();
        let joins = |w: &&str| self.vocabulary.categories(w).contains(&Category::Conjunction);
        for phrase in rest.split(joins) {
            let phrase = strip_articles(phrase);
            if phrase.is_empty() {
                return Err(unexpected(first));
            }
            excluded.push(self.noun_phrase(&phrase)?);
        }
        Ok(excluded)
    }

    /// Everything `all` stands for with this verb.
    fn all_candidates(&self, verb: Verb, indirect: Option<ObjectId>) -> Vec<ObjectId> {
        let here = Location::Room(self.world.state.current_room);
        let source = match (verb, indirect) {
            (Verb::Take, Some(container)) => Location::Object(container),
            (Verb::Take, None) => here,
            _ => Location::Player,
        };
        self.scope
            .iter()
            .copied()
            .filter(|&id| Some(id) != indirect)
            .filter(|&id| {
                self.world.object(id).is_ok_and(|o| {
                    o.location == source
                        && (verb != Verb::Take
                            || (o.is(ObjectFlags::TAKEABLE) && !o.is(ObjectFlags::ACTOR)))
                })
            })
            .collect()
    }

    /// Bind a noun phrase (articles already removed) to one object.
    fn noun_phrase(&self, words: &[&str]) -> Result<ObjectId, ParseError> {
        if let [word] = words {
            if self.vocabulary.categories(word).contains(&Category::Pronoun) {
                return self.pronoun();
            }
        }
        let Some((&noun, adjectives)) = words.split_last() else {
            return Err(ParseError::NoVerb);
        };
        if !self.vocabulary.is_noun(noun) {
            return Err(unexpected(noun));
        }
        let mut phrase = NounPhrase::new(noun);
        for &adjective in adjectives {
            if !self.vocabulary.is_adjective(adjective) {
                return Err(unexpected(adjective));
            }
            phrase = phrase.with_adjective(adjective);
        }

        match resolve(self.world, &self.scope, &phrase) {
            Resolution::Unique(id) => Ok(id),
            Resolution::NotFound => Err(ParseError::NotInScope { noun: phrase.text() }),
            Resolution::Ambiguous(ids) => Err(ParseError::Ambiguous {
                noun: phrase.text(),
                candidates: candidate_names(self.world, &ids),
            }),
        }
    }

    fn pronoun(&self) -> Result<ObjectId, ParseError> {
        let referent = self.referent.ok_or(ParseError::BadPronoun)?;
        if self.scope.contains(&referent) {
            return Ok(referent);
        }
        let noun = self
            .world
            .object(referent)
            .map_or_else(|_| "such thing".to_string(), |o| o.name.clone());
        Err(ParseError::NotInScope { noun })
    }
}

fn strip_articles<'w>(words: &[&'w str]) -> Vec<&'w str> {
    words
        .iter()
        .copied()
        .filter(|w| !matches!(*w, "the" | "a" | "an" | "some"))
        .collect()
}

fn unexpected(word: &str) -> ParseError {
    ParseError::Unexpected {
        word: word.to_string(),
    }
}

fn missing_indirect(verb: Verb, preposition: Preposition) -> ParseError {
    ParseError::MissingIndirect {
        verb: verb.name().to_string(),
        preposition: preposition.name().to_string(),
    }
}
