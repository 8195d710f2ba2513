//! Verbs, prepositions, and parsed commands.

use std::fmt;

use delve_core::{Direction, ObjectId};
use serde::{Deserialize, Serialize};

/// Every action the player can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    /// Describe the room.
    Look,
    /// Describe an object.
    Examine,
    /// Read an object's text.
    Read,
    /// Pick something up.
    Take,
    /// Put something down.
    Drop,
    /// Put something in or on something else.
    Put,
    /// Open a container or door.
    Open,
    /// Close a container or door.
    Close,
    /// List what the player carries.
    Inventory,
    /// Walk in a direction.
    Go,
    /// Turn on a light source.
    Light,
    /// Turn off a light source.
    Extinguish,
    /// Fight a creature.
    Attack,
    /// Hand something to a creature.
    Give,
    /// Push, pull, or shift something.
    Move,
    /// Let a turn pass.
    Wait,
    /// Show the score.
    Score,
    /// Report the player's health.
    Diagnose,
    /// Always describe rooms in full.
    Verbose,
    /// Describe rooms in full only on the first visit.
    Brief,
    /// Never describe rooms in full.
    Superbrief,
    /// Leave the game.
    Quit,
    /// List the commands.
    Help,
    /// Repeat the last command.
    Again,
}

/// Whether a verb takes a direct object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Never.
    None,
    /// If one is given.
    Optional,
    /// Always.
    Required,
}

impl Verb {
    /// Canonical name, as used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Look => "look",
            Self::Examine => "examine",
            Self::Read => "read",
            Self::Take => "take",
            Self::Drop => "drop",
            Self::Put => "put",
            Self::Open => "open",
            Self::Close => "close",
            Self::Inventory => "inventory",
            Self::Go => "go",
            Self::Light => "light",
            Self::Extinguish => "extinguish",
            Self::Attack => "attack",
            Self::Give => "give",
            Self::Move => "move",
            Self::Wait => "wait",
            Self::Score => "score",
            Self::Diagnose => "diagnose",
            Self::Verbose => "verbose",
            Self::Brief => "brief",
            Self::Superbrief => "superbrief",
            Self::Quit => "quit",
            Self::Help => "help",
            Self::Again => "again",
        }
    }

    /// Meta verbs talk about the game rather than act in it, and never
    /// consume a turn.
    pub fn is_meta(&self) -> bool {
        matches!(
            self,
            Self::Score
                | Self::Diagnose
                | Self::Verbose
                | Self::Brief
                | Self::Superbrief
                | Self::Quit
                | Self::Help
                | Self::Again
        )
    }

    /// Whether the verb takes a direct object.
    pub fn direct_slot(&self) -> Slot {
        match self {
            Self::Examine
            | Self::Read
            | Self::Take
            | Self::Drop
            | Self::Put
            | Self::Open
            | Self::Close
            | Self::Light
            | Self::Extinguish
            | Self::Attack
            | Self::Give
            | Self::Move => Slot::Required,
            Self::Look => Slot::Optional,
            _ => Slot::None,
        }
    }

    /// Prepositions that may introduce the indirect object, and whether one
    /// must be given.
    pub fn indirect(&self) -> (&'static [Preposition], Slot) {
        match self {
            Self::Put => (&[Preposition::In, Preposition::On], Slot::Required),
            Self::Give => (&[Preposition::To], Slot::Required),
            Self::Attack => (&[Preposition::With], Slot::Optional),
            Self::Take => (&[Preposition::From], Slot::Optional),
            Self::Light | Self::Open => (&[Preposition::With], Slot::Optional),
            _ => (&[], Slot::None),
        }
    }

    /// Whether `all` may stand for the direct object.
    pub fn accepts_all(&self) -> bool {
        matches!(self, Self::Take | Self::Drop | Self::Put)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A preposition linking a verb's direct and indirect objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preposition {
    /// In, into, inside.
    In,
    /// On, onto.
    On,
    /// With, using.
    With,
    /// To.
    To,
    /// From, off.
    From,
    /// At.
    At,
}

impl Preposition {
    /// Canonical spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::On => "on",
            Self::With => "with",
            Self::To => "to",
            Self::From => "from",
            Self::At => "at",
        }
    }
}

impl fmt::Display for Preposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully resolved player command.
///
/// Objects are bound to ids; the parser has already checked that each one
/// is in scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// What to do.
    pub verb: Verb,
    /// Where to go, for movement.
    pub direction: Option<Direction>,
    /// The direct object.
    pub direct: Option<ObjectId>,
    /// Objects bound by `all`, in scope order.
    pub all: Option<Vec<ObjectId>>,
    /// The preposition before the indirect object.
    pub preposition: Option<Preposition>,
    /// The indirect object.
    pub indirect: Option<ObjectId>,
}

impl Command {
    /// A command with just a verb.
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            direction: None,
            direct: None,
            all: None,
            preposition: None,
            indirect: None,
        }
    }

    /// A movement command.
    pub fn go(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            ..Self::new(Verb::Go)
        }
    }

    /// Set the direct object.
    pub fn with_direct(mut self, object: ObjectId) -> Self {
        self.direct = Some(object);
        self
    }

    /// Set the indirect object.
    pub fn with_indirect(mut self, preposition: Preposition, object: ObjectId) -> Self {
        self.preposition = Some(preposition);
        self.indirect = Some(object);
        self
    }

    /// Every object the verb applies to: the `all` list, or the single
    /// direct object.
    pub fn targets(&self) -> Vec<ObjectId> {
        match &self.all {
            Some(all) => all.clone(),
            None => self.direct.into_iter().collect(),
        }
    }

    /// Whether the command was given with `all`.
    pub fn is_multiple(&self) -> bool {
        self.all.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_verbs_do_not_take_turns() {
        assert!(Verb::Score.is_meta());
        assert!(Verb::Help.is_meta());
        assert!(!Verb::Take.is_meta());
        assert!(!Verb::Look.is_meta());
        assert!(!Verb::Inventory.is_meta());
    }

    #[test]
    fn put_needs_both_slots() {
        assert_eq!(Verb::Put.direct_slot(), Slot::Required);
        let (preps, slot) = Verb::Put.indirect();
        assert_eq!(slot, Slot::Required);
        assert!(preps.contains(&Preposition::In));
    }

    #[test]
    fn targets_prefer_the_all_list() {
        let single = Command::new(Verb::Take).with_direct(ObjectId(3));
        assert_eq!(single.targets(), vec![ObjectId(3)]);
        let mut many = Command::new(Verb::Take);
        many.all = Some(vec![ObjectId(1), ObjectId(2)]);
        assert_eq!(many.targets(), vec![ObjectId(1), ObjectId(2)]);
        assert!(many.is_multiple());
        assert!(Command::new(Verb::Wait).targets().is_empty());
    }
}
