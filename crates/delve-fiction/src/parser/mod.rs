//! Command parsing and noun resolution.

mod command;
mod grammar;
mod lexer;
mod resolver;
mod vocabulary;

pub use command::{Command, Preposition, Slot, Verb};
pub use grammar::Parser;
pub use lexer::{Token, lex, split_commands, tokenize};
pub use resolver::{NounPhrase, Resolution, candidate_names, matches, resolve};
pub use vocabulary::{Category, SUGGESTION_THRESHOLD, Vocabulary};
