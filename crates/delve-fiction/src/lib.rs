//! Interactive fiction front end for Delve.
//!
//! Turns a line of player input into a rendered response: the lexer and
//! parser resolve words against the vocabulary and the objects in scope, the
//! verb handlers change the world, the simulation takes its turn, and the
//! narrator describes the result. [`Session`] ties these together behind a
//! single `process_command` call.

/// Verb handlers, special object reactions and dispatch.
pub mod action;
/// Session configuration.
pub mod config;
/// Error types for the fiction engine.
pub mod error;
/// Room, object and inventory descriptions.
pub mod narrator;
/// Command parsing and noun resolution.
pub mod parser;
/// A game in progress.
pub mod session;

pub use action::{ActionOutcome, HandlerRegistry, SpecialRegistry, StateChange};
pub use config::SessionConfig;
pub use error::{FictionError, FictionResult, ParseError};
pub use narrator::{Narrator, Verbosity};
pub use parser::{Command, Parser, Verb, Vocabulary};
pub use session::{GAME_OVER, Session, SessionSnapshot, TurnReport};
