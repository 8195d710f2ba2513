//! Narrator system for descriptive text.

mod config;
mod templates;

pub use config::{NarratorConfig, Verbosity};
pub use templates::{DARKNESS, Narrator, capitalize};
