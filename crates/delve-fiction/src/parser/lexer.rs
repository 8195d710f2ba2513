//! Input tokenization.
//!
//! Splits a line of player input into separate commands, then each command
//! into lowercase word tokens tagged with their vocabulary category.

use super::vocabulary::{Category, Vocabulary};

/// A word of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The lowercase word.
    pub word: String,
    /// Its primary category.
    pub category: Category,
}

/// Split a line into the commands it contains.
///
/// Commands are separated by `.` or the word `then`. Empty pieces are
/// dropped, so `"n. . s"` is two commands.
pub fn split_commands(input: &str) -> Vec<String> {
    let mut commands = Vec::new();
    for sentence in input.split('.') {
        let mut current: Vec<&str> = Vec::new();
        for word in sentence.split_whitespace() {
            if word.eq_ignore_ascii_case("then") {
                if !current.is_empty() {
                    commands.push(current.join(" "));
                }
                current.clear();
            } else {
                current.push(word);
            }
        }
        if !current.is_empty() {
            commands.push(current.join(" "));
        }
    }
    commands
}

/// Split a command into lowercase words, dropping punctuation. A comma is
/// kept as a word of its own, since it joins noun phrases like "and".
pub fn tokenize(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in input.chars() {
        match ch {
            c if c.is_whitespace() || c == ',' => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                if c == ',' {
                    words.push(",".to_string());
                }
            }
            '.' | '!' | '?' | ';' | ':' | '"' | '\'' => {}
            c => current.extend(c.to_lowercase()),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    while words.last().is_some_and(|w| w == ",") {
        words.pop();
    }
    words
}

/// Tokenize a command and tag each word with its category.
pub fn lex(vocabulary: &Vocabulary, input: &str) -> Vec<Token> {
    tokenize(input)
        .into_iter()
        .map(|word| Token {
            category: vocabulary.classify(&word),
            word,
        })
        .collect()
}
