use std::{fmt, str::FromStr};

use crate::error::GameError;

/// A validated, uppercase-normalised letter guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Guess(char);

impl Guess {
    /// The normalised letter.
    pub fn letter(self) -> char {
        self.0
    }
}

impl FromStr for Guess {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_alphabetic() => Ok(Guess(fold(ch))),
            _ => Err(GameError::InvalidInput {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uppercase a single character, keeping it as-is when its uppercase form
/// spans several characters (e.g. `ß`).
pub(crate) fn fold(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}
