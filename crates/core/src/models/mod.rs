//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty level chosen when a game is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// A single word without spaces.
    Basic,
    /// A phrase of several words separated by single spaces.
    Intermediate,
}

impl Difficulty {
    /// All difficulties in menu order.
    pub const ALL: [Difficulty; 2] = [Difficulty::Basic, Difficulty::Intermediate];

    /// Stable lowercase identifier, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Basic => "basic",
            Difficulty::Intermediate => "intermediate",
        }
    }

    /// Returns a user-facing label describing what the player guesses.
    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Basic => "Basic (Single Words)",
            Difficulty::Intermediate => "Intermediate (Phrases)",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Basic => f.write_str("BASIC"),
            Difficulty::Intermediate => f.write_str("INTERMEDIATE"),
        }
    }
}

/// Classification of a game: still running or finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Outcome {
    /// Guesses are still being accepted.
    #[default]
    #[serde(rename = "playing")]
    InProgress,
    /// Every letter of the secret was uncovered.
    #[serde(rename = "won")]
    Won,
    /// The player ran out of lives.
    #[serde(rename = "lost")]
    Lost,
}

impl Outcome {
    /// Whether the outcome can no longer change.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => f.write_str("playing"),
            Outcome::Won => f.write_str("won"),
            Outcome::Lost => f.write_str("lost"),
        }
    }
}
