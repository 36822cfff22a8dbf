//! Errors raised by the game engine.

use thiserror::Error;

use crate::models::{Difficulty, Outcome};

/// Failures reported by [`crate::game::Game`] commands.
///
/// None of these leave the game in a modified state; the caller is expected
/// to re-prompt or discard the game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// A guess was not exactly one alphabetic character.
    #[error("guess must be a single letter, got {input:?}")]
    InvalidInput {
        /// The rejected input, verbatim.
        input: String,
    },

    /// A command was issued after the game had already finished.
    #[error("game is already over ({outcome})")]
    GameOver {
        /// The terminal outcome the game settled on.
        outcome: Outcome,
    },

    /// A secret injected with [`crate::game::Game::with_secret`] cannot be played.
    #[error("secret {secret:?} is not playable at {difficulty} difficulty")]
    InvalidSecret {
        /// The rejected secret.
        secret: String,
        /// Difficulty the secret was offered for.
        difficulty: Difficulty,
    },
}
