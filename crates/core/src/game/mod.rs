//! The game engine: secret selection, guesses, outcome and turn timer.

mod engine;
mod guess;
/// Per-turn countdown bookkeeping.
pub mod timer;
/// Built-in secret pools.
pub mod words;

pub use engine::{Game, MAX_LIVES};
pub use guess::Guess;
pub use timer::{TurnTimer, TURN_DURATION};
