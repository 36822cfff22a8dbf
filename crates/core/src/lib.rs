#![warn(clippy::all, missing_docs)]

//! Core game logic for the Hangman terminal game.
//!
//! This crate hosts the game engine, the shared domain models and the
//! configuration layer used by the terminal UI and any future frontends.

pub mod config;
pub mod error;
pub mod game;
pub mod models;

pub use crate::config::AppConfig;
pub use error::GameError;
pub use game::{Game, Guess, TurnTimer, MAX_LIVES, TURN_DURATION};
pub use models::{Difficulty, Outcome};
