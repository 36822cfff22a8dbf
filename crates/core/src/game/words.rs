//! Fixed secret pools, one per difficulty.

use crate::models::Difficulty;

/// Single words offered at [`Difficulty::Basic`].
pub static BASIC_WORDS: &[&str] = &[
    "PYTHON",
    "PROGRAMMING",
    "COMPUTER",
    "KEYBOARD",
    "MONITOR",
    "SOFTWARE",
    "HARDWARE",
    "INTERNET",
    "WEBSITE",
    "DATABASE",
    "FUNCTION",
    "VARIABLE",
    "BOOLEAN",
    "INTEGER",
    "STRING",
];

/// Phrases offered at [`Difficulty::Intermediate`].
pub static INTERMEDIATE_PHRASES: &[&str] = &[
    "HELLO WORLD",
    "COMPUTER SCIENCE",
    "SOFTWARE DEVELOPMENT",
    "ARTIFICIAL INTELLIGENCE",
    "MACHINE LEARNING",
    "DATA STRUCTURE",
    "OBJECT ORIENTED",
    "VERSION CONTROL",
    "USER INTERFACE",
];

/// Candidate secrets for the given difficulty. Never empty.
pub fn candidates(difficulty: Difficulty) -> &'static [&'static str] {
    match difficulty {
        Difficulty::Basic => BASIC_WORDS,
        Difficulty::Intermediate => INTERMEDIATE_PHRASES,
    }
}

/// Whether `secret` follows the shape rules of `difficulty`.
///
/// Secrets are letters only; intermediate phrases may additionally contain
/// single spaces between words.
pub fn is_playable(secret: &str, difficulty: Difficulty) -> bool {
    if secret.is_empty() || !secret.chars().any(char::is_alphabetic) {
        return false;
    }
    match difficulty {
        Difficulty::Basic => secret.chars().all(char::is_alphabetic),
        Difficulty::Intermediate => secret
            .split(' ')
            .all(|word| !word.is_empty() && word.chars().all(char::is_alphabetic)),
    }
}
