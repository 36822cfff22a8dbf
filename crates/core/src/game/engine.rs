use std::{
    collections::BTreeSet,
    time::{Duration, Instant},
};

use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

use crate::{
    error::GameError,
    models::{Difficulty, Outcome},
};

use super::{
    guess::{fold, Guess},
    timer::TurnTimer,
    words,
};

/// Lives a game starts with.
pub const MAX_LIVES: u8 = 6;

/// A single game of Hangman.
///
/// The game owns its secret, the letters guessed so far, the remaining lives
/// and the turn timer. It is driven by [`Game::submit_guess`] and
/// [`Game::expire_turn`]; everything else is a query.
#[derive(Debug, Clone)]
pub struct Game {
    difficulty: Difficulty,
    secret: String,
    guessed: BTreeSet<char>,
    lives: u8,
    outcome: Outcome,
    timer: TurnTimer,
}

impl Game {
    /// Start a game with a secret picked at random for `difficulty`.
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_rng(difficulty, &mut rand::thread_rng())
    }

    /// Start a game, drawing the secret from the supplied random source.
    pub fn with_rng<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        let pool = words::candidates(difficulty);
        // Pools are static and non-empty.
        let secret = pool.choose(rng).copied().unwrap_or(pool[0]);
        Self::from_parts(difficulty, secret.to_string())
    }

    /// Start a game with a fixed secret instead of a random one.
    pub fn with_secret(
        difficulty: Difficulty,
        secret: impl Into<String>,
    ) -> Result<Self, GameError> {
        let secret = secret.into();
        if !words::is_playable(&secret, difficulty) {
            return Err(GameError::InvalidSecret { secret, difficulty });
        }
        Ok(Self::from_parts(difficulty, secret))
    }

    fn from_parts(difficulty: Difficulty, secret: String) -> Self {
        info!(%difficulty, length = secret.chars().count(), "New game");
        Self {
            difficulty,
            secret,
            guessed: BTreeSet::new(),
            lives: MAX_LIVES,
            outcome: Outcome::InProgress,
            timer: TurnTimer::default(),
        }
    }

    /// Difficulty chosen at creation.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The secret word or phrase. Meant for the end-of-game reveal.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Lives left.
    pub fn lives(&self) -> u8 {
        self.lives
    }

    /// Lives a game starts with.
    pub fn max_lives(&self) -> u8 {
        MAX_LIVES
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether the game has been won or lost.
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Every letter guessed so far, sorted.
    pub fn guessed_letters(&self) -> Vec<char> {
        self.guessed.iter().copied().collect()
    }

    /// Guessed letters that do not occur in the secret, sorted.
    pub fn missed_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .copied()
            .filter(|letter| !self.contains(*letter))
            .collect()
    }

    /// The secret with unguessed letters masked.
    ///
    /// Basic words are rendered as symbols joined by single spaces
    /// (`"P _ _ _ _ _"`). Phrases render each letter followed by a space and
    /// each word gap as two spaces, then drop trailing whitespace, so word
    /// boundaries show as a three-space gap (`"_ _ _ _ _   _ _ _ _ _"`).
    pub fn render_display(&self) -> String {
        match self.difficulty {
            Difficulty::Basic => self
                .secret
                .chars()
                .map(|ch| self.reveal(ch).to_string())
                .collect::<Vec<_>>()
                .join(" "),
            Difficulty::Intermediate => {
                let mut display = String::with_capacity(self.secret.len() * 2);
                for ch in self.secret.chars() {
                    if ch == ' ' {
                        display.push_str("  ");
                    } else {
                        display.push(self.reveal(ch));
                        display.push(' ');
                    }
                }
                display.trim_end().to_string()
            }
        }
    }

    /// Apply a guess and report whether the letter occurs in the secret.
    ///
    /// Guessing a letter twice is answered again without costing a life.
    pub fn submit_guess(&mut self, input: &str) -> Result<bool, GameError> {
        let guess: Guess = input.parse()?;
        self.ensure_in_progress()?;

        let letter = guess.letter();
        let hit = self.contains(letter);
        if !self.guessed.insert(letter) {
            debug!(%letter, hit, "Letter already guessed");
            return Ok(hit);
        }

        if !hit {
            self.lives = self.lives.saturating_sub(1);
        }
        debug!(%letter, hit, lives = self.lives, "Guess applied");
        self.evaluate();
        Ok(hit)
    }

    /// Start or restart the countdown for the current turn.
    pub fn start_turn_timer(&mut self) {
        self.timer.start();
    }

    /// Seconds left in the current turn, or `None` when no turn is timed.
    pub fn remaining_time(&self) -> Option<u64> {
        self.remaining_time_at(Instant::now())
    }

    /// [`Game::remaining_time`] evaluated at `now`.
    pub fn remaining_time_at(&self, now: Instant) -> Option<u64> {
        self.timer.remaining_at(now)
    }

    /// Whether the current turn has run out. `false` when no turn is timed.
    pub fn is_time_up(&self) -> bool {
        self.is_time_up_at(Instant::now())
    }

    /// [`Game::is_time_up`] evaluated at `now`.
    pub fn is_time_up_at(&self, now: Instant) -> bool {
        self.timer.is_expired_at(now)
    }

    /// Charge a life for a turn that ran out and stop the timer.
    ///
    /// Each call costs a life; callers must invoke it once per timeout.
    pub fn expire_turn(&mut self) -> Result<(), GameError> {
        self.ensure_in_progress()?;
        self.lives = self.lives.saturating_sub(1);
        debug!(lives = self.lives, "Turn expired");
        self.evaluate();
        self.timer.clear();
        Ok(())
    }

    /// Length of a turn.
    pub fn turn_duration(&self) -> Duration {
        self.timer.duration()
    }

    /// The turn timer.
    pub fn timer(&self) -> &TurnTimer {
        &self.timer
    }

    /// Mutable access to the turn timer, e.g. to start a turn at a given instant.
    pub fn timer_mut(&mut self) -> &mut TurnTimer {
        &mut self.timer
    }

    fn ensure_in_progress(&self) -> Result<(), GameError> {
        if self.outcome.is_terminal() {
            return Err(GameError::GameOver {
                outcome: self.outcome,
            });
        }
        Ok(())
    }

    fn contains(&self, letter: char) -> bool {
        self.secret.chars().any(|ch| fold(ch) == letter)
    }

    fn reveal(&self, ch: char) -> char {
        if self.guessed.contains(&fold(ch)) {
            ch
        } else {
            '_'
        }
    }

    fn evaluate(&mut self) {
        if self.lives == 0 {
            self.outcome = Outcome::Lost;
        } else if self
            .secret
            .chars()
            .filter(|ch| ch.is_alphabetic())
            .all(|ch| self.guessed.contains(&fold(ch)))
        {
            self.outcome = Outcome::Won;
        }

        if self.outcome.is_terminal() {
            info!(
                outcome = %self.outcome,
                lives = self.lives,
                guesses = self.guessed.len(),
                "Game finished"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn basic(secret: &str) -> Game {
        Game::with_secret(Difficulty::Basic, secret).expect("valid basic secret")
    }

    fn phrase(secret: &str) -> Game {
        Game::with_secret(Difficulty::Intermediate, secret).expect("valid phrase")
    }

    #[test]
    fn fresh_games_start_clean() {
        for difficulty in Difficulty::ALL {
            let game = Game::new(difficulty);
            assert_eq!(game.difficulty(), difficulty);
            assert_eq!(game.lives(), 6);
            assert_eq!(game.outcome(), Outcome::InProgress);
            assert!(game.guessed_letters().is_empty());
            assert!(!game.secret().is_empty());
            assert!(words::candidates(difficulty).contains(&game.secret()));
            assert!(!game.timer().is_running());
        }
        for _ in 0..20 {
            assert!(!Game::new(Difficulty::Basic).secret().contains(' '));
        }
    }

    #[test]
    fn seeded_selection_is_repeatable() {
        let first = Game::with_rng(Difficulty::Intermediate, &mut StdRng::seed_from_u64(7));
        let second = Game::with_rng(Difficulty::Intermediate, &mut StdRng::seed_from_u64(7));
        assert_eq!(first.secret(), second.secret());
    }

    #[test]
    fn rejects_unplayable_secrets() {
        let err = Game::with_secret(Difficulty::Basic, "HELLO WORLD").unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidSecret {
                secret: "HELLO WORLD".to_string(),
                difficulty: Difficulty::Basic,
            }
        );
        assert!(Game::with_secret(Difficulty::Intermediate, "").is_err());
    }

    #[test]
    fn masks_unguessed_word() {
        assert_eq!(basic("PYTHON").render_display(), "_ _ _ _ _ _");
    }

    #[test]
    fn masks_unguessed_phrase_with_wide_word_gap() {
        assert_eq!(phrase("HELLO WORLD").render_display(), "_ _ _ _ _   _ _ _ _ _");
    }

    #[test]
    fn phrase_reveals_letters_in_place() -> Result<(), GameError> {
        let mut game = phrase("HELLO WORLD");
        game.submit_guess("o")?;
        game.submit_guess("d")?;
        assert_eq!(game.render_display(), "_ _ _ _ O   _ O _ _ D");
        Ok(())
    }

    #[test]
    fn correct_guess_reveals_without_cost() -> Result<(), GameError> {
        let mut game = basic("PYTHON");
        assert!(game.submit_guess("P")?);
        assert_eq!(game.render_display(), "P _ _ _ _ _");
        assert_eq!(game.lives(), 6);
        Ok(())
    }

    #[test]
    fn wrong_guess_costs_a_life() -> Result<(), GameError> {
        let mut game = basic("PYTHON");
        assert!(!game.submit_guess("Z")?);
        assert_eq!(game.render_display(), "_ _ _ _ _ _");
        assert_eq!(game.lives(), 5);
        assert_eq!(game.missed_letters(), vec!['Z']);
        Ok(())
    }

    #[test]
    fn reveals_every_occurrence() -> Result<(), GameError> {
        let mut game = basic("HELLO");
        game.submit_guess("L")?;
        assert_eq!(game.render_display(), "_ _ L L _");
        Ok(())
    }

    #[test]
    fn uncovering_all_letters_wins() -> Result<(), GameError> {
        let mut game = basic("CAT");
        game.submit_guess("C")?;
        game.submit_guess("A")?;
        assert_eq!(game.outcome(), Outcome::InProgress);
        game.submit_guess("T")?;
        assert_eq!(game.outcome(), Outcome::Won);
        assert!(game.is_over());
        Ok(())
    }

    #[test]
    fn phrase_wins_without_guessing_spaces() -> Result<(), GameError> {
        let mut game = phrase("AB BA");
        game.submit_guess("a")?;
        game.submit_guess("b")?;
        assert_eq!(game.outcome(), Outcome::Won);
        Ok(())
    }

    #[test]
    fn six_misses_lose() -> Result<(), GameError> {
        let mut game = basic("PYTHON");
        for letter in ["Z", "X", "Q", "W", "K", "J"] {
            game.submit_guess(letter)?;
        }
        assert_eq!(game.lives(), 0);
        assert_eq!(game.outcome(), Outcome::Lost);
        Ok(())
    }

    #[test]
    fn repeated_guess_is_idempotent() -> Result<(), GameError> {
        let mut game = basic("PYTHON");
        let first = game.submit_guess("P")?;
        let lives = game.lives();
        assert_eq!(game.submit_guess("P")?, first);
        assert_eq!(game.lives(), lives);

        let miss = game.submit_guess("Z")?;
        assert_eq!(game.submit_guess("z")?, miss);
        assert_eq!(game.lives(), lives - 1);
        assert_eq!(game.guessed_letters(), vec!['P', 'Z']);
        Ok(())
    }

    #[test]
    fn guesses_are_case_insensitive() -> Result<(), GameError> {
        let mut lower = basic("PYTHON");
        let mut upper = basic("PYTHON");
        assert!(lower.submit_guess("p")?);
        assert!(upper.submit_guess("P")?);
        assert_eq!(lower.render_display(), "P _ _ _ _ _");
        assert_eq!(lower.render_display(), upper.render_display());
        assert_eq!(lower.guessed_letters(), upper.guessed_letters());
        Ok(())
    }

    #[test]
    fn invalid_input_changes_nothing() {
        let mut game = basic("PYTHON");
        for input in ["", "AB", "1"] {
            assert_eq!(
                game.submit_guess(input),
                Err(GameError::InvalidInput {
                    input: input.to_string()
                })
            );
        }
        assert_eq!(game.lives(), 6);
        assert!(game.guessed_letters().is_empty());
        assert_eq!(game.outcome(), Outcome::InProgress);
    }

    #[test]
    fn guessed_letters_are_sorted() -> Result<(), GameError> {
        let mut game = basic("PYTHON");
        for letter in ["z", "P", "b", "N"] {
            game.submit_guess(letter)?;
        }
        assert_eq!(game.guessed_letters(), vec!['B', 'N', 'P', 'Z']);
        Ok(())
    }

    #[test]
    fn timer_absent_until_started() {
        let game = basic("PYTHON");
        assert_eq!(game.remaining_time(), None);
        assert!(!game.is_time_up());
    }

    #[test]
    fn started_timer_counts_down_from_full_turn() {
        let mut game = basic("PYTHON");
        game.start_turn_timer();
        let remaining = game.remaining_time().expect("timer running");
        assert!(remaining > 0 && remaining <= 15);
        assert!(!game.is_time_up());
        assert_eq!(game.turn_duration(), Duration::from_secs(15));
    }

    #[test]
    fn elapsed_turn_is_up() {
        let mut game = basic("PYTHON");
        let start = Instant::now();
        game.timer_mut().start_at(start);
        let later = start + Duration::from_secs(16);
        assert!(game.is_time_up_at(later));
        assert_eq!(game.remaining_time_at(later), Some(0));

        if let Some(past) = Instant::now().checked_sub(Duration::from_secs(16)) {
            game.timer_mut().start_at(past);
            assert!(game.is_time_up());
            assert_eq!(game.remaining_time(), Some(0));
        }
    }

    #[test]
    fn expiring_a_turn_costs_a_life_and_clears_timer() -> Result<(), GameError> {
        let mut game = basic("PYTHON");
        game.start_turn_timer();
        game.expire_turn()?;
        assert_eq!(game.lives(), 5);
        assert_eq!(game.remaining_time(), None);
        assert!(!game.is_time_up());

        game.expire_turn()?;
        assert_eq!(game.lives(), 4);
        Ok(())
    }

    #[test]
    fn expiring_last_life_loses() -> Result<(), GameError> {
        let mut game = basic("PYTHON");
        for letter in ["Z", "X", "Q", "W", "K"] {
            game.submit_guess(letter)?;
        }
        assert_eq!(game.lives(), 1);
        game.expire_turn()?;
        assert_eq!(game.lives(), 0);
        assert_eq!(game.outcome(), Outcome::Lost);
        Ok(())
    }

    #[test]
    fn finished_games_reject_commands() -> Result<(), GameError> {
        let mut game = basic("CAT");
        for letter in ["C", "A", "T"] {
            game.submit_guess(letter)?;
        }
        let over = GameError::GameOver {
            outcome: Outcome::Won,
        };
        assert_eq!(game.submit_guess("Z"), Err(over.clone()));
        assert_eq!(game.expire_turn(), Err(over));
        assert_eq!(game.lives(), 6);
        assert_eq!(game.guessed_letters(), vec!['A', 'C', 'T']);
        assert_eq!(game.outcome(), Outcome::Won);
        Ok(())
    }

    #[test]
    fn losing_the_last_life_ends_the_game() -> Result<(), GameError> {
        let mut game = basic("AB");
        for letter in ["Z", "X", "Q", "W", "K"] {
            game.submit_guess(letter)?;
        }
        game.submit_guess("A")?;
        game.expire_turn()?;
        assert_eq!(game.outcome(), Outcome::Lost);
        assert_eq!(game.submit_guess("B"), Err(GameError::GameOver { outcome: Outcome::Lost }));
        Ok(())
    }

    #[derive(Debug, Clone)]
    enum Step {
        Guess(String),
        Expire,
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => "[a-zA-Z0-9]{0,2}".prop_map(Step::Guess),
            1 => Just(Step::Expire),
        ]
    }

    proptest! {
        #[test]
        fn invariants_hold_for_any_sequence(steps in prop::collection::vec(step(), 0..40)) {
            let mut game = basic("PROGRAMMING");
            let mut previous = game.guessed_letters();
            let mut finished = None;

            for step in steps {
                let _ = match step {
                    Step::Guess(input) => game.submit_guess(&input).map(|_| ()),
                    Step::Expire => game.expire_turn(),
                };

                let guessed = game.guessed_letters();
                prop_assert!(game.lives() <= MAX_LIVES);
                prop_assert!(previous.iter().all(|letter| guessed.contains(letter)));
                prop_assert_eq!(game.outcome() == Outcome::Lost, game.lives() == 0);
                if let Some(outcome) = finished {
                    prop_assert_eq!(game.outcome(), outcome);
                } else if game.is_over() {
                    finished = Some(game.outcome());
                }
                previous = guessed;
            }
        }
    }
}
