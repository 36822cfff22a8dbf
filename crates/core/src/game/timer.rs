use std::time::{Duration, Instant};

/// Length of a single turn.
pub const TURN_DURATION: Duration = Duration::from_secs(15);

/// Advisory per-turn countdown.
///
/// Nothing is scheduled: the timer only records when the turn began and
/// compares that against the instant it is asked about.
#[derive(Debug, Clone)]
pub struct TurnTimer {
    started_at: Option<Instant>,
    duration: Duration,
}

impl Default for TurnTimer {
    fn default() -> Self {
        Self {
            started_at: None,
            duration: TURN_DURATION,
        }
    }
}

impl TurnTimer {
    /// Start (or restart) the turn now.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start (or restart) the turn at an explicit instant, which may lie in the past.
    pub fn start_at(&mut self, instant: Instant) {
        self.started_at = Some(instant);
    }

    /// Stop the countdown.
    pub fn clear(&mut self) {
        self.started_at = None;
    }

    /// Whether a turn is currently being timed.
    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Instant the current turn started, if any.
    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// Fixed length of a turn.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whole seconds left at `now`, rounded half up and never negative.
    pub fn remaining_at(&self, now: Instant) -> Option<u64> {
        let started_at = self.started_at?;
        let elapsed = now.saturating_duration_since(started_at);
        let remaining = self.duration.saturating_sub(elapsed);
        Some((remaining.as_secs_f64() + 0.5).floor() as u64)
    }

    /// Whether the turn has run its full duration at `now`.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.started_at {
            Some(started_at) => now.saturating_duration_since(started_at) >= self.duration,
            None => false,
        }
    }
}
