use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Statistics for the current session. Nothing here outlives the process.
pub struct GameMetrics {
    pub round_start: Instant,
    pub elapsed_time: Duration,
    pub best_length: usize,
    pub apples_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            round_start: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 1,
            apples_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.round_start.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.round_start = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    /// Fold one tick into the statistics; `length` is the snake's target
    /// length after the tick
    pub fn on_tick(&mut self, outcome: &TickOutcome, length: usize) {
        if outcome.ate_food {
            self.apples_eaten += 1;
        }
        if outcome.was_reset() {
            self.on_round_start();
        }
        let reached = outcome.length_before_reset.unwrap_or(length).max(length);
        self.best_length = self.best_length.max(reached);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
