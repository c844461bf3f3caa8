//! Number Rush - A timed arithmetic quiz
//!
//! Core modules:
//! - `quiz`: Question/option generation and the game state machine
//! - `time`: Clock abstraction for deterministic timing
//! - `settings`: Host preferences
//! - `ui`: Terminal (native) and browser (wasm32) hosts

pub mod error;
pub mod quiz;
pub mod settings;
pub mod time;
pub mod ui;

pub use error::QuizError;
pub use quiz::{Difficulty, GamePhase, Operation, OptionSet, Question, QuizGame, QuizView};
pub use settings::Settings;
pub use time::Clock;

use chrono::TimeDelta;

/// Game configuration constants
pub mod consts {
    /// Questions per game (same for every difficulty)
    pub const TOTAL_QUESTIONS: u32 = 10;

    /// Maximum entries in a multiple-choice option set
    pub const MAX_OPTIONS: usize = 4;
    /// Attempt budget for drawing distinct distractors
    pub const OPTION_ATTEMPTS: u32 = 100;
    /// Largest distance between a distractor and the answer
    pub const MAX_DISTRACTOR_OFFSET: i64 = 5;

    /// Divisions use `operand1 = operand2 * k` with k in 1..=DIVISION_MAX_FACTOR
    pub const DIVISION_MAX_FACTOR: u32 = 10;

    /// Elapsed-time refresh interval (milliseconds)
    pub const TIMER_INTERVAL_MS: i64 = 1000;
}

/// Format an elapsed duration as `m:ss`
///
/// Seconds are floored; negative durations clamp to `0:00`.
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let seconds = elapsed.num_seconds().max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_pads_seconds() {
        assert_eq!(format_elapsed(TimeDelta::zero()), "0:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(7)), "0:07");
        assert_eq!(format_elapsed(TimeDelta::seconds(65)), "1:05");
        assert_eq!(format_elapsed(TimeDelta::seconds(600)), "10:00");
    }

    #[test]
    fn test_format_elapsed_floors_and_clamps() {
        assert_eq!(format_elapsed(TimeDelta::milliseconds(59_999)), "0:59");
        assert_eq!(format_elapsed(TimeDelta::seconds(-3)), "0:00");
    }
}
