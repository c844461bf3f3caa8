//! Read-only snapshot handed to the presentation layer

use serde::Serialize;

use super::options::OptionSet;
use super::question::{Difficulty, QuestionPrompt};
use super::state::{GamePhase, QuizGame};
use crate::consts::TOTAL_QUESTIONS;
use crate::format_elapsed;

/// Everything a host may render. Never contains the answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub phase: GamePhase,
    pub difficulty: Option<Difficulty>,
    pub score: u32,
    pub question_index: u32,
    pub total_questions: u32,
    /// Present while playing
    pub prompt: Option<QuestionPrompt>,
    pub hint_revealed: bool,
    /// Present only once the hint is revealed
    pub options: Option<OptionSet>,
    pub user_input: String,
    pub elapsed_ms: i64,
    pub elapsed_text: String,
    /// Present once the game is completed
    pub summary: Option<GameSummary>,
}

/// Final result shown on the completion screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub score: u32,
    pub total_questions: u32,
    pub elapsed_ms: i64,
    /// `m:ss`
    pub time_taken: String,
}

impl QuizGame {
    pub fn view(&self) -> QuizView {
        let displayed = self.displayed_elapsed();
        let mut view = QuizView {
            phase: self.phase(),
            difficulty: None,
            score: 0,
            question_index: 0,
            total_questions: TOTAL_QUESTIONS,
            prompt: None,
            hint_revealed: false,
            options: None,
            user_input: String::new(),
            elapsed_ms: displayed.num_milliseconds(),
            elapsed_text: format_elapsed(displayed),
            summary: None,
        };

        let Some(session) = self.session() else {
            return view;
        };
        view.difficulty = Some(session.difficulty());
        view.score = session.score();
        view.question_index = session.question_index();

        match self.phase() {
            GamePhase::Playing => {
                view.prompt = Some(session.prompt());
                view.hint_revealed = session.hint_revealed();
                view.options = session
                    .hint_revealed()
                    .then(|| session.options().clone());
                view.user_input = session.user_input().to_string();
            }
            GamePhase::Completed => {
                let elapsed = self.elapsed();
                view.summary = Some(GameSummary {
                    score: session.score(),
                    total_questions: TOTAL_QUESTIONS,
                    elapsed_ms: elapsed.num_milliseconds(),
                    time_taken: format_elapsed(elapsed),
                });
            }
            GamePhase::SelectingDifficulty => {}
        }
        view
    }
}
