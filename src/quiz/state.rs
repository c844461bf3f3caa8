//! Game session and the quiz state machine
//!
//! `SelectingDifficulty -> Playing -> Completed -> SelectingDifficulty`.
//! Every rejected action leaves the game untouched.

use chrono::{DateTime, TimeDelta, Utc};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::options::{OptionSet, generate_options};
use super::question::{Difficulty, Question, QuestionPrompt, generate_question};
use super::timer::ElapsedTimer;
use crate::consts::TOTAL_QUESTIONS;
use crate::error::QuizError;
use crate::time::Clock;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session; waiting for a difficulty
    SelectingDifficulty,
    /// Questions are being answered
    Playing,
    /// All questions answered; final score available
    Completed,
}

/// Notifications for the host, drained after each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuizEvent {
    GameStarted { difficulty: Difficulty },
    QuestionShown { index: u32 },
    HintRevealed,
    AnswerChecked { correct: bool },
    TimerTick { elapsed_ms: i64 },
    GameCompleted { score: u32, elapsed_ms: i64 },
    ReturnedToMenu,
}

/// Result of a single accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The answer to the question just submitted
    pub expected: i64,
    /// True when this submission ended the game
    pub finished: bool,
}

/// State of one play-through
#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    score: u32,
    question_index: u32,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    current_question: Question,
    options: OptionSet,
    hint_revealed: bool,
    user_input: String,
    completed: bool,
}

impl GameSession {
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// 1-based index of the question on screen
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Full question including its answer. Render `prompt()` instead.
    pub fn current_question(&self) -> &Question {
        &self.current_question
    }

    pub fn prompt(&self) -> QuestionPrompt {
        self.current_question.prompt()
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn hint_revealed(&self) -> bool {
        self.hint_revealed
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

/// Parsed free-text submission
#[derive(Debug, Clone, Copy, PartialEq)]
enum ParsedAnswer {
    Whole(i64),
    /// A valid number that cannot equal an integer answer
    Fraction,
}

impl ParsedAnswer {
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Some(ParsedAnswer::Whole(value));
        }
        let value = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?;
        if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 / 2.0 {
            Some(ParsedAnswer::Whole(value as i64))
        } else {
            Some(ParsedAnswer::Fraction)
        }
    }

    fn matches(self, answer: i64) -> bool {
        self == ParsedAnswer::Whole(answer)
    }
}

/// The quiz: phase, current session, RNG and elapsed timer
#[derive(Debug, Clone)]
pub struct QuizGame {
    seed: u64,
    rng: Pcg32,
    clock: Clock,
    phase: GamePhase,
    session: Option<GameSession>,
    timer: ElapsedTimer,
    /// Elapsed time as of the last timer fire
    displayed_elapsed: TimeDelta,
    events: Vec<QuizEvent>,
}

impl QuizGame {
    /// Create a game waiting for a difficulty, with a seeded RNG
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            clock: Clock::default(),
            phase: GamePhase::SelectingDifficulty,
            session: None,
            timer: ElapsedTimer::default(),
            displayed_elapsed: TimeDelta::zero(),
            events: Vec::new(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Begin a new game (from the menu or after a finished game)
    pub fn start(&mut self, difficulty: Difficulty) -> Result<(), QuizError> {
        if self.phase == GamePhase::Playing {
            return Err(self.wrong_phase("start a game"));
        }

        let now = self.clock.now();
        let (current_question, options) = draw_question(difficulty, &mut self.rng);
        self.session = Some(GameSession {
            difficulty,
            score: 0,
            question_index: 0,
            start_time: now,
            end_time: None,
            current_question,
            options,
            hint_revealed: false,
            user_input: String::new(),
            completed: false,
        });
        self.phase = GamePhase::Playing;
        self.displayed_elapsed = TimeDelta::zero();
        self.timer.arm(now);

        log::info!("Started {} game (seed {})", difficulty, self.seed);
        self.events.push(QuizEvent::GameStarted { difficulty });
        self.show_question();
        Ok(())
    }

    /// Alias for `start` used by hosts
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<(), QuizError> {
        self.start(difficulty)
    }

    fn advance_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (question, options) = draw_question(session.difficulty, &mut self.rng);
        session.current_question = question;
        session.options = options;
        self.show_question();
    }

    /// Move the index onto the drawn question and clear per-question state
    fn show_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.question_index += 1;
        session.hint_revealed = false;
        session.user_input.clear();
        log::debug!(
            "Question {}: {} {} (options {:?})",
            session.question_index,
            session.current_question.prompt(),
            session.current_question.answer,
            session.options.values()
        );

        self.events.push(QuizEvent::QuestionShown {
            index: session.question_index,
        });
    }

    /// Switch the current question to multiple choice. No-op if already revealed.
    pub fn reveal_hint(&mut self) -> Result<(), QuizError> {
        let session = self.playing_session("reveal a hint")?;
        if session.hint_revealed {
            return Ok(());
        }
        session.hint_revealed = true;
        log::debug!("Hint revealed for question {}", session.question_index);
        self.events.push(QuizEvent::HintRevealed);
        Ok(())
    }

    /// Alias for `reveal_hint` used by hosts
    pub fn request_hint(&mut self) -> Result<(), QuizError> {
        self.reveal_hint()
    }

    /// Store the text currently typed by the player
    pub fn update_input(&mut self, text: &str) -> Result<(), QuizError> {
        let session = self.playing_session("type an answer")?;
        session.user_input.clear();
        session.user_input.push_str(text);
        Ok(())
    }

    /// Submit whatever `update_input` last stored
    pub fn submit_input(&mut self) -> Result<AnswerOutcome, QuizError> {
        let input = self
            .playing_session("submit an answer")?
            .user_input
            .clone();
        self.submit_answer(&input)
    }

    /// Submit the option at `index` (0-based) while the hint is shown
    pub fn choose_option(&mut self, index: usize) -> Result<AnswerOutcome, QuizError> {
        let session = self.playing_session("choose an option")?;
        if !session.hint_revealed {
            return Err(QuizError::HintNotRevealed);
        }
        let value = session.options.get(index).ok_or(QuizError::NoSuchOption {
            index,
            len: session.options.len(),
        })?;
        self.submit_answer(&value.to_string())
    }

    /// Check an answer, then advance or finish the game
    pub fn submit_answer(&mut self, raw: &str) -> Result<AnswerOutcome, QuizError> {
        let session = self.playing_session("submit an answer")?;
        let Some(parsed) = ParsedAnswer::parse(raw) else {
            log::warn!("Rejected non-numeric answer {:?}", raw);
            return Err(QuizError::InvalidAnswer {
                input: raw.to_string(),
            });
        };

        let expected = session.current_question.answer;
        let correct = parsed.matches(expected);
        if correct {
            session.score += 1;
        }
        log::debug!(
            "Question {} answered {:?}: {}",
            session.question_index,
            raw.trim(),
            if correct { "correct" } else { "wrong" }
        );
        let finished = session.question_index >= TOTAL_QUESTIONS;
        self.events.push(QuizEvent::AnswerChecked { correct });

        if finished {
            self.finish();
        } else {
            self.advance_question();
        }

        Ok(AnswerOutcome {
            correct,
            expected,
            finished,
        })
    }

    fn finish(&mut self) {
        let now = self.clock.now();
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.completed = true;
        session.end_time = Some(now);
        session.user_input.clear();

        let elapsed = now - session.start_time;
        let score = session.score;
        self.timer.cancel();
        self.displayed_elapsed = elapsed;
        self.phase = GamePhase::Completed;

        log::info!(
            "Game complete: {}/{} in {}",
            score,
            TOTAL_QUESTIONS,
            crate::format_elapsed(elapsed)
        );
        self.events.push(QuizEvent::GameCompleted {
            score,
            elapsed_ms: elapsed.num_milliseconds(),
        });
    }

    /// Drop the finished session and return to difficulty selection
    pub fn reset(&mut self) -> Result<(), QuizError> {
        if self.phase != GamePhase::Completed {
            return Err(self.wrong_phase("play again"));
        }
        self.session = None;
        self.timer.cancel();
        self.displayed_elapsed = TimeDelta::zero();
        self.phase = GamePhase::SelectingDifficulty;

        log::info!("Returned to difficulty selection");
        self.events.push(QuizEvent::ReturnedToMenu);
        Ok(())
    }

    /// Alias for `reset` used by hosts
    pub fn play_again(&mut self) -> Result<(), QuizError> {
        self.reset()
    }

    /// Poll the elapsed timer. Returns true when the displayed time changed.
    pub fn tick(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let now = self.clock.now();
        if !self.timer.poll(now) {
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        self.displayed_elapsed = now - session.start_time;
        self.events.push(QuizEvent::TimerTick {
            elapsed_ms: self.displayed_elapsed.num_milliseconds(),
        });
        true
    }

    /// Exact time since the game started (frozen once completed)
    pub fn elapsed(&self) -> TimeDelta {
        match &self.session {
            Some(session) => {
                let end = session.end_time.unwrap_or_else(|| self.clock.now());
                end - session.start_time
            }
            None => TimeDelta::zero(),
        }
    }

    /// Elapsed time as last refreshed by the timer
    pub fn displayed_elapsed(&self) -> TimeDelta {
        self.displayed_elapsed
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    fn playing_session(&mut self, action: &'static str) -> Result<&mut GameSession, QuizError> {
        let phase = self.phase;
        match self.session.as_mut() {
            Some(session) if phase == GamePhase::Playing => Ok(session),
            _ => Err(QuizError::InvalidPhase { action, phase }),
        }
    }

    fn wrong_phase(&self, action: &'static str) -> QuizError {
        QuizError::InvalidPhase {
            action,
            phase: self.phase,
        }
    }
}

/// Draw a question and its option set
fn draw_question(difficulty: Difficulty, rng: &mut Pcg32) -> (Question, OptionSet) {
    let question = generate_question(difficulty, rng);
    let options = generate_options(question.answer, rng);
    (question, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_clock;

    fn game() -> QuizGame {
        QuizGame::new(12345).with_clock(fixed_clock())
    }

    fn answer(game: &QuizGame) -> i64 {
        game.session().map(|s| s.current_question().answer).unwrap_or_default()
    }

    #[test]
    fn test_start_shows_first_question() {
        let mut game = game();
        assert_eq!(game.phase(), GamePhase::SelectingDifficulty);
        assert!(game.session().is_none());

        game.start(Difficulty::Easy).unwrap();
        let session = game.session().unwrap();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(session.question_index(), 1);
        assert_eq!(session.score(), 0);
        assert!(!session.hint_revealed());
        assert!(session.end_time().is_none());
        assert!(game.timer_armed());
        assert_eq!(
            game.drain_events(),
            vec![
                QuizEvent::GameStarted {
                    difficulty: Difficulty::Easy
                },
                QuizEvent::QuestionShown { index: 1 },
            ]
        );
    }

    #[test]
    fn test_start_rejected_while_playing() {
        let mut game = game();
        game.start(Difficulty::Easy).unwrap();
        let err = game.start(Difficulty::Hard).unwrap_err();
        assert_eq!(
            err,
            QuizError::InvalidPhase {
                action: "start a game",
                phase: GamePhase::Playing
            }
        );
        assert_eq!(game.session().unwrap().difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_perfect_easy_game() {
        let mut game = game();
        game.start(Difficulty::Easy).unwrap();
        for i in 1..=TOTAL_QUESTIONS {
            let outcome = game.submit_answer(&answer(&game).to_string()).unwrap();
            assert!(outcome.correct);
            assert_eq!(outcome.finished, i == TOTAL_QUESTIONS);
        }
        let session = game.session().unwrap();
        assert_eq!(session.score(), TOTAL_QUESTIONS);
        assert!(session.is_completed());
        assert_eq!(game.phase(), GamePhase::Completed);
    }

    #[test]
    fn test_non_numeric_answer_changes_nothing() {
        let mut game = game();
        game.start(Difficulty::Medium).unwrap();
        let before = game.session().unwrap().current_question().clone();
        game.drain_events();

        for raw in ["abc", "", "   ", "NaN", "inf", "12abc"] {
            let err = game.submit_answer(raw).unwrap_err();
            assert_eq!(
                err,
                QuizError::InvalidAnswer {
                    input: raw.to_string()
                }
            );
        }

        let session = game.session().unwrap();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(session.score(), 0);
        assert_eq!(session.question_index(), 1);
        assert_eq!(session.current_question(), &before);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_numeric_forms_accepted() {
        assert_eq!(ParsedAnswer::parse(" 7 "), Some(ParsedAnswer::Whole(7)));
        assert_eq!(ParsedAnswer::parse("+7"), Some(ParsedAnswer::Whole(7)));
        assert_eq!(ParsedAnswer::parse("-4"), Some(ParsedAnswer::Whole(-4)));
        assert_eq!(ParsedAnswer::parse("7.0"), Some(ParsedAnswer::Whole(7)));
        assert_eq!(ParsedAnswer::parse("1e1"), Some(ParsedAnswer::Whole(10)));
        assert_eq!(ParsedAnswer::parse("2.5"), Some(ParsedAnswer::Fraction));
        assert_eq!(ParsedAnswer::parse("abc"), None);
    }

    #[test]
    fn test_fractional_answer_is_wrong_but_advances() {
        let mut game = game();
        game.start(Difficulty::Easy).unwrap();
        let outcome = game.submit_answer("0.5").unwrap();
        assert!(!outcome.correct);
        assert_eq!(game.session().unwrap().question_index(), 2);
    }

    #[test]
    fn test_last_answer_completes_game() {
        let mut game = game();
        game.start(Difficulty::Hard).unwrap();
        for _ in 1..TOTAL_QUESTIONS {
            game.submit_answer("-99999").unwrap();
        }
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.session().unwrap().question_index(), TOTAL_QUESTIONS);

        game.clock_mut().advance(TimeDelta::seconds(42));
        let outcome = game.submit_answer("-99999").unwrap();
        assert!(outcome.finished);

        let session = game.session().unwrap();
        assert_eq!(game.phase(), GamePhase::Completed);
        assert_eq!(session.score(), 0);
        let end = session.end_time().unwrap();
        assert!(end - session.start_time() >= TimeDelta::zero());
        assert_eq!(game.elapsed(), TimeDelta::seconds(42));
        assert!(!game.timer_armed());

        assert!(matches!(
            game.submit_answer("1"),
            Err(QuizError::InvalidPhase { .. })
        ));
    }

    #[test]
    fn test_reveal_hint_is_idempotent() {
        let mut game = game();
        game.start(Difficulty::Easy).unwrap();
        game.reveal_hint().unwrap();
        let options = game.session().unwrap().options().clone();

        game.reveal_hint().unwrap();
        let session = game.session().unwrap();
        assert!(session.hint_revealed());
        assert_eq!(session.options(), &options);
        assert_eq!(
            game.drain_events()
                .iter()
                .filter(|e| **e == QuizEvent::HintRevealed)
                .count(),
            1
        );
    }

    #[test]
    fn test_hint_clears_on_next_question() {
        let mut game = game();
        game.start(Difficulty::Easy).unwrap();
        game.reveal_hint().unwrap();
        game.submit_answer("3").unwrap();
        assert!(!game.session().unwrap().hint_revealed());
    }

    #[test]
    fn test_choose_option() {
        let mut game = game();
        game.start(Difficulty::Medium).unwrap();
        assert_eq!(game.choose_option(0), Err(QuizError::HintNotRevealed));

        game.reveal_hint().unwrap();
        let session = game.session().unwrap();
        let expected = session.current_question().answer;
        let len = session.options().len();
        let correct_index = session
            .options()
            .values()
            .iter()
            .position(|&v| v == expected)
            .unwrap();

        assert_eq!(
            game.choose_option(len),
            Err(QuizError::NoSuchOption { index: len, len })
        );
        let outcome = game.choose_option(correct_index).unwrap();
        assert!(outcome.correct);
        assert_eq!(game.session().unwrap().score(), 1);
    }

    #[test]
    fn test_submit_typed_input() {
        let mut game = game();
        game.start(Difficulty::Easy).unwrap();
        let expected = answer(&game);
        game.update_input(&expected.to_string()).unwrap();
        assert_eq!(game.session().unwrap().user_input(), expected.to_string());

        assert!(game.submit_input().unwrap().correct);
        assert_eq!(game.session().unwrap().user_input(), "");
    }

    #[test]
    fn test_play_again_returns_to_menu() {
        let mut game = game();
        assert!(game.reset().is_err());

        game.start(Difficulty::Easy).unwrap();
        assert!(game.play_again().is_err());
        for _ in 0..TOTAL_QUESTIONS {
            game.submit_answer("0").unwrap();
        }
        game.play_again().unwrap();

        assert_eq!(game.phase(), GamePhase::SelectingDifficulty);
        assert!(game.session().is_none());
        assert_eq!(game.elapsed(), TimeDelta::zero());
        assert!(game.reveal_hint().is_err());

        // A fresh game starts from zero
        game.start(Difficulty::Hard).unwrap();
        let session = game.session().unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.question_index(), 1);
    }

    #[test]
    fn test_restart_from_completed() {
        let mut game = game();
        game.start(Difficulty::Easy).unwrap();
        for _ in 0..TOTAL_QUESTIONS {
            game.submit_answer("0").unwrap();
        }
        game.start(Difficulty::Medium).unwrap();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.session().unwrap().difficulty(), Difficulty::Medium);
        assert!(game.timer_armed());
    }

    #[test]
    fn test_tick_refreshes_elapsed_while_playing() {
        let mut game = game();
        assert!(!game.tick());

        game.start(Difficulty::Easy).unwrap();
        game.drain_events();
        assert!(!game.tick());

        game.clock_mut().advance(TimeDelta::milliseconds(2500));
        assert!(game.tick());
        assert_eq!(game.displayed_elapsed(), TimeDelta::milliseconds(2500));
        assert_eq!(
            game.drain_events(),
            vec![QuizEvent::TimerTick { elapsed_ms: 2500 }]
        );

        for _ in 0..TOTAL_QUESTIONS {
            game.submit_answer("0").unwrap();
        }
        game.clock_mut().advance(TimeDelta::seconds(5));
        assert!(!game.tick());
        assert_eq!(game.displayed_elapsed(), TimeDelta::milliseconds(2500));
    }

    #[test]
    fn test_same_seed_same_questions() {
        let mut a = game();
        let mut b = game();
        a.start(Difficulty::Hard).unwrap();
        b.start(Difficulty::Hard).unwrap();
        for _ in 0..TOTAL_QUESTIONS {
            assert_eq!(
                a.session().unwrap().current_question(),
                b.session().unwrap().current_question()
            );
            a.submit_answer("1").unwrap();
            b.submit_answer("1").unwrap();
        }
    }
}
