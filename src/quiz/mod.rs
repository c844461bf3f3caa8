//! Quiz core
//!
//! All game logic lives here. No I/O and no rendering:
//! - Randomness comes from a seeded RNG owned by the game
//! - Time comes from an injected `Clock`
//! - Hosts read `QuizView` snapshots and drain `QuizEvent`s

pub mod options;
pub mod question;
pub mod state;
pub mod timer;
pub mod view;

pub use options::{OptionSet, generate_options};
pub use question::{Difficulty, Operation, Question, QuestionPrompt, generate_question};
pub use state::{AnswerOutcome, GamePhase, GameSession, QuizEvent, QuizGame};
pub use timer::ElapsedTimer;
pub use view::{GameSummary, QuizView};
