//! Terminal host
//!
//! Reads one command per line. The elapsed timer is polled before each
//! question is drawn, so the HUD time refreshes whenever the player acts.

use std::io::{self, BufRead, Write};

use crate::error::QuizError;
use crate::quiz::{AnswerOutcome, Difficulty, GamePhase, QuizGame};
use crate::settings::Settings;

/// Line-oriented quiz host over any reader/writer pair
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    settings: Settings,
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        Self {
            input,
            output,
            settings,
        }
    }

    /// Run until the player quits or input ends
    pub fn run(&mut self, game: &mut QuizGame) -> io::Result<()> {
        loop {
            let keep_going = match game.phase() {
                GamePhase::SelectingDifficulty => self.menu(game)?,
                GamePhase::Playing => self.question(game)?,
                GamePhase::Completed => self.summary(game)?,
            };
            for event in game.drain_events() {
                log::debug!("{:?}", event);
            }
            if !keep_going {
                log::info!("Leaving Number Rush");
                return Ok(());
            }
        }
    }

    fn menu(&mut self, game: &mut QuizGame) -> io::Result<bool> {
        writeln!(self.output, "\nNumber Rush")?;
        writeln!(self.output, "Choose your difficulty level to begin")?;
        writeln!(self.output, "  1) Easy   2) Medium   3) Hard   (q to quit)")?;
        let Some(line) = self.prompt()? else {
            return Ok(false);
        };
        if is_quit(&line) {
            return Ok(false);
        }

        match Difficulty::from_str(&line) {
            Some(difficulty) => self.report(game.select_difficulty(difficulty))?,
            None => writeln!(self.output, "Unknown difficulty {:?}", line.trim())?,
        }
        Ok(true)
    }

    fn question(&mut self, game: &mut QuizGame) -> io::Result<bool> {
        game.tick();
        let view = game.view();

        write!(
            self.output,
            "\nQuestion {}/{}   Score {}",
            view.question_index, view.total_questions, view.score
        )?;
        if self.settings.show_timer {
            write!(self.output, "   Time {}", view.elapsed_text)?;
        }
        writeln!(self.output)?;
        if let Some(prompt) = view.prompt {
            writeln!(self.output, "{prompt}")?;
        }

        match &view.options {
            Some(options) => {
                let labels: Vec<String> = options
                    .values()
                    .iter()
                    .enumerate()
                    .map(|(i, value)| format!("[{}] {}", i + 1, value))
                    .collect();
                writeln!(self.output, "  {}", labels.join("   "))?;
                writeln!(self.output, "Pick an option (q to quit)")?;
            }
            None => writeln!(self.output, "Your answer (? for a hint, q to quit)")?,
        }

        let Some(line) = self.prompt()? else {
            return Ok(false);
        };
        let line = line.trim();
        if is_quit(line) {
            return Ok(false);
        }

        if let Some(options) = view.options {
            match line.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => {
                    let outcome = game.choose_option(n - 1);
                    self.feedback(outcome)?;
                }
                _ => writeln!(
                    self.output,
                    "Pick a number between 1 and {}",
                    options.len()
                )?,
            }
            return Ok(true);
        }

        if matches!(line, "?" | "h" | "hint") {
            self.report(game.request_hint())?;
            return Ok(true);
        }

        let outcome = game
            .update_input(line)
            .and_then(|()| game.submit_input());
        self.feedback(outcome)?;
        Ok(true)
    }

    fn summary(&mut self, game: &mut QuizGame) -> io::Result<bool> {
        let view = game.view();
        if let Some(summary) = view.summary {
            writeln!(self.output, "\nGame Complete!")?;
            writeln!(
                self.output,
                "Final Score: {}/{}",
                summary.score, summary.total_questions
            )?;
            writeln!(self.output, "Time taken: {}", summary.time_taken)?;
        }
        writeln!(self.output, "Press Enter to play again (q to quit)")?;

        let Some(line) = self.prompt()? else {
            return Ok(false);
        };
        if is_quit(&line) {
            return Ok(false);
        }
        self.report(game.play_again())?;
        Ok(true)
    }

    fn feedback(&mut self, outcome: Result<AnswerOutcome, QuizError>) -> io::Result<()> {
        match outcome {
            Ok(outcome) if self.settings.show_feedback => {
                if outcome.correct {
                    writeln!(self.output, "Correct!")
                } else {
                    writeln!(self.output, "Not quite, it was {}.", outcome.expected)
                }
            }
            Ok(_) => Ok(()),
            Err(QuizError::InvalidAnswer { .. }) => {
                writeln!(self.output, "Please enter a number.")
            }
            Err(e) => writeln!(self.output, "{e}"),
        }
    }

    fn report(&mut self, result: Result<(), QuizError>) -> io::Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(e) => writeln!(self.output, "{e}"),
        }
    }

    /// Read one line; `None` at end of input
    fn prompt(&mut self) -> io::Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit" | "exit")
}
