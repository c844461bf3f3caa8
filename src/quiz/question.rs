//! Arithmetic question generation

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::DIVISION_MAX_FACTOR;

/// Operand magnitude tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "m" | "2" => Some(Difficulty::Medium),
            "hard" | "h" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Inclusive upper bounds for (operand1, operand2); both start at 1
    pub fn operand_bounds(&self) -> (u32, u32) {
        match self {
            Difficulty::Easy => (10, 10),
            Difficulty::Medium => (50, 25),
            Difficulty::Hard => (100, 50),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }

    /// Exact result. Division callers guarantee a non-zero divisor that divides evenly.
    pub fn apply(&self, a: i64, b: i64) -> i64 {
        match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => a / b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A generated question. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub operand1: u32,
    pub operand2: u32,
    pub operation: Operation,
    pub answer: i64,
}

impl Question {
    pub fn new(operand1: u32, operand2: u32, operation: Operation) -> Self {
        Self {
            operand1,
            operand2,
            operation,
            answer: operation.apply(operand1 as i64, operand2 as i64),
        }
    }

    /// The displayable part of the question (no answer)
    pub fn prompt(&self) -> QuestionPrompt {
        QuestionPrompt {
            operand1: self.operand1,
            operand2: self.operand2,
            operation: self.operation,
        }
    }
}

/// What the host may show for the current question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPrompt {
    pub operand1: u32,
    pub operand2: u32,
    pub operation: Operation,
}

impl fmt::Display for QuestionPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} =", self.operand1, self.operation, self.operand2)
    }
}

/// Generate one question for the given difficulty
pub fn generate_question<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Question {
    let operation = Operation::ALL[rng.random_range(0..Operation::ALL.len())];

    let (max1, max2) = difficulty.operand_bounds();
    let mut operand1 = rng.random_range(1..=max1);
    let operand2 = rng.random_range(1..=max2);

    // Whole-number quotients only
    if operation == Operation::Divide {
        operand1 = operand2 * rng.random_range(1..=DIVISION_MAX_FACTOR);
    }

    Question::new(operand1, operand2, operation)
}
