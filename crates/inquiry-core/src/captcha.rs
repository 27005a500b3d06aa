//! Arithmetic CAPTCHA challenges.
//!
//! Challenges only add friction for naive bots: the expected answer lives in
//! the form client's session and the server never re-checks it.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Operand range for addition and subtraction
const ADD_SUB_MAX: u32 = 10;

/// Operand range for multiplication
const MUL_MAX: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
        }
    }
}

/// A single arithmetic question and its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub left: u32,
    pub right: u32,
    pub operator: Operator,
}

impl Challenge {
    /// Generate a challenge from the thread-local RNG
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::rng())
    }

    /// Generate a challenge from the given RNG.
    ///
    /// Subtraction always shows the larger operand first so the answer is
    /// never negative; multiplication draws from a smaller range.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];

        match operator {
            Operator::Add => Challenge {
                left: rng.random_range(1..=ADD_SUB_MAX),
                right: rng.random_range(1..=ADD_SUB_MAX),
                operator,
            },
            Operator::Subtract => {
                let a = rng.random_range(1..=ADD_SUB_MAX);
                let b = rng.random_range(1..=ADD_SUB_MAX);
                Challenge {
                    left: a.max(b),
                    right: a.min(b),
                    operator,
                }
            }
            Operator::Multiply => Challenge {
                left: rng.random_range(1..=MUL_MAX),
                right: rng.random_range(1..=MUL_MAX),
                operator,
            },
        }
    }

    /// Question text, e.g. `"7 + 3"`
    pub fn question(&self) -> String {
        format!("{} {} {}", self.left, self.operator.symbol(), self.right)
    }

    pub fn answer(&self) -> i64 {
        let (l, r) = (i64::from(self.left), i64::from(self.right));
        match self.operator {
            Operator::Add => l + r,
            Operator::Subtract => l - r,
            Operator::Multiply => l * r,
        }
    }

    pub fn is_correct(&self, answer: i64) -> bool {
        self.answer() == answer
    }
}

impl Display for Challenge {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.question())
    }
}

/// The CAPTCHA state of one form instance.
///
/// Holds exactly one challenge at a time; [`CaptchaSession::regenerate`]
/// replaces it wholesale.
#[derive(Debug, Clone)]
pub struct CaptchaSession {
    current: Challenge,
}

impl CaptchaSession {
    pub fn new() -> Self {
        Self {
            current: Challenge::generate(),
        }
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            current: Challenge::generate_with(rng),
        }
    }

    /// Start from a known challenge
    pub fn from_challenge(challenge: Challenge) -> Self {
        Self { current: challenge }
    }

    pub fn current(&self) -> &Challenge {
        &self.current
    }

    pub fn expected_answer(&self) -> i64 {
        self.current.answer()
    }

    pub fn regenerate(&mut self) -> &Challenge {
        self.current = Challenge::generate();
        &self.current
    }

    pub fn regenerate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Challenge {
        self.current = Challenge::generate_with(rng);
        &self.current
    }
}

impl Default for CaptchaSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a typed answer the way a number input is read: surrounding
/// whitespace is ignored, the leading integer is taken, and anything
/// unparsable counts as `0`.
pub fn parse_answer(input: &str) -> i64 {
    let trimmed = input.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    trimmed[..digits_end].parse().unwrap_or(0)
}
