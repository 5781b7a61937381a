pub mod ai_helper;
pub mod demo;
pub mod parse;

use std::num::NonZeroU32;

use thiserror::Error;

/// What the player asked for at the start of a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    pub subject: String,
    pub difficulty: String,
    pub rounds: NonZeroU32,
}

impl QuizConfig {
    pub fn new(subject: String, difficulty: String, rounds: NonZeroU32) -> Self {
        Self {
            subject,
            difficulty,
            rounds,
        }
    }
}

/// One generated question. Any field may be empty when the model ignored the format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionItem {
    pub question: String,
    pub answer: String,
    pub explanation: String,
}

impl QuestionItem {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            explanation: explanation.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.question.is_empty() && !self.answer.is_empty() && !self.explanation.is_empty()
    }
}

/// Running tally for one session.
///
/// `correct <= answered <= total` always holds: verdicts beyond `total` are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionScore {
    correct: u32,
    answered: u32,
    total: u32,
}

impl SessionScore {
    pub fn new(total: u32) -> Self {
        Self {
            correct: 0,
            answered: 0,
            total,
        }
    }

    pub fn record(&mut self, is_correct: bool) {
        if self.answered >= self.total {
            log::warn!("Ignoring verdict past the last round ({}/{})", self.answered, self.total);
            return;
        }
        self.answered += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_finished(&self) -> bool {
        self.answered == self.total
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundCountError {
    #[error("Please enter a whole number.")]
    NotANumber,
    #[error("The number of questions must be at least 1.")]
    Zero,
}

pub fn parse_round_count(input: &str) -> Result<NonZeroU32, RoundCountError> {
    let amount: u32 = input
        .trim()
        .parse()
        .map_err(|_| RoundCountError::NotANumber)?;
    NonZeroU32::new(amount).ok_or(RoundCountError::Zero)
}

/// Only a literal "yes" (any case) unlocks the explanation.
pub fn wants_explanation(reply: &str) -> bool {
    reply.trim().eq_ignore_ascii_case("yes")
}
