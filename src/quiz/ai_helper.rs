use log::{debug, warn};

use crate::completion::Completer;
use crate::error::Result;
use crate::quiz::parse::parse_question_item;
use crate::quiz::QuestionItem;

const QUESTION_MAX_TOKENS: u32 = 150;
const QUESTION_TEMPERATURE: f32 = 0.7;

const VERDICT_MAX_TOKENS: u32 = 5;
const VERDICT_TEMPERATURE: f32 = 0.0;

/// The only completion counted as a correct verdict. Matched exactly, so "yes" or
/// "Yes." are judged wrong.
pub const AFFIRMATIVE: &str = "Yes";

/// Generates questions and judges answers through a language model.
pub struct QuizHelper<C> {
    completer: C,
}

impl<C: Completer> QuizHelper<C> {
    pub fn new(completer: C) -> Self {
        Self { completer }
    }

    pub async fn generate_question(&self, subject: &str, difficulty: &str) -> Result<QuestionItem> {
        debug!("Generating {difficulty} question about {subject:?}");
        let prompt = question_prompt(subject, difficulty);

        let content = self
            .completer
            .complete(&prompt, QUESTION_MAX_TOKENS, QUESTION_TEMPERATURE)
            .await?;

        let item = parse_question_item(&content);
        if !item.is_complete() {
            warn!("Completion did not follow the question format: {content:?}");
        }
        Ok(item)
    }

    pub async fn check_answer(&self, item: &QuestionItem, user_answer: &str) -> Result<bool> {
        let prompt = verdict_prompt(&item.question, &item.answer, user_answer);

        let verdict = self
            .completer
            .complete(&prompt, VERDICT_MAX_TOKENS, VERDICT_TEMPERATURE)
            .await?;

        debug!("Verdict for {user_answer:?}: {verdict:?}");
        Ok(is_affirmative(&verdict))
    }

    #[cfg(test)]
    pub(crate) fn completer(&self) -> &C {
        &self.completer
    }
}

pub fn question_prompt(subject: &str, difficulty: &str) -> String {
    format!(
        "Generate a {difficulty} level {subject} quiz question. \
         Provide ONLY: 1. The question, 2. The short answer, 3. A brief explanation. \
         Format: 'Question: ... Answer: ... Explanation: ...'"
    )
}

pub fn verdict_prompt(question: &str, answer: &str, user_answer: &str) -> String {
    format!(
        "Question: {question}\n\
         Correct Answer: {answer}\n\
         User Answer: {user_answer}\n\
         Is the user's answer correct? Respond only with Yes or No."
    )
}

pub fn is_affirmative(verdict: &str) -> bool {
    verdict.trim() == AFFIRMATIVE
}
