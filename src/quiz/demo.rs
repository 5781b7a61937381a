//! Offline quiz used when there is no API key. Fixed questions, local checking.

use std::io::{BufRead, Write};

use log::info;

use crate::console::Console;
use crate::error::Result;
use crate::quiz::{QuestionItem, SessionScore};
use crate::session::{ask_question, reveal_verdict, SessionReport};

const DEMO_QUESTIONS: [(&str, &str, &str); 2] = [
    ("What is 2 + 2?", "4", "2 plus 2 is 4."),
    (
        "What is the capital of France?",
        "Paris",
        "Paris is the capital of France.",
    ),
];

pub fn demo_questions() -> Vec<QuestionItem> {
    DEMO_QUESTIONS
        .iter()
        .map(|&(question, answer, explanation)| QuestionItem::new(question, answer, explanation))
        .collect()
}

/// Surrounding whitespace and letter case are ignored; anything else must match.
pub fn matches_answer(user_answer: &str, answer: &str) -> bool {
    user_answer.trim().to_lowercase() == answer.to_lowercase()
}

pub fn run_demo<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<SessionReport> {
    let questions = demo_questions();
    info!("Running demo quiz with {} questions", questions.len());

    let mut score = SessionScore::new(questions.len() as u32);
    for (number, item) in (1..).zip(&questions) {
        let user_answer = ask_question(console, number, item)?;
        let is_correct = matches_answer(&user_answer, &item.answer);
        score.record(is_correct);
        reveal_verdict(console, item, is_correct)?;
    }

    console.say("")?;
    console.say(format!(
        "Demo complete! Your score: {}/{}",
        score.correct(),
        score.total()
    ))?;
    Ok(SessionReport::finished(score))
}
