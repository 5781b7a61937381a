//! The live quiz: setup, a fixed number of generated rounds, then the final score.

use std::io::{BufRead, Write};

use log::{error, info};

use crate::completion::Completer;
use crate::console::Console;
use crate::error::Result;
use crate::quiz::ai_helper::QuizHelper;
use crate::quiz::{parse_round_count, wants_explanation, QuestionItem, QuizConfig, SessionScore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Finished,
    Aborted { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub score: SessionScore,
    pub outcome: Outcome,
}

impl SessionReport {
    pub fn finished(score: SessionScore) -> Self {
        Self {
            score,
            outcome: Outcome::Finished,
        }
    }

    pub fn aborted(score: SessionScore, reason: impl Into<String>) -> Self {
        Self {
            score,
            outcome: Outcome::Aborted {
                reason: reason.into(),
            },
        }
    }
}

enum State {
    Setup,
    Running {
        config: QuizConfig,
        score: SessionScore,
    },
    Complete(SessionReport),
}

pub async fn run_quiz<C, R, W>(
    helper: &QuizHelper<C>,
    console: &mut Console<R, W>,
) -> Result<SessionReport>
where
    C: Completer,
    R: BufRead,
    W: Write,
{
    console.say("Welcome to the AI Quiz Bot!")?;

    let mut state = State::Setup;
    loop {
        state = match state {
            State::Setup => {
                let config = setup(console)?;
                info!(
                    "Starting {} round(s) of {} {}",
                    config.rounds, config.difficulty, config.subject
                );
                let score = SessionScore::new(config.rounds.get());
                State::Running { config, score }
            }
            State::Running { score, .. } if score.is_finished() => {
                State::Complete(SessionReport::finished(score))
            }
            State::Running { config, mut score } => {
                match play_round(helper, console, &config, &mut score).await {
                    Ok(()) => State::Running { config, score },
                    Err(err) if err.is_completion_failure() => {
                        error!("Aborting session: {err}");
                        console.say(format!("Could not reach the quiz service: {err}"))?;
                        State::Complete(SessionReport::aborted(score, err.to_string()))
                    }
                    Err(err) => return Err(err),
                }
            }
            State::Complete(report) => {
                console.say("")?;
                console.say(final_line(&report))?;
                return Ok(report);
            }
        };
    }
}

fn setup<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<QuizConfig> {
    let subject = console
        .ask("Choose a subject: either Maths/Science): ")?
        .trim()
        .to_string();
    let difficulty = console
        .ask("Choose a difficulty: easy/medium/hard): ")?
        .trim()
        .to_string();

    let rounds = loop {
        let reply = console.ask("How many questions would you like to answer? ")?;
        match parse_round_count(&reply) {
            Ok(rounds) => break rounds,
            Err(err) => console.say(err.to_string())?,
        }
    };

    Ok(QuizConfig::new(subject, difficulty, rounds))
}

async fn play_round<C, R, W>(
    helper: &QuizHelper<C>,
    console: &mut Console<R, W>,
    config: &QuizConfig,
    score: &mut SessionScore,
) -> Result<()>
where
    C: Completer,
    R: BufRead,
    W: Write,
{
    let item = helper
        .generate_question(&config.subject, &config.difficulty)
        .await?;

    let user_answer = ask_question(console, score.answered() + 1, &item)?;
    let is_correct = helper.check_answer(&item, &user_answer).await?;

    score.record(is_correct);
    reveal_verdict(console, &item, is_correct)
}

fn final_line(report: &SessionReport) -> String {
    let score = &report.score;
    match &report.outcome {
        Outcome::Finished => format!(
            "Quiz Complete! Your score: {}/{}",
            score.correct(),
            score.total()
        ),
        Outcome::Aborted { .. } => format!(
            "Quiz aborted after {} of {} questions. Your score: {}/{}",
            score.answered(),
            score.total(),
            score.correct(),
            score.answered()
        ),
    }
}

/// Shows the question and returns the player's answer as typed.
pub(crate) fn ask_question<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    number: u32,
    item: &QuestionItem,
) -> Result<String> {
    console.say("")?;
    console.say(format!("Question {number}: {}", item.question))?;
    console.ask("Your answer: ")
}

pub(crate) fn reveal_verdict<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    item: &QuestionItem,
    is_correct: bool,
) -> Result<()> {
    if is_correct {
        return console.say("Correct!");
    }

    console.say(format!("Incorrect. Correct answer: {}", item.answer))?;
    let reply = console.ask("Want an explanation? (yes/no): ")?;
    if wants_explanation(&reply) {
        console.say(format!("Explanation: {}", item.explanation))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::testing::ScriptedCompleter;
    use crate::error::QuizError;
    use std::io::Cursor;

    const WATER: &str = "Question: What is H2O?\nAnswer: Water\nExplanation: Two hydrogens and an oxygen.";

    fn console(input: &str) -> Console<Cursor<String>, Vec<u8>> {
        Console::new(Cursor::new(input.to_string()), Vec::new())
    }

    fn output(console: Console<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[tokio::test]
    async fn all_negative_verdicts_score_zero() {
        let completer = ScriptedCompleter::new()
            .reply(WATER)
            .reply("No")
            .reply(WATER)
            .reply("No")
            .reply(WATER)
            .reply("No");
        let helper = QuizHelper::new(completer);
        let mut console = console("Science\neasy\n3\na\nno\nb\nno\nc\nno\n");

        let report = run_quiz(&helper, &mut console).await.unwrap();

        assert_eq!(report.outcome, Outcome::Finished);
        assert_eq!(report.score.correct(), 0);
        assert_eq!(report.score.total(), 3);

        let text = output(console);
        assert!(text.ends_with("\nQuiz Complete! Your score: 0/3\n"));
        assert_eq!(text.matches("Incorrect. Correct answer: Water").count(), 3);
        assert!(!text.contains("Explanation:"));
        assert_eq!(helper.completer().calls().len(), 6);
    }

    #[tokio::test]
    async fn correct_rounds_are_counted_and_never_offer_explanations() {
        let completer = ScriptedCompleter::new()
            .reply(WATER)
            .reply("Yes")
            .reply(WATER)
            .reply("yes");
        let helper = QuizHelper::new(completer);
        let mut console = console("Science\nmedium\n2\nwater\nWater\nYES\n");

        let report = run_quiz(&helper, &mut console).await.unwrap();
        assert_eq!(report.score.correct(), 1);

        let text = output(console);
        assert!(text.contains("Welcome to the AI Quiz Bot!"));
        assert!(text.contains("\nQuestion 1: What is H2O?\nYour answer: Correct!\n"));
        assert!(text.contains("\nQuestion 2: What is H2O?\n"));
        assert!(text.contains("Explanation: Two hydrogens and an oxygen.\n"));
        assert_eq!(text.matches("Want an explanation?").count(), 1);
        assert!(text.ends_with("Quiz Complete! Your score: 1/2\n"));
    }

    #[tokio::test]
    async fn setup_reprompts_for_invalid_round_counts() {
        let helper = QuizHelper::new(ScriptedCompleter::new().reply(WATER).reply("Yes"));
        let mut console = console("  Maths \n hard\nlots\n0\n1\n42\n");

        let report = run_quiz(&helper, &mut console).await.unwrap();
        assert_eq!(report.score.total(), 1);

        let text = output(console);
        assert!(text.contains("Please enter a whole number."));
        assert!(text.contains("The number of questions must be at least 1."));
        assert_eq!(
            text.matches("How many questions would you like to answer? ").count(),
            3
        );

        let calls = helper.completer().calls();
        assert!(calls[0].prompt.starts_with("Generate a hard level Maths quiz question."));
    }

    #[tokio::test]
    async fn user_answer_is_forwarded_verbatim() {
        let helper = QuizHelper::new(ScriptedCompleter::new().reply(WATER).reply("Yes"));
        let mut console = console("Science\neasy\n1\n  dihydrogen monoxide \n");

        run_quiz(&helper, &mut console).await.unwrap();

        let calls = helper.completer().calls();
        assert!(calls[1].prompt.contains("User Answer:   dihydrogen monoxide \n"));
    }

    #[tokio::test]
    async fn malformed_question_still_plays_a_round() {
        let helper = QuizHelper::new(ScriptedCompleter::new().reply("no labels here").reply("No"));
        let mut console = console("Science\neasy\n1\nguess\nyes\n");

        let report = run_quiz(&helper, &mut console).await.unwrap();
        assert_eq!(report.score.correct(), 0);

        let text = output(console);
        assert!(text.contains("Question 1: \n"));
        assert!(text.contains("Incorrect. Correct answer: \n"));
        assert!(text.contains("Explanation: \n"));
    }

    #[tokio::test]
    async fn completion_failure_aborts_with_partial_score() {
        let completer = ScriptedCompleter::new()
            .reply(WATER)
            .reply("Yes")
            .fail("connection reset");
        let helper = QuizHelper::new(completer);
        let mut console = console("Science\neasy\n3\nwater\n");

        let report = run_quiz(&helper, &mut console).await.unwrap();

        assert!(matches!(report.outcome, Outcome::Aborted { .. }));
        assert_eq!(report.score.correct(), 1);
        assert_eq!(report.score.answered(), 1);

        let text = output(console);
        assert!(text.contains("Could not reach the quiz service: completion failed: connection reset"));
        assert!(text.ends_with("Quiz aborted after 1 of 3 questions. Your score: 1/1\n"));
    }

    #[tokio::test]
    async fn closed_input_is_an_error() {
        let helper = QuizHelper::new(ScriptedCompleter::new());
        let mut console = console("Science\n");

        let err = run_quiz(&helper, &mut console).await.unwrap_err();
        assert!(matches!(err, QuizError::InputClosed));
    }
}
