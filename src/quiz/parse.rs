use std::collections::HashMap;

use crate::quiz::QuestionItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Question,
    Answer,
    Explanation,
}

impl Label {
    const ALL: [Label; 3] = [Label::Question, Label::Answer, Label::Explanation];

    fn prefix(self) -> &'static str {
        match self {
            Label::Question => "question:",
            Label::Answer => "answer:",
            Label::Explanation => "explanation:",
        }
    }
}

/// Recognises a labelled line such as `Answer: Paris`, ignoring the label's case.
///
/// Returns the label and the trimmed text after the first colon, or `None` for
/// any line that does not start with a known label.
pub fn tokenize_line(line: &str) -> Option<(Label, &str)> {
    let line = line.trim();
    Label::ALL.into_iter().find_map(|label| {
        let prefix = label.prefix();
        // `get` keeps us on a char boundary for non-ASCII lines.
        let head = line.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| (label, line[prefix.len()..].trim()))
    })
}

/// Collects every labelled line of a completion. Later lines overwrite earlier
/// ones with the same label.
pub fn tokenize(text: &str) -> HashMap<Label, &str> {
    text.lines().filter_map(tokenize_line).collect()
}

pub fn parse_question_item(text: &str) -> QuestionItem {
    let mut fields = tokenize(text);
    let mut take = |label: Label| fields.remove(&label).unwrap_or_default().to_string();

    QuestionItem {
        question: take(Label::Question),
        answer: take(Label::Answer),
        explanation: take(Label::Explanation),
    }
}
