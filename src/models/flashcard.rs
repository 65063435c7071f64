//! Flashcard is a question/answer pair with optional image references and
//! Leitner review state.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Unique within a deck
    pub id: i64,
    pub question: String,
    /// Optional image URI; empty means absent
    pub question_image: String,
    pub answer: String,
    /// Optional image URI; empty means absent
    pub answer_image: String,
    /// Leitner box, always in [1, 5]
    pub box_number: u8,
    /// Epoch milliseconds UTC, set on creation and on every review
    pub last_reviewed_at: i64,
}

impl Flashcard {
    /// Creates a fresh card in box 1, reviewed "now".
    pub fn new(id: i64, question: &str, answer: &str, now_ms: i64) -> Self {
        Self {
            id,
            question: question.to_string(),
            question_image: String::new(),
            answer: answer.to_string(),
            answer_image: String::new(),
            box_number: 1,
            last_reviewed_at: now_ms,
        }
    }
}
