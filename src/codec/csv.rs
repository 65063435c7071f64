//! CSV codec for flashcard decks.
//!
//! The wire format is one header row followed by one row per card:
//! `question,questionImage,answer,answerImage,box,lastReview,id`. Text
//! fields are always double-quoted on output with embedded quotes doubled,
//! so any comma, quote, or unicode content round-trips. Decoding is lenient
//! by design: structural problems degrade to defaults or an empty deck
//! rather than an error.
//!
//! The trailing `id` column keeps card identity stable across row
//! reordering. Legacy six-column files decode with positional ids (the
//! row's 1-based ordinal in the data section).

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

use crate::models::Flashcard;

/// Header row emitted by `encode`
pub const HEADER: &str = "question,questionImage,answer,answerImage,box,lastReview,id";

/// Decodes raw deck text into cards.
///
/// The first non-blank line is treated as the header and ignored; blank
/// lines are discarded. Input with no data rows yields an empty vector.
/// An unparseable box defaults to 1 (out-of-range values are clamped into
/// [1, 5]); an unparseable timestamp defaults to `now_ms`.
pub fn decode(raw: &str, now_ms: i64) -> Vec<Flashcard> {
    let lines: Vec<&str> = raw.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let mut cards = Vec::with_capacity(lines.len() - 1);
    for (ordinal, line) in lines[1..].iter().enumerate() {
        let values = split_line(line);
        let field = |index: usize| values.get(index).cloned().unwrap_or_default();

        let box_number = values
            .get(4)
            .and_then(|value| value.parse::<u8>().ok())
            .map(|parsed| parsed.clamp(1, 5))
            .unwrap_or(1);

        let last_reviewed_at = values
            .get(5)
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|parsed| parsed.timestamp_millis())
            .unwrap_or(now_ms);

        let id = values
            .get(6)
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or(ordinal as i64 + 1);

        cards.push(Flashcard {
            id,
            question: field(0),
            question_image: field(1),
            answer: field(2),
            answer_image: field(3),
            box_number,
            last_reviewed_at,
        });
    }

    cards
}

/// Encodes cards as deck text, one row per card in input order.
pub fn encode(cards: &[Flashcard]) -> String {
    let mut lines = Vec::with_capacity(cards.len() + 1);
    lines.push(HEADER.to_string());

    for card in cards {
        lines.push(format!(
            "{},{},{},{},{},{},{}",
            quote(&card.question),
            quote(&card.question_image),
            quote(&card.answer),
            quote(&card.answer_image),
            card.box_number,
            format_timestamp(card.last_reviewed_at),
            card.id,
        ));
    }

    lines.join("\n")
}

/// Splits one CSV line into fields.
///
/// A comma inside double quotes is not a separator; `""` inside a quoted
/// field is a literal quote. Surrounding quotes are stripped, and unquoted
/// fields are whitespace-trimmed (quoted content is kept verbatim).
fn split_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut was_quoted = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => {
                in_quotes = true;
                was_quoted = true;
            }
            ',' if !in_quotes => {
                values.push(finish_field(current, was_quoted));
                current = String::new();
                was_quoted = false;
            }
            _ => current.push(c),
        }
    }
    values.push(finish_field(current, was_quoted));

    values
}

fn finish_field(value: String, was_quoted: bool) -> String {
    if was_quoted {
        value
    } else {
        value.trim().to_string()
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn format_timestamp(ms: i64) -> String {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
