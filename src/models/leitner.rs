//! Leitner box spaced repetition scheduling.
//!
//! Cards move between five ordered boxes based on recall:
//! - A correct answer promotes the card one box, capped at box 5
//! - An incorrect answer sends the card back to box 1, regardless of its box
//! - Each box triples the review interval of the previous one (1h → 81h),
//!   so well-known cards surface exponentially less often
//!
//! All functions are pure; the caller supplies the clock and replaces the
//! card in its deck.

use super::Flashcard;

/// Review interval per box, in hours
pub const REVIEW_INTERVALS_HOURS: [i64; 5] = [1, 3, 9, 27, 81];

const MS_PER_HOUR: i64 = 3_600_000;

/// Returns the review interval for a box in hours.
/// Box numbers outside [1, 5] fall back to the box-1 interval.
pub fn interval_hours(box_number: u8) -> i64 {
    match box_number {
        1..=5 => REVIEW_INTERVALS_HOURS[(box_number - 1) as usize],
        _ => REVIEW_INTERVALS_HOURS[0],
    }
}

/// Applies a review outcome to a card.
/// Correct: promote one box (capped at 5). Incorrect: back to box 1.
/// Either way the card's review timestamp becomes `now_ms`.
pub fn process_answer(card: &Flashcard, is_correct: bool, now_ms: i64) -> Flashcard {
    let box_number = if is_correct {
        card.box_number.saturating_add(1).min(5)
    } else {
        1
    };

    Flashcard {
        box_number,
        last_reviewed_at: now_ms,
        ..card.clone()
    }
}

/// Timestamp (epoch milliseconds) at which a card becomes due for review.
pub fn due_at(card: &Flashcard) -> i64 {
    card.last_reviewed_at + interval_hours(card.box_number) * MS_PER_HOUR
}

/// Earliest due time among the cards currently in a box, or `None` if the
/// box is empty. Used for display, not for scheduling decisions.
pub fn next_due_in_box(box_number: u8, cards: &[Flashcard]) -> Option<i64> {
    cards
        .iter()
        .filter(|card| card.box_number == box_number)
        .map(due_at)
        .min()
}
