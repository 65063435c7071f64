//! Review session over the cards of one Leitner box.
//! Replaces ambient "current card" state with an explicit cursor value.

use super::{Deck, Flashcard, leitner};

/// Walks the cards of a single box in due-time order.
///
/// The session holds card ids, not cards, so deck mutations made while
/// answering (promotion, demotion) are always observed through the deck.
pub struct ReviewSession {
    pub box_number: u8,
    queue: Vec<i64>,
    current_index: usize,
    pub show_answer: bool,
}

impl ReviewSession {
    /// Creates a session over every card currently in the given box,
    /// earliest-due first.
    pub fn for_box(deck: &Deck, box_number: u8) -> Self {
        let mut due: Vec<(i64, i64)> = deck
            .cards
            .iter()
            .filter(|card| card.box_number == box_number)
            .map(|card| (leitner::due_at(card), card.id))
            .collect();
        due.sort_unstable();

        Self {
            box_number,
            queue: due.into_iter().map(|(_, id)| id).collect(),
            current_index: 0,
            show_answer: false,
        }
    }

    pub fn current_card<'a>(&self, deck: &'a Deck) -> Option<&'a Flashcard> {
        self.queue
            .get(self.current_index)
            .and_then(|&id| deck.card(id))
    }

    pub fn reveal_answer(&mut self) {
        self.show_answer = true;
    }

    /// Grades the current card through the deck and advances the cursor.
    pub fn answer(&mut self, deck: &mut Deck, is_correct: bool, now_ms: i64) {
        if let Some(&id) = self.queue.get(self.current_index) {
            deck.record_answer(id, is_correct, now_ms);
            self.current_index += 1;
            self.show_answer = false;
        }
    }

    pub fn total_count(&self) -> usize {
        self.queue.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.queue.len() - self.current_index.min(self.queue.len())
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.queue.len()
    }
}
