//! Deck is an ordered collection of flashcards tied to one remote file.
//!
//! The deck value is the explicit session state passed into operations:
//! it carries the remote path it was loaded from, the version token of the
//! revision it reflects, and the counter for CRUD-assigned card ids. All
//! mutations here touch memory only; persistence is a separate, explicit
//! step through the repository.
use serde::{Deserialize, Serialize};

use super::{Flashcard, leitner};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    /// Path-like deck identifier in the remote store, e.g. "french.csv"
    pub name: String,
    pub cards: Vec<Flashcard>,
    /// Opaque token of the remote revision this deck reflects;
    /// `None` until the deck has been loaded or saved
    pub version: Option<String>,
    next_id: i64,
}

impl Deck {
    /// Creates an empty deck that does not exist remotely yet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cards: Vec::new(),
            version: None,
            next_id: 1,
        }
    }

    /// Builds a deck from decoded cards, seeding the id counter past the
    /// highest existing id so CRUD ids never collide with decoded ones.
    pub fn from_cards(name: &str, cards: Vec<Flashcard>, version: Option<String>) -> Self {
        let next_id = cards.iter().map(|card| card.id).max().unwrap_or(0) + 1;
        Self {
            name: name.to_string(),
            cards,
            version,
            next_id,
        }
    }

    /// Adds a new card in box 1 and returns its assigned id.
    pub fn add_card(
        &mut self,
        question: &str,
        question_image: &str,
        answer: &str,
        answer_image: &str,
        now_ms: i64,
    ) -> i64 {
        let id = self.next_id;
        self.next_id += 1;

        self.cards.push(Flashcard {
            id,
            question: question.to_string(),
            question_image: question_image.to_string(),
            answer: answer.to_string(),
            answer_image: answer_image.to_string(),
            box_number: 1,
            last_reviewed_at: now_ms,
        });

        id
    }

    /// Replaces the card with a matching id; no-op if the id is unknown.
    pub fn update_card(&mut self, card: Flashcard) {
        if let Some(existing) = self.cards.iter_mut().find(|c| c.id == card.id) {
            *existing = card;
        }
    }

    /// Removes the card with the given id; no-op if absent.
    pub fn remove_card(&mut self, id: i64) {
        self.cards.retain(|card| card.id != id);
    }

    pub fn card(&self, id: i64) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Applies a review outcome to the card with the given id and returns
    /// the updated card, or `None` if the id is unknown. Does not persist.
    pub fn record_answer(&mut self, id: i64, is_correct: bool, now_ms: i64) -> Option<&Flashcard> {
        let index = self.cards.iter().position(|card| card.id == id)?;
        self.cards[index] = leitner::process_answer(&self.cards[index], is_correct, now_ms);
        Some(&self.cards[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_card_assigns_increasing_ids() {
        let mut deck = Deck::new("test.csv");
        let first = deck.add_card("one", "", "jeden", "", 0);
        let second = deck.add_card("two", "", "dwa", "", 0);

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(deck.cards[0].box_number, 1);
    }

    #[test]
    fn test_ids_continue_past_loaded_cards() {
        let cards = vec![
            Flashcard::new(3, "a", "b", 0),
            Flashcard::new(7, "c", "d", 0),
        ];
        let mut deck = Deck::from_cards("test.csv", cards, None);

        let id = deck.add_card("e", "", "f", "", 0);
        assert_eq!(id, 8);
    }

    #[test]
    fn test_update_card_replaces_matching_id() {
        let mut deck = Deck::new("test.csv");
        let id = deck.add_card("old", "", "stary", "", 0);

        let mut edited = deck.card(id).unwrap().clone();
        edited.question = "new".to_string();
        deck.update_card(edited);

        assert_eq!(deck.card(id).unwrap().question, "new");
    }

    #[test]
    fn test_update_card_with_unknown_id_is_noop() {
        let mut deck = Deck::new("test.csv");
        deck.add_card("keep", "", "me", "", 0);

        deck.update_card(Flashcard::new(99, "ghost", "card", 0));

        assert_eq!(deck.cards.len(), 1);
        assert_eq!(deck.cards[0].question, "keep");
    }

    #[test]
    fn test_remove_card() {
        let mut deck = Deck::new("test.csv");
        let id = deck.add_card("bye", "", "pa", "", 0);

        deck.remove_card(id);
        assert!(deck.cards.is_empty());

        // removing again is a no-op
        deck.remove_card(id);
        assert!(deck.cards.is_empty());
    }

    #[test]
    fn test_record_answer_updates_card_in_place() {
        let mut deck = Deck::new("test.csv");
        let id = deck.add_card("q", "", "a", "", 100);

        let updated = deck.record_answer(id, true, 200).unwrap();
        assert_eq!(updated.box_number, 2);
        assert_eq!(updated.last_reviewed_at, 200);

        let updated = deck.record_answer(id, false, 300).unwrap();
        assert_eq!(updated.box_number, 1);
    }

    #[test]
    fn test_record_answer_unknown_id() {
        let mut deck = Deck::new("test.csv");
        assert!(deck.record_answer(42, true, 0).is_none());
    }
}
