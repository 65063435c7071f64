//! Deck persistence orchestration.
//!
//! Bridges the codec and the remote store: load pulls a deck's file and
//! decodes it into a fresh `Deck`, save encodes the current cards and
//! performs a conditional write against the version token observed last.
//! The repository never retries and never merges; a failed operation
//! surfaces its error unchanged and leaves the in-memory deck untouched.
//! Callers serialize operations against the same deck.

use chrono::Utc;
use log::{debug, warn};

use crate::codec::csv;
use crate::error::LeitnerResult;
use crate::models::Deck;
use crate::store::{DEFAULT_DECK, RemoteStore};

pub struct DeckRepository<S> {
    store: S,
}

impl<S: RemoteStore> DeckRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists available decks.
    ///
    /// A store failure is not surfaced: the UI must always be able to offer
    /// a deck, so any error degrades to the one-element default list.
    pub async fn list_decks(&self) -> Vec<String> {
        match self.store.list_decks().await {
            Ok(decks) => decks,
            Err(e) => {
                warn!("deck listing failed, offering default deck: {e}");
                vec![DEFAULT_DECK.to_string()]
            }
        }
    }

    /// Loads a deck, replacing any previous in-memory state wholesale.
    ///
    /// The returned deck carries the version token of the revision read.
    /// Unsaved edits in a previously loaded deck are the caller's to save
    /// or discard first; there is no merge.
    pub async fn load(&self, name: &str) -> LeitnerResult<Deck> {
        let (text, version) = self.store.read_deck(name).await?;
        let cards = csv::decode(&text, Utc::now().timestamp_millis());
        debug!("loaded deck '{}' with {} cards", name, cards.len());
        Ok(Deck::from_cards(name, cards, Some(version)))
    }

    /// Saves a deck with a conditional write against its version token.
    ///
    /// A deck holding no token (never loaded, or newly created) first
    /// refreshes it from the store, which also covers creation: an absent
    /// remote file yields no token and the write creates it. On success the
    /// deck's token advances to the written revision; on failure deck state
    /// is left untouched and the error is surfaced unchanged.
    pub async fn save(&self, deck: &mut Deck) -> LeitnerResult<()> {
        let text = csv::encode(&deck.cards);

        let expected = match &deck.version {
            Some(version) => Some(version.clone()),
            None => self.store.read_version_token(&deck.name).await?,
        };

        let new_version = self
            .store
            .write_deck(&deck.name, &text, expected.as_deref())
            .await?;
        deck.version = Some(new_version);
        debug!("saved deck '{}' with {} cards", deck.name, deck.cards.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeitnerError;
    use crate::store::InMemoryStore;

    struct FailingStore;

    impl RemoteStore for FailingStore {
        async fn list_decks(&self) -> LeitnerResult<Vec<String>> {
            Err(LeitnerError::Network("connection refused".to_string()))
        }

        async fn read_deck(&self, name: &str) -> LeitnerResult<(String, String)> {
            Err(LeitnerError::NotFound(name.to_string()))
        }

        async fn read_version_token(&self, _name: &str) -> LeitnerResult<Option<String>> {
            Err(LeitnerError::Network("connection refused".to_string()))
        }

        async fn write_deck(
            &self,
            _name: &str,
            _text: &str,
            _expected_version: Option<&str>,
        ) -> LeitnerResult<String> {
            Err(LeitnerError::Network("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let repo = DeckRepository::new(InMemoryStore::new());

        let mut deck = Deck::new("polish.csv");
        deck.add_card("cześć", "", "hello", "", 1_000);
        deck.add_card("dziękuję", "", "thank you", "", 2_000);
        repo.save(&mut deck).await.unwrap();
        assert!(deck.version.is_some());

        let loaded = repo.load("polish.csv").await.unwrap();
        assert_eq!(loaded.cards, deck.cards);
        assert_eq!(loaded.version, deck.version);
    }

    #[tokio::test]
    async fn test_load_missing_deck_surfaces_not_found() {
        let repo = DeckRepository::new(InMemoryStore::new());
        assert!(matches!(
            repo.load("missing.csv").await,
            Err(LeitnerError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_stale_save_is_rejected_and_leaves_deck_untouched() {
        let repo = DeckRepository::new(InMemoryStore::new());

        let mut deck = Deck::new("shared.csv");
        deck.add_card("q", "", "a", "", 0);
        repo.save(&mut deck).await.unwrap();

        // two sessions load the same revision; the first one saves
        let mut session_a = repo.load("shared.csv").await.unwrap();
        let mut session_b = repo.load("shared.csv").await.unwrap();
        session_a.add_card("new", "", "nowy", "", 0);
        repo.save(&mut session_a).await.unwrap();

        // the second session's token is now stale
        let token_before = session_b.version.clone();
        session_b.add_card("conflicting", "", "edit", "", 0);
        let result = repo.save(&mut session_b).await;

        assert!(matches!(result, Err(LeitnerError::StaleWrite(_))));
        assert_eq!(session_b.version, token_before);
        assert_eq!(session_b.cards.len(), 2);

        // remote still holds the first session's revision
        let remote = repo.load("shared.csv").await.unwrap();
        assert_eq!(remote.cards, session_a.cards);
    }

    #[tokio::test]
    async fn test_save_without_token_refreshes_it_first() {
        let store = InMemoryStore::new();
        store.insert("existing.csv", "question,questionImage,answer,answerImage,box,lastReview\n\"old\",\"\",\"stare\",\"\",1,2023-11-14T22:13:20.000Z");
        let repo = DeckRepository::new(store);

        // a deck built from scratch, unaware it already exists remotely
        let mut deck = Deck::new("existing.csv");
        deck.add_card("new", "", "nowe", "", 0);
        repo.save(&mut deck).await.unwrap();

        // last-writer-wins: the fresh content replaced the remote file
        let loaded = repo.load("existing.csv").await.unwrap();
        assert_eq!(loaded.cards.len(), 1);
        assert_eq!(loaded.cards[0].question, "new");
    }

    #[tokio::test]
    async fn test_review_and_save_persists_box_transition() {
        let repo = DeckRepository::new(InMemoryStore::new());

        let mut deck = Deck::new("review.csv");
        let id = deck.add_card("q", "", "a", "", 1_000);
        repo.save(&mut deck).await.unwrap();

        deck.record_answer(id, true, 2_000);
        repo.save(&mut deck).await.unwrap();

        let loaded = repo.load("review.csv").await.unwrap();
        assert_eq!(loaded.card(id).unwrap().box_number, 2);
        assert_eq!(loaded.card(id).unwrap().last_reviewed_at, 2_000);
    }

    #[tokio::test]
    async fn test_listing_falls_back_to_default_deck() {
        let repo = DeckRepository::new(FailingStore);
        assert_eq!(repo.list_decks().await, vec![DEFAULT_DECK.to_string()]);
    }

    #[tokio::test]
    async fn test_listing_passes_through_on_success() {
        let store = InMemoryStore::new();
        store.insert("a.csv", "");
        let repo = DeckRepository::new(store);
        assert_eq!(repo.list_decks().await, vec!["a.csv".to_string()]);
    }

    #[tokio::test]
    async fn test_loaded_ids_survive_reordering_via_persisted_column() {
        let repo = DeckRepository::new(InMemoryStore::new());

        let mut deck = Deck::new("ids.csv");
        let first = deck.add_card("first", "", "1", "", 0);
        let second = deck.add_card("second", "", "2", "", 0);
        deck.cards.reverse();
        repo.save(&mut deck).await.unwrap();

        let loaded = repo.load("ids.csv").await.unwrap();
        assert_eq!(loaded.card(first).unwrap().question, "first");
        assert_eq!(loaded.card(second).unwrap().question, "second");

        // CRUD ids continue past the highest persisted id
        let mut loaded = loaded;
        assert_eq!(loaded.add_card("third", "", "3", "", 0), second + 1);
    }

    #[tokio::test]
    async fn test_empty_remote_file_loads_as_empty_deck() {
        let store = InMemoryStore::new();
        store.insert("empty.csv", "");
        let repo = DeckRepository::new(store);

        let deck = repo.load("empty.csv").await.unwrap();
        assert!(deck.cards.is_empty());
        assert!(deck.version.is_some());
    }
}
