//! Library core of a Leitner spaced-repetition flashcard app.
//!
//! Decks are CSV files in a remote version-controlled store (GitHub
//! contents API); this crate owns the scheduling engine, the deck codec,
//! and the optimistic-concurrency persistence discipline. A view layer
//! consumes it; there is no UI or CLI here.

pub mod codec;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use config::StoreConfig;
pub use error::{LeitnerError, LeitnerResult};
pub use models::{Deck, Flashcard, ReviewSession};
pub use repository::DeckRepository;
pub use store::{GitHubStore, InMemoryStore, RemoteStore};
