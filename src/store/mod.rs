//! Remote deck storage.
//!
//! Decks live as CSV files in a remote, version-controlled file store. The
//! `RemoteStore` trait is the minimal capability set the core depends on;
//! `GitHubStore` talks to the GitHub contents API and `InMemoryStore` backs
//! tests and offline use.

pub mod github;
pub mod memory;

use std::future::Future;

use crate::error::LeitnerResult;

pub use github::GitHubStore;
pub use memory::InMemoryStore;

/// Deck name offered when the remote listing is unavailable
pub const DEFAULT_DECK: &str = "flashcards.csv";

/// Capability contract for a versioned deck file store.
///
/// Every operation is a single-shot awaited call; the caller serializes
/// operations against the same deck. Writes are conditional on the version
/// token observed at the last read, so an out-of-band change is detected as
/// a stale write instead of being silently overwritten.
pub trait RemoteStore: Send + Sync {
    /// List the deck files available at the store root.
    fn list_decks(&self) -> impl Future<Output = LeitnerResult<Vec<String>>> + Send;

    /// Read a deck's raw text together with its current version token.
    fn read_deck(&self, name: &str) -> impl Future<Output = LeitnerResult<(String, String)>> + Send;

    /// Read only the current version token, or `None` if the deck does not
    /// exist. Kept separate from `read_deck` so obtaining a token does not
    /// require a content read.
    fn read_version_token(
        &self,
        name: &str,
    ) -> impl Future<Output = LeitnerResult<Option<String>>> + Send;

    /// Conditionally write a deck and return its new version token.
    ///
    /// `expected_version` must be the most recent known token for the deck;
    /// `None` means the deck is assumed not to exist yet and is created.
    /// A token mismatch fails with `StaleWrite` and leaves the remote
    /// content untouched.
    fn write_deck(
        &self,
        name: &str,
        text: &str,
        expected_version: Option<&str>,
    ) -> impl Future<Output = LeitnerResult<String>> + Send;
}
