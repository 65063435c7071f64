//! In-memory `RemoteStore` backend.
//!
//! Keeps decks in a mutex-guarded map and derives version tokens from
//! SHA-256 content hashes, with the same stale-write semantics as the real
//! backend. Backs the repository tests and offline view-layer use.

use std::collections::HashMap;
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use crate::error::{LeitnerError, LeitnerResult};
use crate::store::RemoteStore;

#[derive(Default)]
pub struct InMemoryStore {
    decks: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a deck directly, bypassing version checks. Test setup helper.
    pub fn insert(&self, name: &str, text: &str) {
        self.decks
            .lock()
            .unwrap()
            .insert(name.to_string(), text.to_string());
    }

    fn version_of(text: &str) -> String {
        hex::encode(Sha256::digest(text.as_bytes()))
    }
}

impl RemoteStore for InMemoryStore {
    async fn list_decks(&self) -> LeitnerResult<Vec<String>> {
        let decks = self.decks.lock().unwrap();
        let mut names: Vec<String> = decks
            .keys()
            .filter(|name| name.ends_with(".csv"))
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    async fn read_deck(&self, name: &str) -> LeitnerResult<(String, String)> {
        let decks = self.decks.lock().unwrap();
        match decks.get(name) {
            Some(text) => Ok((text.clone(), Self::version_of(text))),
            None => Err(LeitnerError::NotFound(name.to_string())),
        }
    }

    async fn read_version_token(&self, name: &str) -> LeitnerResult<Option<String>> {
        let decks = self.decks.lock().unwrap();
        Ok(decks.get(name).map(|text| Self::version_of(text)))
    }

    async fn write_deck(
        &self,
        name: &str,
        text: &str,
        expected_version: Option<&str>,
    ) -> LeitnerResult<String> {
        let mut decks = self.decks.lock().unwrap();
        let current = decks.get(name).map(|existing| Self::version_of(existing));

        let matches = match (&current, expected_version) {
            (None, None) => true,
            (Some(current), Some(expected)) => current == expected,
            _ => false,
        };
        if !matches {
            return Err(LeitnerError::StaleWrite(name.to_string()));
        }

        decks.insert(name.to_string(), text.to_string());
        Ok(Self::version_of(text))
    }
}
