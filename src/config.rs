//! Remote store configuration.
//!
//! Holds the coordinates of the GitHub repository that stores the deck files
//! and the access token gating authenticated calls. Loading and persisting
//! this struct is the consuming application's job; it is serde-serializable
//! so a settings store can round-trip it as JSON.

use serde::{Deserialize, Serialize};

/// Deck file used when no path is configured
pub const DEFAULT_CSV_PATH: &str = "flashcards.csv";

/// Coordinates and credential for the deck repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Repository owner (user or organization)
    #[serde(default)]
    pub owner: String,
    /// Repository name
    #[serde(default)]
    pub repo: String,
    /// Opaque bearer token; empty means unauthenticated
    #[serde(default)]
    pub token: String,
    /// Default deck file path within the repository
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

fn default_csv_path() -> String {
    DEFAULT_CSV_PATH.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            token: String::new(),
            csv_path: default_csv_path(),
        }
    }
}

impl StoreConfig {
    /// Base URL of the repository's contents API
    pub fn api_base(&self) -> String {
        format!("https://api.github.com/repos/{}/{}", self.owner, self.repo)
    }

    /// Whether an access token has been configured
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}
