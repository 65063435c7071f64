//! GitHub contents API backend for deck storage.
//!
//! Decks are CSV files in a repository; the blob sha GitHub returns for a
//! file doubles as the version token. Reads fetch the base64-wrapped file
//! content, writes PUT new content conditioned on the previously observed
//! sha, and GitHub answers a mismatched sha with 409, which surfaces here
//! as a stale write.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::error::{LeitnerError, LeitnerResult};
use crate::store::RemoteStore;

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("leitner-core/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ContentResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    message: String,
    content: String,
    /// `None` serializes as JSON null: create the file
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Debug, Deserialize)]
struct WrittenContent {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    #[serde(rename = "type")]
    kind: String,
    name: String,
}

pub struct GitHubStore {
    config: StoreConfig,
    client: Client,
}

impl GitHubStore {
    /// Creates a store over the repository named in `config`.
    ///
    /// No request timeout is configured; failure timing is left to the
    /// transport, per the core's concurrency model.
    pub fn new(config: StoreConfig) -> LeitnerResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LeitnerError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn contents_url(&self, path: &str) -> String {
        format!("{}/contents/{}", self.config.api_base(), path)
    }

    /// Attaches the credential headers, failing if no token is configured.
    fn authorized(&self, request: RequestBuilder) -> LeitnerResult<RequestBuilder> {
        if !self.config.has_token() {
            return Err(LeitnerError::Auth(
                "GitHub token is not configured".to_string(),
            ));
        }

        Ok(request
            .header("Authorization", format!("token {}", self.config.token))
            .header("Accept", ACCEPT_HEADER))
    }

    async fn send(&self, request: RequestBuilder) -> LeitnerResult<Response> {
        request
            .send()
            .await
            .map_err(|e| LeitnerError::Network(e.to_string()))
    }
}

impl RemoteStore for GitHubStore {
    async fn list_decks(&self) -> LeitnerResult<Vec<String>> {
        let request = self.authorized(self.client.get(self.contents_url("")))?;
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(error_from_response("", response).await);
        }

        let entries: Vec<ListEntry> = response
            .json()
            .await
            .map_err(|e| LeitnerError::Decode(e.to_string()))?;
        Ok(csv_files(entries))
    }

    async fn read_deck(&self, name: &str) -> LeitnerResult<(String, String)> {
        let request = self.authorized(self.client.get(self.contents_url(name)))?;
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(error_from_response(name, response).await);
        }

        let content: ContentResponse = response
            .json()
            .await
            .map_err(|e| LeitnerError::Decode(e.to_string()))?;
        let text = decode_content(&content.content)?;
        Ok((text, content.sha))
    }

    async fn read_version_token(&self, name: &str) -> LeitnerResult<Option<String>> {
        let request = self.authorized(self.client.get(self.contents_url(name)))?;
        let response = self.send(request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_from_response(name, response).await);
        }

        let content: ContentResponse = response
            .json()
            .await
            .map_err(|e| LeitnerError::Decode(e.to_string()))?;
        Ok(Some(content.sha))
    }

    async fn write_deck(
        &self,
        name: &str,
        text: &str,
        expected_version: Option<&str>,
    ) -> LeitnerResult<String> {
        let body = WriteRequest {
            message: format!("Update flashcards {}", Utc::now().to_rfc3339()),
            content: BASE64.encode(text.as_bytes()),
            sha: expected_version,
        };

        let request = self
            .authorized(self.client.put(self.contents_url(name)))?
            .json(&body);
        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(error_from_response(name, response).await);
        }

        let written: WriteResponse = response
            .json()
            .await
            .map_err(|e| LeitnerError::Decode(e.to_string()))?;
        Ok(written.content.sha)
    }
}

/// Maps a non-success response to the error taxonomy, consuming the body
/// for its message.
async fn error_from_response(name: &str, response: Response) -> LeitnerError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LeitnerError::Auth(github_message(status, &body))
        }
        StatusCode::NOT_FOUND => LeitnerError::NotFound(name.to_string()),
        StatusCode::CONFLICT => LeitnerError::StaleWrite(name.to_string()),
        _ => LeitnerError::remote(status.as_u16(), github_message(status, &body)),
    }
}

/// Pulls the `message` field out of a GitHub error body, falling back to
/// the status line.
fn github_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| status.to_string())
}

/// Deck files are the `.csv` entries of the listing.
fn csv_files(entries: Vec<ListEntry>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|entry| entry.kind == "file" && entry.name.ends_with(".csv"))
        .map(|entry| entry.name)
        .collect()
}

/// Decodes a contents-API base64 payload, which wraps across lines.
fn decode_content(encoded: &str) -> LeitnerResult<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| LeitnerError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| LeitnerError::Decode(e.to_string()))
}
