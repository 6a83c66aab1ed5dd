//! Configuration for the Firestore gateway.

use serde::{Deserialize, Serialize};
use std::env;

use super::error::{FirestoreError, FirestoreResult};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_CACHE_TTL_SECONDS: u64 = 300;
const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Configuration for [`FirestoreClient`](super::FirestoreClient).
///
/// Constructed explicitly and passed to the client; there is no module-level
/// singleton. The base URL is derived from the project id but can be
/// overridden, which is how tests point the gateway at a local emulator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Shared API key, sent as the `key` query parameter on every call.
    pub api_key: String,
    /// Firestore project id.
    pub project_id: String,
    /// Root of the `documents` resource path.
    pub base_url: String,
    /// Timeout for the network leg of each call.
    pub timeout_seconds: u64,
    /// TTL for read-through cached documents.
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached documents.
    pub cache_capacity: usize,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            project_id: String::new(),
            base_url: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl FirestoreConfig {
    /// Create a config for the given project with the standard Google
    /// endpoint.
    pub fn new(api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        let project_id = project_id.into();
        Self {
            api_key: api_key.into(),
            base_url: documents_url(&project_id),
            project_id,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `FIRESTORE_API_KEY` and `FIRESTORE_PROJECT_ID` are required;
    /// `FIRESTORE_BASE_URL`, `FIRESTORE_TIMEOUT_SECONDS` and
    /// `FIRESTORE_CACHE_TTL_SECONDS` are optional overrides.
    pub fn from_env() -> FirestoreResult<Self> {
        let api_key = env::var("FIRESTORE_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            return Err(FirestoreError::config("FIRESTORE_API_KEY not set"));
        }

        let project_id = env::var("FIRESTORE_PROJECT_ID").unwrap_or_default();
        if project_id.is_empty() {
            return Err(FirestoreError::config("FIRESTORE_PROJECT_ID not set"));
        }

        let base_url =
            env::var("FIRESTORE_BASE_URL").unwrap_or_else(|_| documents_url(&project_id));

        let timeout_seconds = env::var("FIRESTORE_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let cache_ttl_seconds = env::var("FIRESTORE_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_CACHE_TTL_SECONDS);

        Ok(Self {
            api_key,
            project_id,
            base_url,
            timeout_seconds,
            cache_ttl_seconds,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        })
    }

    /// Override the documents endpoint, e.g. to target an emulator.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> FirestoreResult<()> {
        if self.api_key.is_empty() {
            return Err(FirestoreError::config("Firestore API key is required"));
        }
        if self.base_url.is_empty() {
            return Err(FirestoreError::config("Firestore base URL is required"));
        }
        Ok(())
    }
}

fn documents_url(project_id: &str) -> String {
    format!(
        "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
        project_id
    )
}
