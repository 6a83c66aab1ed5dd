//! Document gateway over the Firestore REST API.
//!
//! Each operation is a single HTTP call with a fixed timeout; there is no
//! retry, no backoff and no cross-call state beyond the read-through cache.
//! The typed `try_*` operations return `FirestoreResult` so failures stay
//! distinguishable for logging and future handling; the plain-named
//! wrappers preserve the best-effort contract the callers rely on (`None`,
//! `false` or an empty list on any failure, with the error logged).

use log::{error, info, warn};
use reqwest::{Client, Method, Response};
use serde_json::{json, Map, Value};
use std::time::Duration;

use super::cache::{cache_key, DocumentCache};
use super::config::FirestoreConfig;
use super::error::{FirestoreError, FirestoreResult};
use super::query::{build_query, FieldFilter};
use super::value::{decode_document, encode_fields};

/// Sort direction for client-side ordering in
/// [`FirestoreClient::query_collection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Gateway to a Firestore documents endpoint.
///
/// Explicitly constructed from a [`FirestoreConfig`] and passed to callers;
/// holds the shared HTTP client and the single-document read cache.
pub struct FirestoreClient {
    config: FirestoreConfig,
    http: Client,
    cache: DocumentCache,
}

impl FirestoreClient {
    pub fn new(config: FirestoreConfig) -> FirestoreResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        let cache = DocumentCache::new(config.cache_capacity);

        Ok(Self {
            config,
            http,
            cache,
        })
    }

    pub fn config(&self) -> &FirestoreConfig {
        &self.config
    }

    fn document_url(&self, collection: &str, document_id: &str) -> String {
        format!("{}/{}/{}", self.config.base_url, collection, document_id)
    }

    /// Dispatch a request with the API key attached.
    ///
    /// A caller-supplied `token` parameter is stripped before dispatch; the
    /// backing store authenticates with the shared key only, and a
    /// client-controlled auth token must never cross that boundary.
    async fn request(
        &self,
        method: Method,
        url: &str,
        params: Vec<(String, String)>,
        body: Option<&Value>,
    ) -> FirestoreResult<Response> {
        let mut query: Vec<(String, String)> = Vec::with_capacity(params.len() + 1);
        for (name, value) in params {
            if name == "token" {
                warn!("Removing unexpected 'token' parameter from Firestore request");
                continue;
            }
            query.push((name, value));
        }
        query.push(("key".to_string(), self.config.api_key.clone()));

        let mut request = self.http.request(method.clone(), url).query(&query);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        info!("{} {} - status {}", method, url, response.status());
        Ok(response)
    }

    async fn status_error(response: Response) -> FirestoreError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        FirestoreError::status(status, body)
    }

    /// Fetch a single document.
    ///
    /// Returns `Ok(None)` both for a remote 404 and for a document with no
    /// fields. A 404 result is never cached.
    pub async fn try_get_document(
        &self,
        collection: &str,
        document_id: &str,
        use_cache: bool,
    ) -> FirestoreResult<Option<Map<String, Value>>> {
        let key = cache_key(collection, document_id);
        if use_cache {
            if let Some(cached) = self.cache.get(&key).await {
                return Ok(Some(cached));
            }
        }

        let url = self.document_url(collection, document_id);
        let response = self.request(Method::GET, &url, Vec::new(), None).await?;

        match response.status().as_u16() {
            200 => {
                let body: Value = response.json().await?;
                let document = decode_document(&body);
                if use_cache {
                    if let Some(document) = &document {
                        let ttl = Duration::from_secs(self.config.cache_ttl_seconds);
                        self.cache.set(key, document.clone(), ttl).await;
                    }
                }
                Ok(document)
            }
            404 => {
                warn!("Document {}/{} not found", collection, document_id);
                Ok(None)
            }
            _ => Err(Self::status_error(response).await),
        }
    }

    /// Best-effort variant of [`try_get_document`](Self::try_get_document):
    /// any failure is logged and collapses into `None`.
    pub async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
        use_cache: bool,
    ) -> Option<Map<String, Value>> {
        match self.try_get_document(collection, document_id, use_cache).await {
            Ok(document) => document,
            Err(e) => {
                error!("Failed to get document {}/{}: {}", collection, document_id, e);
                None
            }
        }
    }

    /// Create or replace the given fields of a document (PATCH without a
    /// field mask). Invalidates the cache entry on success.
    pub async fn try_set_document(
        &self,
        collection: &str,
        document_id: &str,
        data: &Map<String, Value>,
    ) -> FirestoreResult<()> {
        let url = self.document_url(collection, document_id);
        let body = json!({ "fields": encode_fields(data) });
        let response = self
            .request(Method::PATCH, &url, Vec::new(), Some(&body))
            .await?;

        if response.status().is_success() {
            self.cache.remove(&cache_key(collection, document_id)).await;
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    pub async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        data: &Map<String, Value>,
    ) -> bool {
        match self.try_set_document(collection, document_id, data).await {
            Ok(()) => {
                info!("Set document {}/{}", collection, document_id);
                true
            }
            Err(e) => {
                error!("Failed to set document {}/{}: {}", collection, document_id, e);
                false
            }
        }
    }

    /// Partial update: PATCH with an explicit `updateMask.fieldPaths` listing
    /// exactly the updated field names, so untouched remote fields are
    /// preserved. Invalidates the cache entry on success.
    pub async fn try_update_document(
        &self,
        collection: &str,
        document_id: &str,
        updates: &Map<String, Value>,
    ) -> FirestoreResult<()> {
        let params: Vec<(String, String)> = updates
            .keys()
            .map(|field| ("updateMask.fieldPaths".to_string(), field.clone()))
            .collect();

        let url = self.document_url(collection, document_id);
        let body = json!({ "fields": encode_fields(updates) });
        let response = self.request(Method::PATCH, &url, params, Some(&body)).await?;

        if response.status().is_success() {
            self.cache.remove(&cache_key(collection, document_id)).await;
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    pub async fn update_document(
        &self,
        collection: &str,
        document_id: &str,
        updates: &Map<String, Value>,
    ) -> bool {
        match self.try_update_document(collection, document_id, updates).await {
            Ok(()) => {
                info!("Updated document {}/{}", collection, document_id);
                true
            }
            Err(e) => {
                error!(
                    "Failed to update document {}/{}: {}",
                    collection, document_id, e
                );
                false
            }
        }
    }

    /// Delete a document. Invalidates the cache entry on success.
    pub async fn try_delete_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> FirestoreResult<()> {
        let url = self.document_url(collection, document_id);
        let response = self.request(Method::DELETE, &url, Vec::new(), None).await?;

        if response.status().is_success() {
            self.cache.remove(&cache_key(collection, document_id)).await;
            Ok(())
        } else {
            Err(Self::status_error(response).await)
        }
    }

    pub async fn delete_document(&self, collection: &str, document_id: &str) -> bool {
        match self.try_delete_document(collection, document_id).await {
            Ok(()) => {
                info!("Deleted document {}/{}", collection, document_id);
                true
            }
            Err(e) => {
                error!(
                    "Failed to delete document {}/{}: {}",
                    collection, document_id, e
                );
                false
            }
        }
    }

    /// List documents in a collection with a page-size limit.
    pub async fn try_list_collection(
        &self,
        collection: &str,
        limit: usize,
    ) -> FirestoreResult<Vec<Map<String, Value>>> {
        let url = format!("{}/{}", self.config.base_url, collection);
        let params = vec![("pageSize".to_string(), limit.to_string())];
        let response = self.request(Method::GET, &url, params, None).await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body: Value = response.json().await?;
        let documents = body
            .get("documents")
            .and_then(Value::as_array)
            .map(|docs| docs.iter().filter_map(decode_document).collect())
            .unwrap_or_default();
        Ok(documents)
    }

    /// Listing is allowed to fail silently to an empty result; there is no
    /// retry budget.
    pub async fn list_collection(&self, collection: &str, limit: usize) -> Vec<Map<String, Value>> {
        match self.try_list_collection(collection, limit).await {
            Ok(documents) => documents,
            Err(e) => {
                error!("Failed to list collection {}: {}", collection, e);
                Vec::new()
            }
        }
    }

    /// List the documents of a subcollection nested under a single document
    /// (`{collection}/{document_id}/{subcollection}`).
    pub async fn try_get_subcollection(
        &self,
        collection: &str,
        document_id: &str,
        subcollection: &str,
    ) -> FirestoreResult<Vec<Map<String, Value>>> {
        let url = format!(
            "{}/{}/{}/{}",
            self.config.base_url, collection, document_id, subcollection
        );
        let response = self.request(Method::GET, &url, Vec::new(), None).await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body: Value = response.json().await?;
        let documents = body
            .get("documents")
            .and_then(Value::as_array)
            .map(|docs| docs.iter().filter_map(decode_document).collect())
            .unwrap_or_default();
        Ok(documents)
    }

    pub async fn get_subcollection(
        &self,
        collection: &str,
        document_id: &str,
        subcollection: &str,
    ) -> Vec<Map<String, Value>> {
        match self
            .try_get_subcollection(collection, document_id, subcollection)
            .await
        {
            Ok(documents) => documents,
            Err(e) => {
                error!(
                    "Failed to get subcollection {}/{}/{}: {}",
                    collection, document_id, subcollection, e
                );
                Vec::new()
            }
        }
    }

    /// Run a structured query against a collection.
    ///
    /// Response items lacking a `document` key are skipped.
    pub async fn try_run_query(
        &self,
        collection: &str,
        filters: &[FieldFilter],
    ) -> FirestoreResult<Vec<Map<String, Value>>> {
        let url = format!("{}:runQuery", self.config.base_url);
        let query = build_query(collection, filters);
        let response = self.request(Method::POST, &url, Vec::new(), Some(&query)).await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body: Value = response.json().await?;
        let results = body
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("document"))
                    .filter_map(decode_document)
                    .collect()
            })
            .unwrap_or_default();
        Ok(results)
    }

    pub async fn run_query(
        &self,
        collection: &str,
        filters: &[FieldFilter],
    ) -> Vec<Map<String, Value>> {
        match self.try_run_query(collection, filters).await {
            Ok(results) => results,
            Err(e) => {
                error!("Query on {} failed: {}", collection, e);
                Vec::new()
            }
        }
    }

    /// AND-composition convenience over [`run_query`](Self::run_query).
    pub async fn query_with_filters(
        &self,
        collection: &str,
        filters: &[FieldFilter],
    ) -> Vec<Map<String, Value>> {
        self.run_query(collection, filters).await
    }

    /// ARRAY_CONTAINS convenience over [`run_query`](Self::run_query).
    pub async fn query_array_contains(
        &self,
        collection: &str,
        field: &str,
        value: impl Into<Value>,
    ) -> Vec<Map<String, Value>> {
        self.run_query(collection, &[FieldFilter::array_contains(field, value)])
            .await
    }

    /// General collection read: filtered query or full listing, with
    /// optional client-side ordering and truncation.
    ///
    /// The limit is never pushed into the query body; results are truncated
    /// after decoding, which may over-fetch but never returns fewer
    /// documents than a correct limit would.
    pub async fn query_collection(
        &self,
        collection: &str,
        filters: &[FieldFilter],
        order_by: Option<(&str, SortDirection)>,
        limit: Option<usize>,
    ) -> Vec<Map<String, Value>> {
        let mut results = if filters.is_empty() {
            self.list_collection(collection, limit.unwrap_or(100)).await
        } else {
            self.query_with_filters(collection, filters).await
        };

        if let Some((field, direction)) = order_by {
            results.sort_by_key(|doc| sort_key(doc.get(field)));
            if direction == SortDirection::Descending {
                results.reverse();
            }
        }

        if let Some(limit) = limit {
            results.truncate(limit);
        }
        results
    }
}

/// Ordering key for client-side sorting: missing fields sort first, and
/// values compare by their JSON text, mirroring the loose ordering the
/// callers expect for string fields.
fn sort_key(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
