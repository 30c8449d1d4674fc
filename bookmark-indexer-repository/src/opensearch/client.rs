//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client. The REST calls it makes (`HEAD /{index}`,
//! `PUT /{index}`, `POST /{index}/_bulk`, `GET /{index}/_doc/{id}`) are shared
//! with Elasticsearch, so either engine can sit behind it.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::{
        request::JsonBody,
        transport::{SingleNodeConnectionPool, TransportBuilder},
        StatusCode,
    },
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, GetParts, OpenSearch,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::SearchConnectionConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::get_index_settings;
use crate::types::{BatchOperationResult, BatchOperationSummary, IndexStatus};
use bookmark_indexer_shared::BookmarkDocument;

/// OpenSearch client implementation.
///
/// Built once at startup from a [`SearchConnectionConfig`] and shared with the
/// loader.
///
/// # Example
///
/// ```ignore
/// let config = SearchConnectionConfig::default().with_basic_auth("elastic", "changeme");
/// let client = OpenSearchClient::new(&config)?;
///
/// client.ensure_index("pinboard").await?;
/// let summary = client.bulk_index_documents("pinboard", &documents).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured cluster.
    ///
    /// No request is made here; connection problems surface on first use.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(config: &SearchConnectionConfig) -> Result<Self, SearchIndexError> {
        let url = config.url();
        let parsed_url =
            Url::parse(&url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        if let Some((username, password)) = config.credentials() {
            builder = builder.auth(Credentials::Basic(
                username.to_string(),
                password.to_string(),
            ));
        }

        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(
            url = %url,
            authenticated = config.credentials().is_some(),
            "Created OpenSearch client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }
}

/// Build the NDJSON lines for a bulk request: one `index` action per document,
/// keyed by its identifier, followed by the document source.
fn build_bulk_body(
    index: &str,
    documents: &[BookmarkDocument],
) -> Result<Vec<JsonBody<Value>>, SearchIndexError> {
    let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);

    for doc in documents {
        let source = serde_json::to_value(doc).map_err(|e| {
            SearchIndexError::serialization(format!("{}: {}", doc.identifier, e))
        })?;
        body.push(json!({"index": {"_index": index, "_id": doc.identifier}}).into());
        body.push(source.into());
    }

    Ok(body)
}

/// Match the `items` of a bulk response to the documents that were sent.
///
/// Items come back in request order, one per action.
fn parse_bulk_response(
    documents: &[BookmarkDocument],
    body: &Value,
) -> Result<BatchOperationSummary, SearchIndexError> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| SearchIndexError::parse("Bulk response has no items array"))?;

    if items.len() != documents.len() {
        return Err(SearchIndexError::parse(format!(
            "Bulk response has {} items for {} documents",
            items.len(),
            documents.len()
        )));
    }

    let results = documents
        .iter()
        .zip(items)
        .map(|(doc, item)| {
            // Each item is keyed by its action name, e.g. {"index": {...}}
            let outcome = item.as_object().and_then(|o| o.values().next());
            let status = outcome
                .and_then(|o| o.get("status"))
                .and_then(Value::as_u64)
                .unwrap_or(0);

            match outcome.and_then(|o| o.get("error")) {
                None if (200..300).contains(&status) => {
                    BatchOperationResult::succeeded(doc.identifier.clone())
                }
                error => {
                    let reason = error
                        .map(describe_item_error)
                        .unwrap_or_else(|| format!("unexpected status {}", status));
                    BatchOperationResult::failed(
                        doc.identifier.clone(),
                        SearchIndexError::index(reason),
                    )
                }
            }
        })
        .collect();

    Ok(BatchOperationSummary::from_results(results))
}

fn describe_item_error(error: &Value) -> String {
    match (
        error.get("type").and_then(Value::as_str),
        error.get("reason").and_then(Value::as_str),
    ) {
        (Some(kind), Some(reason)) => format!("{}: {}", kind, reason),
        (Some(kind), None) => kind.to_string(),
        _ => error.to_string(),
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    /// Check for the index and create it with the bookmark mapping if it is missing.
    ///
    /// An existing index is never modified. If another writer creates the index between
    /// the check and the create call, the `resource_already_exists_exception` is treated
    /// as success.
    #[instrument(skip(self))]
    async fn ensure_index(&self, index: &str) -> Result<IndexStatus, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await?;

        let status = response.status_code();
        if status.is_success() {
            debug!(index = %index, "Index already exists");
            return Ok(IndexStatus::AlreadyExists);
        }
        if status != StatusCode::NOT_FOUND {
            return Err(SearchIndexError::index_creation(format!(
                "Index existence check failed with status {}",
                status
            )));
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index, "Created index");
            return Ok(IndexStatus::Created);
        }

        let error_body: Value = response.json().await.unwrap_or(Value::Null);
        if error_body["error"]["type"] == "resource_already_exists_exception" {
            debug!(index = %index, "Index was created concurrently");
            return Ok(IndexStatus::AlreadyExists);
        }

        error!(status = %status, body = %error_body, "Index creation failed");
        Err(SearchIndexError::index_creation(format!(
            "Index creation failed with status {}: {}",
            status, error_body
        )))
    }

    /// Write all documents with one bulk request.
    ///
    /// The request only fails as a whole when the engine rejects the bulk call itself.
    /// Per-document rejections are reported in the summary.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    async fn bulk_index_documents(
        &self,
        index: &str,
        documents: &[BookmarkDocument],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        if documents.is_empty() {
            return Ok(BatchOperationSummary::default());
        }

        let body = build_bulk_body(index, documents)?;

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_operation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchIndexError::bulk_operation(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let summary = parse_bulk_response(documents, &response_body)?;

        if summary.has_failures() {
            warn!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Bulk request completed with failures"
            );
        } else {
            debug!(count = summary.succeeded, "Bulk request completed");
        }

        Ok(summary)
    }

    async fn get_document(
        &self,
        index: &str,
        identifier: &str,
    ) -> Result<Option<BookmarkDocument>, SearchIndexError> {
        let response = self
            .client
            .get(GetParts::IndexId(index, identifier))
            .send()
            .await?;

        let status = response.status_code();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchIndexError::index(format!(
                "Get failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        if body.get("found").and_then(Value::as_bool) == Some(false) {
            return Ok(None);
        }

        let source = body
            .get("_source")
            .cloned()
            .ok_or_else(|| SearchIndexError::parse("Get response has no _source"))?;

        serde_json::from_value(source)
            .map(Some)
            .map_err(|e| SearchIndexError::parse(e.to_string()))
    }
}
