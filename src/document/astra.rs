//! AstraDocumentStore - DataStax Astra REST Document API (v2) over reqwest.
//!
//! Collections live under
//! `{base_url}/api/rest/v2/namespaces/{namespace}/collections/{collection}`.
//! Every request carries the application token in `X-Cassandra-Token`.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::{DeleteOutcome, Document, DocumentId, DocumentStore, StoreError, Stored};

const TOKEN_HEADER: &str = "X-Cassandra-Token";
const PAGE_SIZE: &str = "20";

/// Connection settings for an Astra database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstraConfig {
    /// e.g. `https://<db-id>-<region>.apps.astra.datastax.com`
    pub base_url: String,
    pub namespace: String,
    pub token: String,
}

impl AstraConfig {
    /// Base URL derived from a database id and region.
    pub fn base_url_for(db_id: &str, region: &str) -> String {
        format!("https://{}-{}.apps.astra.datastax.com", db_id, region)
    }
}

/// Document store backed by Astra's Document API.
#[derive(Clone)]
pub struct AstraDocumentStore {
    client: reqwest::Client,
    config: AstraConfig,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdResponse {
    document_id: Option<String>,
}

#[derive(Deserialize)]
struct GetResponse<M> {
    data: Option<M>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse<M> {
    page_state: Option<String>,
    #[serde(default = "HashMap::new")]
    data: HashMap<String, M>,
}

impl AstraDocumentStore {
    pub fn new(config: AstraConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: AstraConfig) -> Self {
        Self { client, config }
    }

    /// Collection URL with every path segment percent-encoded.
    fn collection_url(&self, collection: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| StoreError::Storage(format!("invalid astra base url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Storage("astra base url cannot hold a path".into()))?
            .pop_if_empty()
            .extend(["api", "rest", "v2", "namespaces"])
            .push(&self.config.namespace)
            .push("collections")
            .push(collection);
        Ok(url)
    }

    /// The id is pushed as a single segment, so `?`, `#`, `/` and `..` stay
    /// part of the id instead of reshaping the request.
    fn document_url(&self, collection: &str, id: &str) -> Result<Url, StoreError> {
        let mut url = self.collection_url(collection)?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Storage("astra base url cannot hold a path".into()))?
            .push(id);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(TOKEN_HEADER, &self.config.token)
    }
}

/// Turn any non-success response into `StoreError::Status`.
async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl DocumentStore for AstraDocumentStore {
    async fn create<M: Document>(&self, document: &M) -> Result<Option<DocumentId>, StoreError> {
        let response = self
            .request(Method::POST, self.collection_url(M::COLLECTION)?)
            .json(document)
            .send()
            .await?;
        let body: IdResponse = ensure_success(response).await?.json().await?;

        debug!(collection = M::COLLECTION, id = ?body.document_id, "astra create");
        Ok(body.document_id.map(DocumentId::new))
    }

    async fn get<M: Document>(&self, id: &str) -> Result<Option<M>, StoreError> {
        let response = self
            .request(Method::GET, self.document_url(M::COLLECTION, id)?)
            .send()
            .await?;

        if matches!(response.status(), StatusCode::NOT_FOUND | StatusCode::NO_CONTENT) {
            return Ok(None);
        }

        let body: GetResponse<M> = ensure_success(response).await?.json().await?;
        Ok(body.data)
    }

    async fn find<M: Document>(&self) -> Result<Vec<Stored<M>>, StoreError> {
        let mut results = Vec::new();
        let mut page_state: Option<String> = None;

        loop {
            let mut query = vec![("page-size", PAGE_SIZE.to_string())];
            if let Some(state) = page_state.take() {
                query.push(("page-state", state));
            }

            let response = self
                .request(Method::GET, self.collection_url(M::COLLECTION)?)
                .query(&query)
                .send()
                .await?;

            if response.status() == StatusCode::NO_CONTENT {
                break;
            }

            let page: PageResponse<M> = ensure_success(response).await?.json().await?;
            results.extend(page.data.into_iter().map(|(id, data)| Stored { id, data }));

            match page.page_state {
                Some(state) if !state.is_empty() => page_state = Some(state),
                _ => break,
            }
        }

        debug!(collection = M::COLLECTION, count = results.len(), "astra find");
        Ok(results)
    }

    async fn replace<M: Document>(
        &self,
        id: &str,
        document: &M,
    ) -> Result<Option<DocumentId>, StoreError> {
        let response = self
            .request(Method::PUT, self.document_url(M::COLLECTION, id)?)
            .json(document)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: IdResponse = ensure_success(response).await?.json().await?;
        Ok(body.document_id.map(DocumentId::new))
    }

    async fn delete<M: Document>(&self, id: &str) -> Result<DeleteOutcome, StoreError> {
        let response = self
            .request(Method::DELETE, self.document_url(M::COLLECTION, id)?)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(DeleteOutcome { deleted: false });
        }

        ensure_success(response).await?;
        Ok(DeleteOutcome { deleted: true })
    }
}
