use crate::error::{ApiError, BackendError};
use crate::resource::Resource;

/// Thin typed wrapper over the backend's REST collections.
///
/// One instance serves every collection; the resource type parameter on each
/// call selects the path and the wire shapes.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Default backend address: a local development backend behind HTTPS.
    pub const DEFAULT_BASE_URL: &'static str = "https://localhost:7166/api";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Accept self-signed certificates. Local development backends usually
    /// serve HTTPS with one; never point this at anything else.
    pub fn insecure(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self::with_http(http, base_url))
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url<R: Resource>(&self) -> String {
        format!("{}/{}", self.base_url, R::PATH)
    }

    fn item_url<R: Resource>(&self, id: R::Id) -> String {
        format!("{}/{}/{}", self.base_url, R::PATH, id)
    }

    /// GET the full collection, normalized.
    pub async fn fetch_all<R: Resource>(&self) -> Result<Vec<R::Entity>, ApiError> {
        let response = self.http.get(self.collection_url::<R>()).send().await?;
        let records: Vec<R::Record> = Self::checked(response).await?.json().await?;
        Ok(records.into_iter().map(R::normalize).collect())
    }

    /// GET a single record by id, normalized.
    pub async fn fetch_one<R: Resource>(&self, id: R::Id) -> Result<R::Entity, ApiError> {
        let response = self.http.get(self.item_url::<R>(id)).send().await?;
        let record: R::Record = Self::checked(response).await?.json().await?;
        Ok(R::normalize(record))
    }

    /// POST a new record. The backend assigns the identity; the response body
    /// is discarded and list views refetch independently.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.collection_url::<R>())
            .json(draft)
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// PUT a full replacement for an existing record.
    pub async fn update<R: Resource>(&self, id: R::Id, draft: &R::Draft) -> Result<(), ApiError> {
        let response = self
            .http
            .put(self.item_url::<R>(id))
            .json(draft)
            .send()
            .await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// DELETE one record. Hard delete; there is no undo.
    pub async fn delete<R: Resource>(&self, id: R::Id) -> Result<(), ApiError> {
        let response = self.http.delete(self.item_url::<R>(id)).send().await?;
        Self::checked(response).await?;
        Ok(())
    }

    /// Size of one collection. The backend has no count endpoint, so this is
    /// the fetched collection length.
    pub async fn count<R: Resource>(&self) -> Result<usize, ApiError> {
        Ok(self.fetch_all::<R>().await?.len())
    }

    async fn checked(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Backend(BackendError::from_response(
            status.as_u16(),
            &body,
        )))
    }
}
