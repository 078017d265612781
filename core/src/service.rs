//! Async façade over `CatsClient` and a `Transport`.
//!
//! Each operation is exactly one `build_*`, one transport round-trip and one
//! `parse_*`. Nothing is retried or cached; failures propagate unchanged.

use tracing::{debug, warn};

use crate::client::CatsClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Cat, NewCat, SearchQuery};

#[derive(Debug, Clone)]
pub struct CatsService<T = ReqwestTransport> {
    client: CatsClient,
    transport: T,
}

impl CatsService<ReqwestTransport> {
    /// Service over a fresh `reqwest` transport.
    pub fn connect(config: ClientConfig) -> Self {
        Self::new(config, ReqwestTransport::new())
    }
}

impl<T: Transport> CatsService<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: CatsClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &CatsClient {
        &self.client
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: &str) -> ApiResult<Cat> {
        let response = self.send(self.client.build_get(id)).await?;
        self.client.parse_get(response).inspect_err(log_failure)
    }

    #[tracing::instrument(skip(self))]
    pub async fn all(&self) -> ApiResult<Vec<Cat>> {
        let response = self.send(self.client.build_all()).await?;
        self.client.parse_all(response).inspect_err(log_failure)
    }

    #[tracing::instrument(skip(self, description))]
    pub async fn create(&self, name: &str, description: Option<&str>) -> ApiResult<Cat> {
        let input = NewCat::new(name, description.map(str::to_string));
        let response = self.send(self.client.build_create(&input)?).await?;
        self.client.parse_create(response).inspect_err(log_failure)
    }

    #[tracing::instrument(skip(self, cat), fields(id = ?cat.id))]
    pub async fn update(&self, cat: &Cat) -> ApiResult<Cat> {
        let response = self.send(self.client.build_update(cat)?).await?;
        self.client.parse_update(response).inspect_err(log_failure)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> ApiResult<bool> {
        let response = self.send(self.client.build_delete(id)).await?;
        self.client.parse_delete(response).inspect_err(log_failure)
    }

    /// Best match for the filters. Empty strings mean "no filter".
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, name: &str, group: &str) -> ApiResult<Cat> {
        let response = self.send(self.client.build_search(&SearchQuery::new(name, group))).await?;
        self.client.parse_search(response).inspect_err(log_failure)
    }

    /// Every match for the filters, in server order.
    #[tracing::instrument(skip(self))]
    pub async fn search_all(&self, name: &str, group: &str) -> ApiResult<Vec<Cat>> {
        let response = self.send(self.client.build_search(&SearchQuery::new(name, group))).await?;
        self.client.parse_search_all(response).inspect_err(log_failure)
    }

    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let response = self.transport.execute(request).await.inspect_err(log_failure)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

fn log_failure(err: &ApiError) {
    match err.status() {
        Some(status) => warn!(status, error = %err, "remote operation failed"),
        None => warn!(error = %err, "request failed"),
    }
}
