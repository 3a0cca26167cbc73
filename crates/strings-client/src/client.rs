//! HTTP client for the string analyzer daemon.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use strings_types::{
    CreateStringRequest, ErrorResponse, FilterParams, HealthResponse, ListResponse,
    NaturalLanguageResponse, RecordView,
};

use crate::error::ClientError;

/// Default endpoint for the daemon.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for communicating with the daemon.
#[derive(Debug, Clone)]
pub struct StringsClient {
    http: Client,
    base: Url,
}

impl StringsClient {
    /// Create a client for the given endpoint (e.g. `http://localhost:8000`).
    ///
    /// No connection is made until the first request.
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let base = Url::parse(endpoint)
            .map_err(|e| ClientError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidEndpoint(endpoint.to_string()));
        }

        let http = Client::builder().timeout(timeout).build()?;
        info!("Using string analyzer at {}", base);
        Ok(Self { http, base })
    }

    /// Client for the default endpoint.
    pub fn default_endpoint() -> Result<Self, ClientError> {
        Self::new(DEFAULT_ENDPOINT)
    }

    pub fn endpoint(&self) -> &str {
        self.base.as_str()
    }

    /// Submit a value for analysis.
    ///
    /// Fails with a 409 `Api` error if the trimmed value is already stored.
    pub async fn create(&self, value: &str) -> Result<RecordView, ClientError> {
        debug!(value, "Creating string");
        let response = self
            .http
            .post(self.url(&["strings"])?)
            .json(&CreateStringRequest {
                value: value.to_string(),
            })
            .send()
            .await?;
        decode(response).await
    }

    /// Fetch the record for a value.
    pub async fn get(&self, value: &str) -> Result<RecordView, ClientError> {
        let response = self.http.get(self.url(&["strings", value])?).send().await?;
        decode(response).await
    }

    /// Delete the record for a value.
    pub async fn delete(&self, value: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&["strings", value])?)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// List records matching structured filters.
    pub async fn list(&self, params: &FilterParams) -> Result<ListResponse, ClientError> {
        let response = self
            .http
            .get(self.url(&["strings"])?)
            .query(params)
            .send()
            .await?;
        decode(response).await
    }

    /// List records matching a free-text query.
    pub async fn filter_natural_language(
        &self,
        query: &str,
    ) -> Result<NaturalLanguageResponse, ClientError> {
        let response = self
            .http
            .get(self.url(&["strings", "filter-by-natural-language"])?)
            .query(&[("query", query)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let response = self.http.get(self.url(&["health"])?).send().await?;
        decode(response).await
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turn a non-success response into `ClientError::Api`.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or(body);

    debug!(status = status.as_u16(), %message, "Request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    Ok(check(response).await?.json::<T>().await?)
}
