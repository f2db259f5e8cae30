//! HTTP client for the catalog's generic REST data API.
//!
//! Resources are addressed as `{base}/api/{resource}:{action}` and every
//! response is wrapped in a `{ "data": ... }` envelope.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use showcase_core::types::RecordId;

use crate::config::ClientConfig;
use crate::query::ListQuery;

/// Authenticated client for one data API host.
#[derive(Debug, Clone)]
pub struct DataApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// Errors from the data API layer.
#[derive(Debug, thiserror::Error)]
pub enum DataApiError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Data API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// The `{ "data": ... }` wrapper. A missing or null `data` decodes as
/// `None`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "Option::default")]
    data: Option<T>,
}

impl DataApi {
    /// Build a client from `config`, applying its request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, DataApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Host that relative attachment URLs resolve against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {resource}:list`. An absent `data` field yields an empty list.
    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &ListQuery,
    ) -> Result<Vec<T>, DataApiError> {
        let envelope: Envelope<Vec<T>> = self.fetch(&format!("{resource}:list"), query).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// `GET {resource}:get?filterByTk={key}` with the given appends.
    pub async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        key: impl ToString,
        appends: &[&str],
    ) -> Result<Option<T>, DataApiError> {
        let query = appends
            .iter()
            .fold(ListQuery::new().filter_by_tk(key), |q, a| q.append(a));
        let envelope: Envelope<T> = self.fetch(&format!("{resource}:get"), &query).await?;
        Ok(envelope.data)
    }

    /// `GET {resource}/{id}/{association}:list`.
    pub async fn list_association<T: DeserializeOwned>(
        &self,
        resource: &str,
        id: RecordId,
        association: &str,
    ) -> Result<Vec<T>, DataApiError> {
        self.list(&format!("{resource}/{id}/{association}"), &ListQuery::new())
            .await
    }

    // ---- private helpers ----

    async fn fetch<T: DeserializeOwned>(
        &self,
        action: &str,
        query: &ListQuery,
    ) -> Result<T, DataApiError> {
        let url = format!("{}/api/{}", self.base_url, action);
        tracing::debug!(url = %url, "Data API request");

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .query(&query.to_pairs())
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Return the response unchanged on success, or a
    /// [`DataApiError::Status`] carrying status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, DataApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(DataApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, DataApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
