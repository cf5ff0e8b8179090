use std::time::Duration;

use reqwest::header::ACCEPT;

use crate::error::PipelineError;
use crate::fetch::Fetch;
use crate::payload::read::FetchedPayload;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `GET <endpoint>` with `Accept: application/json`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn with_client(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => PipelineError::http_status(status.as_u16()),
            None if err.is_timeout() => PipelineError::transport("request timed out"),
            None => PipelineError::transport(err.to_string()),
        }
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self) -> Result<FetchedPayload, PipelineError> {
        tracing::debug!(endpoint = %self.endpoint, "fetching recent calls");

        let res = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .timeout(self.timeout)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(PipelineError::http_status(status.as_u16()));
        }

        let bytes = res.bytes().await?;
        tracing::debug!(status = status.as_u16(), size = bytes.len(), "response received");

        Ok(FetchedPayload::from_bytes(self.endpoint.clone(), bytes.to_vec()))
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}
