use crate::core::{FanoutError, FetchResponse, HttpClient, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_LENGTH;
use reqwest::Client;
use tokio_util::sync::CancellationToken;

/// `HttpClient` backed by a shared `reqwest::Client`.
///
/// Issues a GET and reads the declared `Content-Length` header; the body is
/// never consumed. Non-success statuses are not treated as failures.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn with_user_agent(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn declared_content_length(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn fetch(&self, url: &str, cancel: &CancellationToken) -> Result<FetchResponse> {
        tracing::debug!("GET {}", url);

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FanoutError::Cancelled),
            response = self.client.get(url).send() => response?,
        };

        tracing::debug!("{} responded with status {}", url, response.status());

        Ok(FetchResponse {
            url: url.to_string(),
            content_length: declared_content_length(&response),
        })
    }
}
