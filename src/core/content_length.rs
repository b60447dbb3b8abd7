use crate::core::{FanoutError, HttpClient, Result};
use futures::future::try_join_all;
use tokio_util::sync::CancellationToken;

/// Sums the declared content lengths of a batch of URLs.
pub struct ContentLengthAggregator<H: HttpClient> {
    client: H,
}

impl<H: HttpClient> ContentLengthAggregator<H> {
    pub fn new(client: H) -> Self {
        Self { client }
    }

    /// Fetches every URL concurrently and returns the sum of their
    /// `Content-Length` values, counting a missing length as zero.
    ///
    /// The first failure (or cancellation) fails the whole call and the
    /// remaining requests are dropped.
    pub async fn sum_content_length<I, S>(
        &self,
        urls: I,
        cancel: &CancellationToken,
    ) -> Result<u64>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let urls: Vec<S> = urls.into_iter().collect();
        if urls.is_empty() {
            tracing::debug!("No URLs supplied, nothing to fetch");
            return Ok(0);
        }

        tracing::debug!("Fetching {} URLs", urls.len());
        let requests = urls
            .iter()
            .map(|url| self.client.fetch(url.as_ref(), cancel));

        let responses = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FanoutError::Cancelled),
            responses = try_join_all(requests) => responses?,
        };

        let total = responses.iter().fold(0u64, |acc, response| {
            tracing::debug!(
                "{} -> content-length {:?}",
                response.url,
                response.content_length
            );
            acc.saturating_add(response.content_length.unwrap_or(0))
        });

        tracing::info!("Summed content length of {} URLs: {}", responses.len(), total);
        Ok(total)
    }
}
