//! Fetching page data over HTTP
//!
//! [`HttpFetcher`] is the production [`PageFetcher`]: it downloads the page
//! body with reqwest and populates a [`PageData`] from it. The trait seam
//! exists so tests and embedders can substitute their own source of page
//! data.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use std::time::Duration;
use tracing::{error, warn};

use crate::error::LinkError;
use crate::extract::populate_page_data;
use crate::page::PageData;
use crate::DEFAULT_USER_AGENT;

/// First-byte timeout (connect + first response byte)
const FIRST_BYTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Body timeout (total)
const BODY_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch options configured on the generator
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
}

/// Source of page data for a URL
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url` and return its data snapshot.
    ///
    /// Failures (network, HTTP error status) must surface as errors; a page
    /// that loads but has no title or headings is not a failure.
    async fn fetch_page_data(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<PageData, LinkError>;
}

/// HTTP page fetcher backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
    /// Create a new HTTP fetcher
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page_data(
        &self,
        url: &str,
        options: &FetchOptions,
    ) -> Result<PageData, LinkError> {
        let mut page = PageData::new(url)?;

        let mut headers = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html, application/xhtml+xml, */*;q=0.8"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(FIRST_BYTE_TIMEOUT)
            .timeout(FIRST_BYTE_TIMEOUT)
            .build()
            .map_err(LinkError::ClientBuildError)?;

        let response = client
            .get(page.url())
            .send()
            .await
            .map_err(LinkError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LinkError::HttpStatus(status.as_u16()));
        }

        let (body, truncated) = read_body_with_timeout(response, BODY_TIMEOUT).await;
        if truncated {
            warn!(url = page.url(), "body read timed out, using partial page");
        }

        let html = String::from_utf8_lossy(&body);
        populate_page_data(&mut page, &html);

        Ok(page)
    }
}

/// Read the response body with a deadline, returning partial content and a
/// truncation flag if the deadline passes
async fn read_body_with_timeout(response: reqwest::Response, timeout: Duration) -> (Bytes, bool) {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let chunk_future = stream.next();
        let timeout_future = tokio::time::sleep_until(deadline);

        tokio::select! {
            chunk = chunk_future => {
                match chunk {
                    Some(Ok(bytes)) => {
                        body.extend_from_slice(&bytes);
                    }
                    Some(Err(e)) => {
                        error!("Error reading body chunk: {}", e);
                        let has_content = !body.is_empty();
                        return (Bytes::from(body), has_content);
                    }
                    None => {
                        // Stream complete
                        return (Bytes::from(body), false);
                    }
                }
            }
            _ = timeout_future => {
                warn!("Body timeout reached, returning partial content");
                return (Bytes::from(body), true);
            }
        }
    }
}
