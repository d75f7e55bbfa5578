// src/core/net.rs
//
// Blocking HTTP GET. One request, fixed timeout, no retries, no custom headers.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("failed to fetch {url}: {reason}")]
    Failure { url: String, reason: String },
}

/// The network side of the content store. `HttpFetcher` in production;
/// tests swap in a counting fake.
pub trait Fetch {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(url)
    }
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let failure = |reason: String| FetchError::Failure { url: s!(url), reason };

        let resp = self.client.get(url).send().map_err(|e| failure(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(failure(format!("HTTP status {status}")));
        }

        let body = resp.bytes().map_err(|e| failure(e.to_string()))?;
        Ok(body.to_vec())
    }
}
