use std::time::Duration;

use engine_logging::engine_debug;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::decode::decode_projects;
use crate::{FailureKind, FetchError, RawRecord};

pub const DEFAULT_SOURCE_URL: &str = "https://raw.githubusercontent.com/saaslabsco/frontend-assignment/refs/heads/master/frontend-assignment.json";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub source_url: String,
    pub connect_timeout: Duration,
    /// Upper bound for the whole load, enforced by racing a timer against the request.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_millis(5000),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Source of raw project entries.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<RawRecord>, FetchError> {
        let parsed = url::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        engine_debug!("Fetched {} bytes from {}", bytes.len(), url);

        decode_projects(&bytes).map_err(|err| FetchError::new(FailureKind::Parse, err.to_string()))
    }
}

/// Runs `fetcher` until it finishes, `deadline` elapses, or `cancel` fires.
///
/// Losing the race drops the request future, which aborts the HTTP request.
pub async fn fetch_with_deadline(
    fetcher: &dyn Fetcher,
    url: &str,
    deadline: Duration,
    cancel: &CancellationToken,
) -> Result<Vec<RawRecord>, FetchError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(FetchError::new(FailureKind::Cancelled, "request cancelled")),
        _ = tokio::time::sleep(deadline) => Err(FetchError::new(
            FailureKind::Timeout,
            format!("no response within {} ms", deadline.as_millis()),
        )),
        result = fetcher.fetch(url) => result,
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
