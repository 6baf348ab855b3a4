use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, warn};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
const BROWSER_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Failure of a single fetch attempt
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rate limited")]
    RateLimited,

    #[error("unexpected status {0}")]
    Status(u16),
}

/// Retrieves raw page text. Implementations never fail loudly: every
/// unrecoverable problem comes back as `None`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Retry and timeout settings for [`HttpPageFetcher`]
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    pub max_attempts: u32,
    /// Multiplied by the attempt number after a 429
    pub rate_limit_backoff: Duration,
    /// Flat wait after a transport failure
    pub transport_backoff: Duration,
    pub timeout: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            rate_limit_backoff: Duration::from_secs(5),
            transport_backoff: Duration::from_secs(2),
            timeout: Duration::from_secs(30),
        }
    }
}

impl FetchPolicy {
    /// Wait before the attempt following a failed `attempt` (1-based), or
    /// `None` when the fetch should give up.
    pub fn retry_delay(&self, attempt: u32, error: &FetchError) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        match error {
            FetchError::RateLimited => Some(self.rate_limit_backoff * attempt),
            FetchError::Transport(_) => Some(self.transport_backoff),
            FetchError::Status(_) => None,
        }
    }
}

/// Browser-like HTTP GET with bounded retries
pub struct HttpPageFetcher {
    client: Client,
    policy: FetchPolicy,
}

impl HttpPageFetcher {
    pub fn new(policy: FetchPolicy) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .default_headers(browser_headers())
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(policy.timeout)
            .build()?;

        Ok(Self { client, policy })
    }

    async fn try_fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.text().await?),
            StatusCode::TOO_MANY_REQUESTS => Err(FetchError::RateLimited),
            status => Err(FetchError::Status(status.as_u16())),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            let error = match self.try_fetch(url).await {
                Ok(body) => {
                    debug!("Fetched {} ({} bytes, attempt {})", url, body.len(), attempt);
                    return Some(body);
                }
                Err(e) => e,
            };

            let Some(wait) = self.policy.retry_delay(attempt, &error) else {
                warn!("Giving up on {} after attempt {}/{}: {}", url, attempt, max_attempts, error);
                return None;
            };

            warn!(
                "{} from {}, waiting {:.1}s before retry {}/{}",
                error,
                url,
                wait.as_secs_f64(),
                attempt + 1,
                max_attempts
            );
            sleep(wait).await;
        }

        None
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(BROWSER_ACCEPT_LANGUAGE));
    headers
}
