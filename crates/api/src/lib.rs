//! Fortune service API client.
//!
//! This crate provides a lightweight client for the fortune HTTP service. It
//! focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Resolving and validating the base URL (`FORTUNE_API_BASE`)
//! - Building requests against the direct or sidecar route
//! - Classifying responses, including the soft backpressure signal (429/503)
//!   and the `X-Cache` header
//!
//! The client never retries and never caches; both concerns belong to
//! whatever sits in front of the service.
//!
//! # Example
//!
//! ```ignore
//! use fortune_api::{ClientConfig, FortuneClient};
//! use fortune_types::{ApiMode, FortuneTarget};
//!
//! # async fn demo() -> Result<(), fortune_api::ApiError> {
//! let client = FortuneClient::new(ClientConfig::from_env())?;
//! let count = client.fetch_count(ApiMode::Direct).await?;
//! let fetched = client.fetch_fortune(ApiMode::Sidecar, FortuneTarget::Index(0)).await?;
//! println!("{count} fortunes; #0 took {} ms ({})", fetched.elapsed.as_millis(), fetched.cache_status);
//! # Ok(())
//! # }
//! ```

use std::env;
use std::time::{Duration, Instant};

use fortune_types::{ApiMode, CacheStatus, FlakyResponse, FortuneCountResponse, FortuneResponse, FortuneReveal, FortuneTarget, HealthResponse};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable holding the service base URL.
pub const API_BASE_ENV: &str = "FORTUNE_API_BASE";
/// Environment variable holding the request timeout in seconds.
pub const API_TIMEOUT_ENV: &str = "FORTUNE_API_TIMEOUT_SECS";
/// Base URL used when nothing is configured; the service listens on 8080.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Header an upstream cache uses to report HIT/MISS.
pub const CACHE_STATUS_HEADER: &str = "x-cache";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced by [`FortuneClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid {API_BASE_ENV} '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// 429 or 503: the service is shedding load. Callers should surface a
    /// warning and let the user try again.
    #[error("service is under heavy load (HTTP {status})")]
    Backpressure { status: u16 },
    #[error("{message}")]
    NotFound { message: String },
    #[error("API request failed: {status}")]
    Status { status: u16 },
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("could not decode response: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("could not build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub fn is_backpressure(&self) -> bool {
        matches!(self, Self::Backpressure { .. })
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backpressure { status } | Self::Status { status } => Some(*status),
            Self::NotFound { .. } => Some(StatusCode::NOT_FOUND.as_u16()),
            _ => None,
        }
    }
}

/// Connection settings for [`FortuneClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Resolve settings from `FORTUNE_API_BASE` and `FORTUNE_API_TIMEOUT_SECS`.
    ///
    /// Blank or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let base_url = env::var(API_BASE_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = env::var(API_TIMEOUT_ENV)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self { base_url, timeout }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// A fortune plus what the client observed while fetching it.
#[derive(Debug, Clone, PartialEq)]
pub struct FortuneFetch {
    pub body: FortuneResponse,
    pub cache_status: CacheStatus,
    pub elapsed: Duration,
}

impl FortuneFetch {
    /// Flatten into the shape the UI displays.
    pub fn into_reveal(self) -> FortuneReveal {
        FortuneReveal {
            message: self.body.text().to_string(),
            id: self.body.id,
            request_ms: u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX),
            cache_status: self.cache_status,
            server_delay_ms: self.body.delay_ms,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Thin wrapper around a configured `reqwest::Client` for the fortune service.
#[derive(Debug, Clone)]
pub struct FortuneClient {
    base_url: String,
    http: Client,
    user_agent: String,
}

impl FortuneClient {
    /// Build a client from `config`, validating the base URL first.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("fortune-tui/{}; {}", env!("CARGO_PKG_VERSION"), env::consts::OS),
        })
    }

    /// Client configured purely from the environment.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for a path relative to the base URL.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        self.http.request(method, url).header(header::USER_AGENT, &self.user_agent)
    }

    /// Number of fortunes available on `mode`'s route.
    pub async fn fetch_count(&self, mode: ApiMode) -> Result<u64, ApiError> {
        let path = format!("{}/fortunes/count", mode.base_path());
        let response = self.send(&path).await?;
        let body: FortuneCountResponse = decode(response).await?;
        Ok(body.count)
    }

    /// Fetch a random fortune or the one at `index`.
    ///
    /// The elapsed time covers the request up to the decoded body, which is
    /// what a user perceives as latency.
    pub async fn fetch_fortune(&self, mode: ApiMode, target: FortuneTarget) -> Result<FortuneFetch, ApiError> {
        let path = fortune_path(mode, target);
        let started = Instant::now();
        let response = self.send(&path).await?;
        let cache_status = CacheStatus::from_header(response.headers().get(CACHE_STATUS_HEADER).and_then(|value| value.to_str().ok()));
        let body: FortuneResponse = decode(response).await?;
        Ok(FortuneFetch {
            body,
            cache_status,
            elapsed: started.elapsed(),
        })
    }

    /// Liveness probe; not prefixed by the route mode.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.send("/health").await?;
        decode(response).await
    }

    /// Hit the intentionally unreliable endpoint once.
    pub async fn flaky(&self, mode: ApiMode) -> Result<FlakyResponse, ApiError> {
        let path = format!("{}/flaky", mode.base_path());
        let response = self.send(&path).await?;
        decode(response).await
    }

    async fn send(&self, path: &str) -> Result<Response, ApiError> {
        let response = self
            .request(reqwest::Method::GET, path)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        classify(response).await
    }
}

fn fortune_path(mode: ApiMode, target: FortuneTarget) -> String {
    match target {
        FortuneTarget::Random => format!("{}/fortune", mode.base_path()),
        FortuneTarget::Index(index) => format!("{}/fortune/{}", mode.base_path(), index),
    }
}

/// Map non-success statuses onto [`ApiError`].
async fn classify(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE {
        warn!(status = status.as_u16(), "fortune service signalled backpressure");
        return Err(ApiError::Backpressure { status: status.as_u16() });
    }
    if status == StatusCode::NOT_FOUND {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| format!("API request failed: {status}"));
        return Err(ApiError::NotFound { message });
    }
    Err(ApiError::Status { status: status.as_u16() })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(ApiError::Decode)
}

/// Validate a base URL and strip trailing slashes.
///
/// Rules:
/// - must parse as an absolute URL
/// - scheme must be `http` or `https`
/// - must include a host
fn normalize_base_url(base: &str) -> Result<String, ApiError> {
    let trimmed = base.trim().trim_end_matches('/');
    let invalid = |reason: String| ApiError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };

    let parsed = Url::parse(trimmed).map_err(|error| invalid(error.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}://'", parsed.scheme())));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("must include a host".to_string()));
    }
    Ok(trimmed.to_string())
}
