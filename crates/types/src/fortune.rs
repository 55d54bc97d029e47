//! Wire payloads and small value types shared by the client and the TUI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fallback text shown when a fortune payload carries neither `message` nor `fortune`.
pub const EMPTY_FORTUNE_TEXT: &str = "No fortune available";

/// Which upstream route the client talks to.
///
/// `Direct` hits the service through the plain `/direct` prefix while `Sidecar`
/// goes through the `/api` prefix that a caching sidecar fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    #[default]
    Direct,
    Sidecar,
}

impl ApiMode {
    /// Path prefix prepended to every fortune endpoint.
    pub fn base_path(self) -> &'static str {
        match self {
            Self::Direct => "/direct",
            Self::Sidecar => "/api",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Direct => "Direct",
            Self::Sidecar => "Sidecar",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Direct => Self::Sidecar,
            Self::Sidecar => Self::Direct,
        }
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseApiModeError;

impl fmt::Display for ParseApiModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid api mode; expected 'direct' or 'sidecar'")
    }
}

impl std::error::Error for ParseApiModeError {}

impl FromStr for ApiMode {
    type Err = ParseApiModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(Self::Direct),
            "sidecar" | "api" => Ok(Self::Sidecar),
            _ => Err(ParseApiModeError),
        }
    }
}

/// How the next fortune is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Random,
    Pick,
}

impl SelectionMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Random => "Random",
            Self::Pick => "Pick by Number",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Random => Self::Pick,
            Self::Pick => Self::Random,
        }
    }
}

/// Target of a single fortune request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FortuneTarget {
    Random,
    Index(i64),
}

/// Cache classification reported by whatever sits in front of the service.
///
/// The value is consumed, never computed, by this repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CacheStatus {
    #[serde(rename = "HIT")]
    Hit,
    #[serde(rename = "MISS")]
    Miss,
    #[default]
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl CacheStatus {
    /// Classifies a raw `X-Cache` header value.
    ///
    /// Matching is a case-insensitive substring search; `HIT` wins over `MISS`
    /// when both appear. Absent or unrecognized values map to `N/A`.
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::NotAvailable;
        };
        let upper = raw.to_ascii_uppercase();
        if upper.contains("HIT") {
            Self::Hit
        } else if upper.contains("MISS") {
            Self::Miss
        } else {
            Self::NotAvailable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::NotAvailable => "N/A",
        }
    }
}

impl fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `GET {mode}/fortunes/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FortuneCountResponse {
    pub count: u64,
}

/// Body of `GET {mode}/fortune` and `GET {mode}/fortune/{index}`.
///
/// The indexed endpoint omits `id`; older deployments send `fortune` instead
/// of `message`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortuneResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub fortune: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub delay_ms: Option<f64>,
    #[serde(default)]
    pub ts: Option<String>,
}

impl FortuneResponse {
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .or(self.fortune.as_deref())
            .unwrap_or(EMPTY_FORTUNE_TEXT)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Body of `GET {mode}/flaky` when it succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlakyResponse {
    pub ok: bool,
    #[serde(default)]
    pub ts: Option<String>,
}

/// A fortune as presented after a successful reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortuneReveal {
    pub message: String,
    pub id: Option<i64>,
    /// Client-measured wall-clock time of the request.
    pub request_ms: u64,
    pub cache_status: CacheStatus,
    /// Artificial delay the server reports having applied, when present.
    pub server_delay_ms: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_status_matches_substrings_case_insensitively() {
        assert_eq!(CacheStatus::from_header(Some("HIT")), CacheStatus::Hit);
        assert_eq!(CacheStatus::from_header(Some("hit from cloudfront")), CacheStatus::Hit);
        assert_eq!(CacheStatus::from_header(Some("Miss")), CacheStatus::Miss);
        assert_eq!(CacheStatus::from_header(Some("TCP_MISS")), CacheStatus::Miss);
        assert_eq!(CacheStatus::from_header(Some("bypass")), CacheStatus::NotAvailable);
        assert_eq!(CacheStatus::from_header(Some("")), CacheStatus::NotAvailable);
        assert_eq!(CacheStatus::from_header(None), CacheStatus::NotAvailable);
    }

    #[test]
    fn cache_status_prefers_hit_when_both_appear() {
        assert_eq!(CacheStatus::from_header(Some("MISS, HIT")), CacheStatus::Hit);
    }

    #[test]
    fn fortune_response_falls_back_through_fields() {
        let indexed: FortuneResponse =
            serde_json::from_str(r#"{"message":"Ship it.","ts":"2024-01-01T00:00:00Z","delayMs":512}"#).expect("deserialize");
        assert_eq!(indexed.text(), "Ship it.");
        assert_eq!(indexed.id, None);
        assert_eq!(indexed.delay_ms, Some(512.0));

        let legacy: FortuneResponse = serde_json::from_str(r#"{"fortune":"Legacy wisdom","id":3}"#).expect("deserialize");
        assert_eq!(legacy.text(), "Legacy wisdom");
        assert_eq!(legacy.id, Some(3));

        let empty: FortuneResponse = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(empty.text(), EMPTY_FORTUNE_TEXT);
    }

    #[test]
    fn api_mode_paths_and_parsing() {
        assert_eq!(ApiMode::Direct.base_path(), "/direct");
        assert_eq!(ApiMode::Sidecar.base_path(), "/api");
        assert_eq!(ApiMode::Direct.toggled(), ApiMode::Sidecar);
        assert_eq!("Sidecar".parse::<ApiMode>(), Ok(ApiMode::Sidecar));
        assert_eq!(" direct ".parse::<ApiMode>(), Ok(ApiMode::Direct));
        assert!("proxy".parse::<ApiMode>().is_err());
    }
}
