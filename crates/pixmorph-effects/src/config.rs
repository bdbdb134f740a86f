//! Client configuration shared by the web app and the CLI.

use serde::{Deserialize, Serialize};

use crate::effect::{EffectRequest, HEALTH_PATH};

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Where the effect backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Scheme, host and optional path prefix of the backend, e.g.
    /// `http://127.0.0.1:8000`. A trailing `/` is ignored.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Build from an optional override, falling back to
    /// [`DEFAULT_BASE_URL`] when it is absent or blank.
    #[must_use]
    pub fn from_override(base_url: Option<&str>) -> Self {
        match base_url.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Endpoint URL for `request`.
    #[must_use]
    pub fn endpoint(&self, request: EffectRequest) -> String {
        request.endpoint(&self.base_url)
    }

    /// URL of the backend health probe.
    #[must_use]
    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_PATH}", self.base_url.trim_end_matches('/'))
    }
}

/// Body of the backend health probe response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    /// Whether the backend reported itself healthy.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::effect::{Effect, Style};

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        assert_eq!(ClientConfig::from_override(None), ClientConfig::default());
        assert_eq!(ClientConfig::from_override(Some("  ")), ClientConfig::default());
        assert_eq!(
            ClientConfig::from_override(Some("https://fx.example.com/api/")).base_url,
            "https://fx.example.com/api/"
        );
    }

    #[test]
    fn endpoint_and_health_urls() {
        let config = ClientConfig::new("https://fx.example.com/api/");
        let style = Style::parse_for(Effect::PixelArt, "modern").unwrap();
        let request = EffectRequest::new(Effect::PixelArt, Some(style)).unwrap();
        assert_eq!(
            config.endpoint(request),
            "https://fx.example.com/api/pixel-art/modern/"
        );
        assert_eq!(config.health_url(), "https://fx.example.com/api/health");
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn health_status_parses_backend_body() {
        let status: HealthStatus = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(status.is_ok());
        let status: HealthStatus = serde_json::from_str(r#"{"status":"degraded"}"#).unwrap();
        assert!(!status.is_ok());
    }
}
