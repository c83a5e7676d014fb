use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `SEM_STUDIO__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Bid policy and mock-path knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_target_cpa")]
    pub target_cpa: f64,
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: f64,
    /// Artificial latency of the mock generation path.
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
}

/// Outbound generation service used by the API path.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// No timeout unless set.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

// Default functions
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_http_port() -> u16 {
    8000
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_target_cpa() -> f64 {
    45.0
}
fn default_conversion_rate() -> f64 {
    0.025
}
fn default_mock_delay_ms() -> u64 {
    2000
}
fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            target_cpa: default_target_cpa(),
            conversion_rate: default_conversion_rate(),
            mock_delay_ms: default_mock_delay_ms(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("SEM_STUDIO")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_bid_policy() {
        let config = AppConfig::default();
        assert_eq!(config.planner.target_cpa, 45.0);
        assert_eq!(config.planner.conversion_rate, 0.025);
        assert_eq!(config.planner.mock_delay_ms, 2000);
        assert_eq!(config.remote.base_url, "http://127.0.0.1:8000");
        assert!(config.remote.timeout_ms.is_none());
        assert_eq!(config.api.http_port, 8000);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"planner": {"mock_delay_ms": 0}}"#).unwrap();
        assert_eq!(config.planner.mock_delay_ms, 0);
        assert_eq!(config.planner.target_cpa, 45.0);
        assert_eq!(config.metrics.port, 9091);
    }
}
