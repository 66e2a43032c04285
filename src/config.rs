//! Provider configuration and logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the provider API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable holding the provider base URL.
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the API base the SDK client talks to.
pub const SDK_BASE_URL_VAR: &str = "OPENAI_SDK_BASE_URL";

/// Credentials and endpoints for the upstream provider.
///
/// Both values are optional. Missing values never fail startup; each request
/// decides what it can do with whatever is configured.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    /// SDK API base, e.g. `https://api.openai.com/v1`. The SDK default
    /// applies when unset.
    pub sdk_base_url: Option<String>,
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_key: non_empty_var(API_KEY_VAR),
            base_url: non_empty_var(BASE_URL_VAR),
            sdk_base_url: non_empty_var(SDK_BASE_URL_VAR),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Install the global tracing subscriber.
pub fn setup_logging(debug: bool) {
    let default_filter = if debug {
        "creator_proxy=debug,tower_http=debug"
    } else {
        "creator_proxy=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_unconfigured() {
        let config = ProviderConfig::default();
        assert!(!config.has_api_key());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_non_empty_var_filters_blank_values() {
        std::env::set_var("CREATOR_PROXY_TEST_BLANK_VAR", "   ");
        assert_eq!(non_empty_var("CREATOR_PROXY_TEST_BLANK_VAR"), None);

        std::env::set_var("CREATOR_PROXY_TEST_SET_VAR", " value ");
        assert_eq!(
            non_empty_var("CREATOR_PROXY_TEST_SET_VAR"),
            Some("value".to_string())
        );

        assert_eq!(non_empty_var("CREATOR_PROXY_TEST_UNSET_VAR"), None);
    }
}
