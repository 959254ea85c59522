//! Web bootstrap configuration loaded from build-time generated JSON.

use jotter_core::ClientConfig;
use serde::{Deserialize, Serialize};

/// Public Supabase endpoint and anon key embedded into the web bundle.
///
/// Both values ship to every browser; never put a service-role key here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebBootstrapConfig {
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
}

/// Loads the generated bootstrap JSON from `OUT_DIR`.
///
/// If parsing fails, this logs a warning and returns an empty config; the app
/// then runs with a client that rejects every call.
pub fn load_bootstrap_config() -> WebBootstrapConfig {
    parse_bootstrap_config(EMBEDDED_BOOTSTRAP)
}

const EMBEDDED_BOOTSTRAP: &str = include_str!(concat!(env!("OUT_DIR"), "/web-bootstrap.json"));

fn parse_bootstrap_config(raw: &str) -> WebBootstrapConfig {
    serde_json::from_str(raw).unwrap_or_else(|error| {
        tracing::warn!("Failed to parse web bootstrap config: {}", error);
        WebBootstrapConfig::default()
    })
}

impl WebBootstrapConfig {
    /// Client configuration, or `None` when values are missing or invalid.
    pub fn client_config(&self) -> Option<ClientConfig> {
        ClientConfig::resolve_or_unconfigured(
            self.supabase_url.clone(),
            self.supabase_anon_key.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_generated_json() {
        let config = parse_bootstrap_config(
            r#"{ "supabase_url": "https://demo.supabase.co", "supabase_anon_key": "anon" }"#,
        );
        let client = config.client_config().unwrap();
        assert_eq!(client.supabase_url, "https://demo.supabase.co");
        assert_eq!(client.supabase_anon_key, "anon");
    }

    #[test]
    fn malformed_json_degrades_to_empty() {
        assert_eq!(
            parse_bootstrap_config("not json"),
            WebBootstrapConfig::default()
        );
        assert_eq!(WebBootstrapConfig::default().client_config(), None);
    }

    #[test]
    fn partial_values_degrade_to_unconfigured() {
        let config = WebBootstrapConfig {
            supabase_url: Some("https://demo.supabase.co".to_string()),
            supabase_anon_key: None,
        };
        assert_eq!(config.client_config(), None);
    }

    #[test]
    fn embedded_config_is_well_formed() {
        let parsed: WebBootstrapConfig = serde_json::from_str(EMBEDDED_BOOTSTRAP).unwrap();
        assert_eq!(load_bootstrap_config(), parsed);
        for value in [&parsed.supabase_url, &parsed.supabase_anon_key]
            .into_iter()
            .flatten()
        {
            assert!(!value.is_empty());
            assert_eq!(value.trim(), value);
        }
    }
}
