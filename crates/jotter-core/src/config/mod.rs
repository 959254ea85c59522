//! Client configuration.
//!
//! Jotter needs exactly two public values to reach its backend: the Supabase
//! project URL and the anon (public) API key. Both are supplied by the
//! deployment environment. Missing values leave the app running with a client
//! that refuses every call, so the UI can still render and explain the problem.

use std::collections::HashMap;
use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{is_http_url, normalize_text_option};

pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Both SUPABASE_URL and SUPABASE_ANON_KEY must be set")]
    Incomplete,
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Endpoint and public key for the hosted backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ClientConfig")
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    /// Read the configuration through an arbitrary key lookup.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        Self::resolve(lookup(SUPABASE_URL_VAR), lookup(SUPABASE_ANON_KEY_VAR))
    }

    /// Resolve optional raw values.
    ///
    /// Both absent yields `Ok(None)`; exactly one absent is an error.
    pub fn resolve(
        url: Option<String>,
        anon_key: Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        let url = normalize_text_option(url);
        let anon_key = normalize_text_option(anon_key);

        match (url, anon_key) {
            (None, None) => Ok(None),
            (Some(url), Some(anon_key)) => {
                if !is_http_url(&url) {
                    return Err(ConfigError::Invalid(format!(
                        "{SUPABASE_URL_VAR} must start with http:// or https://"
                    )));
                }
                Ok(Some(Self {
                    supabase_url: url.trim_end_matches('/').to_string(),
                    supabase_anon_key: anon_key,
                }))
            }
            _ => Err(ConfigError::Incomplete),
        }
    }

    /// Like [`ClientConfig::resolve`], but logs and degrades to `None` on error.
    pub fn resolve_or_unconfigured(url: Option<String>, anon_key: Option<String>) -> Option<Self> {
        match Self::resolve(url, anon_key) {
            Ok(Some(config)) => Some(config),
            Ok(None) => {
                tracing::warn!("Supabase is not configured; the client will reject every call");
                None
            }
            Err(error) => {
                tracing::warn!("Ignoring Supabase configuration: {}", error);
                None
            }
        }
    }
}
