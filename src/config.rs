// ABOUTME: Provider configuration schema and loading from documents or environment
// ABOUTME: Holds per-provider consumer credentials, implementation bindings, and decorator lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

//! Provider configuration consumed by [`ProviderFactory`](crate::ProviderFactory).
//!
//! Configuration is keyed by provider name. Only the existence of a named
//! section is validated at assembly time; individual fields default to empty
//! and pass through as-is. Rejecting empty credentials is the responsibility
//! of the provider implementation or the eventual OAuth exchange.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

/// Top-level OAuth configuration: one [`ProviderSettings`] section per provider name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthConfig {
    /// Provider sections, keyed by provider name
    #[serde(default)]
    pub providers: HashMap<String, ProviderSettings>,
}

/// Configuration section for a single provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// OAuth consumer key (may be empty, not validated here)
    #[serde(default)]
    pub consumer_key: String,
    /// OAuth consumer secret (may be empty, not validated here)
    #[serde(default)]
    pub consumer_secret: String,
    /// Callback URL the provider redirects back to
    #[serde(default)]
    pub callback_url: String,
    /// Optional implementation identifier to bind in the service registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Ordered decorator identifiers, outermost last
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
}

impl OAuthConfig {
    /// Create an empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from a YAML document
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` if the document does not match the schema.
    pub fn from_yaml(document: &str) -> AppResult<Self> {
        serde_yaml::from_str(document)
            .map_err(|e| AppError::config_invalid("failed to parse provider configuration").with_source(e))
    }

    /// Load configuration from `OAUTH_<NAME>_*` environment variables
    ///
    /// A provider section exists for every `OAUTH_<NAME>_CONSUMER_KEY` variable
    /// found. Sibling variables (`_CONSUMER_SECRET`, `_CALLBACK_URL`, `_CLASS`,
    /// `_DECORATORS` comma-separated) fill in the remaining fields, defaulting
    /// to empty when unset. Provider names are lowercased.
    #[must_use]
    pub fn from_env() -> Self {
        let mut providers = HashMap::new();
        for (key, consumer_key) in env::vars() {
            let Some(rest) = key.strip_prefix("OAUTH_") else {
                continue;
            };
            let Some(name) = rest.strip_suffix("_CONSUMER_KEY") else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let settings = ProviderSettings {
                consumer_key,
                consumer_secret: env::var(format!("OAUTH_{name}_CONSUMER_SECRET"))
                    .unwrap_or_default(),
                callback_url: env::var(format!("OAUTH_{name}_CALLBACK_URL")).unwrap_or_default(),
                class: env::var(format!("OAUTH_{name}_CLASS")).ok(),
                decorators: env::var(format!("OAUTH_{name}_DECORATORS"))
                    .map(|list| {
                        list.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(str::to_owned)
                            .collect()
                    })
                    .unwrap_or_default(),
            };
            providers.insert(name.to_lowercase(), settings);
        }
        Self { providers }
    }

    /// Look up the configuration section for a provider name
    #[must_use]
    pub fn provider(&self, name: &str) -> Option<&ProviderSettings> {
        self.providers.get(name)
    }

    /// Check whether a configuration section exists for a provider name
    #[must_use]
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Insert or replace a provider section programmatically
    pub fn insert(&mut self, name: impl Into<String>, settings: ProviderSettings) -> &mut Self {
        self.providers.insert(name.into(), settings);
        self
    }

    /// Names of all configured providers
    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_sections_parse_with_defaults() {
        let config = OAuthConfig::from_yaml(
            r"
providers:
  github:
    consumer_key: foo
    consumer_secret: bar
    callback_url: http://baz.com/login
  bare: {}
",
        )
        .unwrap();

        let github = config.provider("github").unwrap();
        assert_eq!(github.consumer_key, "foo");
        assert_eq!(github.consumer_secret, "bar");
        assert_eq!(github.callback_url, "http://baz.com/login");
        assert!(github.class.is_none());
        assert!(github.decorators.is_empty());

        // Missing fields pass through as empty, only the section itself matters
        let bare = config.provider("bare").unwrap();
        assert_eq!(bare.consumer_key, "");
        assert!(config.provider("absent").is_none());
    }

    #[test]
    fn yaml_decorators_keep_listed_order() {
        let config = OAuthConfig::from_yaml(
            r"
providers:
  github:
    decorators: [trace, cache]
",
        )
        .unwrap();
        assert_eq!(
            config.provider("github").unwrap().decorators,
            vec!["trace", "cache"]
        );
    }

    #[test]
    fn malformed_yaml_is_config_invalid() {
        let err = OAuthConfig::from_yaml("providers: [not, a, map]").unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::ConfigInvalid);
    }

    #[test]
    fn env_loading_builds_sections() {
        env::set_var("OAUTH_ACMETEST_CONSUMER_KEY", "key");
        env::set_var("OAUTH_ACMETEST_CONSUMER_SECRET", "secret");
        env::set_var("OAUTH_ACMETEST_CALLBACK_URL", "http://cb.test/oauth");
        env::set_var("OAUTH_ACMETEST_DECORATORS", "trace, cache");

        let config = OAuthConfig::from_env();
        let acme = config.provider("acmetest").unwrap();
        assert_eq!(acme.consumer_key, "key");
        assert_eq!(acme.consumer_secret, "secret");
        assert_eq!(acme.callback_url, "http://cb.test/oauth");
        assert_eq!(acme.decorators, vec!["trace", "cache"]);
        assert!(acme.class.is_none());

        env::remove_var("OAUTH_ACMETEST_CONSUMER_KEY");
        env::remove_var("OAUTH_ACMETEST_CONSUMER_SECRET");
        env::remove_var("OAUTH_ACMETEST_CALLBACK_URL");
        env::remove_var("OAUTH_ACMETEST_DECORATORS");
    }
}
