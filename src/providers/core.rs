// ABOUTME: Core provider capability trait, credentials, and request types
// ABOUTME: Defines the contract every OAuth provider implementation must satisfy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

//! # Provider Capability Contract
//!
//! The [`OAuthProvider`] trait is the unified interface over every provider
//! implementation, raw or decorated. Callers cannot tell the difference: both
//! are handled as `Box<dyn OAuthProvider>`.
//!
//! The trait covers the four named capabilities (signed request execution,
//! authorization-URI generation, endpoint discovery) plus a single dynamic
//! path, [`OAuthProvider::call`], through which provider implementations can
//! expose bespoke extension methods and decorators forward whatever they do
//! not intercept themselves.

use crate::errors::{AppError, AppResult};
use crate::storage::TokenStore;
use async_trait::async_trait;
use http::Method;
use serde_json::Value;
use std::fmt;
use url::Url;

/// Consumer credentials identifying the application to an OAuth provider
///
/// Built fresh from configuration for every assembly and owned by the
/// constructed provider. Empty values pass through unchanged; rejecting them
/// is the provider's responsibility.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    callback_url: String,
}

impl Credentials {
    /// Create a credentials triple
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            callback_url: callback_url.into(),
        }
    }

    /// OAuth consumer key
    #[must_use]
    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    /// OAuth consumer secret
    #[must_use]
    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    /// Callback URL the provider redirects back to
    #[must_use]
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }
}

// Secrets never reach logs, only their presence does.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field(
                "consumer_secret",
                &if self.consumer_secret.is_empty() {
                    "<empty>"
                } else {
                    "<redacted>"
                },
            )
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// A signed API request executed through a provider
///
/// `method` defaults to `GET`; `body` and `headers` default to empty.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    /// Request path, absolute or relative to the provider's API base
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Optional JSON request body
    pub body: Option<Value>,
    /// Extra headers, overriding provider defaults
    pub headers: Vec<(String, String)>,
}

impl ProviderRequest {
    /// Create a GET request for a path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: Method::GET,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Create a GET request for a path
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    /// Create a POST request for a path
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).with_method(Method::POST)
    }

    /// Override the HTTP method
    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Attach a JSON body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append an extra header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Core OAuth provider trait - the capability set shared by raw and decorated providers
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for concurrent access across
/// async tasks.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Provider name (e.g., "github", "strava")
    fn name(&self) -> &str;

    /// Execute a signed API request and return the response body
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` when the delegated exchange fails, or
    /// `ProviderNotBound` when called on an unbound decorator.
    async fn request(&self, request: ProviderRequest) -> AppResult<String>;

    /// URL to redirect the user to for authorization, with extra query parameters
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot produce a URI, or
    /// `ProviderNotBound` when called on an unbound decorator.
    fn authorization_uri(&self, additional_params: &[(String, String)]) -> AppResult<Url>;

    /// The provider's authorization endpoint
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotBound` when called on an unbound decorator.
    fn authorization_endpoint(&self) -> AppResult<Url>;

    /// The provider's access-token endpoint
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotBound` when called on an unbound decorator.
    fn access_token_endpoint(&self) -> AppResult<Url>;

    /// Dynamic extension path for methods beyond the core capability set
    ///
    /// Providers expose bespoke extension methods here; decorators forward
    /// anything they do not define themselves, so extension methods stay
    /// reachable through an entire decorator chain.
    ///
    /// # Errors
    ///
    /// Returns `UnknownMethod` for unrecognized method names (the default).
    async fn call(&self, method: &str, args: &[Value]) -> AppResult<Value> {
        let _ = args;
        Err(AppError::unknown_method(self.name(), method))
    }
}

impl fmt::Debug for dyn OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthProvider")
            .field("name", &self.name())
            .finish()
    }
}

/// Builds a raw provider instance from credentials and a token store
///
/// Registered in the [`ServiceRegistry`](crate::providers::registry::ServiceRegistry)
/// under an implementation identifier.
pub trait ProviderBuilder: Send + Sync {
    /// Construct a provider owning the given credentials and token store
    fn build(&self, credentials: Credentials, store: Box<dyn TokenStore>) -> Box<dyn OAuthProvider>;
}
