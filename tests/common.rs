// ABOUTME: Shared test utilities: stub providers, counting builders, and test decorators
// ABOUTME: Provides common setup helpers to reduce duplication across integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! Shared test utilities for `oauth_kit` integration tests.

use async_trait::async_trait;
use oauth_kit::{
    AppResult, Credentials, ForwardingDecorator, OAuthProvider, ProviderBuilder, ProviderDecorator,
    ProviderRequest, SessionStoreFactory, TokenStore,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use url::Url;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Stub provider with fixed endpoints and a couple of dynamic extension methods
pub struct StubProvider {
    name: String,
    credentials: Credentials,
    auth_endpoint: Url,
    token_endpoint: Url,
}

impl StubProvider {
    pub fn new(name: &str, credentials: Credentials) -> Self {
        Self {
            name: name.to_owned(),
            credentials,
            auth_endpoint: Url::parse("https://provider.test/oauth/authorize").unwrap(),
            token_endpoint: Url::parse("https://provider.test/oauth/token").unwrap(),
        }
    }

    pub fn boxed(name: &str, credentials: Credentials) -> Box<dyn OAuthProvider> {
        Box::new(Self::new(name, credentials))
    }
}

#[async_trait]
impl OAuthProvider for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn request(&self, request: ProviderRequest) -> AppResult<String> {
        Ok(format!("{} {}", request.method, request.path))
    }

    fn authorization_uri(&self, additional_params: &[(String, String)]) -> AppResult<Url> {
        let mut uri = self.auth_endpoint.clone();
        {
            let mut pairs = uri.query_pairs_mut();
            pairs.append_pair("client_id", self.credentials.consumer_key());
            pairs.append_pair("redirect_uri", self.credentials.callback_url());
            for (name, value) in additional_params {
                pairs.append_pair(name, value);
            }
        }
        Ok(uri)
    }

    fn authorization_endpoint(&self) -> AppResult<Url> {
        Ok(self.auth_endpoint.clone())
    }

    fn access_token_endpoint(&self) -> AppResult<Url> {
        Ok(self.token_endpoint.clone())
    }

    async fn call(&self, method: &str, args: &[Value]) -> AppResult<Value> {
        match method {
            "whoami" => Ok(json!(self.name)),
            "echo" => Ok(args.first().cloned().unwrap_or(Value::Null)),
            _ => Err(oauth_kit::AppError::unknown_method(self.name.as_str(), method)),
        }
    }
}

/// Provider builder that counts constructions and records the last credentials
pub struct CountingBuilder {
    name: String,
    pub calls: Arc<AtomicUsize>,
    pub last_credentials: Arc<Mutex<Option<Credentials>>>,
}

impl CountingBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            calls: Arc::new(AtomicUsize::new(0)),
            last_credentials: Arc::new(Mutex::new(None)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ProviderBuilder for CountingBuilder {
    fn build(&self, credentials: Credentials, _store: Box<dyn TokenStore>) -> Box<dyn OAuthProvider> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_credentials.lock().unwrap() = Some(credentials.clone());
        StubProvider::boxed(&self.name, credentials)
    }
}

/// Session-store factory that counts how many handles it produced
#[derive(Default)]
pub struct CountingSessionFactory {
    pub created: Arc<AtomicUsize>,
}

impl CountingSessionFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStoreFactory for CountingSessionFactory {
    fn create(&self) -> Box<dyn TokenStore> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Box::new(oauth_kit::MemorySessionStore::new())
    }
}

/// Test decorator exposing `extra_one` and tagging request responses
#[derive(Default)]
pub struct StageOneDecorator {
    inner: ForwardingDecorator,
}

impl StageOneDecorator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OAuthProvider for StageOneDecorator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn request(&self, request: ProviderRequest) -> AppResult<String> {
        let body = self.inner.request(request).await?;
        Ok(format!("{body} via-one"))
    }

    fn authorization_uri(&self, additional_params: &[(String, String)]) -> AppResult<Url> {
        self.inner.authorization_uri(additional_params)
    }

    fn authorization_endpoint(&self) -> AppResult<Url> {
        self.inner.authorization_endpoint()
    }

    fn access_token_endpoint(&self) -> AppResult<Url> {
        self.inner.access_token_endpoint()
    }

    async fn call(&self, method: &str, args: &[Value]) -> AppResult<Value> {
        match method {
            "extra_one" => Ok(json!("1")),
            _ => self.inner.call(method, args).await,
        }
    }
}

impl ProviderDecorator for StageOneDecorator {
    fn retarget(&mut self, target: Box<dyn OAuthProvider>) {
        self.inner.retarget(target);
    }
}

/// Test decorator exposing `extra_two` and tagging request responses
#[derive(Default)]
pub struct StageTwoDecorator {
    inner: ForwardingDecorator,
}

impl StageTwoDecorator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OAuthProvider for StageTwoDecorator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn request(&self, request: ProviderRequest) -> AppResult<String> {
        let body = self.inner.request(request).await?;
        Ok(format!("{body} via-two"))
    }

    fn authorization_uri(&self, additional_params: &[(String, String)]) -> AppResult<Url> {
        self.inner.authorization_uri(additional_params)
    }

    fn authorization_endpoint(&self) -> AppResult<Url> {
        self.inner.authorization_endpoint()
    }

    fn access_token_endpoint(&self) -> AppResult<Url> {
        self.inner.access_token_endpoint()
    }

    async fn call(&self, method: &str, args: &[Value]) -> AppResult<Value> {
        match method {
            "extra_two" => Ok(json!("2")),
            _ => self.inner.call(method, args).await,
        }
    }
}

impl ProviderDecorator for StageTwoDecorator {
    fn retarget(&mut self, target: Box<dyn OAuthProvider>) {
        self.inner.retarget(target);
    }
}

/// Credentials matching the canonical test configuration
pub fn test_credentials() -> Credentials {
    Credentials::new("foo", "bar", "http://baz.com/login")
}
