// ABOUTME: Transparent provider decorators that forward the full capability surface
// ABOUTME: Includes the forwarding base, the retarget contract, and a tracing decorator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

//! # Provider Decorators
//!
//! A decorator wraps one provider and presents an identical capability
//! surface, so wrapping is invisible to callers and chainable. Concrete
//! decorators compose over [`ForwardingDecorator`], intercept what they care
//! about, and let everything else flow through - including dynamic extension
//! calls, which keeps a wrapped provider's bespoke methods reachable through
//! an entire chain.
//!
//! A decorator has two states: unbound (no wrapped provider yet) and bound.
//! [`ProviderDecorator::retarget`] moves between them and may be called again
//! at any time to rewrap a different provider. Forwarding calls on an unbound
//! decorator fail with `ProviderNotBound`.

use crate::errors::{AppError, AppResult};
use crate::providers::core::{OAuthProvider, ProviderRequest};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// The decorator contract: the full provider capability set plus retargeting
pub trait ProviderDecorator: OAuthProvider {
    /// Replace the wrapped provider
    ///
    /// Valid both for the initial binding during assembly and for rewrapping
    /// a different provider later.
    fn retarget(&mut self, target: Box<dyn OAuthProvider>);
}

/// Parameterless construction of a decorator, registered under an identifier
pub trait DecoratorBuilder: Send + Sync {
    /// Construct a fresh, unbound decorator
    fn build(&self) -> Box<dyn ProviderDecorator>;
}

/// Base decorator that forwards every capability call to its target
///
/// Concrete decorators hold one of these and delegate whatever they do not
/// intercept.
pub struct ForwardingDecorator {
    target: Option<Box<dyn OAuthProvider>>,
}

impl ForwardingDecorator {
    /// Create an unbound decorator; bind it with [`ProviderDecorator::retarget`]
    #[must_use]
    pub fn new() -> Self {
        Self { target: None }
    }

    /// Create a decorator already bound to a provider
    #[must_use]
    pub fn wrapping(target: Box<dyn OAuthProvider>) -> Self {
        Self {
            target: Some(target),
        }
    }

    /// Whether a provider is currently wrapped
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    /// The wrapped provider, or `ProviderNotBound` when unbound
    ///
    /// # Errors
    ///
    /// Returns `ProviderNotBound` if [`ProviderDecorator::retarget`] was never
    /// called.
    pub fn target(&self) -> AppResult<&dyn OAuthProvider> {
        self.target.as_deref().ok_or_else(AppError::provider_not_bound)
    }
}

impl Default for ForwardingDecorator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OAuthProvider for ForwardingDecorator {
    fn name(&self) -> &str {
        self.target.as_deref().map_or("unbound", OAuthProvider::name)
    }

    async fn request(&self, request: ProviderRequest) -> AppResult<String> {
        self.target()?.request(request).await
    }

    fn authorization_uri(&self, additional_params: &[(String, String)]) -> AppResult<Url> {
        self.target()?.authorization_uri(additional_params)
    }

    fn authorization_endpoint(&self) -> AppResult<Url> {
        self.target()?.authorization_endpoint()
    }

    fn access_token_endpoint(&self) -> AppResult<Url> {
        self.target()?.access_token_endpoint()
    }

    async fn call(&self, method: &str, args: &[Value]) -> AppResult<Value> {
        self.target()?.call(method, args).await
    }
}

impl ProviderDecorator for ForwardingDecorator {
    fn retarget(&mut self, target: Box<dyn OAuthProvider>) {
        self.target = Some(target);
    }
}

/// Decorator that logs request traffic and authorization-URI issuance
///
/// Purely observational: every call forwards verbatim after emitting a
/// `tracing` event.
#[derive(Default)]
pub struct TracingDecorator {
    inner: ForwardingDecorator,
}

impl TracingDecorator {
    /// Create an unbound tracing decorator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracing decorator already bound to a provider
    #[must_use]
    pub fn wrapping(target: Box<dyn OAuthProvider>) -> Self {
        Self {
            inner: ForwardingDecorator::wrapping(target),
        }
    }
}

#[async_trait]
impl OAuthProvider for TracingDecorator {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn request(&self, request: ProviderRequest) -> AppResult<String> {
        debug!(
            provider = self.inner.name(),
            method = %request.method,
            path = %request.path,
            "executing provider request"
        );
        let started = Instant::now();
        let result = self.inner.request(request).await;
        match &result {
            Ok(_) => debug!(
                provider = self.inner.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "provider request completed"
            ),
            Err(e) => warn!(
                provider = self.inner.name(),
                error = %e,
                "provider request failed"
            ),
        }
        result
    }

    fn authorization_uri(&self, additional_params: &[(String, String)]) -> AppResult<Url> {
        debug!(
            provider = self.inner.name(),
            params = additional_params.len(),
            "issuing authorization uri"
        );
        self.inner.authorization_uri(additional_params)
    }

    fn authorization_endpoint(&self) -> AppResult<Url> {
        self.inner.authorization_endpoint()
    }

    fn access_token_endpoint(&self) -> AppResult<Url> {
        self.inner.access_token_endpoint()
    }

    async fn call(&self, method: &str, args: &[Value]) -> AppResult<Value> {
        debug!(
            provider = self.inner.name(),
            method, "forwarding dynamic provider call"
        );
        self.inner.call(method, args).await
    }
}

impl ProviderDecorator for TracingDecorator {
    fn retarget(&mut self, target: Box<dyn OAuthProvider>) {
        self.inner.retarget(target);
    }
}
