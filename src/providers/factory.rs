// ABOUTME: Provider factory assembling configured providers with credentials, storage, and decorators
// ABOUTME: Implements the make() entry point hosts bind behind their dependency injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

//! # Provider Factory
//!
//! [`ProviderFactory::make`] is the crate's boundary entry point. For a named
//! provider it validates that a configuration section exists, binds any
//! configured implementation identifier, builds credentials and a fresh token
//! store, constructs the raw provider through the [`ServiceRegistry`], and
//! folds the configured decorator chain over it (outermost decorator = last
//! listed).
//!
//! The factory holds no long-lived mutable state apart from the registry,
//! which it mutates only when a provider section carries a `class` binding.
//! Either a fully assembled provider is returned or construction is abandoned
//! entirely; no error is swallowed or retried.

use crate::config::OAuthConfig;
use crate::errors::{AppError, AppResult};
use crate::providers::core::{Credentials, OAuthProvider};
use crate::providers::registry::ServiceRegistry;
use crate::storage::{MemorySessionFactory, SessionStoreFactory};
use std::sync::RwLock;
use tracing::debug;

/// Assembles configured provider instances
pub struct ProviderFactory {
    config: OAuthConfig,
    registry: RwLock<ServiceRegistry>,
    sessions: Box<dyn SessionStoreFactory>,
}

impl ProviderFactory {
    /// Create a factory over a configuration and a pre-populated registry
    ///
    /// Token stores default to in-memory sessions; see
    /// [`Self::with_session_factory`] for host-backed storage.
    #[must_use]
    pub fn new(config: OAuthConfig, registry: ServiceRegistry) -> Self {
        Self {
            config,
            registry: RwLock::new(registry),
            sessions: Box::new(MemorySessionFactory),
        }
    }

    /// Replace the session-store factory backing token storage
    #[must_use]
    pub fn with_session_factory(mut self, sessions: Box<dyn SessionStoreFactory>) -> Self {
        self.sessions = sessions;
        self
    }

    /// The configuration this factory reads
    #[must_use]
    pub const fn config(&self) -> &OAuthConfig {
        &self.config
    }

    /// The registry, for pre-registering builders and decorators at startup
    #[must_use]
    pub const fn registry(&self) -> &RwLock<ServiceRegistry> {
        &self.registry
    }

    /// Assemble the provider configured under `name`
    ///
    /// # Errors
    ///
    /// - `ConfigMissing` when no `providers.<name>` section exists (checked
    ///   before any other read)
    /// - `UnknownProvider` from the registry when no builder resolves
    /// - `InvalidDecorator` when a configured decorator identifier is not
    ///   registered
    /// - registry and storage errors propagate unmodified
    pub fn make(&self, name: &str) -> AppResult<Box<dyn OAuthProvider>> {
        let settings = self
            .config
            .provider(name)
            .ok_or_else(|| AppError::config_missing(name))?;

        // The only mutation: bind a configured implementation identifier.
        // Concurrent make() calls binding the same name race, last write wins.
        if let Some(class) = &settings.class {
            let mut registry = self
                .registry
                .write()
                .map_err(|_| AppError::internal("service registry lock poisoned"))?;
            registry.register_implementation(name, class.as_str());
        }

        let credentials = Credentials::new(
            settings.consumer_key.as_str(),
            settings.consumer_secret.as_str(),
            settings.callback_url.as_str(),
        );
        let store = self.sessions.create();

        let registry = self
            .registry
            .read()
            .map_err(|_| AppError::internal("service registry lock poisoned"))?;
        let mut provider = registry.construct(name, credentials, store)?;

        // Explicit fold over the configured chain, outermost decorator last.
        for identifier in &settings.decorators {
            let builder = registry
                .decorator(identifier)
                .ok_or_else(|| AppError::invalid_decorator(identifier.as_str()))?;
            let mut decorator = builder.build();
            decorator.retarget(provider);
            // Box<dyn ProviderDecorator> upcasts to Box<dyn OAuthProvider>.
            provider = decorator;
        }

        debug!(
            provider = %name,
            decorators = settings.decorators.len(),
            "assembled provider"
        );
        Ok(provider)
    }
}
