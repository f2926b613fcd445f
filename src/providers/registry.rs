// ABOUTME: Service registry mapping implementation identifiers to provider and decorator builders
// ABOUTME: Resolves name bindings and constructs raw provider instances for the factory
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

//! # Service Registry
//!
//! The provider-construction service. Hosts register provider builders under
//! implementation identifiers (typically at startup), optionally bind a
//! provider name to a different identifier than its own, and register the
//! decorator builders that configuration may reference.
//!
//! The registry is plain owned state. The factory wraps it in an `RwLock`;
//! concurrent bindings of the same name race with last-write-wins semantics,
//! so hosts needing stronger guarantees pre-register once at startup.

use crate::errors::{AppError, AppResult};
use crate::providers::core::{Credentials, OAuthProvider, ProviderBuilder};
use crate::providers::decorator::{DecoratorBuilder, ProviderDecorator};
use crate::storage::TokenStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builder wrapper for closure-based provider registration
struct FnProviderBuilder<F> {
    build_fn: F,
}

impl<F> ProviderBuilder for FnProviderBuilder<F>
where
    F: Fn(Credentials, Box<dyn TokenStore>) -> Box<dyn OAuthProvider> + Send + Sync,
{
    fn build(&self, credentials: Credentials, store: Box<dyn TokenStore>) -> Box<dyn OAuthProvider> {
        (self.build_fn)(credentials, store)
    }
}

/// Builder wrapper for closure-based decorator registration
struct FnDecoratorBuilder<F> {
    build_fn: F,
}

impl<F> DecoratorBuilder for FnDecoratorBuilder<F>
where
    F: Fn() -> Box<dyn ProviderDecorator> + Send + Sync,
{
    fn build(&self) -> Box<dyn ProviderDecorator> {
        (self.build_fn)()
    }
}

/// Registry of provider builders, name bindings, and decorator builders
pub struct ServiceRegistry {
    builders: HashMap<String, Arc<dyn ProviderBuilder>>,
    bindings: HashMap<String, String>,
    decorators: HashMap<String, Arc<dyn DecoratorBuilder>>,
}

impl ServiceRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
            bindings: HashMap::new(),
            decorators: HashMap::new(),
        }
    }

    /// Register a provider builder under an implementation identifier
    pub fn register_builder(
        &mut self,
        identifier: impl Into<String>,
        builder: Arc<dyn ProviderBuilder>,
    ) {
        let identifier = identifier.into();
        debug!(implementation = %identifier, "registered provider builder");
        self.builders.insert(identifier, builder);
    }

    /// Register a closure as a provider builder
    pub fn register_builder_fn<F>(&mut self, identifier: impl Into<String>, build_fn: F)
    where
        F: Fn(Credentials, Box<dyn TokenStore>) -> Box<dyn OAuthProvider> + Send + Sync + 'static,
    {
        self.register_builder(identifier, Arc::new(FnProviderBuilder { build_fn }));
    }

    /// Bind a provider name to an implementation identifier
    ///
    /// Later constructions of `name` resolve to `identifier` instead of a
    /// builder registered under the name itself. Binding never fails; an
    /// identifier with no registered builder surfaces as `UnknownProvider`
    /// from [`Self::construct`].
    pub fn register_implementation(
        &mut self,
        name: impl Into<String>,
        identifier: impl Into<String>,
    ) {
        let name = name.into();
        let identifier = identifier.into();
        debug!(provider = %name, implementation = %identifier, "bound provider implementation");
        self.bindings.insert(name, identifier);
    }

    /// Register a decorator builder under an identifier
    pub fn register_decorator(
        &mut self,
        identifier: impl Into<String>,
        builder: Arc<dyn DecoratorBuilder>,
    ) {
        let identifier = identifier.into();
        debug!(decorator = %identifier, "registered decorator builder");
        self.decorators.insert(identifier, builder);
    }

    /// Register a closure as a decorator builder
    pub fn register_decorator_fn<F>(&mut self, identifier: impl Into<String>, build_fn: F)
    where
        F: Fn() -> Box<dyn ProviderDecorator> + Send + Sync + 'static,
    {
        self.register_decorator(identifier, Arc::new(FnDecoratorBuilder { build_fn }));
    }

    /// Look up a decorator builder by identifier
    #[must_use]
    pub fn decorator(&self, identifier: &str) -> Option<Arc<dyn DecoratorBuilder>> {
        self.decorators.get(identifier).cloned()
    }

    /// Check whether a builder is registered under an identifier
    #[must_use]
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.builders.contains_key(identifier)
    }

    /// Identifiers of all registered provider builders
    #[must_use]
    pub fn registered_builders(&self) -> Vec<&str> {
        self.builders.keys().map(String::as_str).collect()
    }

    /// Construct a raw provider for a name, resolving any implementation binding
    ///
    /// # Errors
    ///
    /// Returns `UnknownProvider` when neither the binding target nor the name
    /// itself has a registered builder.
    pub fn construct(
        &self,
        name: &str,
        credentials: Credentials,
        store: Box<dyn TokenStore>,
    ) -> AppResult<Box<dyn OAuthProvider>> {
        let identifier = self.bindings.get(name).map_or(name, String::as_str);
        let builder = self
            .builders
            .get(identifier)
            .ok_or_else(|| AppError::unknown_provider(name))?;
        debug!(provider = %name, implementation = %identifier, "constructing provider");
        Ok(builder.build(credentials, store))
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
