// ABOUTME: Main library entry point for the oauth-kit provider assembly crate
// ABOUTME: Exposes the factory, registry, decorator, configuration, and storage APIs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

#![deny(unsafe_code)]

//! # oauth-kit
//!
//! A configuration-driven factory for OAuth provider client objects, with
//! transparent decorator chains.
//!
//! The crate deliberately contains no protocol logic: authorization-URI
//! construction, token exchange, and signed request execution live in the
//! provider implementations hosts register; token persistence lives behind
//! the [`TokenStore`] trait. What this crate owns is the assembly:
//!
//! - **[`ProviderFactory`]** reads the named configuration section, binds an
//!   optional custom implementation, builds credentials and a fresh token
//!   store, constructs the provider through the [`ServiceRegistry`], and
//!   folds the configured decorator chain over it.
//! - **[`ForwardingDecorator`]** is a transparent proxy over the
//!   [`OAuthProvider`] capability trait: known calls and dynamic extension
//!   calls forward verbatim, and the decorator can be retargeted at any time.
//!
//! ## Example
//!
//! ```rust,no_run
//! use oauth_kit::{AppResult, OAuthConfig, OAuthProvider, ProviderFactory, ServiceRegistry};
//!
//! # fn main() -> AppResult<()> {
//! let config = OAuthConfig::from_yaml(
//!     r"
//! providers:
//!   github:
//!     consumer_key: my-key
//!     consumer_secret: my-secret
//!     callback_url: https://example.com/oauth/callback
//! ",
//! )?;
//!
//! // Hosts register provider builders at startup, then assemble on demand.
//! let registry = ServiceRegistry::new();
//! let factory = ProviderFactory::new(config, registry);
//! let provider = factory.make("github")?;
//! let uri = provider.authorization_uri(&[])?;
//! # let _ = uri;
//! # Ok(())
//! # }
//! ```

/// Provider configuration schema and loading
pub mod config;

/// Unified error handling
pub mod errors;

/// Provider assembly: capability trait, registry, decorators, factory
pub mod providers;

/// Token storage abstraction and in-memory session stores
pub mod storage;

pub use config::{OAuthConfig, ProviderSettings};
pub use errors::{AppError, AppResult, ErrorCode};
pub use providers::core::{Credentials, OAuthProvider, ProviderBuilder, ProviderRequest};
pub use providers::decorator::{
    DecoratorBuilder, ForwardingDecorator, ProviderDecorator, TracingDecorator,
};
pub use providers::factory::ProviderFactory;
pub use providers::registry::ServiceRegistry;
pub use storage::{
    MemorySessionFactory, MemorySessionStore, SessionStoreFactory, StoredToken, TokenStore,
};
