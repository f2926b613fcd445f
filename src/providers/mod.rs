// ABOUTME: Provider assembly modules: capability contract, registry, decorators, and factory
// ABOUTME: Unifies raw and decorated OAuth providers behind one trait object surface
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

//! Provider assembly.
//!
//! - [`core`] - the `OAuthProvider` capability trait, credentials, requests
//! - [`registry`] - the provider-construction service
//! - [`decorator`] - transparent decorator chain building blocks
//! - [`factory`] - the `make()` entry point tying it all together

pub mod core;
pub mod decorator;
pub mod factory;
pub mod registry;

pub use self::core::{Credentials, OAuthProvider, ProviderBuilder, ProviderRequest};
pub use decorator::{DecoratorBuilder, ForwardingDecorator, ProviderDecorator, TracingDecorator};
pub use factory::ProviderFactory;
pub use registry::ServiceRegistry;
