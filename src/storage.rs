// ABOUTME: Token storage abstraction and the in-memory session-backed implementation
// ABOUTME: Provides the per-assembly store handles that providers persist OAuth tokens into
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

//! Token storage for provider instances.
//!
//! The factory creates one fresh [`TokenStore`] handle per assembled provider
//! through a [`SessionStoreFactory`]. Handles are never pooled or reused
//! across assemblies. The shipped [`MemorySessionStore`] keeps tokens in
//! process memory for the lifetime of the session; hosts with durable session
//! state implement [`TokenStore`] over their own backend.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// A persisted OAuth token record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    /// Current access token
    pub access_token: String,
    /// Refresh token for obtaining new access tokens
    pub refresh_token: Option<String>,
    /// When the access token expires
    pub expires_at: Option<DateTime<Utc>>,
    /// Granted OAuth scopes
    #[serde(default)]
    pub scopes: Vec<String>,
}

impl StoredToken {
    /// Create a token record with just an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_at: None,
            scopes: Vec::new(),
        }
    }

    /// Whether the access token is past its expiry timestamp
    ///
    /// Tokens without an expiry never expire.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// Persistence for OAuth tokens, keyed by provider name
pub trait TokenStore: Send + Sync {
    /// Persist a token for a provider
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn save(&self, provider: &str, token: StoredToken) -> AppResult<()>;

    /// Load the stored token for a provider, if any
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn load(&self, provider: &str) -> AppResult<Option<StoredToken>>;

    /// Remove the stored token for a provider
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the removal.
    fn clear(&self, provider: &str) -> AppResult<()>;
}

/// Produces one fresh [`TokenStore`] handle per provider assembly
pub trait SessionStoreFactory: Send + Sync {
    /// Create a new store handle
    fn create(&self) -> Box<dyn TokenStore>;
}

/// In-memory token store scoped to one session
pub struct MemorySessionStore {
    session_id: Uuid,
    tokens: RwLock<HashMap<String, StoredToken>>,
}

impl MemorySessionStore {
    /// Create an empty session store with a fresh session id
    #[must_use]
    pub fn new() -> Self {
        let session_id = Uuid::new_v4();
        debug!(%session_id, "opened in-memory token session");
        Self {
            session_id,
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// The unique id of this session
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for MemorySessionStore {
    fn save(&self, provider: &str, token: StoredToken) -> AppResult<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AppError::storage("token session lock poisoned"))?;
        tokens.insert(provider.to_owned(), token);
        Ok(())
    }

    fn load(&self, provider: &str) -> AppResult<Option<StoredToken>> {
        let tokens = self
            .tokens
            .read()
            .map_err(|_| AppError::storage("token session lock poisoned"))?;
        Ok(tokens.get(provider).cloned())
    }

    fn clear(&self, provider: &str) -> AppResult<()> {
        let mut tokens = self
            .tokens
            .write()
            .map_err(|_| AppError::storage("token session lock poisoned"))?;
        tokens.remove(provider);
        Ok(())
    }
}

/// Factory producing [`MemorySessionStore`] handles
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySessionFactory;

impl SessionStoreFactory for MemorySessionFactory {
    fn create(&self) -> Box<dyn TokenStore> {
        Box::new(MemorySessionStore::new())
    }
}
