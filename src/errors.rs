// ABOUTME: Unified error handling for provider assembly and decorator forwarding
// ABOUTME: Defines standard error codes, the AppError type, and HTTP status mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 OAuth Kit Contributors

//! # Unified Error Handling
//!
//! Centralized error types for the crate. Every fallible operation returns
//! [`AppResult`], and errors carry an [`ErrorCode`] so host web frameworks can
//! map failures onto HTTP responses without string matching.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Configuration (1000-1999)
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 1000,
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 1001,

    // Provider assembly (2000-2999)
    #[serde(rename = "UNKNOWN_PROVIDER")]
    UnknownProvider = 2000,
    #[serde(rename = "INVALID_DECORATOR")]
    InvalidDecorator = 2001,

    // Decorator forwarding (3000-3999)
    #[serde(rename = "PROVIDER_NOT_BOUND")]
    ProviderNotBound = 3000,
    #[serde(rename = "UNKNOWN_METHOD")]
    UnknownMethod = 3001,

    // External services (5000-5999)
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,

    // Internal errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9001,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 404 Not Found - the requested dynamic method does not exist
            Self::UnknownMethod => 404,

            // 502 Bad Gateway - the delegated provider failed
            Self::ExternalServiceError => 502,

            // 500 Internal Server Error - host misconfiguration or crate bug
            Self::ConfigMissing
            | Self::ConfigInvalid
            | Self::UnknownProvider
            | Self::InvalidDecorator
            | Self::ProviderNotBound
            | Self::InternalError
            | Self::StorageError
            | Self::SerializationError => 500,
        }
    }

    /// Get a human-readable description of this error code
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ConfigMissing => "Provider configuration is missing",
            Self::ConfigInvalid => "Provider configuration is invalid",
            Self::UnknownProvider => "No provider implementation is registered",
            Self::InvalidDecorator => "Configured decorator is not registered",
            Self::ProviderNotBound => "Decorator has no wrapped provider",
            Self::UnknownMethod => "Provider does not expose the requested method",
            Self::ExternalServiceError => "External service request failed",
            Self::InternalError => "Internal error",
            Self::StorageError => "Token storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the crate
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Convenience functions for creating common errors
impl AppError {
    /// No configuration section exists for the requested provider name
    pub fn config_missing(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        Self::new(
            ErrorCode::ConfigMissing,
            format!("provider '{provider}' has no configuration set"),
        )
    }

    /// Configuration document could not be parsed or is malformed
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// No builder is registered for the provider name or its bound implementation
    pub fn unknown_provider(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        Self::new(
            ErrorCode::UnknownProvider,
            format!("no implementation registered for provider '{provider}'"),
        )
    }

    /// A configured decorator identifier does not resolve to a registered decorator
    pub fn invalid_decorator(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Self::new(
            ErrorCode::InvalidDecorator,
            format!("decorator '{identifier}' does not satisfy the provider decorator contract"),
        )
    }

    /// A forwarding call reached a decorator that was never bound to a provider
    #[must_use]
    pub fn provider_not_bound() -> Self {
        Self::new(
            ErrorCode::ProviderNotBound,
            "decorator is not bound to a provider; call retarget() first",
        )
    }

    /// The dynamic call path was asked for a method the provider does not expose
    pub fn unknown_method(provider: impl Into<String>, method: impl Into<String>) -> Self {
        let provider = provider.into();
        let method = method.into();
        Self::new(
            ErrorCode::UnknownMethod,
            format!("provider '{provider}' does not expose method '{method}'"),
        )
    }

    /// External service failure surfaced by a provider
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        let service = service.into();
        let message = message.into();
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{service}: {message}"),
        )
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Token storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }
}
