//! Error types for Mason operations.
//!
//! This module defines [`MasonError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - `MasonError` is reserved for static problems: malformed depot locations,
//!   unusable registrar options, unknown registrars, local IO failures
//! - Remote-service outcomes (HTTP errors, missing assets) are ordinary
//!   return values on the provider surface, never errors, so callers can
//!   decide whether to retry, skip, or abort a batch
//! - Use `anyhow::Error` (via `MasonError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Mason operations.
#[derive(Debug, Error)]
pub enum MasonError {
    /// A depot location or template identifier is syntactically invalid.
    #[error("Invalid identifier: {message}")]
    InvalidIdentifier { message: String },

    /// Registrar options could not be interpreted for the configured registrar.
    #[error("Invalid registrar options for '{registrar}': {message}")]
    InvalidRegistrarOptions { registrar: String, message: String },

    /// The depot's registrar discriminator names no known implementation.
    #[error("Unknown registrar: {registrar}")]
    UnknownRegistrar { registrar: String },

    /// No depot with the given name is configured.
    #[error("Unknown depot: {name}")]
    UnknownDepot { name: String },

    /// Depot configuration file could not be parsed.
    #[error("Failed to parse depot config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MasonError {
    /// Build the configuration error for a malformed identifier or location.
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            message: message.into(),
        }
    }
}

/// Result type alias for Mason operations.
pub type Result<T> = std::result::Result<T, MasonError>;
