// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the Omnibase client SDK.
//!
//! All fallible operations in this crate return [`Result<T>`], an alias for
//! `std::result::Result<T, OmnibaseError>`. Value-utility errors (paths,
//! flatten conflicts, key validation) are raised to the immediate caller;
//! dispatcher-layer errors are caught inside [`crate::client::Client`] and
//! converted into a failure [`crate::types::ApiResult`], so a request call
//! never surfaces a raised error.

use thiserror::Error;

/// Comprehensive error type for Omnibase client operations.
#[derive(Error, Debug)]
pub enum OmnibaseError {
    /// A dot-path was malformed (empty path or empty segment).
    #[error("Invalid dot-path: `{0}`")]
    InvalidPath(String),

    /// Unflattening or a path write collided with a non-mapping value on an
    /// intermediate segment. Carries the full offending path.
    #[error("Structure conflict at `{0}`: intermediate segment holds a non-mapping value")]
    StructureConflict(String),

    /// A requested path was absent when `check_keys` was set.
    #[error("Missing key: `{0}`")]
    MissingKey(String),

    /// A mapping key failed the identifier grammar. Carries the key name.
    #[error("Invalid key name: `{0}`")]
    InvalidKeyName(String),

    /// A dispatch payload lacked the required `action` field.
    #[error("Request payload missing `action`")]
    MissingAction,

    /// An underlying HTTP / network transport error from `reqwest`.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Client-side validation failed before any request was sent.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Crate-level result alias using [`OmnibaseError`].
pub type Result<T> = std::result::Result<T, OmnibaseError>;
