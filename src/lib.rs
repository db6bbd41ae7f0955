// SPDX-License-Identifier: PMPL-1.0-or-later

//! # Omnibase Client SDK
//!
//! A Rust client library for Omnibase — a unified cloud backend exposing
//! document-store, auth, storage, generative-AI, and vector-search
//! capabilities behind a single dispatch endpoint. Every capability is
//! invoked by POSTing a JSON payload carrying an `action` field; the SDK
//! normalizes every HTTP outcome into a uniform [`ApiResult`].
//!
//! Alongside the dispatcher, the crate ships the nested-value utility
//! library the SDK is built on: dot-path addressing, flatten/unflatten,
//! deep merge, subtree picking, key-name validation, and ISO-8601 timestamp
//! round-tripping.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use omnibase_client::{Client, Payload};
//!
//! #[tokio::main]
//! async fn main() -> omnibase_client::Result<()> {
//!     let client = Client::new("https://api.omnibase.example/v1", "sk_live_123")?;
//!     let res = client
//!         .dispatch(&Payload::new("doc.fetch").field("collection", "articles").into())
//!         .await;
//!     println!("ok={} status={}", res.ok, res.status_code);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`] — The dispatcher: payload validation, HTTP transport
//!   (suspending and blocking), presigned upload, response normalization.
//! - [`config`] — Connection configuration, including `from_env`.
//! - [`value`] — The nested value tree ([`Value`], [`Map`]).
//! - [`path`] — Dot-notation path parsing and building.
//! - [`flatten`] — Flatten/unflatten between nested and dot-path form.
//! - [`merge`] — Recursive deep merge of nested mappings.
//! - [`pick`] — Subtree extraction by dot-path.
//! - [`ops`] — Dot-path get/set/pop and find-replace.
//! - [`validate`] — Recursive key-name validation.
//! - [`json`] — JSON encode/decode with timestamp promotion.
//! - [`timestamp`] — ISO-8601 parsing, formatting, and clock helpers.
//! - [`ids`] — Random identifier generation.
//! - [`types`] — [`ApiResult`], [`Payload`], [`PresignedPost`].
//! - [`error`] — Error types and the crate-level [`Result`] alias.

pub mod client;
pub mod config;
pub mod error;
pub mod flatten;
pub mod ids;
pub mod json;
pub mod merge;
pub mod ops;
pub mod path;
pub mod pick;
pub mod timestamp;
pub mod types;
pub mod validate;
pub mod value;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{OmnibaseError, Result};
pub use types::{ApiResult, Payload, PresignedPost};
pub use value::{Map, Value};
