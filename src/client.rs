// SPDX-License-Identifier: PMPL-1.0-or-later

//! Request dispatch: payload shaping, HTTP transport, and response
//! normalization.
//!
//! [`Client`] is the single dispatcher type. It exposes two explicit
//! operations sharing identical payload validation and response
//! normalization: [`Client::dispatch`] suspends on I/O, and
//! [`Client::dispatch_blocking`] occupies the calling thread for the full
//! round trip. Neither ever raises: any transport failure or malformed
//! response surfaces as a failure [`ApiResult`] with status 500 and an
//! `EXCEPTION:`-prefixed message.

use std::sync::OnceLock;
use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{OmnibaseError, Result};
use crate::json;
use crate::types::{ApiResult, PresignedPost};
use crate::value::Value;

/// Request header carrying the access key.
pub const ACCESS_KEY_HEADER: &str = "X-OMNIBASE-ACCESS-KEY";
/// Request header identifying the SDK.
pub const CLIENT_HEADER: &str = "X-OMNIBASE-CLIENT";
/// Value sent in [`CLIENT_HEADER`].
const CLIENT_IDENT: &str = concat!("omnibase-client-rust/", env!("CARGO_PKG_VERSION"));

/// Form field key carrying the file content in a presigned upload.
const UPLOAD_FILE_KEY: &str = "file";

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// The Omnibase dispatcher.
///
/// Holds the endpoint URL, the access key, and pooled HTTP clients. The
/// async client is built eagerly; the blocking client is built lazily on
/// the first blocking call so that purely-async consumers never pay for it.
///
/// # Examples
///
/// ```rust,no_run
/// use omnibase_client::{Client, Payload};
///
/// # #[tokio::main]
/// # async fn main() -> omnibase_client::Result<()> {
/// let client = Client::new("https://api.omnibase.example/v1", "sk_live_123")?;
/// let res = client
///     .dispatch(&Payload::new("doc.fetch").field("collection", "articles").into())
///     .await;
/// assert!(res.ok || res.error.is_some());
/// # Ok(())
/// # }
/// ```
pub struct Client {
    /// Parsed endpoint URL every payload is POSTed to.
    api_url: Url,
    /// Access key sent with every request.
    access_key: String,
    /// Per-request timeout, shared by both transports.
    timeout: Duration,
    /// Pooled async transport.
    http: reqwest::Client,
    /// Pooled blocking transport, built on first use.
    blocking: OnceLock<reqwest::blocking::Client>,
}

impl Client {
    /// Create a client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OmnibaseError::Validation`] when `api_url` cannot be parsed.
    pub fn new(api_url: &str, access_key: &str) -> Result<Self> {
        Self::from_config(ClientConfig::new(api_url, access_key))
    }

    /// Create a client from an explicit configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| OmnibaseError::Validation(format!("invalid API URL: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OmnibaseError::Network)?;

        Ok(Self {
            api_url,
            access_key: config.access_key,
            timeout: config.timeout,
            http,
            blocking: OnceLock::new(),
        })
    }

    /// The configured endpoint URL.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// The configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // -- Dispatch -----------------------------------------------------------

    /// Dispatch an action payload, suspending on I/O.
    ///
    /// The payload must be a mapping carrying an `action` field; without one
    /// the call fails before any network traffic. Failure is always
    /// observable via `ok == false`, never as a raised error.
    pub async fn dispatch(&self, payload: &Value) -> ApiResult {
        match self.try_dispatch(payload).await {
            Ok(result) => result,
            Err(err) => exception_result(err),
        }
    }

    /// Blocking variant of [`Client::dispatch`].
    ///
    /// Occupies the calling thread for the full round trip. Must not be
    /// called from within an async runtime.
    pub fn dispatch_blocking(&self, payload: &Value) -> ApiResult {
        match self.try_dispatch_blocking(payload) {
            Ok(result) => result,
            Err(err) => exception_result(err),
        }
    }

    async fn try_dispatch(&self, payload: &Value) -> Result<ApiResult> {
        let action = ensure_action(payload)?;
        debug!(action, url = %self.api_url, "dispatching request");

        let response = self
            .http
            .post(self.api_url.clone())
            .header(ACCESS_KEY_HEADER, self.access_key.as_str())
            .header(CLIENT_HEADER, CLIENT_IDENT)
            .json(payload)
            .send()
            .await
            .map_err(OmnibaseError::Network)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(OmnibaseError::Network)?;
        normalize_response(status, &body)
    }

    fn try_dispatch_blocking(&self, payload: &Value) -> Result<ApiResult> {
        let action = ensure_action(payload)?;
        debug!(action, url = %self.api_url, "dispatching blocking request");

        let response = self
            .blocking_http()?
            .post(self.api_url.clone())
            .header(ACCESS_KEY_HEADER, self.access_key.as_str())
            .header(CLIENT_HEADER, CLIENT_IDENT)
            .json(payload)
            .send()
            .map_err(OmnibaseError::Network)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(OmnibaseError::Network)?;
        normalize_response(status, &body)
    }

    fn blocking_http(&self) -> Result<&reqwest::blocking::Client> {
        if let Some(client) = self.blocking.get() {
            return Ok(client);
        }
        let built = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(OmnibaseError::Network)?;
        Ok(self.blocking.get_or_init(|| built))
    }

    // -- Presigned upload ---------------------------------------------------

    /// Upload file content to a presigned URL, suspending on I/O.
    ///
    /// Performs a multipart form POST with the presigned `fields` as form
    /// fields and `content` under the `file` key. Any non-success HTTP
    /// status is a failure [`ApiResult`].
    pub async fn upload(
        &self,
        post: &PresignedPost,
        file_name: &str,
        content: Vec<u8>,
    ) -> ApiResult {
        match self.try_upload(post, file_name, content).await {
            Ok(result) => result,
            Err(err) => exception_result(err),
        }
    }

    /// Blocking variant of [`Client::upload`].
    pub fn upload_blocking(
        &self,
        post: &PresignedPost,
        file_name: &str,
        content: Vec<u8>,
    ) -> ApiResult {
        match self.try_upload_blocking(post, file_name, content) {
            Ok(result) => result,
            Err(err) => exception_result(err),
        }
    }

    async fn try_upload(
        &self,
        post: &PresignedPost,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<ApiResult> {
        debug!(url = %post.url, file_name, "uploading to presigned URL");

        let mut form = reqwest::multipart::Form::new();
        for (key, value) in &post.fields {
            form = form.text(key.clone(), value.clone());
        }
        let part = reqwest::multipart::Part::bytes(content).file_name(file_name.to_owned());
        form = form.part(UPLOAD_FILE_KEY, part);

        let response = self
            .http
            .post(&post.url)
            .multipart(form)
            .send()
            .await
            .map_err(OmnibaseError::Network)?;

        let status = response.status();
        let code = status.as_u16();
        if status.is_success() {
            Ok(ApiResult::success(
                Value::empty_object(),
                Value::empty_object(),
                code,
            ))
        } else {
            let body = response.text().await.map_err(OmnibaseError::Network)?;
            Ok(upload_failure(code, body))
        }
    }

    fn try_upload_blocking(
        &self,
        post: &PresignedPost,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<ApiResult> {
        debug!(url = %post.url, file_name, "uploading to presigned URL (blocking)");

        let mut form = reqwest::blocking::multipart::Form::new();
        for (key, value) in &post.fields {
            form = form.text(key.clone(), value.clone());
        }
        let part =
            reqwest::blocking::multipart::Part::bytes(content).file_name(file_name.to_owned());
        form = form.part(UPLOAD_FILE_KEY, part);

        let response = self
            .blocking_http()?
            .post(&post.url)
            .multipart(form)
            .send()
            .map_err(OmnibaseError::Network)?;

        let status = response.status();
        let code = status.as_u16();
        if status.is_success() {
            Ok(ApiResult::success(
                Value::empty_object(),
                Value::empty_object(),
                code,
            ))
        } else {
            let body = response.text().map_err(OmnibaseError::Network)?;
            Ok(upload_failure(code, body))
        }
    }
}

// ---------------------------------------------------------------------------
// Shared payload validation and response normalization
// ---------------------------------------------------------------------------

/// Check that a payload is a mapping carrying a non-empty `action` field.
///
/// # Errors
///
/// Returns [`OmnibaseError::MissingAction`] otherwise. Dispatch calls this
/// before any network traffic.
pub fn ensure_action(payload: &Value) -> Result<&str> {
    match payload.get("action") {
        Some(Value::String(action)) if !action.is_empty() => Ok(action),
        _ => Err(OmnibaseError::MissingAction),
    }
}

/// Normalize an HTTP outcome into an [`ApiResult`].
///
/// The body is decoded with [`json::loads`], so timestamp strings come back
/// as rich values. HTTP 200 maps to success carrying `data`/`meta`; any
/// other status maps to failure carrying the body's `error` string.
fn normalize_response(status: u16, body: &str) -> Result<ApiResult> {
    let parsed = json::loads(body)?;
    if status == 200 {
        let data = parsed.get("data").cloned().unwrap_or_else(Value::empty_object);
        let meta = parsed.get("meta").cloned().unwrap_or_else(Value::empty_object);
        Ok(ApiResult::success(data, meta, status))
    } else {
        let error = match parsed.get("error") {
            Some(Value::String(message)) => message.clone(),
            _ => format!("HTTP {status}"),
        };
        Ok(ApiResult::failure(error, status))
    }
}

fn upload_failure(status: u16, body: String) -> ApiResult {
    let error = if body.is_empty() {
        format!("HTTP {status}")
    } else {
        body
    };
    ApiResult::failure(error, status)
}

fn exception_result(err: OmnibaseError) -> ApiResult {
    warn!(error = %err, "request failed before completion");
    ApiResult::failure(format!("EXCEPTION: {err}"), 500)
}
