//! The request helper underneath every resource accessor.
//!
//! [`ShelfLifeApi::request`] performs exactly one HTTP call and classifies
//! the outcome as a [`Payload`] (JSON, raw text, or empty) or an
//! [`ApiError`]. It never retries.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shelflife_core::error::CoreError;
use shelflife_core::normalize::{self, AliasTable};

use crate::config::ClientConfig;
use crate::context::CallContext;
use crate::error::ApiError;

/// Classified body of a successful response.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 2xx with a body that parsed as JSON.
    Json(Value),
    /// 2xx with a body that was not valid JSON, returned verbatim.
    Text(String),
    /// 204/205, or a 2xx with an empty body.
    Empty,
}

impl Payload {
    /// Classify raw success-body bytes. Whitespace-only bodies count as
    /// empty; anything that fails to parse as JSON is kept as text.
    pub fn from_body(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::Empty;
        }
        match serde_json::from_slice(bytes) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Decode a single entity. Empty bodies, JSON `null` and `{}` mean the
    /// entity is absent.
    pub fn into_one<T: DeserializeOwned>(
        self,
        path: &str,
        table: &AliasTable,
    ) -> Result<Option<T>, ApiError> {
        match self {
            Self::Empty | Self::Json(Value::Null) => Ok(None),
            Self::Json(Value::Object(map)) if map.is_empty() => Ok(None),
            Self::Json(value) => decode_at(path, &value, table).map(Some),
            Self::Text(text) => Err(unexpected_text(path, &text)),
        }
    }

    /// Decode the entity a write echoes back. A text body means the write
    /// was applied but no entity came back.
    pub fn into_saved<T: DeserializeOwned>(
        self,
        path: &str,
        table: &AliasTable,
    ) -> Result<Option<T>, ApiError> {
        match self {
            Self::Text(text) => {
                tracing::debug!(path, body = %text, "Write acknowledged with a non-JSON body");
                Ok(None)
            }
            other => other.into_one(path, table),
        }
    }

    /// Decode a list of entities. Empty bodies and JSON `null` mean an
    /// empty list.
    pub fn into_list<T: DeserializeOwned>(
        self,
        path: &str,
        table: &AliasTable,
    ) -> Result<Vec<T>, ApiError> {
        match self {
            Self::Empty | Self::Json(Value::Null) => Ok(Vec::new()),
            Self::Json(Value::Array(items)) => items
                .iter()
                .map(|item| decode_at(path, item, table))
                .collect(),
            Self::Json(other) => Err(ApiError::Decode {
                path: path.to_string(),
                message: format!("expected a JSON array, got {other}"),
            }),
            Self::Text(text) => Err(unexpected_text(path, &text)),
        }
    }
}

fn decode_at<T: DeserializeOwned>(
    path: &str,
    value: &Value,
    table: &AliasTable,
) -> Result<T, ApiError> {
    normalize::decode(value, table).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        message: e.to_string(),
    })
}

fn unexpected_text(path: &str, text: &str) -> ApiError {
    const PREVIEW_CHARS: usize = 80;
    let preview: String = text.chars().take(PREVIEW_CHARS).collect();
    ApiError::Decode {
        path: path.to_string(),
        message: format!("expected JSON, got text: {preview}"),
    }
}

/// Normalize a loosely-shaped write payload with `table`.
pub fn normalize_payload(
    payload: &impl Serialize,
    table: &AliasTable,
) -> Result<serde_json::Map<String, Value>, ApiError> {
    let value = serde_json::to_value(payload).map_err(|e| {
        CoreError::Validation(format!("{} payload is not serializable: {e}", table.entity))
    })?;
    Ok(normalize::normalize(Some(&value), table)?)
}

/// HTTP client for a single ShelfLife backend.
#[derive(Debug, Clone)]
pub struct ShelfLifeApi {
    client: reqwest::Client,
    base_url: String,
}

impl ShelfLifeApi {
    /// Build a client from configuration.
    ///
    /// The underlying client keeps a cookie store so that cookie-based
    /// sessions work once the backend issues them.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;
        Ok(Self::with_client(client, config.api_base.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: crate::config::normalize_base(&base_url),
        }
    }

    /// Backend origin, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path such as `/api/works`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform one HTTP call and classify the outcome.
    ///
    /// * Always sends `Content-Type: application/json`, plus
    ///   `Authorization: Bearer <token>` when `cx` carries a token.
    /// * A `body` of `None` or JSON `null` sends no body.
    /// * Non-2xx statuses fail with [`ApiError::Http`]; a body that cannot
    ///   be read leaves `body` empty instead of masking the status.
    /// * Transport failures fail with [`ApiError::Network`].
    /// * If `cx.cancel` fires first the call fails with
    ///   [`ApiError::Cancelled`] and its outcome is dropped.
    pub async fn request(
        &self,
        cx: &CallContext,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Payload, ApiError> {
        if cx.is_cancelled() {
            return Err(ApiError::Cancelled {
                path: path.to_string(),
            });
        }

        tokio::select! {
            biased;
            _ = cx.cancel.cancelled() => {
                tracing::debug!(%method, path, "Request cancelled");
                Err(ApiError::Cancelled { path: path.to_string() })
            }
            result = self.perform(cx, method.clone(), path, body) => result,
        }
    }

    async fn perform(
        &self,
        cx: &CallContext,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Payload, ApiError> {
        let url = self.url(path);

        let mut builder = self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = cx.credentials.token() {
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = body.filter(|b| !b.is_null()) {
            builder = builder.body(body.to_string());
        }

        tracing::debug!(%method, path, "Calling backend");

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, url = %url, error = %e, "Backend unreachable");
            ApiError::Network {
                url: url.clone(),
                message: e.to_string(),
            }
        })?;

        classify(method, path, &url, response).await
    }

    // ---- verb shorthands used by the accessors ----

    pub(crate) async fn get(&self, cx: &CallContext, path: &str) -> Result<Payload, ApiError> {
        self.request(cx, Method::GET, path, None).await
    }

    pub(crate) async fn post(
        &self,
        cx: &CallContext,
        path: &str,
        body: &Value,
    ) -> Result<Payload, ApiError> {
        self.request(cx, Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put(
        &self,
        cx: &CallContext,
        path: &str,
        body: &Value,
    ) -> Result<Payload, ApiError> {
        self.request(cx, Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete(&self, cx: &CallContext, path: &str) -> Result<(), ApiError> {
        self.request(cx, Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Turn a response into a [`Payload`] or an [`ApiError`].
async fn classify(
    method: Method,
    path: &str,
    url: &str,
    response: reqwest::Response,
) -> Result<Payload, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(%method, path, error = %e, "Could not read error body");
                String::new()
            }
        };
        tracing::warn!(%method, path, status = status.as_u16(), "Backend returned an error status");
        return Err(ApiError::Http {
            method: method.to_string(),
            path: path.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
        tracing::debug!(%method, path, status = status.as_u16(), "No content");
        return Ok(Payload::Empty);
    }

    let bytes = response.bytes().await.map_err(|e| ApiError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let payload = Payload::from_body(&bytes);
    if let Payload::Text(_) = payload {
        tracing::debug!(%method, path, "Success body is not JSON; returning raw text");
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shelflife_core::normalize::{REVIEW_READ, WORK_READ, WORK_WRITE};
    use shelflife_core::review::Review;
    use shelflife_core::work::Work;

    use super::*;

    #[test]
    fn empty_and_whitespace_bodies_are_empty() {
        assert_eq!(Payload::from_body(b""), Payload::Empty);
        assert_eq!(Payload::from_body(b" \n"), Payload::Empty);
    }

    #[test]
    fn json_body_is_parsed() {
        assert_eq!(
            Payload::from_body(br#"{"id": 1}"#),
            Payload::Json(json!({"id": 1}))
        );
    }

    #[test]
    fn non_json_body_falls_back_to_text() {
        assert_eq!(
            Payload::from_body(b"Deleted"),
            Payload::Text("Deleted".into())
        );
    }

    #[test]
    fn empty_object_review_is_absent() {
        let review: Option<Review> = Payload::Json(json!({}))
            .into_one("/api/works/1/review", &REVIEW_READ)
            .unwrap();
        assert!(review.is_none());
    }

    #[test]
    fn text_where_json_expected_is_decode_error() {
        let err = Payload::Text("<html>".into())
            .into_one::<Work>("/api/works/1", &WORK_READ)
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn text_after_write_is_saved_without_entity() {
        let saved: Option<Work> = Payload::Text("Created".into())
            .into_saved("/api/works", &WORK_READ)
            .unwrap();
        assert!(saved.is_none());

        let saved: Option<Work> = Payload::Json(json!({"id": 3}))
            .into_saved("/api/works", &WORK_READ)
            .unwrap();
        assert_eq!(saved.map(|w| w.id), Some(3));
    }

    #[test]
    fn list_of_wrong_shape_is_decode_error() {
        let err = Payload::Json(json!({"items": []}))
            .into_list::<Work>("/api/works", &WORK_READ)
            .unwrap_err();
        assert!(err.to_string().starts_with("Unexpected response from /api/works"));
    }

    #[test]
    fn empty_list_payloads() {
        let works: Vec<Work> = Payload::Empty.into_list("/api/works", &WORK_READ).unwrap();
        assert!(works.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_stripped() {
        let api = ShelfLifeApi::with_client(reqwest::Client::new(), "http://h:1/".into());
        assert_eq!(api.url("/api/works"), "http://h:1/api/works");
    }

    #[test]
    fn normalize_payload_rejects_non_objects() {
        let err = normalize_payload(&json!("Dune"), &WORK_WRITE).unwrap_err();
        assert!(matches!(err, ApiError::Normalize(_)));
    }
}
