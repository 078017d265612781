//! Stateless HTTP request builder and response parser for the cats API.
//!
//! # Design
//! `CatsClient` holds only its `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. `CatsService` glues the two together over a `Transport`;
//! this layer stays deterministic and free of I/O.
//!
//! Ids are opaque strings. Each one is percent-encoded as a single path
//! segment, so `/`, `#` or `?` inside an id never address another resource.

use ::http::StatusCode;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Cat, NewCat, SearchQuery};

const JSON_CONTENT_TYPE: (&str, &str) = ("content-type", "application/json");

/// Characters escaped inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Synchronous, stateless client for the cats API.
#[derive(Debug, Clone)]
pub struct CatsClient {
    config: ClientConfig,
}

impl CatsClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_all(&self) -> HttpRequest {
        self.request(HttpMethod::Get, self.collection_url(), None)
    }

    pub fn build_get(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, self.item_url(id), None)
    }

    pub fn build_create(&self, input: &NewCat) -> ApiResult<HttpRequest> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Post, self.collection_url(), Some(body)))
    }

    /// The full cat is sent, `id` included. Fails with `NotPersisted` when
    /// there is no id to address.
    pub fn build_update(&self, cat: &Cat) -> ApiResult<HttpRequest> {
        let id = cat.id.as_deref().ok_or(ApiError::NotPersisted)?;
        let body = to_json(cat)?;
        Ok(self.request(HttpMethod::Put, self.item_url(id), Some(body)))
    }

    pub fn build_delete(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, self.item_url(id), None)
    }

    /// Filters travel as query parameters on the collection itself.
    pub fn build_search(&self, query: &SearchQuery) -> HttpRequest {
        let mut req = self.request(HttpMethod::Get, self.collection_url(), None);
        req.query = query.pairs();
        req
    }

    pub fn parse_all(&self, response: HttpResponse) -> ApiResult<Vec<Cat>> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_get(&self, response: HttpResponse) -> ApiResult<Cat> {
        check_status(&response)?;
        parse_one(&response.body)
    }

    pub fn parse_create(&self, response: HttpResponse) -> ApiResult<Cat> {
        check_status(&response)?;
        parse_one(&response.body)
    }

    pub fn parse_update(&self, response: HttpResponse) -> ApiResult<Cat> {
        check_status(&response)?;
        parse_one(&response.body)
    }

    /// Any 2xx counts as a confirmed delete; the body is ignored.
    pub fn parse_delete(&self, response: HttpResponse) -> ApiResult<bool> {
        check_status(&response)?;
        Ok(true)
    }

    /// Best match only: the first cat of the server's result.
    pub fn parse_search(&self, response: HttpResponse) -> ApiResult<Cat> {
        check_status(&response)?;
        parse_one(&response.body)
    }

    /// Every match, in server order. A lone object is treated as one match.
    pub fn parse_search_all(&self, response: HttpResponse) -> ApiResult<Vec<Cat>> {
        check_status(&response)?;
        match from_json::<Value>(&response.body)? {
            Value::Array(items) => items.into_iter().map(from_value).collect(),
            other => Ok(vec![from_value(other)?]),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/cats", self.config.base_url())
    }

    fn item_url(&self, id: &str) -> String {
        let segment = utf8_percent_encode(id, PATH_SEGMENT);
        format!("{}/cats/{segment}", self.config.base_url())
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::with_capacity(self.config.headers().len() + 1);
        if body.is_some() {
            headers.push((JSON_CONTENT_TYPE.0.to_string(), JSON_CONTENT_TYPE.1.to_string()));
        }
        headers.extend(self.config.headers().iter().cloned());
        HttpRequest {
            method,
            path,
            query: Vec::new(),
            headers,
            body,
        }
    }
}

/// Parse a body that holds either one cat or a collection of cats, and
/// return exactly one cat: the object itself or the first element.
///
/// An empty collection yields `ApiError::EmptyCollection`.
pub fn parse_one(body: &str) -> ApiResult<Cat> {
    match from_json::<Value>(body)? {
        Value::Array(items) => {
            let first = items.into_iter().next().ok_or(ApiError::EmptyCollection)?;
            from_value(first)
        }
        other => from_value(other),
    }
}

/// Extract the human-readable failure message from a non-success response.
///
/// Accepts `{"message": ..}`, `{"error": ..}`, a bare JSON string, or plain
/// text. An empty body falls back to the canonical reason phrase of the
/// status, or `HTTP <status>` for codes without one.
pub fn remote_message(response: &HttpResponse) -> String {
    let body = response.body.trim();
    if body.is_empty() {
        return StatusCode::from_u16(response.status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", response.status));
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(message)) => message,
        Ok(Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        _ => body.to_string(),
    }
}

fn check_status(response: &HttpResponse) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::remote(response.status, remote_message(response)))
}

fn to_json<T: serde::Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn from_value<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string()))
}
