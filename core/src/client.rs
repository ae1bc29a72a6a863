//! Stateless HTTP request builder and response parser for the Tessera proxy.
//!
//! # Design
//! `TesseraClient` holds only a `base_url` and carries no mutable state
//! between calls. `build_request` produces an `HttpRequest` for any path
//! suffix and method; `parse_response` consumes the `HttpResponse` the caller
//! got back. The caller executes the actual HTTP round-trip in between,
//! keeping the core deterministic and free of I/O dependencies.
//!
//! Authentication is the proxy's job: requests carry only a content-type
//! header, never credentials.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Application identifier the example entity routes are scoped to.
pub const APP_ID: &str = "6986868d8f619eaab253487e";

/// Entity type of the collection `build_update_entity` addresses.
pub const ENDPOINT_ENTITY: &str = "Endpoint";

/// Free-form request payload: query parameters for GET, JSON body otherwise.
pub type Params = serde_json::Map<String, Value>;

/// Synchronous, stateless client for the Tessera API behind a proxy.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_request` and `parse_response`.
#[derive(Debug, Clone)]
pub struct TesseraClient {
    base_url: String,
}

impl TesseraClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a request for `{base_url}/{path_suffix}`.
    ///
    /// For `Get`, `data` becomes query parameters; for every other method it
    /// is JSON-encoded as the request body. The `content-type` header is
    /// attached unconditionally, matching what the proxy expects to forward.
    pub fn build_request(
        &self,
        path_suffix: &str,
        method: HttpMethod,
        data: Option<&Params>,
    ) -> Result<HttpRequest, ApiError> {
        let suffix = path_suffix.trim_start_matches('/');
        if suffix.is_empty() {
            return Err(ApiError::EmptyPathSuffix);
        }

        let mut query = Vec::new();
        let mut body = None;
        match method {
            HttpMethod::Get => {
                if let Some(params) = data {
                    query = params
                        .iter()
                        .map(|(k, v)| (k.clone(), query_value(v)))
                        .collect();
                }
            }
            _ => {
                if let Some(payload) = data {
                    let encoded = serde_json::to_string(payload)
                        .map_err(|e| ApiError::Serialization(e.to_string()))?;
                    body = Some(encoded);
                }
            }
        }

        Ok(HttpRequest {
            method,
            path: format!("{}/{suffix}", self.base_url),
            query,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        })
    }

    /// Build a PUT updating one `Endpoint` entity of the example application.
    ///
    /// Specialization of `build_request` with the collection path hard-coded
    /// to `apps/{APP_ID}/entities/{ENDPOINT_ENTITY}`.
    pub fn build_update_entity(
        &self,
        entity_id: &str,
        update: &Params,
    ) -> Result<HttpRequest, ApiError> {
        let suffix = format!("apps/{APP_ID}/entities/{ENDPOINT_ENTITY}/{entity_id}");
        self.build_request(&suffix, HttpMethod::Put, Some(update))
    }

    /// Interpret a response: JSON-decode the body on 2xx, error otherwise.
    ///
    /// The decoded value is returned as-is — object, array, or scalar — and
    /// ownership passes entirely to the caller.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Render a JSON value as a query-string value the way the upstream expects:
/// strings verbatim, everything else in its JSON form (`10` → `"10"`).
fn query_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Map non-2xx status codes to `ApiError::Http`, keeping the body text.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
