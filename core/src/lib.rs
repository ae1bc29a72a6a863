//! Synchronous API client core for the Tessera proxy.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, making the core fully deterministic and testable.
//!
//! Requests target an external proxy at `{base_url}/{path_suffix}`; the proxy
//! forwards them to the upstream Tessera API and injects credentials, so no
//! API key ever appears on this side.
//!
//! # Design
//! - `TesseraClient` is stateless — it holds only `base_url`.
//! - `build_request` covers any method and path suffix; `build_update_entity`
//!   specializes it for the hard-coded `Endpoint` collection.
//! - Responses are schemaless: `parse_response` yields `serde_json::Value`
//!   and the caller owns interpretation. Non-2xx statuses surface as
//!   `ApiError::Http` carrying the body text for diagnostics.

pub mod client;
pub mod error;
pub mod http;

pub use client::{Params, TesseraClient, APP_ID, ENDPOINT_ENTITY};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
