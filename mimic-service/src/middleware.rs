//! Request tracking middleware
//!
//! Every request gets an `x-request-id` (a UUIDv7 unless the client sent
//! one), the id is echoed on the response, and credential headers are marked
//! sensitive so the trace layer never prints them.

use axum::http::{header, HeaderName, HeaderValue, Request};
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};
use uuid::Uuid;

/// Request id header name
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Sensitive headers that should be masked in logs
pub static SENSITIVE_HEADERS: [HeaderName; 5] = [
    header::AUTHORIZATION,
    header::PROXY_AUTHORIZATION,
    header::COOKIE,
    header::SET_COOKIE,
    HeaderName::from_static("x-api-key"),
];

/// Generates time-ordered request ids
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeUuidV7RequestId;

impl MakeRequestId for MakeUuidV7RequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        let value = HeaderValue::from_str(&id).ok()?;
        Some(RequestId::new(value))
    }
}

/// Create a request ID layer that generates UUIDv7 request ids
pub fn request_id_layer() -> SetRequestIdLayer<MakeUuidV7RequestId> {
    SetRequestIdLayer::new(REQUEST_ID_HEADER.clone(), MakeUuidV7RequestId)
}

/// Create a request ID propagation layer
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(REQUEST_ID_HEADER.clone())
}

/// Create a sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(SENSITIVE_HEADERS.iter().cloned())
}
