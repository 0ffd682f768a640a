//! URL path API versioning
//!
//! Each API version is nested under its own path segment below a common base
//! path: `/api/v1/words`, `/api/v2/words`. Every versioned response reports
//! the full set of served versions in the `api-supported-versions` header,
//! so clients can discover newer versions from any call.
//!
//! ## Example
//!
//! ```rust
//! use axum::routing::get;
//! use mimic_service::versioning::{ApiVersion, VersionedApiBuilder};
//!
//! let api = VersionedApiBuilder::new()
//!     .with_base_path("/api")
//!     .add_version(ApiVersion::V1, |routes| routes.route("/words", get(|| async { "v1" })))
//!     .add_version(ApiVersion::V2, |routes| routes.route("/words", get(|| async { "v2" })));
//!
//! assert_eq!(api.supported_versions(), "1.0, 2.0");
//! let router = api.build();
//! # let _ = router;
//! ```

use axum::{
    http::{HeaderName, HeaderValue},
    Router,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tower_http::set_header::SetResponseHeaderLayer;

/// Response header listing every served API version
pub static API_SUPPORTED_VERSIONS: HeaderName = HeaderName::from_static("api-supported-versions");

/// API version identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ApiVersion {
    /// API Version 1
    V1,
    /// API Version 2
    V2,
}

impl ApiVersion {
    /// Get the version as a path segment (e.g., "v1")
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Get the version as reported in headers (e.g., "1.0")
    pub fn as_reported(&self) -> &'static str {
        match self {
            Self::V1 => "1.0",
            Self::V2 => "2.0",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_path_segment())
    }
}

/// Builder for versioned API routers
///
/// Versions are nested in ascending order regardless of the order they were
/// added in, and the supported-versions header lists them the same way.
pub struct VersionedApiBuilder {
    versions: Vec<(ApiVersion, Router)>,
    base_path: Option<String>,
}

impl Default for VersionedApiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionedApiBuilder {
    /// Create a new versioned API builder
    pub fn new() -> Self {
        Self {
            versions: Vec::new(),
            base_path: None,
        }
    }

    /// Set a base path for all versioned routes (e.g., "/api")
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        // leading slash, no trailing slash
        let normalized = if !path.starts_with('/') {
            format!("/{}", path.trim_end_matches('/'))
        } else {
            path.trim_end_matches('/').to_string()
        };
        self.base_path = Some(normalized);
        self
    }

    /// Add an API version
    ///
    /// Adding the same version twice replaces the earlier routes.
    #[must_use]
    pub fn add_version<F>(mut self, version: ApiVersion, routes: F) -> Self
    where
        F: FnOnce(Router) -> Router,
    {
        let router = routes(Router::new());
        self.versions.retain(|(v, _)| *v != version);
        self.versions.push((version, router));
        self.versions.sort_by_key(|(v, _)| *v);
        self
    }

    /// Value of the supported-versions header (e.g., "1.0, 2.0")
    pub fn supported_versions(&self) -> String {
        self.versions
            .iter()
            .map(|(v, _)| v.as_reported())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Build the combined router
    pub fn build(self) -> Router {
        let supported = HeaderValue::from_str(&self.supported_versions()).ok();
        let base = self.base_path.unwrap_or_default();
        let mut router = Router::new();

        for (version, version_router) in self.versions {
            let full_path = format!("{}/{}", base, version.as_path_segment());
            router = router.nest(&full_path, version_router);
        }

        match supported {
            Some(value) => router.layer(SetResponseHeaderLayer::overriding(
                API_SUPPORTED_VERSIONS.clone(),
                value,
            )),
            None => router,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt as _;

    fn builder() -> VersionedApiBuilder {
        VersionedApiBuilder::new()
            .with_base_path("api/")
            .add_version(ApiVersion::V2, |routes| routes.route("/words", get(|| async { "V2" })))
            .add_version(ApiVersion::V1, |routes| routes.route("/words", get(|| async { "V1" })))
    }

    #[test]
    fn test_version_formats() {
        assert_eq!(ApiVersion::V2.to_string(), "v2");
        assert_eq!(ApiVersion::V1.as_path_segment(), "v1");
        assert_eq!(ApiVersion::V2.as_reported(), "2.0");
    }

    #[test]
    fn test_builder_orders_versions() {
        assert_eq!(builder().supported_versions(), "1.0, 2.0");
    }

    #[tokio::test]
    async fn test_adding_version_twice_replaces() {
        let builder = builder().add_version(ApiVersion::V1, |routes| routes);
        assert_eq!(builder.supported_versions(), "1.0, 2.0");

        let response = builder
            .build()
            .oneshot(Request::builder().uri("/api/v1/words").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_versions_are_nested_with_header() {
        let router = builder().build();

        for (path, body) in [("/api/v1/words", "V1"), ("/api/v2/words", "V2")] {
            let response = router
                .clone()
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(
                response.headers().get("api-supported-versions").unwrap(),
                "1.0, 2.0"
            );
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert_eq!(&bytes[..], body.as_bytes());
        }
    }
}
