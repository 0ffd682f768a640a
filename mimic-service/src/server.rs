//! HTTP server with graceful shutdown

use axum::{http::StatusCode, Router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{
    config::Config,
    error::Result,
    middleware::{request_id_layer, request_id_propagation_layer, sensitive_headers_layer},
};

/// Server instance
pub struct Server {
    config: Config,
}

impl Server {
    /// Create a new server instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Wrap `app` in the middleware stack
    ///
    /// Each layer wraps everything added before it, so request ids are
    /// assigned before the trace span opens and panics are caught outermost.
    /// Panic recovery, compression and CORS follow the `middleware` section.
    pub fn with_middleware(&self, app: Router) -> Router {
        let middleware = &self.config.middleware;

        let mut app = match self.build_cors_layer() {
            Some(cors) => app.layer(cors),
            None => app,
        };

        if middleware.compression {
            app = app.layer(CompressionLayer::new());
        }

        app = app
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                self.config.service.timeout(),
            ))
            .layer(RequestBodyLimitLayer::new(middleware.body_limit_bytes()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().include_headers(true))
                    .on_response(DefaultOnResponse::new().include_headers(true)),
            )
            .layer(sensitive_headers_layer())
            .layer(request_id_propagation_layer())
            .layer(request_id_layer());

        if middleware.catch_panic {
            app = app.layer(CatchPanicLayer::new());
        }

        app
    }

    /// Run the server with the given router
    pub async fn serve(self, app: Router) -> Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.service.port));

        tracing::info!("Starting {} on {}", self.config.service.name, addr);
        self.log_middleware_config();

        let app = self.with_middleware(app);
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    fn log_middleware_config(&self) {
        let middleware = &self.config.middleware;
        tracing::info!(
            catch_panic = middleware.catch_panic,
            compression = middleware.compression,
            body_limit_mb = middleware.body_limit_mb,
            cors_mode = %middleware.cors_mode,
            timeout_secs = self.config.service.timeout_secs,
            max_page_size = self.config.pagination.max_page_size,
            "Middleware configuration"
        );
    }

    /// Build CORS layer based on configuration
    fn build_cors_layer(&self) -> Option<CorsLayer> {
        match self.config.middleware.cors_mode.as_str() {
            "permissive" => {
                tracing::debug!("Enabling permissive CORS");
                Some(CorsLayer::permissive())
            }
            "restrictive" => {
                tracing::debug!("Enabling restrictive CORS (default deny)");
                Some(CorsLayer::new())
            }
            "disabled" => {
                tracing::debug!("CORS disabled");
                None
            }
            other => {
                tracing::warn!("Unknown CORS mode: {}, defaulting to permissive", other);
                Some(CorsLayer::permissive())
            }
        }
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl+C), starting graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        },
    }

    tracing::info!("Shutdown signal received, draining requests...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryWordStore;
    use crate::routes::build_router;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt as _;

    fn app(config: Config) -> Router {
        let server = Server::new(config.clone());
        server.with_middleware(build_router(AppState::new(config, MemoryWordStore::new())))
    }

    #[test]
    fn test_server_creation() {
        let config = Config::default();
        let server = Server::new(config.clone());
        assert_eq!(server.config().service.port, config.service.port);
    }

    #[tokio::test]
    async fn test_request_id_is_generated() {
        let response = app(Config::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_client_request_id_is_echoed() {
        let response = app(Config::default())
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("x-request-id", "client-chosen")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["x-request-id"], "client-chosen");
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let mut config = Config::default();
        config.middleware.body_limit_mb = 0;

        let response = app(config)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/words")
                    .header("content-type", "application/json")
                    .header("content-length", "24")
                    .body(Body::from(r#"{"name":"big","score":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_huge_body_limit_does_not_overflow() {
        let mut config = Config::default();
        config.middleware.body_limit_mb = usize::MAX;

        let response = app(config)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/words")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"big","score":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_cors_modes() {
        let mut config = Config::default();
        assert!(Server::new(config.clone()).build_cors_layer().is_some());

        config.middleware.cors_mode = "disabled".to_string();
        assert!(Server::new(config).build_cors_layer().is_none());
    }
}
