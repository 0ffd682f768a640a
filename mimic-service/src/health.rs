//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    repository::{Repository, WordRepository},
    state::AppState,
};

/// Name of the word store in readiness reports
pub const STORE_DEPENDENCY: &str = "store";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Simple health check (liveness)
///
/// Always returns 200 OK if the service is running.
pub async fn health<R: WordRepository>(State(state): State<AppState<R>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check
///
/// Returns 200 OK when the word store answers a ping, 503 otherwise.
pub async fn readiness<R: WordRepository>(State(state): State<AppState<R>>) -> impl IntoResponse {
    let mut dependencies = HashMap::new();

    let store = match state.words().repository().ping().await {
        Ok(()) => DependencyStatus {
            healthy: true,
            message: None,
        },
        Err(e) => {
            tracing::warn!("Word store not ready: {}", e);
            DependencyStatus {
                healthy: false,
                message: Some(e.message),
            }
        }
    };
    let ready = store.healthy;
    dependencies.insert(STORE_DEPENDENCY.to_string(), store);

    let response = ReadinessResponse {
        ready,
        service: state.config().service.name.clone(),
        dependencies,
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::{NewWord, Word, WordId};
    use crate::repository::{
        MemoryWordStore, PagedResult, QueryFilter, RepositoryError, RepositoryOperation,
        RepositoryResult, SoftDeleteRepository,
    };
    use axum::body::to_bytes;

    /// Store whose ping always fails
    #[derive(Debug, Clone, Default)]
    struct UnreachableStore;

    impl Repository<WordId, Word, NewWord> for UnreachableStore {
        async fn list_all(&self, _filter: &QueryFilter) -> RepositoryResult<PagedResult<Word>> {
            Ok(PagedResult::unpaged(Vec::new()))
        }

        async fn find_by_id(&self, _id: &WordId) -> RepositoryResult<Option<Word>> {
            Ok(None)
        }

        async fn create(&self, _entity: NewWord) -> RepositoryResult<Word> {
            Err(RepositoryError::connection_failed(RepositoryOperation::Create, "unreachable"))
        }

        async fn update(&self, _entity: Word) -> RepositoryResult<Word> {
            Err(RepositoryError::connection_failed(RepositoryOperation::Update, "unreachable"))
        }

        async fn ping(&self) -> RepositoryResult<()> {
            Err(RepositoryError::connection_failed(RepositoryOperation::Ping, "unreachable"))
        }
    }

    impl SoftDeleteRepository<WordId, Word, NewWord> for UnreachableStore {
        async fn soft_delete(&self, _id: &WordId) -> RepositoryResult<()> {
            Err(RepositoryError::connection_failed(RepositoryOperation::SoftDelete, "unreachable"))
        }
    }

    #[tokio::test]
    async fn test_health_reports_service() {
        let state = AppState::new(Config::default(), MemoryWordStore::new());
        let response = health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: HealthResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, "mimic-service");
        assert!(body.version.is_some());
    }

    #[tokio::test]
    async fn test_ready_with_memory_store() {
        let state = AppState::new(Config::default(), MemoryWordStore::new());
        let response = readiness(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ReadinessResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(body.ready);
        assert!(body.dependencies[STORE_DEPENDENCY].healthy);
    }

    #[tokio::test]
    async fn test_not_ready_when_store_unreachable() {
        let state = AppState::new(Config::default(), UnreachableStore);
        let response = readiness(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ReadinessResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.ready);
        assert_eq!(
            body.dependencies[STORE_DEPENDENCY].message.as_deref(),
            Some("unreachable")
        );
    }
}
