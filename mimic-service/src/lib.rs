//! # mimic-service
//!
//! Versioned HTTP API over a catalogue of scored words.
//!
//! ## Features
//!
//! - **Paged collections**: offset pagination with metadata in the body and
//!   the `X-Pagination` header
//! - **Hypermedia**: `self`/`next`/`prev` links on pages, `self`/`update`/`delete`
//!   on items, resolved from named routes
//! - **Incremental sync**: `modifiedSince` filtering that observes soft deletes
//! - **Storage**: in-memory store, or PostgreSQL with the `database` feature
//! - **Operations**: JSON tracing, request ids, health checks, graceful shutdown
//!
//! ## Example
//!
//! ```rust,no_run
//! use mimic_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone(), MemoryWordStore::new());
//!     Server::new(config).serve(build_router(state)).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
#[cfg(feature = "database")]
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod links;
pub mod mapping;
pub mod middleware;
pub mod model;
pub mod observability;
pub mod repository;
pub mod responses;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;
pub mod versioning;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, CollectionHandler, WordHandler};
    pub use crate::health::{health, readiness};
    pub use crate::links::{Link, LinkBuilder, RouteResolver};
    pub use crate::model::{NewWord, Word, WordDto, WordId, WordPayload};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        MemoryWordStore, PageRequest, PagedResult, PaginationMetadata, QueryFilter, Repository,
        SoftDeleteRepository, WordRepository,
    };
    pub use crate::responses::{Created, NoContent, ValidationError};
    pub use crate::routes::build_router;
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::versioning::{ApiVersion, VersionedApiBuilder};

    #[cfg(feature = "database")]
    pub use crate::database::create_pool;
    #[cfg(feature = "database")]
    pub use crate::repository::PgWordStore;

    pub use axum::{
        extract::{Path, Query, State},
        routing::{delete, get, post, put},
        Json, Router,
    };
}
