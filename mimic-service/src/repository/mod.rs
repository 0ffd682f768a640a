//! Storage access for word records
//!
//! The repository traits are the only way the rest of the service reaches the
//! store. Both backends share the filter and page arithmetic in
//! [`QueryFilter`] and [`PaginationMetadata`], so the in-memory store used in
//! tests and development behaves exactly like PostgreSQL.
//!
//! # Features
//!
//! - **Query contract**: [`Repository::list_all`] filters, counts and windows
//! - **Soft delete**: [`SoftDeleteRepository`] deactivates without removal
//! - **Backends**: [`MemoryWordStore`] always, `PgWordStore` with `database`
//!
//! # Example
//!
//! ```rust
//! use mimic_service::model::NewWord;
//! use mimic_service::repository::{MemoryWordStore, PageRequest, QueryFilter, Repository};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = MemoryWordStore::new();
//! for name in ["alpha", "beta", "gamma"] {
//!     store.create(NewWord { name: name.to_string(), score: 1 }).await.unwrap();
//! }
//!
//! let filter = QueryFilter::new().with_page(PageRequest::new(2, 2).unwrap());
//! let page = store.list_all(&filter).await.unwrap();
//! assert_eq!(page.results[0].name, "gamma");
//! assert_eq!(page.pagination.unwrap().total_pages, 2);
//! # });
//! ```

mod error;
mod memory;
mod paged;
mod pagination;
#[cfg(feature = "database")]
mod postgres;
mod traits;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::MemoryWordStore;
pub use paged::PagedResult;
pub use pagination::{
    PageRequest, PaginationMetadata, QueryFilter, MODIFIED_SINCE_PARAM, PAGE_PARAM,
    PAGE_SIZE_PARAM,
};
#[cfg(feature = "database")]
pub(crate) use postgres::from_sqlx;
#[cfg(feature = "database")]
pub use postgres::PgWordStore;
pub use traits::{Repository, RepositoryResult, SoftDeleteRepository, WordRepository};
