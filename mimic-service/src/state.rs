//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::handlers::WordHandler;
use crate::repository::WordRepository;
use crate::routes::route_resolver;

/// Application state shared across handlers
///
/// Generic over the word store so the same router serves the in-memory
/// store and PostgreSQL.
pub struct AppState<R> {
    config: Arc<Config>,
    words: Arc<WordHandler<R>>,
}

// Manual impl: only the `Arc`s are cloned, `R` need not be `Clone` here.
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            words: Arc::clone(&self.words),
        }
    }
}

impl<R: WordRepository> AppState<R> {
    /// Create state over `repository`
    ///
    /// Links are resolved against `service.public_url` when it is set, and
    /// collection requests are bounded by `pagination.max_page_size`.
    pub fn new(config: Config, repository: R) -> Self {
        let resolver = Arc::new(route_resolver(config.service.public_url.clone()));
        let words = WordHandler::new(repository, resolver, config.pagination.max_page_size);

        Self {
            config: Arc::new(config),
            words: Arc::new(words),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the word handler
    pub fn words(&self) -> &WordHandler<R> {
        &self.words
    }
}
