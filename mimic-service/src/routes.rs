//! Router assembly
//!
//! Version 1 serves the word collection; version 2 is a placeholder that
//! only reports itself. Health checks sit outside the versioned tree.

use axum::{routing::get, Router};
use url::Url;

use crate::handlers::{create_word, delete_word, get_word, list_words, update_word};
use crate::health::{health, readiness};
use crate::links::RouteResolver;
use crate::repository::WordRepository;
use crate::state::AppState;
use crate::versioning::{ApiVersion, VersionedApiBuilder};

/// Route name of the word collection
pub const LIST_WORDS: &str = "list_words";

/// Route name of a single word
pub const GET_WORD: &str = "get_word";

const API_BASE: &str = "/api";
const WORDS_PATH: &str = "/words";
const WORD_PATH: &str = "/words/{id}";

/// Resolver for the named word routes
///
/// With a `public_url` the resolved links are absolute, otherwise they are
/// root-relative paths.
pub fn route_resolver(public_url: Option<Url>) -> RouteResolver {
    let v1 = format!("{API_BASE}/{}", ApiVersion::V1.as_path_segment());
    RouteResolver::new(public_url)
        .with_route(LIST_WORDS, format!("{v1}{WORDS_PATH}"))
        .with_route(GET_WORD, format!("{v1}{WORD_PATH}"))
}

/// Build the complete application router
pub fn build_router<R: WordRepository>(state: AppState<R>) -> Router {
    let words: Router = Router::new()
        .route(WORDS_PATH, get(list_words::<R>).post(create_word::<R>))
        .route(
            WORD_PATH,
            get(get_word::<R>)
                .put(update_word::<R>)
                .delete(delete_word::<R>),
        )
        .with_state(state.clone());

    let api = VersionedApiBuilder::new()
        .with_base_path(API_BASE)
        .add_version(ApiVersion::V1, |routes| routes.merge(words))
        .add_version(ApiVersion::V2, |routes| {
            routes.route(WORDS_PATH, get(|| async { "API 2.0" }))
        })
        .build();

    Router::new()
        .route("/health", get(health::<R>))
        .route("/ready", get(readiness::<R>))
        .with_state(state)
        .merge(api)
}
