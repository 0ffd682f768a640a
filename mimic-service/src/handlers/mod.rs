//! Request handling for the word API
//!
//! [`WordHandler`] drives each operation through storage, projection,
//! validation and link assembly. The free functions are thin axum adapters
//! that extract the request, delegate to the handler and let the typed
//! responses and [`ApiError`] pick the status code.
//!
//! | Outcome                        | Status |
//! |--------------------------------|--------|
//! | empty listing, unknown id      | 404    |
//! | null or malformed body/query   | 400    |
//! | failed structural validation   | 422    |
//! | created                        | 201    |
//! | updated                        | 200    |
//! | deleted                        | 204    |
//! | anything else                  | 500    |

mod error;
mod query;
mod response;
mod traits;
mod words;

pub use error::{ApiError, ApiErrorKind, ApiOperation, UNEXPECTED_MESSAGE};
pub use query::WordQuery;
pub use response::{CollectionResponse, ItemResponse, X_PAGINATION};
pub use traits::CollectionHandler;
pub use words::{create_word, delete_word, get_word, list_words, update_word, WordHandler};
