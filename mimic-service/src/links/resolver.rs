//! Named route to URL resolution

use std::collections::HashMap;

use thiserror::Error;
use url::Url;

/// Failure to materialize a link target
#[derive(Debug, Error)]
pub enum LinkError {
    /// No route is registered under the requested name
    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    /// The route template has a `{param}` the caller did not supply
    #[error("route '{route}' is missing path parameter '{param}'")]
    MissingParameter {
        /// Route name
        route: String,
        /// Placeholder left unfilled
        param: String,
    },

    /// The remaining parameters could not be encoded as a query string
    #[error("failed to encode query string: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),
}

/// Resolves named routes into URLs
///
/// Route templates use axum's `{param}` placeholder syntax. Parameters that
/// fill a placeholder become part of the path; all others are appended as an
/// `application/x-www-form-urlencoded` query string in the order given.
/// With a base URL configured the result is absolute, otherwise it is a
/// root-relative path. A base URL with a path prefix keeps it, so
/// `https://host/words/` yields `https://host/words/api/v1/...`.
///
/// # Example
///
/// ```rust
/// use mimic_service::links::RouteResolver;
/// use url::Url;
///
/// let base = Url::parse("https://words.example.com/").unwrap();
/// let resolver = RouteResolver::new(Some(base))
///     .with_route("get_word", "/api/v1/words/{id}");
///
/// let url = resolver.url_for("get_word", &[("id", "7".to_string())]).unwrap();
/// assert_eq!(url, "https://words.example.com/api/v1/words/7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteResolver {
    base_url: Option<String>,
    routes: HashMap<String, String>,
}

impl RouteResolver {
    /// Create a resolver with an optional absolute base URL
    pub fn new(base_url: Option<Url>) -> Self {
        Self {
            base_url: base_url.map(|url| url.as_str().trim_end_matches('/').to_string()),
            routes: HashMap::new(),
        }
    }

    /// Register a route template under a name
    #[must_use]
    pub fn with_route(mut self, name: impl Into<String>, template: impl Into<String>) -> Self {
        self.routes.insert(name.into(), template.into());
        self
    }

    /// Produce the URL for `route` with the given parameters
    pub fn url_for(&self, route: &str, params: &[(&str, String)]) -> Result<String, LinkError> {
        let template = self
            .routes
            .get(route)
            .ok_or_else(|| LinkError::UnknownRoute(route.to_string()))?;

        let mut consumed = vec![false; params.len()];
        let mut path = String::with_capacity(template.len());
        let mut rest = template.as_str();

        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let Some(end) = after.find('}') else {
                // unbalanced brace, keep the remainder verbatim
                path.push_str(&rest[start..]);
                rest = "";
                break;
            };
            let name = &after[..end];
            let position = params
                .iter()
                .position(|(key, _)| *key == name)
                .ok_or_else(|| LinkError::MissingParameter {
                    route: route.to_string(),
                    param: name.to_string(),
                })?;
            consumed[position] = true;
            path.push_str(&params[position].1);
            rest = &after[end + 1..];
        }
        path.push_str(rest);

        let query: Vec<(&str, &str)> = params
            .iter()
            .zip(consumed)
            .filter(|(_, used)| !used)
            .map(|((key, value), _)| (*key, value.as_str()))
            .collect();

        let mut url = match &self.base_url {
            Some(base) => format!("{}{}", base, path),
            None => path,
        };
        if !query.is_empty() {
            url.push('?');
            url.push_str(&serde_urlencoded::to_string(&query)?);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(base: Option<&str>) -> RouteResolver {
        RouteResolver::new(base.map(|url| Url::parse(url).unwrap()))
            .with_route("list_words", "/api/v1/words")
            .with_route("get_word", "/api/v1/words/{id}")
    }

    #[test]
    fn test_relative_url() {
        let url = resolver(None)
            .url_for("get_word", &[("id", "12".to_string())])
            .unwrap();
        assert_eq!(url, "/api/v1/words/12");
    }

    #[test]
    fn test_absolute_url_trims_trailing_slash() {
        let url = resolver(Some("http://localhost:8080/"))
            .url_for("list_words", &[])
            .unwrap();
        assert_eq!(url, "http://localhost:8080/api/v1/words");
    }

    #[test]
    fn test_extra_params_become_query_in_order() {
        let url = resolver(None)
            .url_for(
                "list_words",
                &[
                    ("page", "2".to_string()),
                    ("pageSize", "10".to_string()),
                    ("modifiedSince", "2024-01-01T00:00:00Z".to_string()),
                ],
            )
            .unwrap();
        assert_eq!(
            url,
            "/api/v1/words?page=2&pageSize=10&modifiedSince=2024-01-01T00%3A00%3A00Z"
        );
    }

    #[test]
    fn test_unknown_route() {
        let err = resolver(None).url_for("nope", &[]).unwrap_err();
        assert!(matches!(err, LinkError::UnknownRoute(name) if name == "nope"));
    }

    #[test]
    fn test_missing_path_parameter() {
        let err = resolver(None).url_for("get_word", &[]).unwrap_err();
        assert!(matches!(err, LinkError::MissingParameter { ref param, .. } if param == "id"));
    }

    #[test]
    fn test_base_url_is_normalized_and_keeps_prefix() {
        let url = resolver(Some("HTTPS://Words.Example.com"))
            .url_for("get_word", &[("id", "3".to_string())])
            .unwrap();
        assert_eq!(url, "https://words.example.com/api/v1/words/3");

        let url = resolver(Some("https://example.com/catalogue/"))
            .url_for("list_words", &[])
            .unwrap();
        assert_eq!(url, "https://example.com/catalogue/api/v1/words");
    }
}
