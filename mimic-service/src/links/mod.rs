//! Hypermedia links
//!
//! Every response that describes a word or a page of words carries a list of
//! [`Link`]s telling the client where it can go next. Link targets are never
//! formatted by hand: a [`RouteResolver`] turns a named route plus parameters
//! into a URL, and a [`LinkBuilder`] decides which links a response gets.

mod builder;
mod resolver;

use http::Method;
use serde::{Deserialize, Serialize};

pub use builder::{LinkBuilder, Resource};
pub use resolver::{LinkError, RouteResolver};

/// Link relation names
pub mod rel {
    /// The resource itself (or the current page of a collection)
    pub const SELF: &str = "self";
    /// The following page of a collection
    pub const NEXT: &str = "next";
    /// The preceding page of a collection
    pub const PREV: &str = "prev";
    /// Replace the resource
    pub const UPDATE: &str = "update";
    /// Deactivate the resource
    pub const DELETE: &str = "delete";
}

/// A (relation, target URL, HTTP method) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Relation name, see [`rel`]
    pub rel: String,
    /// Absolute or root-relative target URL
    pub href: String,
    /// HTTP method to use against `href`
    pub method: String,
}

impl Link {
    /// Create a link
    pub fn new(rel: impl Into<String>, href: impl Into<String>, method: &Method) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            method: method.as_str().to_string(),
        }
    }

    /// Create a `GET` link
    pub fn get(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self::new(rel, href, &Method::GET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_serialization() {
        let link = Link::new(rel::UPDATE, "/api/v1/words/3", &Method::PUT);
        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            serde_json::json!({"rel": "update", "href": "/api/v1/words/3", "method": "PUT"})
        );
    }

    #[test]
    fn test_get_link() {
        let link = Link::get(rel::SELF, "/api/v1/words");
        assert_eq!(link.method, "GET");
        assert_eq!(link.rel, "self");
    }
}
