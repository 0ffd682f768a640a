//! Link-set assembly for items and collections

use std::fmt::Display;

use http::Method;

use super::{rel, Link, LinkError, RouteResolver};
use crate::repository::{PagedResult, QueryFilter};

/// Path parameter carrying an item identifier in the item route template
pub const ID_PARAM: &str = "id";

/// A response value that can carry hypermedia links
pub trait Resource {
    /// Identifier substituted into the item route
    type Id: Display;

    /// The identifier of this resource
    fn resource_id(&self) -> Self::Id;

    /// Return this value with `links` appended
    #[must_use]
    fn with_links(self, links: Vec<Link>) -> Self;
}

/// Builds link sets from route names
///
/// Holds only borrowed configuration; every method takes its input by value
/// and returns a new value with links attached.
#[derive(Debug, Clone, Copy)]
pub struct LinkBuilder<'a> {
    resolver: &'a RouteResolver,
    collection_route: &'a str,
    item_route: &'a str,
}

impl<'a> LinkBuilder<'a> {
    /// Create a builder for one collection/item route pair
    pub fn new(resolver: &'a RouteResolver, collection_route: &'a str, item_route: &'a str) -> Self {
        Self {
            resolver,
            collection_route,
            item_route,
        }
    }

    fn item_url(&self, id: impl Display) -> Result<String, LinkError> {
        self.resolver
            .url_for(self.item_route, &[(ID_PARAM, id.to_string())])
    }

    fn collection_url(&self, filter: &QueryFilter) -> Result<String, LinkError> {
        self.resolver
            .url_for(self.collection_route, &filter.query_pairs())
    }

    /// `self` link for one item
    pub fn self_link(&self, id: impl Display) -> Result<Link, LinkError> {
        Ok(Link::get(rel::SELF, self.item_url(id)?))
    }

    /// `self`, `update` and `delete` links for one item, all on the item URL
    pub fn item_links(&self, id: impl Display) -> Result<Vec<Link>, LinkError> {
        let href = self.item_url(id)?;
        Ok(vec![
            Link::new(rel::SELF, href.clone(), &Method::GET),
            Link::new(rel::UPDATE, href.clone(), &Method::PUT),
            Link::new(rel::DELETE, href, &Method::DELETE),
        ])
    }

    /// Attach the `self` link to a single resource
    pub fn with_self<T: Resource>(&self, resource: T) -> Result<T, LinkError> {
        let link = self.self_link(resource.resource_id())?;
        Ok(resource.with_links(vec![link]))
    }

    /// Attach the full item link set to a single resource
    pub fn with_item_links<T: Resource>(&self, resource: T) -> Result<T, LinkError> {
        let links = self.item_links(resource.resource_id())?;
        Ok(resource.with_links(links))
    }

    /// Attach item and collection links to a page of resources
    ///
    /// Every item gets its own `self` link. The collection then receives, in
    /// this order: a `self` link reproducing `filter`, a `next` link when a
    /// following page exists, and a `prev` link when a preceding page exists.
    /// `next` and `prev` keep the page size and the "modified since" cut-off.
    pub fn collection<T: Resource>(
        &self,
        page: PagedResult<T>,
        filter: &QueryFilter,
    ) -> Result<PagedResult<T>, LinkError> {
        let PagedResult {
            results,
            pagination,
            links,
        } = page;

        let results = results
            .into_iter()
            .map(|item| self.with_self(item))
            .collect::<Result<Vec<_>, _>>()?;

        let mut collection_links = vec![Link::get(rel::SELF, self.collection_url(filter)?)];

        if let Some(meta) = pagination {
            if let Some(current) = meta.request() {
                if meta.has_next() {
                    let next = filter.with_page(current.next());
                    collection_links.push(Link::get(rel::NEXT, self.collection_url(&next)?));
                }
                if meta.has_previous() {
                    if let Some(previous) = current.previous() {
                        let prev = filter.with_page(previous);
                        collection_links.push(Link::get(rel::PREV, self.collection_url(&prev)?));
                    }
                }
            }
        }

        Ok(PagedResult {
            results,
            pagination,
            links,
        }
        .with_links(collection_links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{PageRequest, PaginationMetadata};
    use chrono::{TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        links: Vec<Link>,
    }

    impl Resource for Item {
        type Id = u32;

        fn resource_id(&self) -> u32 {
            self.id
        }

        fn with_links(mut self, links: Vec<Link>) -> Self {
            self.links.extend(links);
            self
        }
    }

    fn resolver() -> RouteResolver {
        RouteResolver::new(None)
            .with_route("items", "/items")
            .with_route("item", "/items/{id}")
    }

    fn items(ids: std::ops::RangeInclusive<u32>) -> Vec<Item> {
        ids.map(|id| Item {
            id,
            links: Vec::new(),
        })
        .collect()
    }

    fn paged_filter(number: u32, size: u32) -> QueryFilter {
        QueryFilter::new().with_page(PageRequest::new(number, size).unwrap())
    }

    fn rels(links: &[Link]) -> Vec<&str> {
        links.iter().map(|l| l.rel.as_str()).collect()
    }

    #[test]
    fn test_item_links() {
        let resolver = resolver();
        let builder = LinkBuilder::new(&resolver, "items", "item");
        let links = builder.item_links(5).unwrap();

        assert_eq!(rels(&links), vec!["self", "update", "delete"]);
        assert!(links.iter().all(|l| l.href == "/items/5"));
        let methods: Vec<_> = links.iter().map(|l| l.method.as_str()).collect();
        assert_eq!(methods, vec!["GET", "PUT", "DELETE"]);
    }

    #[test]
    fn test_first_page_has_self_and_next() {
        let resolver = resolver();
        let builder = LinkBuilder::new(&resolver, "items", "item");
        let filter = paged_filter(1, 10);
        let page = PagedResult::new(
            items(1..=10),
            Some(PaginationMetadata::new(filter.page().unwrap(), 25)),
        );

        let page = builder.collection(page, &filter).unwrap();

        assert_eq!(rels(&page.links), vec!["self", "next"]);
        assert_eq!(page.links[0].href, "/items?page=1&pageSize=10");
        assert_eq!(page.links[1].href, "/items?page=2&pageSize=10");
        assert!(page
            .results
            .iter()
            .all(|item| item.links.len() == 1 && item.links[0].href == format!("/items/{}", item.id)));
    }

    #[test]
    fn test_last_page_has_self_and_prev() {
        let resolver = resolver();
        let builder = LinkBuilder::new(&resolver, "items", "item");
        let filter = paged_filter(3, 10);
        let page = PagedResult::new(
            items(21..=25),
            Some(PaginationMetadata::new(filter.page().unwrap(), 25)),
        );

        let page = builder.collection(page, &filter).unwrap();

        assert_eq!(rels(&page.links), vec!["self", "prev"]);
        assert_eq!(page.links[1].href, "/items?page=2&pageSize=10");
    }

    #[test]
    fn test_middle_page_orders_self_next_prev() {
        let resolver = resolver();
        let builder = LinkBuilder::new(&resolver, "items", "item");
        let since = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let filter = paged_filter(2, 5).with_modified_since(since);
        let page = PagedResult::new(
            items(6..=10),
            Some(PaginationMetadata::new(filter.page().unwrap(), 15)),
        );

        let page = builder.collection(page, &filter).unwrap();

        assert_eq!(rels(&page.links), vec!["self", "next", "prev"]);
        assert_eq!(
            page.links[1].href,
            "/items?page=3&pageSize=5&modifiedSince=2024-03-01T12%3A00%3A00Z"
        );
        assert_eq!(
            page.links[2].href,
            "/items?page=1&pageSize=5&modifiedSince=2024-03-01T12%3A00%3A00Z"
        );
    }

    #[test]
    fn test_beyond_last_page_links_back() {
        let resolver = resolver();
        let builder = LinkBuilder::new(&resolver, "items", "item");
        let filter = paged_filter(10, 10);
        let page = PagedResult::new(
            Vec::<Item>::new(),
            Some(PaginationMetadata::new(filter.page().unwrap(), 25)),
        );

        let page = builder.collection(page, &filter).unwrap();

        assert_eq!(rels(&page.links), vec!["self", "prev"]);
        assert_eq!(page.links[1].href, "/items?page=9&pageSize=10");
    }

    #[test]
    fn test_presence_law_over_grid() {
        let resolver = resolver();
        let builder = LinkBuilder::new(&resolver, "items", "item");
        for total in 0..=30u64 {
            for number in 1..=6u32 {
                let filter = paged_filter(number, 7);
                let meta = PaginationMetadata::new(filter.page().unwrap(), total);
                let page = builder
                    .collection(PagedResult::new(Vec::<Item>::new(), Some(meta)), &filter)
                    .unwrap();
                let rels = rels(&page.links);

                assert_eq!(rels[0], "self");
                assert_eq!(rels.contains(&"next"), number < meta.total_pages);
                assert_eq!(rels.contains(&"prev"), number > 1);
            }
        }
    }

    #[test]
    fn test_unpaged_collection_has_only_self() {
        let resolver = resolver();
        let builder = LinkBuilder::new(&resolver, "items", "item");
        let page = builder
            .collection(PagedResult::unpaged(items(1..=3)), &QueryFilter::new())
            .unwrap();

        assert_eq!(rels(&page.links), vec!["self"]);
        assert_eq!(page.links[0].href, "/items");
    }

    #[test]
    fn test_unknown_route_fails() {
        let resolver = resolver();
        let builder = LinkBuilder::new(&resolver, "missing", "item");
        let err = builder
            .collection(PagedResult::unpaged(items(1..=1)), &QueryFilter::new())
            .unwrap_err();
        assert!(matches!(err, LinkError::UnknownRoute(_)));
    }
}
