//! Entity to DTO projection
//!
//! Projectors are plain values built once at startup and shared by reference
//! with the handlers. A projection is total: every entity maps to exactly one
//! DTO, with an empty link list that the link builder fills in later.

use crate::model::{Word, WordDto};
use crate::repository::PagedResult;

/// Field-by-field projection from a stored entity to its outbound shape
pub trait Projector<E, D> {
    /// Project one entity
    fn project(&self, entity: E) -> D;

    /// Project every record of a page, keeping its metadata and links
    fn project_page(&self, page: PagedResult<E>) -> PagedResult<D> {
        page.map(|entity| self.project(entity))
    }
}

/// Projects [`Word`] into [`WordDto`]
#[derive(Debug, Clone, Copy, Default)]
pub struct WordMapper;

impl Projector<Word, WordDto> for WordMapper {
    fn project(&self, word: Word) -> WordDto {
        WordDto {
            id: word.id,
            name: word.name,
            score: word.score,
            active: word.active,
            created_at: word.created_at,
            updated_at: word.updated_at,
            links: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{PageRequest, PaginationMetadata};
    use chrono::{TimeZone, Utc};

    fn word(id: i64) -> Word {
        Word {
            id,
            name: format!("w{id}"),
            score: 3,
            active: id % 2 == 0,
            created_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            updated_at: Some(Utc.with_ymd_and_hms(2024, 2, 2, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_project_copies_every_field() {
        let dto = WordMapper.project(word(2));
        assert_eq!(dto.id, 2);
        assert_eq!(dto.name, "w2");
        assert_eq!(dto.score, 3);
        assert!(dto.active);
        assert_eq!(dto.created_at, word(2).created_at);
        assert_eq!(dto.updated_at, word(2).updated_at);
        assert!(dto.links.is_empty());
    }

    #[test]
    fn test_project_page_keeps_order_and_metadata() {
        let meta = PaginationMetadata::new(PageRequest::new(1, 3).unwrap(), 7);
        let page = PagedResult::new(vec![word(1), word(2), word(3)], Some(meta));
        let projected = WordMapper.project_page(page);

        let ids: Vec<_> = projected.results.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(projected.pagination, Some(meta));
    }
}
