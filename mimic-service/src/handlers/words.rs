//! Word collection handler and its axum adapters

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::error::{ApiError, ApiErrorKind, ApiOperation};
use super::query::WordQuery;
use super::response::{CollectionResponse, ItemResponse};
use super::traits::CollectionHandler;
use crate::links::{LinkBuilder, RouteResolver};
use crate::mapping::{Projector, WordMapper};
use crate::model::{NewWord, WordDto, WordId, WordPayload};
use crate::repository::{QueryFilter, WordRepository};
use crate::responses::{Created, NoContent};
use crate::routes::{GET_WORD, LIST_WORDS};
use crate::state::AppState;
use crate::validation::{Validator, WordValidator};

const ENTITY: &str = "Word";

/// Orchestrates storage, projection, validation and link assembly for words
#[derive(Debug)]
pub struct WordHandler<R> {
    repository: R,
    mapper: WordMapper,
    validator: WordValidator,
    resolver: Arc<RouteResolver>,
    max_page_size: u32,
}

impl<R: WordRepository> WordHandler<R> {
    /// Create a handler over `repository`
    pub fn new(repository: R, resolver: Arc<RouteResolver>, max_page_size: u32) -> Self {
        Self {
            repository,
            mapper: WordMapper,
            validator: WordValidator::new(),
            resolver,
            max_page_size,
        }
    }

    /// The backing repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Largest accepted `pageSize`
    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    fn links(&self) -> LinkBuilder<'_> {
        LinkBuilder::new(&self.resolver, LIST_WORDS, GET_WORD)
    }

    fn not_found(operation: ApiOperation, id: WordId) -> ApiError {
        ApiError::not_found(ENTITY, id.to_string()).with_operation(operation)
    }

    fn require_payload(
        &self,
        operation: ApiOperation,
        payload: Option<WordPayload>,
    ) -> Result<NewWord, ApiError> {
        let payload = payload
            .ok_or_else(|| ApiError::invalid_input(operation, "Request body is required"))?;
        self.validator
            .validate(payload)
            .map_err(|errors| ApiError::validation_failed(operation, errors))
    }
}

impl<R: WordRepository> CollectionHandler<WordId, WordDto, WordPayload> for WordHandler<R> {
    async fn list(&self, filter: QueryFilter) -> Result<CollectionResponse<WordDto>, ApiError> {
        let page = self.repository.list_all(&filter).await?;
        tracing::debug!(
            page = ?filter.page().map(|p| p.number()),
            page_size = ?filter.page().map(|p| p.size()),
            modified_since = ?filter.modified_since(),
            returned = page.len(),
            total = ?page.pagination.map(|m| m.total_count),
            "Listed words"
        );

        if page.is_empty() {
            return Err(ApiError::new(
                ApiOperation::List,
                ApiErrorKind::NotFound,
                "No words match the query",
            ));
        }

        let page = self
            .links()
            .collection(self.mapper.project_page(page), &filter)
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::List))?;
        Ok(CollectionResponse::new(page))
    }

    async fn get(&self, id: WordId) -> Result<ItemResponse<WordDto>, ApiError> {
        let word = self
            .repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| Self::not_found(ApiOperation::Get, id))?;

        let dto = self.links().with_item_links(self.mapper.project(word))?;
        Ok(ItemResponse::new(dto))
    }

    async fn create(&self, payload: Option<WordPayload>) -> Result<Created<WordDto>, ApiError> {
        let new_word = self.require_payload(ApiOperation::Create, payload)?;
        let word = self.repository.create(new_word).await?;
        tracing::info!(word_id = word.id, "Word created");

        let links = self.links();
        let location = links
            .self_link(word.id)
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Create))?
            .href;
        let dto = links
            .with_self(self.mapper.project(word))
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Create))?;

        Ok(Created::new(dto).with_location(location))
    }

    async fn update(
        &self,
        id: WordId,
        payload: Option<WordPayload>,
    ) -> Result<ItemResponse<WordDto>, ApiError> {
        let existing = self
            .repository
            .find_by_id(&id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Update))?
            .ok_or_else(|| Self::not_found(ApiOperation::Update, id))?;

        let changes = self.require_payload(ApiOperation::Update, payload)?;
        let word = self.repository.update(existing.revise(changes)).await?;
        tracing::info!(word_id = word.id, "Word updated");

        let dto = self
            .links()
            .with_self(self.mapper.project(word))
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Update))?;
        Ok(ItemResponse::new(dto))
    }

    async fn delete(&self, id: WordId) -> Result<NoContent, ApiError> {
        self.repository
            .find_by_id(&id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Delete))?
            .ok_or_else(|| Self::not_found(ApiOperation::Delete, id))?;

        self.repository.soft_delete(&id).await?;
        tracing::info!(word_id = id, "Word deactivated");
        Ok(NoContent)
    }
}

fn rejected(operation: ApiOperation, message: impl std::fmt::Display) -> ApiError {
    ApiError::invalid_input(operation, message.to_string())
}

/// `GET /words`
pub async fn list_words<R: WordRepository>(
    State(state): State<AppState<R>>,
    query: Result<Query<WordQuery>, QueryRejection>,
) -> Result<CollectionResponse<WordDto>, ApiError> {
    let Query(query) = query.map_err(|e| rejected(ApiOperation::List, e.body_text()))?;
    let words = state.words();
    let filter = query.into_filter(words.max_page_size())?;
    words.list(filter).await
}

/// `GET /words/{id}`
pub async fn get_word<R: WordRepository>(
    State(state): State<AppState<R>>,
    id: Result<Path<WordId>, PathRejection>,
) -> Result<ItemResponse<WordDto>, ApiError> {
    let Path(id) = id.map_err(|e| rejected(ApiOperation::Get, e.body_text()))?;
    state.words().get(id).await
}

/// `POST /words`
pub async fn create_word<R: WordRepository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<Option<WordPayload>>, JsonRejection>,
) -> Result<Created<WordDto>, ApiError> {
    let Json(payload) = payload.map_err(|e| rejected(ApiOperation::Create, e.body_text()))?;
    state.words().create(payload).await
}

/// `PUT /words/{id}`
///
/// The body is extracted leniently so that an unknown id is reported before
/// any problem with the body.
pub async fn update_word<R: WordRepository>(
    State(state): State<AppState<R>>,
    id: Result<Path<WordId>, PathRejection>,
    payload: Result<Json<Option<WordPayload>>, JsonRejection>,
) -> Result<ItemResponse<WordDto>, ApiError> {
    let Path(id) = id.map_err(|e| rejected(ApiOperation::Update, e.body_text()))?;
    let words = state.words();
    match payload {
        Ok(Json(payload)) => words.update(id, payload).await,
        Err(rejection) => {
            // existence first, then the body problem
            words.get(id).await.map_err(|e| e.with_operation(ApiOperation::Update))?;
            Err(rejected(ApiOperation::Update, rejection.body_text()))
        }
    }
}

/// `DELETE /words/{id}`
pub async fn delete_word<R: WordRepository>(
    State(state): State<AppState<R>>,
    id: Result<Path<WordId>, PathRejection>,
) -> Result<NoContent, ApiError> {
    let Path(id) = id.map_err(|e| rejected(ApiOperation::Delete, e.body_text()))?;
    state.words().delete(id).await
}
