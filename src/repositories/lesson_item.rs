//! Lesson item repository
//!
//! The one type-specific rule lives here: `question` items must carry a
//! content payload, since the quiz evaluator reads its answer key from it.

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, Set};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::lesson_item::{self, ITEM_TYPE_QUESTION, ITEM_TYPE_TEXT, ITEM_TYPE_VIDEO};
use crate::repositories::scoped::{ScopedRepository, UnitOfWork};
use crate::tenant::TenantContext;

/// Request data for creating a new lesson item within a lesson
#[derive(Debug, Clone)]
pub struct CreateLessonItemRequest {
    pub title: String,
    pub item_type: String,
    pub content: Option<JsonValue>,
    pub sort_order: i32,
    pub duration_seconds: Option<i64>,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateLessonItemRequest {
    pub title: Option<String>,
    pub content: Option<JsonValue>,
    pub sort_order: Option<i32>,
    pub duration_seconds: Option<i64>,
}

/// Repository for lesson item database operations
pub struct LessonItemRepository<'a, C> {
    repo: ScopedRepository<'a, C, lesson_item::Entity>,
}

impl<'a, C: ConnectionTrait> LessonItemRepository<'a, C> {
    pub fn new(conn: &'a C, scope: &'a TenantContext) -> Self {
        Self {
            repo: ScopedRepository::new(conn, scope, "lesson item"),
        }
    }

    /// Creates a lesson item, stamping the owning `lesson_id`.
    pub async fn create(
        &self,
        lesson_id: Uuid,
        request: CreateLessonItemRequest,
    ) -> Result<lesson_item::Model, RepositoryError> {
        validate_title(&request.title)?;
        validate_item_type(&request.item_type)?;
        if request.item_type == ITEM_TYPE_QUESTION && request.content.is_none() {
            return Err(RepositoryError::validation(
                "question items require a content payload",
            ));
        }

        let model = lesson_item::ActiveModel {
            lesson_id: Set(lesson_id),
            title: Set(request.title.trim().to_string()),
            item_type: Set(request.item_type),
            content: Set(request.content),
            sort_order: Set(request.sort_order),
            duration_seconds: Set(request.duration_seconds),
            ..Default::default()
        };
        self.repo.insert(model).await
    }

    pub async fn get(&self, id: Uuid) -> Result<lesson_item::Model, RepositoryError> {
        self.repo.require(id, false).await
    }

    /// Items of a lesson in their lesson order.
    pub async fn find_by_lesson(
        &self,
        lesson_id: Uuid,
    ) -> Result<Vec<lesson_item::Model>, RepositoryError> {
        self.repo
            .find(
                Condition::all().add(lesson_item::Column::LessonId.eq(lesson_id)),
                Some(lesson_item::Column::SortOrder),
                false,
            )
            .await
    }

    /// Selective field copy: only the mutable fields of the request land
    /// in the patch; `item_type` and the owning lesson are fixed at
    /// creation.
    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateLessonItemRequest,
    ) -> Result<lesson_item::Model, RepositoryError> {
        let mut patch = lesson_item::ActiveModel::default();
        if let Some(title) = request.title {
            validate_title(&title)?;
            patch.title = Set(title.trim().to_string());
        }
        if let Some(content) = request.content {
            patch.content = Set(Some(content));
        }
        if let Some(sort_order) = request.sort_order {
            patch.sort_order = Set(sort_order);
        }
        if let Some(duration_seconds) = request.duration_seconds {
            patch.duration_seconds = Set(Some(duration_seconds));
        }
        self.repo.update(id, patch).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repo.remove(id).await
    }

    pub async fn restore(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repo.restore(id).await
    }
}

impl<'a> LessonItemRepository<'a, DatabaseTransaction> {
    pub fn in_unit_of_work(uow: &'a UnitOfWork, scope: &'a TenantContext) -> Self {
        Self {
            repo: uow.scoped(scope, "lesson item"),
        }
    }
}

fn validate_title(title: &str) -> Result<(), RepositoryError> {
    if title.trim().is_empty() {
        return Err(RepositoryError::validation(
            "lesson item title cannot be empty",
        ));
    }
    if title.len() > 255 {
        return Err(RepositoryError::validation(
            "lesson item title cannot exceed 255 characters",
        ));
    }
    Ok(())
}

fn validate_item_type(item_type: &str) -> Result<(), RepositoryError> {
    match item_type {
        ITEM_TYPE_VIDEO | ITEM_TYPE_TEXT | ITEM_TYPE_QUESTION => Ok(()),
        other => Err(RepositoryError::Validation(format!(
            "unknown lesson item type '{other}'"
        ))),
    }
}
