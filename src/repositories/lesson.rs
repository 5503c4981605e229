//! Lesson repository

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, Set};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::lesson;
use crate::repositories::scoped::{ScopedRepository, UnitOfWork};
use crate::tenant::TenantContext;

/// Request data for creating a new lesson within a course
#[derive(Debug, Clone)]
pub struct CreateLessonRequest {
    pub title: String,
    pub sort_order: i32,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub sort_order: Option<i32>,
}

/// Repository for lesson database operations
pub struct LessonRepository<'a, C> {
    repo: ScopedRepository<'a, C, lesson::Entity>,
}

impl<'a, C: ConnectionTrait> LessonRepository<'a, C> {
    pub fn new(conn: &'a C, scope: &'a TenantContext) -> Self {
        Self {
            repo: ScopedRepository::new(conn, scope, "lesson"),
        }
    }

    /// Creates a lesson, stamping the owning `course_id`. A duplicate
    /// `(course_id, sort_order)` slot surfaces as Conflict.
    pub async fn create(
        &self,
        course_id: Uuid,
        request: CreateLessonRequest,
    ) -> Result<lesson::Model, RepositoryError> {
        validate_title(&request.title)?;
        validate_sort_order(request.sort_order)?;

        let model = lesson::ActiveModel {
            course_id: Set(course_id),
            title: Set(request.title.trim().to_string()),
            sort_order: Set(request.sort_order),
            ..Default::default()
        };
        self.repo.insert(model).await
    }

    pub async fn get(&self, id: Uuid) -> Result<lesson::Model, RepositoryError> {
        self.repo.require(id, false).await
    }

    /// Lessons of a course in their course order.
    pub async fn find_by_course(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<lesson::Model>, RepositoryError> {
        self.repo
            .find(
                Condition::all().add(lesson::Column::CourseId.eq(course_id)),
                Some(lesson::Column::SortOrder),
                false,
            )
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateLessonRequest,
    ) -> Result<lesson::Model, RepositoryError> {
        let mut patch = lesson::ActiveModel::default();
        if let Some(title) = request.title {
            validate_title(&title)?;
            patch.title = Set(title.trim().to_string());
        }
        if let Some(sort_order) = request.sort_order {
            validate_sort_order(sort_order)?;
            patch.sort_order = Set(sort_order);
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

impl<'a> LessonRepository<'a, DatabaseTransaction> {
    pub fn in_unit_of_work(uow: &'a UnitOfWork, scope: &'a TenantContext) -> Self {
        Self {
            repo: uow.scoped(scope, "lesson"),
        }
    }
}

fn validate_title(title: &str) -> Result<(), RepositoryError> {
    if title.trim().is_empty() {
        return Err(RepositoryError::validation("lesson title cannot be empty"));
    }
    if title.len() > 255 {
        return Err(RepositoryError::validation(
            "lesson title cannot exceed 255 characters",
        ));
    }
    Ok(())
}

fn validate_sort_order(sort_order: i32) -> Result<(), RepositoryError> {
    if sort_order < 0 {
        return Err(RepositoryError::validation(
            "lesson sort order cannot be negative",
        ));
    }
    Ok(())
}
