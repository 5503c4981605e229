//! Course repository
//!
//! Thin specialization over the generic scoped repository: CRUD plus a
//! category lookup layered on the implicit tenant/soft-delete predicate.

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, Set};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::course;
use crate::repositories::scoped::{ScopedRepository, UnitOfWork};
use crate::tenant::TenantContext;

/// Request data for creating a new course
#[derive(Debug, Clone)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Partial update; `None` fields are left untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Repository for course database operations
pub struct CourseRepository<'a, C> {
    repo: ScopedRepository<'a, C, course::Entity>,
}

impl<'a, C: ConnectionTrait> CourseRepository<'a, C> {
    pub fn new(conn: &'a C, scope: &'a TenantContext) -> Self {
        Self {
            repo: ScopedRepository::new(conn, scope, "course"),
        }
    }

    pub async fn create(
        &self,
        request: CreateCourseRequest,
    ) -> Result<course::Model, RepositoryError> {
        validate_title(&request.title)?;

        let model = course::ActiveModel {
            title: Set(request.title.trim().to_string()),
            description: Set(request.description),
            category_id: Set(request.category_id),
            ..Default::default()
        };
        self.repo.insert(model).await
    }

    pub async fn get(&self, id: Uuid) -> Result<course::Model, RepositoryError> {
        self.repo.require(id, false).await
    }

    pub async fn get_any(
        &self,
        id: Uuid,
        include_deleted: bool,
    ) -> Result<Option<course::Model>, RepositoryError> {
        self.repo.get_by_id(id, include_deleted).await
    }

    pub async fn list(&self, include_deleted: bool) -> Result<Vec<course::Model>, RepositoryError> {
        self.repo
            .get_all(Some(course::Column::CreatedAt), false, include_deleted)
            .await
    }

    /// Courses in the given category, within tenant scope.
    pub async fn find_by_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<course::Model>, RepositoryError> {
        self.repo
            .find(
                Condition::all().add(course::Column::CategoryId.eq(category_id)),
                Some(course::Column::CreatedAt),
                false,
            )
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateCourseRequest,
    ) -> Result<course::Model, RepositoryError> {
        let mut patch = course::ActiveModel::default();
        if let Some(title) = request.title {
            validate_title(&title)?;
            patch.title = Set(title.trim().to_string());
        }
        if let Some(description) = request.description {
            patch.description = Set(Some(description));
        }
        if let Some(category_id) = request.category_id {
            patch.category_id = Set(Some(category_id));
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

impl<'a> CourseRepository<'a, DatabaseTransaction> {
    /// Repository participating in an open unit of work.
    pub fn in_unit_of_work(uow: &'a UnitOfWork, scope: &'a TenantContext) -> Self {
        Self {
            repo: uow.scoped(scope, "course"),
        }
    }
}

fn validate_title(title: &str) -> Result<(), RepositoryError> {
    if title.trim().is_empty() {
        return Err(RepositoryError::validation("course title cannot be empty"));
    }
    if title.len() > 255 {
        return Err(RepositoryError::validation(
            "course title cannot exceed 255 characters",
        ));
    }
    Ok(())
}
