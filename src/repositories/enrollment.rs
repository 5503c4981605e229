//! Enrollment repository
//!
//! Enrollment uniqueness is enforced by the `(user_id, course_id)` index;
//! a second writer racing the same pair observes Conflict, which callers
//! treat as "already enrolled" rather than a failure.

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, Set};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::enrollment;
use crate::repositories::scoped::{ScopedRepository, UnitOfWork};
use crate::tenant::TenantContext;

/// Repository for enrollment database operations
pub struct EnrollmentRepository<'a, C> {
    repo: ScopedRepository<'a, C, enrollment::Entity>,
}

impl<'a, C: ConnectionTrait> EnrollmentRepository<'a, C> {
    pub fn new(conn: &'a C, scope: &'a TenantContext) -> Self {
        Self {
            repo: ScopedRepository::new(conn, scope, "enrollment"),
        }
    }

    /// Enrolls a user into a course. A duplicate `(user, course)` pair
    /// surfaces as [`RepositoryError::Conflict`].
    pub async fn enroll(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<enrollment::Model, RepositoryError> {
        let model = enrollment::ActiveModel {
            user_id: Set(user_id),
            course_id: Set(course_id),
            completed_duration_seconds: Set(0),
            ..Default::default()
        };
        self.repo.insert(model).await
    }

    pub async fn get(&self, id: Uuid) -> Result<enrollment::Model, RepositoryError> {
        self.repo.require(id, false).await
    }

    /// All live enrollments of a user, newest first.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<enrollment::Model>, RepositoryError> {
        self.repo
            .find(
                Condition::all().add(enrollment::Column::UserId.eq(user_id)),
                Some(enrollment::Column::CreatedAt),
                false,
            )
            .await
    }

    /// The user's enrollment in a specific course, if any.
    pub async fn find_for_course(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<enrollment::Model>, RepositoryError> {
        self.repo
            .find_one(
                Condition::all()
                    .add(enrollment::Column::UserId.eq(user_id))
                    .add(enrollment::Column::CourseId.eq(course_id)),
                false,
            )
            .await
    }

    /// Records a visit: remembers the last lesson item seen and adds the
    /// watched/read duration to the cumulative counter.
    pub async fn record_visit(
        &self,
        enrollment_id: Uuid,
        lesson_item_id: Uuid,
        added_duration_seconds: i64,
    ) -> Result<enrollment::Model, RepositoryError> {
        if added_duration_seconds < 0 {
            return Err(RepositoryError::validation(
                "added duration cannot be negative",
            ));
        }
        let current = self.repo.require(enrollment_id, false).await?;

        let patch = enrollment::ActiveModel {
            last_visited_lesson_item_id: Set(Some(lesson_item_id)),
            completed_duration_seconds: Set(current
                .completed_duration_seconds
                .saturating_add(added_duration_seconds)),
            ..Default::default()
        };
        self.repo.update(enrollment_id, patch).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repo.remove(id).await
    }
}

impl<'a> EnrollmentRepository<'a, DatabaseTransaction> {
    pub fn in_unit_of_work(uow: &'a UnitOfWork, scope: &'a TenantContext) -> Self {
        Self {
            repo: uow.scoped(scope, "enrollment"),
        }
    }
}
