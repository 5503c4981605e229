//! Lesson item progress repository
//!
//! `mark_completed` is an upsert over the `(user_id, lesson_item_id)`
//! unique index. Two racing writers both end with a completed row: the
//! loser's insert hits Conflict, and it re-fetches and updates the row
//! the winner created.

use sea_orm::{ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, Set};
use uuid::Uuid;

use crate::error::RepositoryError;
use crate::models::lesson_item_progress;
use crate::repositories::scoped::{ScopedRepository, UnitOfWork};
use crate::tenant::TenantContext;

/// Repository for lesson item progress database operations
pub struct ProgressRepository<'a, C> {
    repo: ScopedRepository<'a, C, lesson_item_progress::Entity>,
}

impl<'a, C: ConnectionTrait> ProgressRepository<'a, C> {
    pub fn new(conn: &'a C, scope: &'a TenantContext) -> Self {
        Self {
            repo: ScopedRepository::new(conn, scope, "progress"),
        }
    }

    /// Marks a lesson item completed for a user, creating the progress
    /// row if it does not exist yet. Idempotent.
    pub async fn mark_completed(
        &self,
        user_id: Uuid,
        lesson_item_id: Uuid,
    ) -> Result<lesson_item_progress::Model, RepositoryError> {
        if let Some(existing) = self.find_for_item(user_id, lesson_item_id).await? {
            if existing.is_completed {
                return Ok(existing);
            }
            return self.set_completed(existing.id).await;
        }

        let model = lesson_item_progress::ActiveModel {
            user_id: Set(user_id),
            lesson_item_id: Set(lesson_item_id),
            is_completed: Set(true),
            ..Default::default()
        };
        match self.repo.insert(model).await {
            Ok(created) => Ok(created),
            // Lost the race to another writer; its row is now the one to
            // complete.
            Err(RepositoryError::Conflict(_)) => {
                let existing = self
                    .find_for_item(user_id, lesson_item_id)
                    .await?
                    .ok_or(RepositoryError::NotFound("progress"))?;
                if existing.is_completed {
                    Ok(existing)
                } else {
                    self.set_completed(existing.id).await
                }
            }
            Err(err) => Err(err),
        }
    }

    /// The user's progress row for a lesson item, if any.
    pub async fn find_for_item(
        &self,
        user_id: Uuid,
        lesson_item_id: Uuid,
    ) -> Result<Option<lesson_item_progress::Model>, RepositoryError> {
        self.repo
            .find_one(
                Condition::all()
                    .add(lesson_item_progress::Column::UserId.eq(user_id))
                    .add(lesson_item_progress::Column::LessonItemId.eq(lesson_item_id)),
                false,
            )
            .await
    }

    /// All progress rows of a user, oldest first.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<lesson_item_progress::Model>, RepositoryError> {
        self.repo
            .find(
                Condition::all().add(lesson_item_progress::Column::UserId.eq(user_id)),
                Some(lesson_item_progress::Column::CreatedAt),
                false,
            )
            .await
    }

    async fn set_completed(
        &self,
        id: Uuid,
    ) -> Result<lesson_item_progress::Model, RepositoryError> {
        let patch = lesson_item_progress::ActiveModel {
            is_completed: Set(true),
            ..Default::default()
        };
        self.repo.update(id, patch).await
    }
}

impl<'a> ProgressRepository<'a, DatabaseTransaction> {
    pub fn in_unit_of_work(uow: &'a UnitOfWork, scope: &'a TenantContext) -> Self {
        Self {
            repo: uow.scoped(scope, "progress"),
        }
    }
}
