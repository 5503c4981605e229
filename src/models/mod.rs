//! # Data Models
//!
//! This module contains the SeaORM entity models for the LMS API together
//! with the [`ScopedEntity`] base contract that every persisted entity
//! satisfies so the generic repository can scope it.

use sea_orm::{ActiveModelBehavior, ActiveModelTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod lesson_item;
pub mod lesson_item_progress;
pub mod organization;
pub mod user;

pub use course::Entity as Course;
pub use enrollment::Entity as Enrollment;
pub use lesson::Entity as Lesson;
pub use lesson_item::Entity as LessonItem;
pub use lesson_item_progress::Entity as LessonItemProgress;
pub use organization::Entity as Organization;
pub use user::Entity as User;

/// Base contract for every persisted entity.
///
/// Exposes the columns the generic repository needs: the identifier, the
/// owning organization, the soft-delete flag and both timestamps. Any new
/// entity implementing this trait inherits tenant scoping and soft-delete
/// filtering automatically.
pub trait ScopedEntity: EntityTrait {
    /// The active model used for inserts and partial updates.
    /// `ActiveModelTrait` already supplies `default()`; a `Default` bound
    /// on top would make that call ambiguous.
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + Send;

    fn id_column() -> Self::Column;
    fn organization_column() -> Self::Column;
    fn deleted_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
}

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "lms-api".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
