//! Lesson item progress entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::ScopedEntity;

/// Per-user completion state for a lesson item, unique on
/// `(user_id, lesson_item_id)`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lesson_item_progress")]
pub struct Model {
    /// Unique identifier for the progress row (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// User the progress belongs to
    pub user_id: Uuid,

    /// Lesson item the progress refers to
    pub lesson_item_id: Uuid,

    /// Completion flag
    pub is_completed: bool,

    /// Owning organization
    pub organization_id: Option<Uuid>,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// Timestamp when the row was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the row was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::lesson_item::Entity",
        from = "Column::LessonItemId",
        to = "super::lesson_item::Column::Id"
    )]
    LessonItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::lesson_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl ScopedEntity for Entity {
    type Active = ActiveModel;

    fn id_column() -> Column {
        Column::Id
    }
    fn organization_column() -> Column {
        Column::OrganizationId
    }
    fn deleted_column() -> Column {
        Column::IsDeleted
    }
    fn created_at_column() -> Column {
        Column::CreatedAt
    }
    fn updated_at_column() -> Column {
        Column::UpdatedAt
    }
}
