//! Lesson item entity model
//!
//! Lesson items are the leaves of the course hierarchy. The `content`
//! JSON payload is shaped by `item_type`: a video item carries a source
//! URL, a text item carries markup, a question item carries the question
//! list with its answer key.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

use super::ScopedEntity;

/// Lesson item type discriminants stored in `item_type`
pub const ITEM_TYPE_VIDEO: &str = "video";
pub const ITEM_TYPE_TEXT: &str = "text";
pub const ITEM_TYPE_QUESTION: &str = "question";

/// Lesson item entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lesson_items")]
pub struct Model {
    /// Unique identifier for the lesson item (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Lesson this item belongs to
    pub lesson_id: Uuid,

    /// Item title
    pub title: String,

    /// Item type: video | text | question
    pub item_type: String,

    /// Type-dependent payload
    #[sea_orm(column_type = "JsonBinary")]
    pub content: Option<JsonValue>,

    /// Position within the lesson
    pub sort_order: i32,

    /// Optional playback/reading duration used for progress accounting
    pub duration_seconds: Option<i64>,

    /// Owning organization
    pub organization_id: Option<Uuid>,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// Timestamp when the item was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the item was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lesson::Entity",
        from = "Column::LessonId",
        to = "super::lesson::Column::Id"
    )]
    Lesson,
    #[sea_orm(has_many = "super::lesson_item_progress::Entity")]
    Progress,
}

impl Related<super::lesson::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lesson.def()
    }
}

impl Related<super::lesson_item_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Progress.def()
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
