//! Lesson entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::ScopedEntity;

/// Lesson entity; ordered within its course by `sort_order`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    /// Unique identifier for the lesson (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Course this lesson belongs to
    pub course_id: Uuid,

    /// Lesson title
    pub title: String,

    /// Position within the course; unique per course
    pub sort_order: i32,

    /// Owning organization
    pub organization_id: Option<Uuid>,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// Timestamp when the lesson was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the lesson was last updated
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::lesson_item::Entity")]
    LessonItem,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
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
