//! Enrollment entity model
//!
//! Links a user to a course, unique on `(user_id, course_id)`. The
//! `last_visited_lesson_item_id` column is a plain back-reference with no
//! ownership semantics.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use super::ScopedEntity;

/// Enrollment entity
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    /// Unique identifier for the enrollment (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Enrolled user
    pub user_id: Uuid,

    /// Course enrolled into
    pub course_id: Uuid,

    /// Last lesson item the user visited, if any
    pub last_visited_lesson_item_id: Option<Uuid>,

    /// Cumulative completed duration across the course
    pub completed_duration_seconds: i64,

    /// Owning organization
    pub organization_id: Option<Uuid>,

    /// Soft-delete flag
    pub is_deleted: bool,

    /// Timestamp when the enrollment was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp when the enrollment was last updated
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
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
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
