//! Migration to create the lesson_items table.
//!
//! Lesson items are the leaves of the course hierarchy. The `content`
//! JSON payload is shaped by `item_type` (video | text | question).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LessonItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonItems::LessonId).uuid().not_null())
                    .col(ColumnDef::new(LessonItems::Title).text().not_null())
                    .col(ColumnDef::new(LessonItems::ItemType).text().not_null())
                    .col(ColumnDef::new(LessonItems::Content).json_binary().null())
                    .col(
                        ColumnDef::new(LessonItems::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LessonItems::DurationSeconds)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(LessonItems::OrganizationId).uuid().null())
                    .col(
                        ColumnDef::new(LessonItems::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LessonItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(LessonItems::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_items_lesson_id")
                            .from(LessonItems::Table, LessonItems::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_items_lesson_id")
                    .table(LessonItems::Table)
                    .col(LessonItems::LessonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_items_organization_id")
                    .table(LessonItems::Table)
                    .col(LessonItems::OrganizationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_lesson_items_lesson_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_lesson_items_organization_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(LessonItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LessonItems {
    Table,
    Id,
    LessonId,
    Title,
    ItemType,
    Content,
    SortOrder,
    DurationSeconds,
    OrganizationId,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lessons {
    Table,
    Id,
}
