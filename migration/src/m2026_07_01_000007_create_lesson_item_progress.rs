//! Migration to create the lesson_item_progress table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LessonItemProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonItemProgress::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonItemProgress::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(LessonItemProgress::LessonItemId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LessonItemProgress::IsCompleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LessonItemProgress::OrganizationId)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LessonItemProgress::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(LessonItemProgress::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(LessonItemProgress::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_item_progress_user_id")
                            .from(LessonItemProgress::Table, LessonItemProgress::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_item_progress_lesson_item_id")
                            .from(LessonItemProgress::Table, LessonItemProgress::LessonItemId)
                            .to(LessonItems::Table, LessonItems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_item_progress_user_item")
                    .table(LessonItemProgress::Table)
                    .col(LessonItemProgress::UserId)
                    .col(LessonItemProgress::LessonItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_item_progress_organization_id")
                    .table(LessonItemProgress::Table)
                    .col(LessonItemProgress::OrganizationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_lesson_item_progress_user_item")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_lesson_item_progress_organization_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(LessonItemProgress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum LessonItemProgress {
    Table,
    Id,
    UserId,
    LessonItemId,
    IsCompleted,
    OrganizationId,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum LessonItems {
    Table,
    Id,
}
