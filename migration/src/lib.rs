//! Database migrations for the LMS API.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_07_01_000001_create_organizations;
mod m2026_07_01_000002_create_users;
mod m2026_07_01_000003_create_courses;
mod m2026_07_01_000004_create_lessons;
mod m2026_07_01_000005_create_lesson_items;
mod m2026_07_01_000006_create_enrollments;
mod m2026_07_01_000007_create_lesson_item_progress;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_07_01_000001_create_organizations::Migration),
            Box::new(m2026_07_01_000002_create_users::Migration),
            Box::new(m2026_07_01_000003_create_courses::Migration),
            Box::new(m2026_07_01_000004_create_lessons::Migration),
            Box::new(m2026_07_01_000005_create_lesson_items::Migration),
            Box::new(m2026_07_01_000006_create_enrollments::Migration),
            Box::new(m2026_07_01_000007_create_lesson_item_progress::Migration),
        ]
    }
}
