//! Test utilities for database testing.
//!
//! Sets up in-memory SQLite databases with all migrations applied, plus
//! tenant context helpers shared across the integration suites.

use anyhow::Result;
use lms::migration::{Migrator, MigratorTrait};
use lms::repositories::{CourseRepository, CreateCourseRequest};
use lms::tenant::TenantContext;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    Migrator::up(&db, None).await?;

    // SQLite does not enforce our Postgres foreign key semantics; disable FK checks to
    // allow inserting fixture data that may not satisfy cross-table relations in tests.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Like [`setup_test_db`] but keeps SQLite foreign key enforcement on,
/// for tests exercising referential-integrity failures.
#[allow(dead_code)]
pub async fn setup_strict_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Context for a regular member of a fresh organization.
#[allow(dead_code)]
pub fn member_context() -> TenantContext {
    TenantContext::member(Uuid::new_v4(), Uuid::new_v4())
}

/// Another member of the same organization as `ctx`.
#[allow(dead_code)]
pub fn same_org_context(ctx: &TenantContext) -> TenantContext {
    TenantContext::member(Uuid::new_v4(), ctx.organization_id.unwrap())
}

/// System admin context; bypasses the organization predicate.
#[allow(dead_code)]
pub fn admin_context() -> TenantContext {
    TenantContext::system_admin(Uuid::new_v4())
}

/// Creates a course owned by the context's organization.
#[allow(dead_code)]
pub async fn seed_course(
    db: &DatabaseConnection,
    ctx: &TenantContext,
    title: &str,
) -> Result<lms::models::course::Model> {
    let repo = CourseRepository::new(db, ctx);
    let course = repo
        .create(CreateCourseRequest {
            title: title.to_string(),
            description: None,
            category_id: None,
        })
        .await?;
    Ok(course)
}
