//! Tenant scoping and soft-delete behavior of the repository layer.

use anyhow::Result;
use sea_orm::{EntityTrait, PaginatorTrait};

use lms::error::RepositoryError;
use lms::models::course;
use lms::repositories::{
    CourseRepository, CreateCourseRequest, CreateLessonRequest, LessonRepository,
    UpdateCourseRequest,
};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{
    admin_context, member_context, same_org_context, seed_course, setup_strict_test_db,
    setup_test_db,
};

#[tokio::test]
async fn cross_tenant_get_reads_as_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx_a = member_context();
    let ctx_b = member_context();

    let course = seed_course(&db, &ctx_a, "Tenant A course").await?;

    let repo_b = CourseRepository::new(&db, &ctx_b);
    let err = repo_b.get(course.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound("course")));

    // Same-org peers do see it.
    let peer = same_org_context(&ctx_a);
    let repo_peer = CourseRepository::new(&db, &peer);
    assert_eq!(repo_peer.get(course.id).await?.id, course.id);
    Ok(())
}

#[tokio::test]
async fn soft_deleted_rows_are_invisible_until_restored() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let repo = CourseRepository::new(&db, &ctx);

    let course = seed_course(&db, &ctx, "Disappearing course").await?;
    seed_course(&db, &ctx, "Other course").await?;

    repo.remove(course.id).await?;

    let visible = repo.list(false).await?;
    assert_eq!(visible.len(), 1);
    assert!(visible.iter().all(|c| c.id != course.id));
    assert!(matches!(
        repo.get(course.id).await.unwrap_err(),
        RepositoryError::NotFound(_)
    ));

    repo.restore(course.id).await?;
    let visible = repo.list(false).await?;
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().any(|c| c.id == course.id));
    Ok(())
}

#[tokio::test]
async fn remove_keeps_the_physical_row() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let repo = CourseRepository::new(&db, &ctx);

    let course = seed_course(&db, &ctx, "Kept around").await?;
    let before = course::Entity::find().count(&db).await?;

    repo.remove(course.id).await?;

    let after = course::Entity::find().count(&db).await?;
    assert_eq!(before, after);

    let row = repo
        .get_any(course.id, true)
        .await?
        .expect("row must still be fetchable with include_deleted");
    assert!(row.is_deleted);
    Ok(())
}

#[tokio::test]
async fn partial_update_touches_only_listed_fields() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let repo = CourseRepository::new(&db, &ctx);

    let created = repo
        .create(CreateCourseRequest {
            title: "Original title".to_string(),
            description: Some("Original description".to_string()),
            category_id: None,
        })
        .await?;

    // Timestamps have second resolution on some backends.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

    let updated = repo
        .update(
            created.id,
            UpdateCourseRequest {
                title: Some("New title".to_string()),
                ..Default::default()
            },
        )
        .await?;

    assert_eq!(updated.title, "New title");
    assert_eq!(updated.description.as_deref(), Some("Original description"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    Ok(())
}

#[tokio::test]
async fn update_of_out_of_scope_row_is_not_found() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx_a = member_context();
    let ctx_b = member_context();

    let course = seed_course(&db, &ctx_a, "Untouchable").await?;

    let repo_b = CourseRepository::new(&db, &ctx_b);
    let err = repo_b
        .update(
            course.id,
            UpdateCourseRequest {
                title: Some("Hijacked".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound(_)));

    // The row is untouched.
    let repo_a = CourseRepository::new(&db, &ctx_a);
    assert_eq!(repo_a.get(course.id).await?.title, "Untouchable");
    Ok(())
}

#[tokio::test]
async fn system_admin_sees_across_organizations() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx_a = member_context();
    let ctx_b = member_context();

    let course_a = seed_course(&db, &ctx_a, "Org A course").await?;
    let course_b = seed_course(&db, &ctx_b, "Org B course").await?;

    let admin = admin_context();
    let repo = CourseRepository::new(&db, &admin);

    let all = repo.list(false).await?;
    assert_eq!(all.len(), 2);
    assert_eq!(repo.get(course_a.id).await?.id, course_a.id);
    assert_eq!(repo.get(course_b.id).await?.id, course_b.id);
    Ok(())
}

#[tokio::test]
async fn system_admin_still_respects_soft_delete() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let course = seed_course(&db, &ctx, "Soft deleted").await?;

    CourseRepository::new(&db, &ctx).remove(course.id).await?;

    let admin = admin_context();
    let repo = CourseRepository::new(&db, &admin);

    assert!(matches!(
        repo.get(course.id).await.unwrap_err(),
        RepositoryError::NotFound(_)
    ));
    assert!(repo.list(false).await?.is_empty());

    // include_deleted lifts the soft-delete clause for the admin.
    assert_eq!(repo.list(true).await?.len(), 1);
    assert!(repo.get_any(course.id, true).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn insert_stamps_owning_organization() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();

    let course = seed_course(&db, &ctx, "Stamped").await?;
    assert_eq!(course.organization_id, ctx.organization_id);
    assert!(!course.is_deleted);
    Ok(())
}

#[tokio::test]
async fn dangling_reference_surfaces_as_validation() -> Result<()> {
    let db = setup_strict_test_db().await?;
    let ctx = member_context();

    // No course with this id exists, so the insert trips the foreign key.
    let err = LessonRepository::new(&db, &ctx)
        .create(
            uuid::Uuid::new_v4(),
            CreateLessonRequest {
                title: "Orphaned lesson".to_string(),
                sort_order: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn category_filter_composes_with_tenant_scope() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx_a = member_context();
    let ctx_b = member_context();
    let category = uuid::Uuid::new_v4();

    for ctx in [&ctx_a, &ctx_b] {
        let repo = CourseRepository::new(&db, ctx);
        repo.create(CreateCourseRequest {
            title: "Categorized".to_string(),
            description: None,
            category_id: Some(category),
        })
        .await?;
    }

    let found = CourseRepository::new(&db, &ctx_a)
        .find_by_category(category)
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].organization_id, ctx_a.organization_id);
    Ok(())
}
