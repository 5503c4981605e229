//! Enrollment, progress, and unit-of-work behavior.

use anyhow::Result;

use lms::error::RepositoryError;
use lms::repositories::{
    CreateLessonRequest, EnrollmentRepository, LessonRepository, ProgressRepository, UnitOfWork,
};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{member_context, seed_course, setup_test_db};

#[tokio::test]
async fn double_enrollment_is_a_conflict() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let course = seed_course(&db, &ctx, "Popular course").await?;

    let repo = EnrollmentRepository::new(&db, &ctx);
    let first = repo.enroll(ctx.user_id, course.id).await?;
    assert_eq!(first.completed_duration_seconds, 0);

    let err = repo.enroll(ctx.user_id, course.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict("enrollment")));

    // Only one row exists for the pair.
    let enrollments = repo.find_for_user(ctx.user_id).await?;
    assert_eq!(enrollments.len(), 1);
    Ok(())
}

#[tokio::test]
async fn different_users_can_enroll_in_the_same_course() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let other = test_utils::same_org_context(&ctx);
    let course = seed_course(&db, &ctx, "Shared course").await?;

    EnrollmentRepository::new(&db, &ctx)
        .enroll(ctx.user_id, course.id)
        .await?;
    EnrollmentRepository::new(&db, &other)
        .enroll(other.user_id, course.id)
        .await?;
    Ok(())
}

#[tokio::test]
async fn record_visit_accumulates_duration() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let course = seed_course(&db, &ctx, "Tracked course").await?;

    let repo = EnrollmentRepository::new(&db, &ctx);
    let enrollment = repo.enroll(ctx.user_id, course.id).await?;

    let item_a = uuid::Uuid::new_v4();
    let item_b = uuid::Uuid::new_v4();

    let after_first = repo.record_visit(enrollment.id, item_a, 120).await?;
    assert_eq!(after_first.completed_duration_seconds, 120);
    assert_eq!(after_first.last_visited_lesson_item_id, Some(item_a));

    let after_second = repo.record_visit(enrollment.id, item_b, 30).await?;
    assert_eq!(after_second.completed_duration_seconds, 150);
    assert_eq!(after_second.last_visited_lesson_item_id, Some(item_b));
    Ok(())
}

#[tokio::test]
async fn record_visit_rejects_negative_duration() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let course = seed_course(&db, &ctx, "Course").await?;

    let repo = EnrollmentRepository::new(&db, &ctx);
    let enrollment = repo.enroll(ctx.user_id, course.id).await?;

    let err = repo
        .record_visit(enrollment.id, uuid::Uuid::new_v4(), -5)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn mark_completed_is_idempotent() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let item_id = uuid::Uuid::new_v4();

    let repo = ProgressRepository::new(&db, &ctx);
    let first = repo.mark_completed(ctx.user_id, item_id).await?;
    assert!(first.is_completed);

    let second = repo.mark_completed(ctx.user_id, item_id).await?;
    assert_eq!(second.id, first.id);

    let rows = repo.find_for_user(ctx.user_id).await?;
    assert_eq!(rows.len(), 1);
    Ok(())
}

#[tokio::test]
async fn progress_is_scoped_per_user() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let other = test_utils::same_org_context(&ctx);
    let item_id = uuid::Uuid::new_v4();

    ProgressRepository::new(&db, &ctx)
        .mark_completed(ctx.user_id, item_id)
        .await?;
    ProgressRepository::new(&db, &other)
        .mark_completed(other.user_id, item_id)
        .await?;

    let mine = ProgressRepository::new(&db, &ctx)
        .find_for_user(ctx.user_id)
        .await?;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user_id, ctx.user_id);
    Ok(())
}

#[tokio::test]
async fn unit_of_work_counts_committed_writes() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let course = seed_course(&db, &ctx, "Batched course").await?;

    let uow = UnitOfWork::begin(&db).await?;
    let lessons = LessonRepository::in_unit_of_work(&uow, &ctx);
    lessons
        .create(
            course.id,
            CreateLessonRequest {
                title: "Intro".to_string(),
                sort_order: 0,
            },
        )
        .await?;
    lessons
        .create(
            course.id,
            CreateLessonRequest {
                title: "Basics".to_string(),
                sort_order: 1,
            },
        )
        .await?;

    let written = uow.save_changes().await?;
    assert_eq!(written, 2);

    let visible = LessonRepository::new(&db, &ctx)
        .find_by_course(course.id)
        .await?;
    assert_eq!(visible.len(), 2);
    Ok(())
}

#[tokio::test]
async fn discarded_unit_of_work_leaves_no_rows() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let course = seed_course(&db, &ctx, "Rolled back course").await?;

    let uow = UnitOfWork::begin(&db).await?;
    LessonRepository::in_unit_of_work(&uow, &ctx)
        .create(
            course.id,
            CreateLessonRequest {
                title: "Never lands".to_string(),
                sort_order: 0,
            },
        )
        .await?;
    uow.discard().await?;

    let visible = LessonRepository::new(&db, &ctx)
        .find_by_course(course.id)
        .await?;
    assert!(visible.is_empty());
    Ok(())
}

#[tokio::test]
async fn lesson_sort_order_is_unique_per_course() -> Result<()> {
    let db = setup_test_db().await?;
    let ctx = member_context();
    let course_a = seed_course(&db, &ctx, "Course A").await?;
    let course_b = seed_course(&db, &ctx, "Course B").await?;

    let repo = LessonRepository::new(&db, &ctx);
    repo.create(
        course_a.id,
        CreateLessonRequest {
            title: "First".to_string(),
            sort_order: 0,
        },
    )
    .await?;

    // Same slot in another course is fine.
    repo.create(
        course_b.id,
        CreateLessonRequest {
            title: "First elsewhere".to_string(),
            sort_order: 0,
        },
    )
    .await?;

    let err = repo
        .create(
            course_a.id,
            CreateLessonRequest {
                title: "Duplicate slot".to_string(),
                sort_order: 0,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict("lesson")));
    Ok(())
}
