//! # Lesson API Handlers
//!
//! Lessons are nested under a course. Creation verifies the owning course
//! is in scope first, so a lesson can never be attached to another
//! tenant's course.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::lesson;
use crate::repositories::{
    CourseRepository, CreateLessonRequest, LessonRepository, UpdateLessonRequest,
};
use crate::server::AppState;
use crate::tenant::TenantContext;

/// Request payload for creating a lesson
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLessonDto {
    /// Lesson title (required, max 255 characters)
    pub title: String,
    /// Position within the course; unique per course
    pub sort_order: i32,
}

/// Request payload for partially updating a lesson
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLessonDto {
    pub title: Option<String>,
    pub sort_order: Option<i32>,
}

/// Lesson representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LessonDto {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<lesson::Model> for LessonDto {
    fn from(model: lesson::Model) -> Self {
        Self {
            id: model.id,
            course_id: model.course_id,
            title: model.title,
            sort_order: model.sort_order,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Create a lesson within a course
#[utoipa::path(
    post,
    path = "/api/v1/courses/{course_id}/lessons",
    security(("bearer_auth" = [])),
    params(("course_id" = Uuid, Path, description = "Owning course UUID")),
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created", body = LessonDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError),
        (status = 409, description = "Sort order already taken in this course", body = ApiError)
    ),
    tag = "lessons"
)]
pub async fn create_lesson(
    State(state): State<AppState>,
    context: TenantContext,
    Path(course_id): Path<Uuid>,
    Json(request): Json<CreateLessonDto>,
) -> Result<(StatusCode, Json<LessonDto>), ApiError> {
    // Scope check on the parent; 404 for other tenants' courses.
    CourseRepository::new(&state.db, &context).get(course_id).await?;

    let repo = LessonRepository::new(&state.db, &context);
    let created = repo
        .create(
            course_id,
            CreateLessonRequest {
                title: request.title,
                sort_order: request.sort_order,
            },
        )
        .await?;
    counter!("lessons_created_total").increment(1);

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List the lessons of a course in course order
#[utoipa::path(
    get,
    path = "/api/v1/courses/{course_id}/lessons",
    security(("bearer_auth" = [])),
    params(("course_id" = Uuid, Path, description = "Owning course UUID")),
    responses(
        (status = 200, description = "Lessons", body = [LessonDto]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError)
    ),
    tag = "lessons"
)]
pub async fn list_lessons(
    State(state): State<AppState>,
    context: TenantContext,
    Path(course_id): Path<Uuid>,
) -> Result<Json<Vec<LessonDto>>, ApiError> {
    CourseRepository::new(&state.db, &context).get(course_id).await?;

    let repo = LessonRepository::new(&state.db, &context);
    let lessons = repo.find_by_course(course_id).await?;
    Ok(Json(lessons.into_iter().map(Into::into).collect()))
}

/// Get a lesson by id
#[utoipa::path(
    get,
    path = "/api/v1/lessons/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lesson UUID")),
    responses(
        (status = 200, description = "Lesson", body = LessonDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError)
    ),
    tag = "lessons"
)]
pub async fn get_lesson(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<LessonDto>, ApiError> {
    let repo = LessonRepository::new(&state.db, &context);
    let found = repo.get(id).await?;
    Ok(Json(found.into()))
}

/// Partially update a lesson
#[utoipa::path(
    patch,
    path = "/api/v1/lessons/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lesson UUID")),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Updated lesson", body = LessonDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError),
        (status = 409, description = "Sort order already taken in this course", body = ApiError)
    ),
    tag = "lessons"
)]
pub async fn update_lesson(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLessonDto>,
) -> Result<Json<LessonDto>, ApiError> {
    let repo = LessonRepository::new(&state.db, &context);
    let updated = repo
        .update(
            id,
            UpdateLessonRequest {
                title: request.title,
                sort_order: request.sort_order,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}

/// Soft-delete a lesson
#[utoipa::path(
    delete,
    path = "/api/v1/lessons/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lesson UUID")),
    responses(
        (status = 204, description = "Lesson soft-deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError)
    ),
    tag = "lessons"
)]
pub async fn delete_lesson(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = LessonRepository::new(&state.db, &context);
    repo.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restore a soft-deleted lesson
#[utoipa::path(
    post,
    path = "/api/v1/lessons/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lesson UUID")),
    responses(
        (status = 200, description = "Restored lesson", body = LessonDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "No soft-deleted lesson with that id", body = ApiError)
    ),
    tag = "lessons"
)]
pub async fn restore_lesson(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<LessonDto>, ApiError> {
    let repo = LessonRepository::new(&state.db, &context);
    repo.restore(id).await?;
    let restored = repo.get(id).await?;
    Ok(Json(restored.into()))
}
