//! # Enrollment and Progress API Handlers
//!
//! Enrollment always belongs to the acting user; the course is scope
//! checked first so cross-tenant course ids read as 404. A repeat
//! enrollment surfaces as 409 from the storage uniqueness constraint.

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
use crate::models::{enrollment, lesson_item_progress};
use crate::repositories::{
    CourseRepository, EnrollmentRepository, LessonItemRepository, ProgressRepository,
};
use crate::server::AppState;
use crate::tenant::TenantContext;

/// Request payload for enrolling into a course
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollDto {
    pub course_id: Uuid,
}

/// Request payload for recording a lesson item visit
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RecordVisitDto {
    pub lesson_item_id: Uuid,
    /// Seconds to add to the cumulative completed duration
    #[serde(default)]
    pub duration_seconds: i64,
}

/// Enrollment representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub last_visited_lesson_item_id: Option<Uuid>,
    pub completed_duration_seconds: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<enrollment::Model> for EnrollmentDto {
    fn from(model: enrollment::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            last_visited_lesson_item_id: model.last_visited_lesson_item_id,
            completed_duration_seconds: model.completed_duration_seconds,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Progress representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgressDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub lesson_item_id: Uuid,
    pub is_completed: bool,
}

impl From<lesson_item_progress::Model> for ProgressDto {
    fn from(model: lesson_item_progress::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            lesson_item_id: model.lesson_item_id,
            is_completed: model.is_completed,
        }
    }
}

/// Enroll the acting user into a course
#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    security(("bearer_auth" = [])),
    request_body = EnrollDto,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError),
        (status = 409, description = "Already enrolled", body = ApiError)
    ),
    tag = "enrollments"
)]
pub async fn enroll(
    State(state): State<AppState>,
    context: TenantContext,
    Json(request): Json<EnrollDto>,
) -> Result<(StatusCode, Json<EnrollmentDto>), ApiError> {
    CourseRepository::new(&state.db, &context)
        .get(request.course_id)
        .await?;

    let repo = EnrollmentRepository::new(&state.db, &context);
    let created = repo.enroll(context.user_id, request.course_id).await?;
    counter!("enrollments_created_total").increment(1);

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List the acting user's enrollments
#[utoipa::path(
    get,
    path = "/api/v1/enrollments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Enrollments of the acting user", body = [EnrollmentDto]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "enrollments"
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    context: TenantContext,
) -> Result<Json<Vec<EnrollmentDto>>, ApiError> {
    let repo = EnrollmentRepository::new(&state.db, &context);
    let enrollments = repo.find_for_user(context.user_id).await?;
    Ok(Json(enrollments.into_iter().map(Into::into).collect()))
}

/// Record a lesson item visit against an enrollment
#[utoipa::path(
    post,
    path = "/api/v1/enrollments/{id}/visit",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Enrollment UUID")),
    request_body = RecordVisitDto,
    responses(
        (status = 200, description = "Updated enrollment", body = EnrollmentDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Enrollment or lesson item not found", body = ApiError)
    ),
    tag = "enrollments"
)]
pub async fn record_visit(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordVisitDto>,
) -> Result<Json<EnrollmentDto>, ApiError> {
    LessonItemRepository::new(&state.db, &context)
        .get(request.lesson_item_id)
        .await?;

    let repo = EnrollmentRepository::new(&state.db, &context);
    let updated = repo
        .record_visit(id, request.lesson_item_id, request.duration_seconds)
        .await?;
    Ok(Json(updated.into()))
}

/// Mark a lesson item completed for the acting user
#[utoipa::path(
    post,
    path = "/api/v1/lesson-items/{id}/complete",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lesson item UUID")),
    responses(
        (status = 200, description = "Progress row", body = ProgressDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson item not found", body = ApiError)
    ),
    tag = "progress"
)]
pub async fn mark_completed(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<ProgressDto>, ApiError> {
    LessonItemRepository::new(&state.db, &context).get(id).await?;

    let repo = ProgressRepository::new(&state.db, &context);
    let progress = repo.mark_completed(context.user_id, id).await?;
    counter!("lesson_items_completed_total").increment(1);

    Ok(Json(progress.into()))
}
