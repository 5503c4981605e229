//! # Course API Handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::course;
use crate::repositories::{CourseRepository, CreateCourseRequest, UpdateCourseRequest};
use crate::server::AppState;
use crate::tenant::TenantContext;

/// Request payload for creating a course
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCourseDto {
    /// Course title (required, max 255 characters)
    #[schema(example = "Rust for Backend Engineers")]
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Request payload for partially updating a course
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCourseDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Query parameters for listing courses
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListCoursesQuery {
    /// Restrict to one category
    pub category_id: Option<Uuid>,
}

/// Course representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<course::Model> for CourseDto {
    fn from(model: course::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            category_id: model.category_id,
            organization_id: model.organization_id,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Create a course
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    security(("bearer_auth" = [])),
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = CourseDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    context: TenantContext,
    Json(request): Json<CreateCourseDto>,
) -> Result<(StatusCode, Json<CourseDto>), ApiError> {
    let repo = CourseRepository::new(&state.db, &context);
    let created = repo
        .create(CreateCourseRequest {
            title: request.title,
            description: request.description,
            category_id: request.category_id,
        })
        .await?;
    counter!("courses_created_total").increment(1);

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List courses, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    security(("bearer_auth" = [])),
    params(ListCoursesQuery),
    responses(
        (status = 200, description = "Courses visible to the caller", body = [CourseDto]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError)
    ),
    tag = "courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
    context: TenantContext,
    Query(query): Query<ListCoursesQuery>,
) -> Result<Json<Vec<CourseDto>>, ApiError> {
    let repo = CourseRepository::new(&state.db, &context);
    let courses = match query.category_id {
        Some(category_id) => repo.find_by_category(category_id).await?,
        None => repo.list(false).await?,
    };
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

/// Get a course by id
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Course UUID")),
    responses(
        (status = 200, description = "Course", body = CourseDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError)
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDto>, ApiError> {
    let repo = CourseRepository::new(&state.db, &context);
    let found = repo.get(id).await?;
    Ok(Json(found.into()))
}

/// Partially update a course
#[utoipa::path(
    patch,
    path = "/api/v1/courses/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Course UUID")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Updated course", body = CourseDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError)
    ),
    tag = "courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCourseDto>,
) -> Result<Json<CourseDto>, ApiError> {
    let repo = CourseRepository::new(&state.db, &context);
    let updated = repo
        .update(
            id,
            UpdateCourseRequest {
                title: request.title,
                description: request.description,
                category_id: request.category_id,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}

/// Soft-delete a course
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Course UUID")),
    responses(
        (status = 204, description = "Course soft-deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Course not found", body = ApiError)
    ),
    tag = "courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = CourseRepository::new(&state.db, &context);
    repo.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Restore a soft-deleted course
#[utoipa::path(
    post,
    path = "/api/v1/courses/{id}/restore",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Course UUID")),
    responses(
        (status = 200, description = "Restored course", body = CourseDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "No soft-deleted course with that id", body = ApiError)
    ),
    tag = "courses"
)]
pub async fn restore_course(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseDto>, ApiError> {
    let repo = CourseRepository::new(&state.db, &context);
    repo.restore(id).await?;
    let restored = repo.get(id).await?;
    Ok(Json(restored.into()))
}
