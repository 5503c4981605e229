//! # Lesson Item API Handlers
//!
//! Lesson items are nested under a lesson; the parent lesson is scope
//! checked before any write.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::lesson_item;
use crate::repositories::{
    CreateLessonItemRequest, LessonItemRepository, LessonRepository, UpdateLessonItemRequest,
};
use crate::server::AppState;
use crate::tenant::TenantContext;

/// Request payload for creating a lesson item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLessonItemDto {
    pub title: String,
    /// One of `video`, `text`, `question`
    #[schema(example = "video")]
    pub item_type: String,
    /// Type-dependent payload; required for `question` items
    pub content: Option<JsonValue>,
    pub sort_order: i32,
    pub duration_seconds: Option<i64>,
}

/// Request payload for partially updating a lesson item
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLessonItemDto {
    pub title: Option<String>,
    pub content: Option<JsonValue>,
    pub sort_order: Option<i32>,
    pub duration_seconds: Option<i64>,
}

/// Lesson item representation returned by the API
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LessonItemDto {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub title: String,
    pub item_type: String,
    pub content: Option<JsonValue>,
    pub sort_order: i32,
    pub duration_seconds: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<lesson_item::Model> for LessonItemDto {
    fn from(model: lesson_item::Model) -> Self {
        Self {
            id: model.id,
            lesson_id: model.lesson_id,
            title: model.title,
            item_type: model.item_type,
            content: model.content,
            sort_order: model.sort_order,
            duration_seconds: model.duration_seconds,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

/// Create a lesson item within a lesson
#[utoipa::path(
    post,
    path = "/api/v1/lessons/{lesson_id}/items",
    security(("bearer_auth" = [])),
    params(("lesson_id" = Uuid, Path, description = "Owning lesson UUID")),
    request_body = CreateLessonItemDto,
    responses(
        (status = 201, description = "Lesson item created", body = LessonItemDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError)
    ),
    tag = "lesson-items"
)]
pub async fn create_lesson_item(
    State(state): State<AppState>,
    context: TenantContext,
    Path(lesson_id): Path<Uuid>,
    Json(request): Json<CreateLessonItemDto>,
) -> Result<(StatusCode, Json<LessonItemDto>), ApiError> {
    LessonRepository::new(&state.db, &context).get(lesson_id).await?;

    let repo = LessonItemRepository::new(&state.db, &context);
    let created = repo
        .create(
            lesson_id,
            CreateLessonItemRequest {
                title: request.title,
                item_type: request.item_type,
                content: request.content,
                sort_order: request.sort_order,
                duration_seconds: request.duration_seconds,
            },
        )
        .await?;
    counter!("lesson_items_created_total").increment(1);

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List the items of a lesson in lesson order
#[utoipa::path(
    get,
    path = "/api/v1/lessons/{lesson_id}/items",
    security(("bearer_auth" = [])),
    params(("lesson_id" = Uuid, Path, description = "Owning lesson UUID")),
    responses(
        (status = 200, description = "Lesson items", body = [LessonItemDto]),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson not found", body = ApiError)
    ),
    tag = "lesson-items"
)]
pub async fn list_lesson_items(
    State(state): State<AppState>,
    context: TenantContext,
    Path(lesson_id): Path<Uuid>,
) -> Result<Json<Vec<LessonItemDto>>, ApiError> {
    LessonRepository::new(&state.db, &context).get(lesson_id).await?;

    let repo = LessonItemRepository::new(&state.db, &context);
    let items = repo.find_by_lesson(lesson_id).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// Get a lesson item by id
#[utoipa::path(
    get,
    path = "/api/v1/lesson-items/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lesson item UUID")),
    responses(
        (status = 200, description = "Lesson item", body = LessonItemDto),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson item not found", body = ApiError)
    ),
    tag = "lesson-items"
)]
pub async fn get_lesson_item(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Json<LessonItemDto>, ApiError> {
    let repo = LessonItemRepository::new(&state.db, &context);
    let found = repo.get(id).await?;
    Ok(Json(found.into()))
}

/// Partially update a lesson item
#[utoipa::path(
    patch,
    path = "/api/v1/lesson-items/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lesson item UUID")),
    request_body = UpdateLessonItemDto,
    responses(
        (status = 200, description = "Updated lesson item", body = LessonItemDto),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson item not found", body = ApiError)
    ),
    tag = "lesson-items"
)]
pub async fn update_lesson_item(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateLessonItemDto>,
) -> Result<Json<LessonItemDto>, ApiError> {
    let repo = LessonItemRepository::new(&state.db, &context);
    let updated = repo
        .update(
            id,
            UpdateLessonItemRequest {
                title: request.title,
                content: request.content,
                sort_order: request.sort_order,
                duration_seconds: request.duration_seconds,
            },
        )
        .await?;
    Ok(Json(updated.into()))
}

/// Soft-delete a lesson item
#[utoipa::path(
    delete,
    path = "/api/v1/lesson-items/{id}",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Lesson item UUID")),
    responses(
        (status = 204, description = "Lesson item soft-deleted"),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson item not found", body = ApiError)
    ),
    tag = "lesson-items"
)]
pub async fn delete_lesson_item(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = LessonItemRepository::new(&state.db, &context);
    repo.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
