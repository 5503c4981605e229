//! # Quiz API Handlers
//!
//! Submits answers against a `question` lesson item and returns the
//! evaluation. Completion is recorded for the submitting user as a side
//! effect; scoring itself is the pure [`crate::quiz::evaluate`].

use axum::{
    extract::{Path, State},
    response::Json,
};
use metrics::counter;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ApiError, RepositoryError};
use crate::models::lesson_item::ITEM_TYPE_QUESTION;
use crate::quiz::{self, AnswerKey, QuizEvaluation, SubmittedAnswer};
use crate::repositories::{LessonItemRepository, ProgressRepository};
use crate::server::AppState;
use crate::tenant::TenantContext;

/// Request payload for submitting quiz answers
#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitQuizDto {
    pub answers: Vec<SubmittedAnswer>,
}

/// Submit quiz answers for a question lesson item
#[utoipa::path(
    post,
    path = "/api/v1/lesson-items/{id}/quiz",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Question lesson item UUID")),
    request_body = SubmitQuizDto,
    responses(
        (status = 200, description = "Evaluation result", body = QuizEvaluation),
        (status = 400, description = "Not a question item or malformed key", body = ApiError),
        (status = 401, description = "Missing or invalid bearer token", body = ApiError),
        (status = 404, description = "Lesson item not found", body = ApiError)
    ),
    tag = "quiz"
)]
pub async fn submit_quiz(
    State(state): State<AppState>,
    context: TenantContext,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitQuizDto>,
) -> Result<Json<QuizEvaluation>, ApiError> {
    let item = LessonItemRepository::new(&state.db, &context).get(id).await?;

    if item.item_type != ITEM_TYPE_QUESTION {
        return Err(
            RepositoryError::validation("lesson item does not accept quiz submissions").into(),
        );
    }
    let content = item
        .content
        .as_ref()
        .ok_or_else(|| RepositoryError::validation("question item carries no answer key"))?;
    let key = AnswerKey::from_content(content)?;

    let evaluation = quiz::evaluate(&key, &request.answers);

    ProgressRepository::new(&state.db, &context)
        .mark_completed(context.user_id, id)
        .await?;
    counter!("quiz_submissions_total").increment(1);

    Ok(Json(evaluation))
}
