//! # Server Configuration
//!
//! Router assembly and server bootstrap for the LMS API. Everything under
//! `/api/v1` sits behind the JWT middleware; `/`, `/healthz`, and the
//! OpenAPI docs stay public.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::auth_middleware;
use crate::config::AppConfig;
use crate::handlers;
use crate::telemetry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
pub fn create_app(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/organizations",
            post(handlers::organizations::create_organization)
                .get(handlers::organizations::list_organizations),
        )
        .route(
            "/organizations/{id}",
            get(handlers::organizations::get_organization),
        )
        .route(
            "/courses",
            post(handlers::courses::create_course).get(handlers::courses::list_courses),
        )
        .route(
            "/courses/{id}",
            get(handlers::courses::get_course)
                .patch(handlers::courses::update_course)
                .delete(handlers::courses::delete_course),
        )
        .route("/courses/{id}/restore", post(handlers::courses::restore_course))
        .route(
            "/courses/{course_id}/lessons",
            post(handlers::lessons::create_lesson).get(handlers::lessons::list_lessons),
        )
        .route(
            "/lessons/{id}",
            get(handlers::lessons::get_lesson)
                .patch(handlers::lessons::update_lesson)
                .delete(handlers::lessons::delete_lesson),
        )
        .route("/lessons/{id}/restore", post(handlers::lessons::restore_lesson))
        .route(
            "/lessons/{lesson_id}/items",
            post(handlers::lesson_items::create_lesson_item)
                .get(handlers::lesson_items::list_lesson_items),
        )
        .route(
            "/lesson-items/{id}",
            get(handlers::lesson_items::get_lesson_item)
                .patch(handlers::lesson_items::update_lesson_item)
                .delete(handlers::lesson_items::delete_lesson_item),
        )
        .route(
            "/lesson-items/{id}/complete",
            post(handlers::enrollments::mark_completed),
        )
        .route("/lesson-items/{id}/quiz", post(handlers::quiz::submit_quiz))
        .route(
            "/enrollments",
            post(handlers::enrollments::enroll).get(handlers::enrollments::list_enrollments),
        )
        .route(
            "/enrollments/{id}/visit",
            post(handlers::enrollments::record_visit),
        )
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state.config),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .nest("/api/v1", api)
        .layer(middleware::from_fn(telemetry::trace_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;
    let profile = config.profile.clone();

    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, profile, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz,
        crate::handlers::organizations::create_organization,
        crate::handlers::organizations::list_organizations,
        crate::handlers::organizations::get_organization,
        crate::handlers::courses::create_course,
        crate::handlers::courses::list_courses,
        crate::handlers::courses::get_course,
        crate::handlers::courses::update_course,
        crate::handlers::courses::delete_course,
        crate::handlers::courses::restore_course,
        crate::handlers::lessons::create_lesson,
        crate::handlers::lessons::list_lessons,
        crate::handlers::lessons::get_lesson,
        crate::handlers::lessons::update_lesson,
        crate::handlers::lessons::delete_lesson,
        crate::handlers::lessons::restore_lesson,
        crate::handlers::lesson_items::create_lesson_item,
        crate::handlers::lesson_items::list_lesson_items,
        crate::handlers::lesson_items::get_lesson_item,
        crate::handlers::lesson_items::update_lesson_item,
        crate::handlers::lesson_items::delete_lesson_item,
        crate::handlers::enrollments::enroll,
        crate::handlers::enrollments::list_enrollments,
        crate::handlers::enrollments::record_visit,
        crate::handlers::enrollments::mark_completed,
        crate::handlers::quiz::submit_quiz,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::handlers::organizations::CreateOrganizationDto,
            crate::handlers::organizations::OrganizationDto,
            crate::handlers::courses::CreateCourseDto,
            crate::handlers::courses::UpdateCourseDto,
            crate::handlers::courses::CourseDto,
            crate::handlers::lessons::CreateLessonDto,
            crate::handlers::lessons::UpdateLessonDto,
            crate::handlers::lessons::LessonDto,
            crate::handlers::lesson_items::CreateLessonItemDto,
            crate::handlers::lesson_items::UpdateLessonItemDto,
            crate::handlers::lesson_items::LessonItemDto,
            crate::handlers::enrollments::EnrollDto,
            crate::handlers::enrollments::RecordVisitDto,
            crate::handlers::enrollments::EnrollmentDto,
            crate::handlers::enrollments::ProgressDto,
            crate::handlers::quiz::SubmitQuizDto,
            crate::quiz::SubmittedAnswer,
            crate::quiz::QuestionResult,
            crate::quiz::QuizEvaluation,
        )
    ),
    info(
        title = "LMS API",
        description = "Multi-tenant learning management API",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
