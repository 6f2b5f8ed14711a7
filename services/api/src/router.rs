//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST API and OpenAPI documentation.

use crate::{
    handlers,
    models::{
        ErrorResponse, QuestionPayload, ScoreReportView, SessionView, StartInterviewPayload,
        TurnView,
    },
    state::AppState,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::get_session,
        handlers::start_interview,
        handlers::submit_question,
        handlers::finish_interview,
        handlers::get_report,
        handlers::restart,
        handlers::repeat_case,
    ),
    components(
        schemas(
            SessionView,
            TurnView,
            StartInterviewPayload,
            QuestionPayload,
            ScoreReportView,
            ErrorResponse
        )
    ),
    tags(
        (name = "VOSCE API", description = "Session management for the virtual clinical interview simulator")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/session", get(handlers::get_session))
        .route("/session/interview", post(handlers::start_interview))
        .route("/session/questions", post(handlers::submit_question))
        .route("/session/evaluation", post(handlers::finish_interview))
        .route("/session/report", get(handlers::get_report))
        .route("/session/restart", post(handlers::restart))
        .route("/session/repeat", post(handlers::repeat_case))
        // Apply the state ONLY to this group of routes.
        .with_state(app_state);

    // Merge the stateful routes with the stateless Swagger UI.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
}
