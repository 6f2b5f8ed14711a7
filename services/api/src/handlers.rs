//! Axum Handlers for the REST API
//!
//! This module contains the logic for handling HTTP requests for the
//! interview session. It uses `utoipa` doc comments to generate OpenAPI
//! documentation. Rejected stage transitions surface as 409 Conflict; the
//! session itself never errors on a dialogue turn (backend failures degrade
//! to the fallback responder inside the core).

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::error;
use vosce_core::session::Stage;

use crate::{
    models::{
        ErrorResponse, QuestionPayload, ScoreReportView, SessionView, StartInterviewPayload,
    },
    state::AppState,
};

pub enum ApiError {
    Conflict(String),
    InternalServerError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Conflict(message) => {
                (StatusCode::CONFLICT, Json(ErrorResponse { message })).into_response()
            }
            ApiError::InternalServerError(err) => {
                error!("Internal Server Error: {:?}", err);
                let message = "An internal server error occurred.".to_string();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { message }),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::InternalServerError(err.into())
    }
}

/// Get the current session snapshot.
#[utoipa::path(
    get,
    path = "/session",
    responses(
        (status = 200, description = "Current session state", body = SessionView)
    )
)]
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let controller = state.controller.lock().await;
    Json(SessionView::from_controller(&controller))
}

/// Confirm the case selection and start the interview.
#[utoipa::path(
    post,
    path = "/session/interview",
    request_body = StartInterviewPayload,
    responses(
        (status = 200, description = "Interview started", body = SessionView),
        (status = 409, description = "Session is not at the start screen", body = ErrorResponse)
    )
)]
pub async fn start_interview(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StartInterviewPayload>,
) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    if !controller.begin_interview(payload.case, payload.student_name) {
        return Err(ApiError::Conflict(
            "An interview can only be started from the start screen.".to_string(),
        ));
    }
    Ok(Json(SessionView::from_controller(&controller)))
}

/// Submit one question to the virtual patient.
///
/// Blank questions are ignored rather than rejected, matching the UI
/// behavior of disabling empty submissions; the returned session is simply
/// unchanged.
#[utoipa::path(
    post,
    path = "/session/questions",
    request_body = QuestionPayload,
    responses(
        (status = 200, description = "Updated session state", body = SessionView),
        (status = 409, description = "No interview is running", body = ErrorResponse)
    )
)]
pub async fn submit_question(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<QuestionPayload>,
) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    if controller.stage() != Stage::Interview {
        return Err(ApiError::Conflict(
            "Questions can only be submitted during an interview.".to_string(),
        ));
    }
    controller.submit_question(&payload.text).await;
    Ok(Json(SessionView::from_controller(&controller)))
}

/// Finish the interview and move to evaluation.
#[utoipa::path(
    post,
    path = "/session/evaluation",
    responses(
        (status = 200, description = "Evaluation report", body = ScoreReportView),
        (status = 409, description = "No interview is running", body = ErrorResponse)
    )
)]
pub async fn finish_interview(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ScoreReportView>, ApiError> {
    let mut controller = state.controller.lock().await;
    if !controller.finish_interview() {
        return Err(ApiError::Conflict(
            "There is no running interview to finish.".to_string(),
        ));
    }
    let report = controller.compute_score_report();
    Ok(Json(ScoreReportView::new(report, &controller)))
}

/// Recompute the coverage report for the current transcript.
#[utoipa::path(
    get,
    path = "/session/report",
    responses(
        (status = 200, description = "Coverage report", body = ScoreReportView)
    )
)]
pub async fn get_report(State(state): State<Arc<AppState>>) -> Json<ScoreReportView> {
    let controller = state.controller.lock().await;
    let report = controller.compute_score_report();
    Json(ScoreReportView::new(report, &controller))
}

/// Return to the start screen, clearing the transcript.
#[utoipa::path(
    post,
    path = "/session/restart",
    responses(
        (status = 200, description = "Session reset to the start screen", body = SessionView)
    )
)]
pub async fn restart(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let mut controller = state.controller.lock().await;
    controller.restart();
    Json(SessionView::from_controller(&controller))
}

/// Repeat the same case with a fresh transcript.
#[utoipa::path(
    post,
    path = "/session/repeat",
    responses(
        (status = 200, description = "Interview restarted on the same case", body = SessionView),
        (status = 409, description = "Session is not under evaluation", body = ErrorResponse)
    )
)]
pub async fn repeat_case(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionView>, ApiError> {
    let mut controller = state.controller.lock().await;
    if !controller.repeat_case() {
        return Err(ApiError::Conflict(
            "A case can only be repeated from the evaluation screen.".to_string(),
        ));
    }
    Ok(Json(SessionView::from_controller(&controller)))
}
