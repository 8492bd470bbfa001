//! HTTP handlers for the participant session.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{SessionCommand, SessionHandle};
use crate::domain::session::{ReflectionDraft, SessionError, TextField};

use super::dto::{ErrorResponse, HealthResponse, IdentityRequest, SurveyAnswerRequest, TextRequest};

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /api/session - Current render view
pub async fn get_view(State(session): State<SessionHandle>) -> Response {
    match session.view().await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_session_error(e),
    }
}

/// POST /api/session/identity - Store participant details
pub async fn set_identity(
    State(session): State<SessionHandle>,
    Json(req): Json<IdentityRequest>,
) -> Response {
    execute(&session, SessionCommand::SetIdentity(req.into())).await
}

/// PUT /api/session/text/:field - Overwrite a free-text field
pub async fn set_text(
    State(session): State<SessionHandle>,
    Path(field): Path<String>,
    Json(req): Json<TextRequest>,
) -> Response {
    let field = match field.parse::<TextField>() {
        Ok(field) => field,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    execute(&session, SessionCommand::SetText { field, text: req.text }).await
}

/// POST /api/session/timer/start - Start the current phase's countdown
pub async fn start_timer(State(session): State<SessionHandle>) -> Response {
    execute(&session, SessionCommand::StartTimer).await
}

/// POST /api/session/reflection - Append a reflection entry
pub async fn add_reflection_entry(
    State(session): State<SessionHandle>,
    Json(draft): Json<ReflectionDraft>,
) -> Response {
    execute(&session, SessionCommand::AddReflectionEntry(draft)).await
}

/// PUT /api/session/survey/:question_id - Answer a survey question
pub async fn answer_survey(
    State(session): State<SessionHandle>,
    Path(question_id): Path<String>,
    Json(req): Json<SurveyAnswerRequest>,
) -> Response {
    execute(
        &session,
        SessionCommand::AnswerSurvey {
            question_id,
            value: req.value,
        },
    )
    .await
}

/// POST /api/session/advance - Leave the current phase
pub async fn advance(State(session): State<SessionHandle>) -> Response {
    execute(&session, SessionCommand::Advance).await
}

/// GET /api/session/export - Download the finished session
pub async fn export(State(session): State<SessionHandle>) -> Response {
    match session.export().await {
        Ok(workbook) => {
            let disposition = format!("attachment; filename=\"{}\"", workbook.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, workbook.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                workbook.content,
            )
                .into_response()
        }
        Err(e) => handle_session_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

async fn execute(session: &SessionHandle, command: SessionCommand) -> Response {
    match session.execute(command).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_session_error(e),
    }
}

pub(super) fn status_for(error: &SessionError) -> StatusCode {
    match error {
        SessionError::ValidationFailed { .. } | SessionError::OutOfRange { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SessionError::UnknownQuestion(_) => StatusCode::NOT_FOUND,
        SessionError::FieldLocked { .. }
        | SessionError::InvalidState(_)
        | SessionError::Finalized => StatusCode::CONFLICT,
        SessionError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        SessionError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn handle_session_error(error: SessionError) -> Response {
    (status_for(&error), Json(ErrorResponse::from(&error))).into_response()
}
