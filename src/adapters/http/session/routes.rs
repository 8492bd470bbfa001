//! HTTP routes for the participant session.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::application::SessionHandle;

use super::handlers::{
    add_reflection_entry, advance, answer_survey, export, get_view, set_identity, set_text,
    start_timer,
};

/// Creates the session router, to be nested under `/api/session`.
pub fn session_routes(session: SessionHandle) -> Router {
    Router::new()
        .route("/", get(get_view))
        .route("/identity", post(set_identity))
        .route("/text/:field", put(set_text))
        .route("/timer/start", post(start_timer))
        .route("/reflection", post(add_reflection_entry))
        .route("/survey/:question_id", put(answer_survey))
        .route("/advance", post(advance))
        .route("/export", get(export))
        .with_state(session)
}
