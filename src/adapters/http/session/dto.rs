//! Request and response bodies for the participant session API.

use serde::{Deserialize, Serialize};

use crate::domain::session::{Identity, SessionError};

/// Body of `POST /api/session/identity`.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityRequest {
    pub name: String,
    pub participant_id: String,
    #[serde(default)]
    pub cohort: Option<String>,
}

impl From<IdentityRequest> for Identity {
    fn from(req: IdentityRequest) -> Self {
        Identity::new(req.name, req.participant_id, req.cohort)
    }
}

/// Body of `PUT /api/session/text/:field`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Body of `PUT /api/session/survey/:question_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyAnswerRequest {
    pub value: i64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Error body returned for every refused request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<&SessionError> for ErrorResponse {
    fn from(err: &SessionError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.message(),
            details: err
                .field()
                .map(|field| serde_json::json!({ "field": field })),
        }
    }
}
