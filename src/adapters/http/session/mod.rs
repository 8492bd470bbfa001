//! Participant session HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::{ErrorResponse, HealthResponse, IdentityRequest, SurveyAnswerRequest, TextRequest};
pub use handlers::health;
pub use routes::session_routes;
