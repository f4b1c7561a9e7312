use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;

use crate::modules::reports::use_cases::acknowledge_report::command::AcknowledgeReport;
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<AcknowledgeReport>, JsonRejection>,
) -> impl IntoResponse {
    let Json(command) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };
    state.acknowledge_handler.handle(command, Utc::now()).await;
    StatusCode::NO_CONTENT.into_response()
}
