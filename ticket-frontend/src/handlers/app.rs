use askama::Template;
use axum::{extract::State, response::IntoResponse, Json};
use chrono::Utc;
use serde_json::json;

use crate::startup::AppState;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

/// Static landing page.
pub async fn index() -> impl IntoResponse {
    IndexTemplate {}
}

/// Liveness probe. Stateless: reports the clock and the active environment,
/// never touches the database.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "OK",
        "message": "Frontend is running",
        "timestamp": Utc::now().to_rfc3339(),
        "environment": state.environment,
    }))
}
