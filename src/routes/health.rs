use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::response::json_ok;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthData {
    status: &'static str,
    uptime_seconds: u64,
    sessions: usize,
}

pub async fn health(State(state): State<AppState>) -> Response {
    let sessions = state.sessions().session_count().await;
    json_ok(HealthData {
        status: "ok",
        uptime_seconds: state.uptime_seconds(),
        sessions,
    })
}
