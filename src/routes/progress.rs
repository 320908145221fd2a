use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::response::{json_ok, AppError};
use crate::services::completion::{LaunchSignal, LaunchState};
use crate::services::metrics::{self, ProgressSummary};
use crate::services::progress::ProgressRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayData {
    game_id: String,
    state: LaunchState,
}

pub async fn play_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let user = match super::require_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    // The store itself accepts any id; the API is where catalog membership
    // gets enforced.
    if state.catalog().game(&id).is_none() {
        return AppError::not_found(format!("unknown game: {id}")).into_response();
    }

    let session = state.sessions().session_for(&user.id).await;
    session.scheduler().schedule_play(&id);
    let launch_state = session
        .scheduler()
        .launch_state(&id)
        .unwrap_or(LaunchState::Pending);

    json_ok(PlayData {
        game_id: id,
        state: launch_state,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutcomeRequest {
    outcome: LaunchSignal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeData {
    game_id: String,
    accepted: bool,
}

pub async fn report_outcome(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<OutcomeRequest>,
) -> Response {
    let user = match super::require_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let session = state.sessions().session_for(&user.id).await;
    if !session.scheduler().report_outcome(&id, body.outcome) {
        return AppError::conflict(format!("no launch pending for game: {id}")).into_response();
    }

    json_ok(OutcomeData {
        game_id: id,
        accepted: true,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressData {
    records: Vec<ProgressRecord>,
    summary: ProgressSummary,
}

pub async fn get_progress(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = match super::require_user(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return err.into_response(),
    };

    let session = state.sessions().session_for(&user.id).await;
    let summary = metrics::summarize(session.progress(), state.catalog());

    json_ok(ProgressData {
        records: session.progress().records(),
        summary,
    })
}
