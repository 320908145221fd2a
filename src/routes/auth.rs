use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::auth::extract_token;
use crate::response::{json_ok, AppError};
use crate::state::AppState;

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match super::current_user(&state, &headers).await {
        Some(user) => json_ok(user),
        None => AppError::unauthorized("not signed in").into_response(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignoutData {
    signed_out: bool,
}

pub async fn signout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let token = extract_token(&headers);
    let user = state.identity().current_user(token.as_deref()).await;

    // Sign-out failure is the caller's concern; the session still ends.
    if let Err(err) = state.identity().sign_out(token.as_deref()).await {
        tracing::warn!(error = %err, "identity sign-out failed");
    }

    if let Some(user) = user {
        state.sessions().end_session(&user.id).await;
    }

    json_ok(SignoutData { signed_out: true })
}
