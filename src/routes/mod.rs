mod auth;
mod catalog;
mod health;
mod progress;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;

use crate::auth::{extract_token, User};
use crate::response::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/signout", post(auth::signout))
        .route("/api/categories", get(catalog::list_categories))
        .route("/api/games", get(catalog::list_games))
        .route("/api/games/:id", get(catalog::get_game))
        .route("/api/games/:id/play", post(progress::play_game))
        .route("/api/games/:id/outcome", post(progress::report_outcome))
        .route("/api/progress", get(progress::get_progress))
        .with_state(state)
}

pub(crate) async fn current_user(state: &AppState, headers: &HeaderMap) -> Option<User> {
    let token = extract_token(headers);
    state.identity().current_user(token.as_deref()).await
}

pub(crate) async fn require_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<User, AppError> {
    current_user(state, headers)
        .await
        .ok_or_else(|| AppError::unauthorized("sign in required"))
}
