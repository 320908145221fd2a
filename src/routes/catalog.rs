use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, GameModule, ALL_CATEGORY_ID};
use crate::response::{json_ok, AppError};
use crate::services::filter;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct CategoriesData<'a> {
    categories: &'a [Category],
    total: usize,
}

pub async fn list_categories(State(state): State<AppState>) -> Response {
    let categories = state.catalog().categories();
    json_ok(CategoriesData {
        categories,
        total: categories.len(),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct GamesQuery {
    category: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameEntry<'a> {
    #[serde(flatten)]
    game: &'a GameModule,
    completed: bool,
}

#[derive(Debug, Serialize)]
struct GamesData<'a> {
    games: Vec<GameEntry<'a>>,
    total: usize,
}

pub async fn list_games(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<GamesQuery>,
) -> Response {
    let category = query.category.as_deref().unwrap_or(ALL_CATEGORY_ID);
    let search = query.search.as_deref().unwrap_or("");
    let visible = filter::visible(state.catalog().games(), category, search);

    // Anonymous browsing is allowed; completion flags need a session.
    let completed: HashSet<String> = match super::current_user(&state, &headers).await {
        Some(user) => {
            let session = state.sessions().session_for(&user.id).await;
            session.progress().completed_ids().into_iter().collect()
        }
        None => HashSet::new(),
    };

    let games: Vec<GameEntry> = visible
        .into_iter()
        .map(|game| GameEntry {
            game,
            completed: completed.contains(&game.id),
        })
        .collect();
    let total = games.len();

    json_ok(GamesData { games, total })
}

pub async fn get_game(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.catalog().game(&id) {
        Some(game) => json_ok(game),
        None => AppError::not_found(format!("unknown game: {id}")).into_response(),
    }
}
