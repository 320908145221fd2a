#![allow(dead_code)]

pub mod auth;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod response;
pub mod routes;
pub mod seed;
pub mod services;
pub mod state;
pub mod workers;

use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::IdentityProvider;
use crate::services::completion::SchedulerConfig;
use crate::state::AppState;

pub fn create_app() -> axum::Router {
    let state = AppState::new(
        Arc::new(seed::builtin_catalog()),
        Arc::new(IdentityProvider::from_env()),
        SchedulerConfig::from_env(),
    );

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
