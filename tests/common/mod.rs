use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use bodylab_backend_rust::auth::IdentityProvider;
use bodylab_backend_rust::routes;
use bodylab_backend_rust::seed;
use bodylab_backend_rust::services::completion::SchedulerConfig;
use bodylab_backend_rust::state::AppState;

fn test_scheduler_config() -> SchedulerConfig {
    // Completions are driven by explicit outcome reports in tests.
    SchedulerConfig {
        simulate_after: None,
        signal_timeout: Duration::from_secs(600),
    }
}

pub fn create_test_app() -> Router {
    let state = AppState::new(
        Arc::new(seed::builtin_catalog()),
        Arc::new(IdentityProvider::mock()),
        test_scheduler_config(),
    );
    routes::router(state)
}

pub fn unauthenticated_app() -> Router {
    let state = AppState::new(
        Arc::new(seed::builtin_catalog()),
        Arc::new(IdentityProvider::unconfigured()),
        test_scheduler_config(),
    );
    routes::router(state)
}
