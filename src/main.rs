use std::sync::Arc;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use bodylab_backend_rust::auth::IdentityProvider;
use bodylab_backend_rust::config::Config;
use bodylab_backend_rust::logging;
use bodylab_backend_rust::routes;
use bodylab_backend_rust::seed;
use bodylab_backend_rust::services::completion::SchedulerConfig;
use bodylab_backend_rust::state::AppState;
use bodylab_backend_rust::workers::WorkerManager;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = logging::init_tracing(&config.log_level);

    let catalog = Arc::new(seed::builtin_catalog());
    tracing::info!(
        categories = catalog.categories().len(),
        games = catalog.game_count(),
        "catalog loaded"
    );

    let state = AppState::new(
        catalog,
        Arc::new(IdentityProvider::from_env()),
        SchedulerConfig::from_env(),
    );

    let worker_manager = match WorkerManager::new(state.sessions()).await {
        Ok(manager) => {
            if let Err(e) = manager.start().await {
                tracing::error!(error = %e, "failed to start workers");
            }
            Some(manager)
        }
        Err(e) => {
            tracing::warn!(error = %e, "worker manager not initialized");
            None
        }
    };

    let app = routes::router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr();
    tracing::info!(%addr, "bodylab backend listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    tracing::info!("HTTP server stopped, initiating graceful shutdown sequence");

    if let Some(ref manager) = worker_manager {
        manager.stop().await;
    }
    state.sessions().shutdown().await;

    tracing::info!("graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm =
            signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
