use std::sync::Arc;
use std::time::Instant;

use crate::auth::IdentityProvider;
use crate::catalog::Catalog;
use crate::services::completion::SchedulerConfig;
use crate::services::session::SessionManager;

/// Everything the route layer needs: the read-only catalog, the session
/// registry, and the identity boundary. All constructor-injected; nothing
/// global.
#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    catalog: Arc<Catalog>,
    sessions: Arc<SessionManager>,
    identity: Arc<IdentityProvider>,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        identity: Arc<IdentityProvider>,
        scheduler_config: SchedulerConfig,
    ) -> Self {
        Self {
            started_at: Instant::now(),
            catalog,
            sessions: Arc::new(SessionManager::new(scheduler_config)),
            identity,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sessions(&self) -> Arc<SessionManager> {
        Arc::clone(&self.sessions)
    }

    pub fn identity(&self) -> &IdentityProvider {
        &self.identity
    }
}
