use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::RwLock;

use crate::services::completion::{CompletionScheduler, SchedulerConfig};
use crate::services::progress::ProgressStore;

/// One user's live session: the progress store and the completion scheduler
/// that writes to it. Both die with the session.
pub struct Session {
    user_id: String,
    progress: Arc<ProgressStore>,
    scheduler: CompletionScheduler,
    created_at: DateTime<Utc>,
    last_active: Mutex<Instant>,
}

impl Session {
    fn new(user_id: &str, config: SchedulerConfig) -> Self {
        let progress = Arc::new(ProgressStore::new(user_id));
        let scheduler = CompletionScheduler::new(Arc::clone(&progress), config);
        Self {
            user_id: user_id.to_string(),
            progress,
            scheduler,
            created_at: Utc::now(),
            last_active: Mutex::new(Instant::now()),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn scheduler(&self) -> &CompletionScheduler {
        &self.scheduler
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn touch(&self) {
        *self.last_active.lock() = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.lock().elapsed()
    }

    /// Cancels every pending completion. No scheduled mutation outlives the
    /// session.
    pub fn close(&self) {
        self.scheduler.cancel_all();
    }
}

/// Process-wide registry of live sessions, keyed by user id. The catalog is
/// shared and read-only; progress is reachable only through the owning
/// session.
pub struct SessionManager {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
    scheduler_config: SchedulerConfig,
}

impl SessionManager {
    pub fn new(scheduler_config: SchedulerConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            scheduler_config,
        }
    }

    pub async fn session_for(&self, user_id: &str) -> Arc<Session> {
        {
            let sessions = self.sessions.read().await;
            if let Some(session) = sessions.get(user_id) {
                session.touch();
                return Arc::clone(session);
            }
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(user_id.to_string()).or_insert_with(|| {
            tracing::info!(user_id = %user_id, "session started");
            Arc::new(Session::new(user_id, self.scheduler_config))
        });
        session.touch();
        Arc::clone(session)
    }

    pub async fn end_session(&self, user_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(user_id);
        match removed {
            Some(session) => {
                session.close();
                tracing::info!(user_id = %user_id, "session ended");
                true
            }
            None => false,
        }
    }

    /// Closes and removes sessions idle past `ttl`; the cleanup worker's
    /// entry point. Returns how many were expired.
    pub async fn expire_idle(&self, ttl: Duration) -> usize {
        let expired: Vec<Arc<Session>> = {
            let mut sessions = self.sessions.write().await;
            let stale: Vec<String> = sessions
                .iter()
                .filter(|(_, session)| session.idle_for() >= ttl)
                .map(|(user_id, _)| user_id.clone())
                .collect();
            stale
                .iter()
                .filter_map(|user_id| sessions.remove(user_id))
                .collect()
        };

        for session in &expired {
            session.close();
            tracing::debug!(user_id = %session.user_id(), "idle session expired");
        }
        expired.len()
    }

    pub async fn shutdown(&self) {
        let drained: Vec<Arc<Session>> = self
            .sessions
            .write()
            .await
            .drain()
            .map(|(_, session)| session)
            .collect();
        for session in &drained {
            session.close();
        }
        if !drained.is_empty() {
            tracing::info!(sessions = drained.len(), "all sessions closed");
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
