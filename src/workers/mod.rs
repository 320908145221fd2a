mod session_cleanup;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{info, warn};

use crate::services::session::SessionManager;

const DEFAULT_SESSION_TTL_MINUTES: u64 = 60;

pub struct WorkerManager {
    scheduler: Mutex<JobScheduler>,
    shutdown_tx: broadcast::Sender<()>,
    sessions: Arc<SessionManager>,
}

impl WorkerManager {
    pub async fn new(sessions: Arc<SessionManager>) -> Result<Self, WorkerError> {
        let scheduler = JobScheduler::new().await.map_err(WorkerError::Scheduler)?;
        let (shutdown_tx, _) = broadcast::channel(1);
        Ok(Self {
            scheduler: Mutex::new(scheduler),
            shutdown_tx,
            sessions,
        })
    }

    pub async fn start(&self) -> Result<(), WorkerError> {
        let enable_cleanup = std::env::var("ENABLE_SESSION_CLEANUP_WORKER")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        if !enable_cleanup {
            info!("session cleanup worker disabled");
            return Ok(());
        }

        let schedule = std::env::var("SESSION_CLEANUP_SCHEDULE")
            .unwrap_or_else(|_| "0 */10 * * * *".to_string());
        let ttl_minutes = std::env::var("SESSION_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);
        let ttl = Duration::from_secs(ttl_minutes * 60);

        let scheduler = self.scheduler.lock().await;

        let sessions = Arc::clone(&self.sessions);
        let shutdown_rx = self.shutdown_tx.subscribe();
        let job = Job::new_async(&schedule, move |_uuid, _lock| {
            let sessions = Arc::clone(&sessions);
            let mut rx = shutdown_rx.resubscribe();
            Box::pin(async move {
                tokio::select! {
                    _ = rx.recv() => {},
                    _ = session_cleanup::run(sessions, ttl) => {}
                }
            })
        })
        .map_err(WorkerError::Scheduler)?;
        scheduler.add(job).await.map_err(WorkerError::Scheduler)?;
        info!(schedule = %schedule, ttl_minutes, "session cleanup worker scheduled");

        scheduler.start().await.map_err(WorkerError::Scheduler)?;
        info!("all workers started");

        Ok(())
    }

    pub async fn stop(&self) {
        info!("stopping workers...");
        let _ = self.shutdown_tx.send(());

        let mut scheduler = self.scheduler.lock().await;
        if let Err(e) = scheduler.shutdown().await {
            warn!(error = %e, "error shutting down scheduler");
        }

        info!("workers stopped");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("scheduler error: {0}")]
    Scheduler(#[from] tokio_cron_scheduler::JobSchedulerError),
}
