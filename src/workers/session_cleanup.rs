use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::services::session::SessionManager;

pub async fn run(sessions: Arc<SessionManager>, ttl: Duration) {
    let start = Instant::now();
    debug!("starting session cleanup cycle");

    let expired = sessions.expire_idle(ttl).await;

    info!(
        expired_sessions = expired,
        duration_secs = format!("{:.2}", start.elapsed().as_secs_f64()),
        "session cleanup completed"
    );
}
