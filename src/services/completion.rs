use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, oneshot};
use tokio::task::JoinHandle;

use crate::services::progress::ProgressStore;

const DEFAULT_SIMULATED_DELAY_MS: u64 = 1000;
const DEFAULT_SIGNAL_TIMEOUT_MS: u64 = 600_000;

/// What the activity content reports back for a launched game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchSignal {
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchState {
    Pending,
    Completed,
    Failed,
}

impl LaunchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SchedulerConfig {
    /// When set, a pending launch receives a synthetic `Completed` signal
    /// after this delay. Stands in for real content integration; `None`
    /// leaves completion entirely to reported outcomes.
    pub simulate_after: Option<Duration>,
    /// A launch with no signal inside this window is marked failed.
    pub signal_timeout: Duration,
}

impl SchedulerConfig {
    pub fn from_env() -> Self {
        let simulate_enabled = std::env::var("ENABLE_SIMULATED_COMPLETION")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        let delay_ms = std::env::var("SIMULATED_COMPLETION_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SIMULATED_DELAY_MS);

        let timeout_ms = std::env::var("COMPLETION_SIGNAL_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SIGNAL_TIMEOUT_MS);

        Self {
            simulate_after: simulate_enabled.then(|| Duration::from_millis(delay_ms)),
            signal_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            simulate_after: Some(Duration::from_millis(DEFAULT_SIMULATED_DELAY_MS)),
            signal_timeout: Duration::from_millis(DEFAULT_SIGNAL_TIMEOUT_MS),
        }
    }
}

struct PendingLaunch {
    generation: u64,
    signal_tx: oneshot::Sender<LaunchSignal>,
    task: JoinHandle<()>,
}

struct SchedulerInner {
    config: SchedulerConfig,
    progress: Arc<ProgressStore>,
    pending: Mutex<HashMap<String, PendingLaunch>>,
    outcomes: Mutex<HashMap<String, LaunchState>>,
    next_generation: AtomicU64,
    shutdown_tx: broadcast::Sender<()>,
}

/// Tracks the launch → completion lifecycle of play actions for one session.
///
/// `schedule_play` returns immediately; the transition to Completed happens
/// on the runtime once the content signal arrives (or the simulated signal
/// fires), and to Failed when the signal is `Abandoned` or never comes.
/// Pending launches are coalesced per game id and cancelled wholesale when
/// the owning session is torn down.
pub struct CompletionScheduler {
    inner: Arc<SchedulerInner>,
}

impl CompletionScheduler {
    pub fn new(progress: Arc<ProgressStore>, config: SchedulerConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            inner: Arc::new(SchedulerInner {
                config,
                progress,
                pending: Mutex::new(HashMap::new()),
                outcomes: Mutex::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                shutdown_tx,
            }),
        }
    }

    /// Registers a pending launch for `game_id` and returns immediately.
    /// A launch already pending for the same id is reused, not duplicated.
    pub fn schedule_play(&self, game_id: &str) {
        let mut pending = self.inner.pending.lock();
        if pending.contains_key(game_id) {
            tracing::debug!(game_id = %game_id, "launch already pending, coalescing");
            return;
        }

        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let (signal_tx, signal_rx) = oneshot::channel();
        let shutdown_rx = self.inner.shutdown_tx.subscribe();
        let task = tokio::spawn(run_launch(
            Arc::clone(&self.inner),
            game_id.to_string(),
            generation,
            signal_rx,
            shutdown_rx,
        ));
        pending.insert(
            game_id.to_string(),
            PendingLaunch {
                generation,
                signal_tx,
                task,
            },
        );
        tracing::debug!(game_id = %game_id, "play scheduled");
    }

    /// Delivers the content-reported outcome for a pending launch. Returns
    /// `false` when nothing is pending for the id.
    pub fn report_outcome(&self, game_id: &str, signal: LaunchSignal) -> bool {
        let launch = self.inner.pending.lock().remove(game_id);
        match launch {
            Some(launch) => {
                let _ = launch.signal_tx.send(signal);
                true
            }
            None => false,
        }
    }

    pub fn launch_state(&self, game_id: &str) -> Option<LaunchState> {
        if self.inner.pending.lock().contains_key(game_id) {
            return Some(LaunchState::Pending);
        }
        self.inner.outcomes.lock().get(game_id).copied()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.pending.lock().len()
    }

    /// Cancels every pending launch. Called on session teardown so no
    /// completion fires against a store whose session is gone.
    pub fn cancel_all(&self) {
        let drained: Vec<(String, PendingLaunch)> = {
            let mut pending = self.inner.pending.lock();
            pending.drain().collect()
        };
        if drained.is_empty() {
            return;
        }

        let _ = self.inner.shutdown_tx.send(());
        for (game_id, launch) in drained {
            launch.task.abort();
            tracing::debug!(game_id = %game_id, "pending completion cancelled");
        }
    }
}

async fn run_launch(
    inner: Arc<SchedulerInner>,
    game_id: String,
    generation: u64,
    signal_rx: oneshot::Receiver<LaunchSignal>,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let signal = wait_for_signal(signal_rx, inner.config.simulate_after);

    tokio::select! {
        biased;
        _ = shutdown_rx.recv() => {
            tracing::debug!(game_id = %game_id, "pending launch cancelled before completion");
        }
        outcome = tokio::time::timeout(inner.config.signal_timeout, signal) => {
            let state = match outcome {
                Ok(LaunchSignal::Completed) => {
                    let newly_completed = inner.progress.mark_completed(&game_id);
                    tracing::info!(game_id = %game_id, newly_completed, "activity completed");
                    LaunchState::Completed
                }
                Ok(LaunchSignal::Abandoned) => {
                    tracing::info!(game_id = %game_id, "activity abandoned");
                    LaunchState::Failed
                }
                Err(_) => {
                    let timeout_ms = inner.config.signal_timeout.as_millis() as u64;
                    tracing::warn!(
                        game_id = %game_id,
                        timeout_ms,
                        "no completion signal before timeout"
                    );
                    LaunchState::Failed
                }
            };

            inner.outcomes.lock().insert(game_id.clone(), state);

            // Only this launch may clear its own slot; a newer launch for
            // the same id owns the entry by then.
            let mut pending = inner.pending.lock();
            if pending.get(&game_id).map(|launch| launch.generation) == Some(generation) {
                pending.remove(&game_id);
            }
        }
    }
}

async fn wait_for_signal(
    signal_rx: oneshot::Receiver<LaunchSignal>,
    simulate_after: Option<Duration>,
) -> LaunchSignal {
    match simulate_after {
        Some(delay) => tokio::select! {
            signal = signal_rx => signal.unwrap_or(LaunchSignal::Abandoned),
            _ = tokio::time::sleep(delay) => LaunchSignal::Completed,
        },
        None => signal_rx.await.unwrap_or(LaunchSignal::Abandoned),
    }
}
