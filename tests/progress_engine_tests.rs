//! Integration tests for the catalog filter and the launch → completion
//! lifecycle, driven on a paused clock where timing matters.

use std::sync::Arc;
use std::time::Duration;

use bodylab_backend_rust::catalog::Catalog;
use bodylab_backend_rust::seed::builtin_catalog;
use bodylab_backend_rust::services::completion::{
    CompletionScheduler, LaunchSignal, LaunchState, SchedulerConfig,
};
use bodylab_backend_rust::services::filter::visible;
use bodylab_backend_rust::services::metrics::completion_rate;
use bodylab_backend_rust::services::progress::ProgressStore;
use bodylab_backend_rust::services::session::SessionManager;

const SIMULATED_DELAY: Duration = Duration::from_millis(1000);

fn simulated_config() -> SchedulerConfig {
    SchedulerConfig {
        simulate_after: Some(SIMULATED_DELAY),
        signal_timeout: Duration::from_secs(600),
    }
}

fn signal_only_config(signal_timeout: Duration) -> SchedulerConfig {
    SchedulerConfig {
        simulate_after: None,
        signal_timeout,
    }
}

// =============================================================================
// Catalog filtering scenarios
// =============================================================================

#[test]
fn category_selection_returns_only_that_category_in_catalog_order() {
    let catalog = builtin_catalog();
    let result = visible(catalog.games(), "circulatory", "");

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].id, "heart-pump-adventure");
    assert_eq!(result[1].id, "blood-vessel-voyage");
}

#[test]
fn search_matches_titles_and_descriptions_across_categories() {
    let catalog = builtin_catalog();

    // "lung" hits one title and one unrelated description.
    let result = visible(catalog.games(), "all", "lung");
    let ids: Vec<&str> = result.iter().map(|game| game.id.as_str()).collect();
    assert_eq!(ids, vec!["lung-explorer", "stamina-sprint"]);

    // Narrowing the category keeps only the in-category match.
    let result = visible(catalog.games(), "muscular", "lung");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, "stamina-sprint");
}

#[test]
fn full_catalog_is_visible_with_no_filters() {
    let catalog = builtin_catalog();
    let result = visible(catalog.games(), "all", "");
    assert_eq!(result.len(), catalog.game_count());
    for (shown, expected) in result.iter().zip(catalog.games()) {
        assert_eq!(shown.id, expected.id);
    }
}

#[test]
fn empty_catalog_yields_empty_results_and_zero_progress() {
    let catalog = Catalog::empty();
    assert!(visible(catalog.games(), "all", "").is_empty());
    assert!(visible(catalog.games(), "circulatory", "heart").is_empty());
    assert_eq!(completion_rate(0, catalog.game_count()), 0);
}

// =============================================================================
// Launch → completion lifecycle
// =============================================================================

#[tokio::test(start_paused = true)]
async fn simulated_completion_fires_after_the_configured_delay() {
    let progress = Arc::new(ProgressStore::new("u1"));
    let scheduler = CompletionScheduler::new(Arc::clone(&progress), simulated_config());

    scheduler.schedule_play("heart-pump-adventure");
    assert_eq!(
        scheduler.launch_state("heart-pump-adventure"),
        Some(LaunchState::Pending)
    );
    assert!(!progress.is_completed("heart-pump-adventure"));

    tokio::time::sleep(SIMULATED_DELAY / 2).await;
    assert!(!progress.is_completed("heart-pump-adventure"));

    tokio::time::sleep(SIMULATED_DELAY).await;
    assert!(progress.is_completed("heart-pump-adventure"));
    assert_eq!(progress.completed_count(), 1);
    assert_eq!(
        scheduler.launch_state("heart-pump-adventure"),
        Some(LaunchState::Completed)
    );
    assert_eq!(scheduler.pending_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn duplicate_schedule_coalesces_to_a_single_completion() {
    let progress = Arc::new(ProgressStore::new("u1"));
    let scheduler = CompletionScheduler::new(Arc::clone(&progress), simulated_config());

    scheduler.schedule_play("heart-pump-adventure");
    scheduler.schedule_play("heart-pump-adventure");
    assert_eq!(scheduler.pending_count(), 1);

    tokio::time::sleep(SIMULATED_DELAY * 2).await;
    assert!(progress.is_completed("heart-pump-adventure"));
    assert_eq!(progress.completed_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn reported_completion_beats_the_simulated_delay() {
    let progress = Arc::new(ProgressStore::new("u1"));
    let scheduler = CompletionScheduler::new(Arc::clone(&progress), simulated_config());

    scheduler.schedule_play("lung-explorer");
    assert!(scheduler.report_outcome("lung-explorer", LaunchSignal::Completed));

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(progress.is_completed("lung-explorer"));
    assert_eq!(
        scheduler.launch_state("lung-explorer"),
        Some(LaunchState::Completed)
    );
}

#[tokio::test(start_paused = true)]
async fn abandoned_launch_fails_without_touching_progress() {
    let progress = Arc::new(ProgressStore::new("u1"));
    let scheduler = CompletionScheduler::new(Arc::clone(&progress), simulated_config());

    scheduler.schedule_play("bone-builder");
    assert!(scheduler.report_outcome("bone-builder", LaunchSignal::Abandoned));

    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(!progress.is_completed("bone-builder"));
    assert_eq!(
        scheduler.launch_state("bone-builder"),
        Some(LaunchState::Failed)
    );
}

#[tokio::test(start_paused = true)]
async fn missing_signal_times_out_to_failed() {
    let progress = Arc::new(ProgressStore::new("u1"));
    let scheduler = CompletionScheduler::new(
        Arc::clone(&progress),
        signal_only_config(Duration::from_secs(5)),
    );

    scheduler.schedule_play("bone-builder");
    tokio::time::sleep(Duration::from_secs(6)).await;

    assert!(!progress.is_completed("bone-builder"));
    assert_eq!(
        scheduler.launch_state("bone-builder"),
        Some(LaunchState::Failed)
    );
    assert_eq!(scheduler.pending_count(), 0);
}

#[tokio::test]
async fn outcome_without_a_pending_launch_is_rejected() {
    let progress = Arc::new(ProgressStore::new("u1"));
    let scheduler = CompletionScheduler::new(Arc::clone(&progress), simulated_config());

    assert!(!scheduler.report_outcome("never-launched", LaunchSignal::Completed));
    assert_eq!(scheduler.launch_state("never-launched"), None);
}

#[tokio::test(start_paused = true)]
async fn cancel_all_prevents_scheduled_completions() {
    let progress = Arc::new(ProgressStore::new("u1"));
    let scheduler = CompletionScheduler::new(Arc::clone(&progress), simulated_config());

    scheduler.schedule_play("digestion-quest");
    scheduler.cancel_all();
    assert_eq!(scheduler.pending_count(), 0);

    tokio::time::sleep(SIMULATED_DELAY * 2).await;
    assert!(!progress.is_completed("digestion-quest"));
    // Cancelled launches are neither completed nor failed.
    assert_eq!(scheduler.launch_state("digestion-quest"), None);
}

#[tokio::test(start_paused = true)]
async fn completed_game_can_be_played_again() {
    let progress = Arc::new(ProgressStore::new("u1"));
    let scheduler = CompletionScheduler::new(Arc::clone(&progress), simulated_config());

    scheduler.schedule_play("enzyme-factory");
    scheduler.report_outcome("enzyme-factory", LaunchSignal::Completed);
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert_eq!(
        scheduler.launch_state("enzyme-factory"),
        Some(LaunchState::Completed)
    );

    scheduler.schedule_play("enzyme-factory");
    assert_eq!(
        scheduler.launch_state("enzyme-factory"),
        Some(LaunchState::Pending)
    );

    tokio::time::sleep(SIMULATED_DELAY * 2).await;
    assert_eq!(
        scheduler.launch_state("enzyme-factory"),
        Some(LaunchState::Completed)
    );
    // Still a single record for the id.
    assert_eq!(progress.completed_count(), 1);
}

// =============================================================================
// Session lifecycle
// =============================================================================

#[tokio::test]
async fn sessions_are_per_user_and_reused() {
    let manager = SessionManager::new(simulated_config());

    let first = manager.session_for("u1").await;
    let again = manager.session_for("u1").await;
    assert!(Arc::ptr_eq(&first, &again));

    let other = manager.session_for("u2").await;
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(manager.session_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn ending_a_session_cancels_its_pending_completions() {
    let manager = SessionManager::new(simulated_config());

    let session = manager.session_for("u1").await;
    session.scheduler().schedule_play("reflex-race");
    assert!(manager.end_session("u1").await);
    assert_eq!(manager.session_count().await, 0);

    tokio::time::sleep(SIMULATED_DELAY * 2).await;
    assert!(!session.progress().is_completed("reflex-race"));
}

#[tokio::test]
async fn idle_sessions_expire_and_cancel_pending_work() {
    let manager = SessionManager::new(signal_only_config(Duration::from_secs(600)));

    let session = manager.session_for("u1").await;
    session.scheduler().schedule_play("muscle-machine");
    assert_eq!(manager.session_count().await, 1);

    let expired = manager.expire_idle(Duration::ZERO).await;
    assert_eq!(expired, 1);
    assert_eq!(manager.session_count().await, 0);
    assert_eq!(session.scheduler().pending_count(), 0);
}

#[tokio::test]
async fn shutdown_closes_every_session() {
    let manager = SessionManager::new(simulated_config());
    manager.session_for("u1").await;
    manager.session_for("u2").await;

    manager.shutdown().await;
    assert_eq!(manager.session_count().await, 0);
}
