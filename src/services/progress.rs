use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

/// One user's progress against one game. At most one record exists per
/// (user, game) pair; the session-scoped store keys by game id.
///
/// `score` and `time_spent_minutes` are carried for a durable extension;
/// nothing in this core computes or grades them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub id: String,
    pub user_id: String,
    pub game_id: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub time_spent_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Session-scoped set of completed game ids. Mutated only through
/// `mark_completed`; discarded with the owning session, with no durability
/// guarantee.
///
/// The store does not validate game ids against the catalog; that is the
/// caller's responsibility (the API layer validates before scheduling).
#[derive(Debug)]
pub struct ProgressStore {
    user_id: String,
    records: RwLock<HashMap<String, ProgressRecord>>,
}

impl ProgressStore {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            records: RwLock::new(HashMap::new()),
        }
    }

    /// A store pre-seeded with already-completed ids.
    pub fn with_completed<I, S>(user_id: impl Into<String>, completed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new(user_id);
        for game_id in completed {
            store.mark_completed(&game_id.into());
        }
        store
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn is_completed(&self, game_id: &str) -> bool {
        self.records
            .read()
            .get(game_id)
            .map(|record| record.completed)
            .unwrap_or(false)
    }

    /// Idempotent: returns `true` only when the id was newly completed.
    pub fn mark_completed(&self, game_id: &str) -> bool {
        let mut records = self.records.write();
        if records.get(game_id).map(|r| r.completed).unwrap_or(false) {
            return false;
        }

        let now = Utc::now();
        records.insert(
            game_id.to_string(),
            ProgressRecord {
                id: Uuid::new_v4().to_string(),
                user_id: self.user_id.clone(),
                game_id: game_id.to_string(),
                completed: true,
                score: None,
                time_spent_minutes: 0,
                completed_at: Some(now),
                created_at: now,
            },
        );
        true
    }

    pub fn completed_count(&self) -> usize {
        self.records
            .read()
            .values()
            .filter(|record| record.completed)
            .count()
    }

    pub fn completed_ids(&self) -> Vec<String> {
        self.records
            .read()
            .values()
            .filter(|record| record.completed)
            .map(|record| record.game_id.clone())
            .collect()
    }

    pub fn records(&self) -> Vec<ProgressRecord> {
        self.records.read().values().cloned().collect()
    }
}
