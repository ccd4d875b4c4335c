//! Shared application state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppState (Clone)                                │
//! │                                                                         │
//! │  db        Database handle (pooled SQLite, shared by all clones)       │
//! │  sessions  SessionManager (token signing and validation)               │
//! │  drafts    DraftStore (one in-memory order draft per session)          │
//! │  config    Arc<ServerConfig>                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use ladle_core::OrderDraft;
use ladle_db::Database;

use crate::config::ServerConfig;
use crate::session::SessionManager;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionManager,
    pub drafts: DraftStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Builds the state from a connected database and loaded configuration.
    pub fn new(db: Database, config: ServerConfig) -> Self {
        let sessions = SessionManager::new(
            config.session_secret.clone(),
            config.session_lifetime_secs,
        );

        AppState {
            db,
            sessions,
            drafts: DraftStore::new(),
            config: Arc::new(config),
        }
    }
}

/// One session's draft plus the moment it stops mattering.
#[derive(Debug)]
struct DraftEntry {
    draft: OrderDraft,
    expires_at: i64,
}

/// In-memory store of order drafts, keyed by session id.
///
/// ## Thread Safety
/// Uses `Arc<Mutex<..>>`: an edit locks, swaps in the recomputed draft, and
/// unlocks before the response is built, so readers never observe a
/// half-updated tree.
///
/// Entries from sessions whose tokens have expired are dropped on the next
/// access; logout and successful submission drop them immediately.
#[derive(Debug, Clone)]
pub struct DraftStore {
    drafts: Arc<Mutex<HashMap<String, DraftEntry>>>,
}

impl DraftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        DraftStore {
            drafts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Executes a function with mutable access to the session's draft.
    ///
    /// A session that has no draft yet gets a fresh one dated today.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let snapshot = state
    ///     .drafts
    ///     .with_draft(&session.session_id, session.expires_at, |draft| {
    ///         draft.add_item()?;
    ///         Ok::<_, CoreError>(draft.clone())
    ///     })?;
    /// ```
    pub fn with_draft<F, R>(&self, session_id: &str, expires_at: i64, f: F) -> R
    where
        F: FnOnce(&mut OrderDraft) -> R,
    {
        let mut drafts = self.drafts.lock().expect("Draft store mutex poisoned");

        let now = Utc::now().timestamp();
        drafts.retain(|_, entry| entry.expires_at > now);

        let entry = drafts
            .entry(session_id.to_string())
            .or_insert_with(|| DraftEntry {
                draft: OrderDraft::new(Utc::now().date_naive()),
                expires_at,
            });

        f(&mut entry.draft)
    }

    /// Drops a session's draft. The next access starts a fresh one.
    pub fn remove(&self, session_id: &str) {
        let mut drafts = self.drafts.lock().expect("Draft store mutex poisoned");
        drafts.remove(session_id);
    }

    /// Number of live drafts (for diagnostics).
    pub fn len(&self) -> usize {
        let drafts = self.drafts.lock().expect("Draft store mutex poisoned");
        drafts.len()
    }

    /// Whether the store holds no drafts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        DraftStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn far_future() -> i64 {
        Utc::now().timestamp() + 3600
    }

    #[test]
    fn test_sessions_get_isolated_drafts() {
        let store = DraftStore::new();
        let exp = far_future();

        store.with_draft("session-a", exp, |draft| {
            draft.rename_item(1, "Lunch boxes");
        });

        let a_name = store.with_draft("session-a", exp, |draft| draft.items[0].name.clone());
        let b_name = store.with_draft("session-b", exp, |draft| draft.items[0].name.clone());

        assert_eq!(a_name, "Lunch boxes");
        assert_eq!(b_name, "");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_starts_fresh() {
        let store = DraftStore::new();
        let exp = far_future();

        store.with_draft("session-a", exp, |draft| {
            draft.rename_item(1, "Salad trays");
        });
        store.remove("session-a");

        let name = store.with_draft("session-a", exp, |draft| draft.items[0].name.clone());
        assert_eq!(name, "");
    }

    #[test]
    fn test_expired_sessions_are_swept() {
        let store = DraftStore::new();
        let expired = Utc::now().timestamp() - 10;

        store.with_draft("stale", expired, |_| {});
        assert_eq!(store.len(), 1);

        // Any later access sweeps entries whose sessions have expired
        store.with_draft("live", far_future(), |_| {});
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_new_draft_seeds_one_item_one_pack() {
        let store = DraftStore::new();

        let (items, packs, total) = store.with_draft("session-a", far_future(), |draft| {
            (
                draft.items.len(),
                draft.items[0].packs.len(),
                draft.total_amount_cents,
            )
        });

        assert_eq!(items, 1);
        assert_eq!(packs, 1);
        assert_eq!(total, 0);
    }
}
