//! In-process session store.

use async_trait::async_trait;
use homebook_core::{SessionEntry, SessionStore};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredSession {
    entry: SessionEntry,
    touched_at: Instant,
}

/// Session store held in process memory.
///
/// Without a TTL, abandoned sessions stay until the process exits. With a
/// TTL, a session idle for longer than it is dropped on the next lookup or
/// [`purge_expired`](Self::purge_expired) call.
///
/// Each call takes the lock on its own, so two concurrent turns for the
/// same session can still interleave their read and write.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, StoredSession>>,
    ttl: Option<Duration>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    fn is_expired(&self, stored: &StoredSession) -> bool {
        self.ttl
            .is_some_and(|ttl| stored.touched_at.elapsed() > ttl)
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, stored| !self.is_expired(stored));
        let removed = before - sessions.len();
        if removed > 0 {
            debug!("Purged {removed} expired sessions");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> anyhow::Result<Option<SessionEntry>> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return Ok(None),
                Some(stored) if !self.is_expired(stored) => return Ok(Some(stored.entry.clone())),
                Some(_) => {}
            }
        }

        debug!("Session expired: {session_id}");
        self.sessions.write().await.remove(session_id);
        Ok(None)
    }

    async fn put(&self, session_id: &str, entry: SessionEntry) -> anyhow::Result<()> {
        let stored = StoredSession {
            entry,
            touched_at: Instant::now(),
        };
        self.sessions
            .write()
            .await
            .insert(session_id.to_string(), stored);
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> anyhow::Result<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete() {
        let store = InMemorySessionStore::new();
        assert!(store.get("s1").await.expect("get").is_none());

        let mut entry = SessionEntry::new("s1");
        entry.failures = 1;
        store.put("s1", entry.clone()).await.expect("put");
        assert_eq!(store.get("s1").await.expect("get"), Some(entry));
        assert_eq!(store.len().await, 1);

        store.delete("s1").await.expect("delete");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = InMemorySessionStore::new();
        let mut a = SessionEntry::new("a");
        a.state.service = Some("Plumbing".to_string());
        store.put("a", a).await.expect("put");
        store.put("b", SessionEntry::new("b")).await.expect("put");

        let b = store.get("b").await.expect("get").expect("present");
        assert!(b.state.service.is_none());
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = InMemorySessionStore::with_ttl(Duration::from_millis(20));
        store.put("s1", SessionEntry::new("s1")).await.expect("put");
        store.put("s2", SessionEntry::new("s2")).await.expect("put");
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(store.get("s1").await.expect("get").is_none());
        assert_eq!(store.purge_expired().await, 1);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn without_ttl_nothing_expires() {
        let store = InMemorySessionStore::new();
        store.put("s1", SessionEntry::new("s1")).await.expect("put");
        assert_eq!(store.purge_expired().await, 0);
        assert!(store.get("s1").await.expect("get").is_some());
    }
}
