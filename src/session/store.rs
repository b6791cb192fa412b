//! Expiring session store
//!
//! An explicit expiring key-value store: a map from session identifier to
//! session plus a per-entry expiry deadline. Expiry is enforced two ways:
//! lazily on access (an entry past its deadline reads as absent) and in
//! bulk via [`SessionStore::sweep`], which the engine drives from a
//! background interval task.
//!
//! The sliding-window refresh is an explicit operation, [`SessionStore::touch`],
//! not a hidden side effect of a getter.

use super::Session;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// A stored session together with its expiry deadline
#[derive(Debug)]
struct SessionEntry {
    session: Session,
    deadline: Instant,
}

impl SessionEntry {
    fn new(session: Session, timeout: Duration) -> Self {
        Self {
            session,
            deadline: Instant::now() + timeout,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }
}

/// Owns the mapping from session identifier to session, with expiry
///
/// The store is deliberately a plain single-owner struct; the query engine
/// serializes access through its own lock. This keeps the store trivially
/// testable in isolation.
#[derive(Debug)]
pub struct SessionStore {
    sessions: HashMap<String, SessionEntry>,
    timeout: Duration,
}

impl SessionStore {
    /// Creates an empty store with the given expiry window
    ///
    /// # Examples
    ///
    /// ```
    /// use scrapilot::session::SessionStore;
    /// use std::time::Duration;
    ///
    /// let mut store = SessionStore::new(Duration::from_secs(600));
    /// let id = store.create();
    /// assert!(store.get(&id).is_some());
    /// ```
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            timeout,
        }
    }

    /// Mints a new session and returns its identifier
    ///
    /// The session starts empty (no messages, no results, no URL) with a
    /// full expiry window ahead of it. Infallible.
    pub fn create(&mut self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let session = Session::new(&id);
        self.sessions
            .insert(id.clone(), SessionEntry::new(session, self.timeout));
        debug!(session_id = %id, "created session");
        id
    }

    /// Returns the session for `id`, or `None` if absent or expired
    ///
    /// An expired entry is removed on the spot, so expiry is observable
    /// through this method before any recreation happens. The deadline is
    /// NOT refreshed here; call [`SessionStore::touch`] for that.
    pub fn get(&mut self, id: &str) -> Option<&Session> {
        self.drop_if_expired(id);
        self.sessions.get(id).map(|entry| &entry.session)
    }

    /// Mutable variant of [`SessionStore::get`]
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.drop_if_expired(id);
        self.sessions.get_mut(id).map(|entry| &mut entry.session)
    }

    /// Refreshes the expiry deadline of a live session (sliding window)
    ///
    /// Returns `true` if the session was live and its window restarted,
    /// `false` if the identifier is unknown or already expired.
    pub fn touch(&mut self, id: &str) -> bool {
        self.drop_if_expired(id);
        match self.sessions.get_mut(id) {
            Some(entry) => {
                entry.deadline = Instant::now() + self.timeout;
                true
            }
            None => false,
        }
    }

    /// Removes a session explicitly
    ///
    /// Idempotent: removing an absent identifier is a no-op returning `None`.
    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id).map(|entry| {
            debug!(session_id = %id, "removed session");
            entry.session
        })
    }

    /// Evicts every expired entry and returns how many were removed
    pub fn sweep(&mut self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| !entry.is_expired());
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            debug!(evicted, "swept expired sessions");
        }
        evicted
    }

    /// Returns true if `id` refers to a live session
    pub fn contains(&mut self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of entries currently held, including not-yet-swept expired ones
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops the entry for `id` if its deadline has passed
    fn drop_if_expired(&mut self, id: &str) {
        let expired = self
            .sessions
            .get(id)
            .map(SessionEntry::is_expired)
            .unwrap_or(false);
        if expired {
            self.sessions.remove(id);
            debug!(session_id = %id, "session expired");
        }
    }
}
