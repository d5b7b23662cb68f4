//! In-memory per-visitor session state.
//!
//! Each browser gets a `SessionContext` keyed by the session cookie.
//! Sessions expire after a period of inactivity.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config;
use crate::flashcards::FlashcardDeck;

/// Dashboard toggles from the Settings page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
  pub show_tips: bool,
  pub show_pie: bool,
  pub show_time: bool,
  pub show_streak: bool,
  pub show_heatmap: bool,
  /// Log a study session when today's plan entry is viewed
  pub auto_log: bool,
}

impl Default for Preferences {
  fn default() -> Self {
    Self {
      show_tips: true,
      show_pie: true,
      show_time: true,
      show_streak: true,
      show_heatmap: true,
      auto_log: true,
    }
  }
}

/// Everything remembered about one visitor between requests
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
  /// Logged-in user, `None` for anonymous visitors
  pub username: Option<String>,
  pub deck: FlashcardDeck,
  pub preferences: Preferences,
}

struct SessionEntry {
  context: SessionContext,
  last_access: DateTime<Utc>,
}

impl SessionEntry {
  fn new() -> Self {
    Self {
      context: SessionContext::default(),
      last_access: Utc::now(),
    }
  }
}

/// Shared session map, cloned into every handler through `AppState`
#[derive(Clone, Default)]
pub struct SessionStore {
  sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

impl SessionStore {
  pub fn new() -> Self {
    Self::default()
  }

  // A panic while holding the lock leaves the map usable
  fn lock(&self) -> MutexGuard<'_, HashMap<String, SessionEntry>> {
    self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Start a fresh session and return its ID
  pub fn create(&self) -> String {
    let mut sessions = self.lock();

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      cleanup_expired(&mut sessions);
    }

    let id = generate_session_id();
    sessions.insert(id.clone(), SessionEntry::new());
    id
  }

  /// Mark a session as active. Returns false for unknown or expired IDs.
  pub fn touch(&self, id: &str) -> bool {
    let mut sessions = self.lock();
    let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
    match sessions.get_mut(id) {
      Some(entry) if entry.last_access > expiry => {
        entry.last_access = Utc::now();
        true
      }
      Some(_) => {
        sessions.remove(id);
        false
      }
      None => false,
    }
  }

  /// Snapshot of a session's state (default state for unknown IDs)
  pub fn get(&self, id: &str) -> SessionContext {
    self
      .lock()
      .get(id)
      .map(|e| e.context.clone())
      .unwrap_or_default()
  }

  /// Mutate a session in place, creating it if needed
  pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut SessionContext) -> R) -> R {
    let mut sessions = self.lock();
    let entry = sessions.entry(id.to_string()).or_insert_with(SessionEntry::new);
    entry.last_access = Utc::now();
    f(&mut entry.context)
  }

  pub fn username(&self, id: &str) -> Option<String> {
    self.lock().get(id).and_then(|e| e.context.username.clone())
  }

  /// Whether `id` names a live session
  pub fn contains(&self, id: &str) -> bool {
    self.lock().contains_key(id)
  }

  /// Move a session's state to a fresh ID and forget the old one.
  /// Returns the new ID.
  pub fn rotate(&self, old_id: &str) -> String {
    let mut sessions = self.lock();
    let context = sessions.remove(old_id).map(|e| e.context).unwrap_or_default();
    let id = generate_session_id();
    sessions.insert(
      id.clone(),
      SessionEntry {
        context,
        last_access: Utc::now(),
      },
    );
    id
  }
}

fn cleanup_expired(sessions: &mut HashMap<String, SessionEntry>) {
  let expiry = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS);
  sessions.retain(|_, entry| entry.last_access > expiry);
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::Flashcard;

  #[test]
  fn test_session_id_shape() {
    let id = generate_session_id();
    assert_eq!(id.len(), 32);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    assert_ne!(id, generate_session_id());
  }

  #[test]
  fn test_create_and_touch() {
    let store = SessionStore::new();
    let id = store.create();
    assert!(store.touch(&id));
    assert!(!store.touch("unknown"));
  }

  #[test]
  fn test_new_session_defaults() {
    let store = SessionStore::new();
    let id = store.create();
    let ctx = store.get(&id);
    assert!(ctx.username.is_none());
    assert!(ctx.deck.is_empty());
    assert_eq!(ctx.preferences, Preferences::default());
    assert!(ctx.preferences.auto_log);
  }

  #[test]
  fn test_update_is_isolated_per_session() {
    let store = SessionStore::new();
    let a = store.create();
    let b = store.create();

    store.update(&a, |ctx| {
      ctx.username = Some("alice".into());
      ctx.deck.replace(vec![Flashcard::new("q", "a")]);
    });

    assert_eq!(store.username(&a).as_deref(), Some("alice"));
    assert_eq!(store.get(&a).deck.len(), 1);
    assert!(store.username(&b).is_none());
    assert!(store.get(&b).deck.is_empty());
  }

  #[test]
  fn test_expired_session_is_dropped() {
    let store = SessionStore::new();
    let id = store.create();
    {
      let mut sessions = store.lock();
      let entry = sessions.get_mut(&id).unwrap();
      entry.last_access = Utc::now() - Duration::hours(config::SESSION_EXPIRY_HOURS + 1);
    }

    assert!(!store.touch(&id));
    assert!(!store.contains(&id));
  }

  #[test]
  fn test_rotate_moves_state_to_new_id() {
    let store = SessionStore::new();
    let old = store.create();
    store.update(&old, |ctx| ctx.deck.replace(vec![Flashcard::new("q", "a")]));

    let new = store.rotate(&old);

    assert_ne!(new, old);
    assert!(!store.contains(&old));
    assert!(!store.touch(&old));
    assert_eq!(store.get(&new).deck.len(), 1);
  }
}
