//! Process-wide in-memory cache for upstream responses.
//!
//! One [`CacheStore`] is created at startup and shared (via `Arc`) across all
//! request handlers. Entries are populated lazily on the first successful
//! fetch for a username and are never evicted or refreshed for the lifetime
//! of the process. Only validated values ever land in the maps: resolvers
//! store nothing on any error path.
//!
//! Keys are lowercase usernames; normalization is the caller's job so that a
//! single canonical form is used for both the map key and the outbound URL.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;

use crate::github::types::{Repo, User};

/// In-memory cache of validated upstream data, keyed by lowercase username.
///
/// Each map has its own lock. Locks are only held for in-memory map
/// operations, never across an upstream fetch, so two concurrent misses for
/// the same username may both fetch; the second store simply overwrites the
/// first with an equivalent value.
#[derive(Debug, Default)]
pub struct CacheStore {
    users: Mutex<HashMap<String, User>>,
    repos: Mutex<HashMap<String, Vec<Repo>>>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a cached user. `key` must already be lowercase.
    pub fn user(&self, key: &str) -> Option<User> {
        let users = self.users.lock().expect("users lock poisoned");
        let hit = users.get(key).cloned();
        if hit.is_some() {
            debug!(username = key, "user cache hit");
        }
        hit
    }

    /// Store a validated user under its lowercase key.
    pub fn store_user(&self, key: &str, user: User) {
        let mut users = self.users.lock().expect("users lock poisoned");
        users.insert(key.to_string(), user);
        debug!(username = key, "user cache store");
    }

    /// Look up a cached repo list. `key` must already be lowercase.
    pub fn repos(&self, key: &str) -> Option<Vec<Repo>> {
        let repos = self.repos.lock().expect("repos lock poisoned");
        let hit = repos.get(key).cloned();
        if hit.is_some() {
            debug!(username = key, "repo cache hit");
        }
        hit
    }

    /// Store a validated, cleaned repo list under its lowercase key.
    pub fn store_repos(&self, key: &str, repos: Vec<Repo>) {
        let mut map = self.repos.lock().expect("repos lock poisoned");
        debug!(username = key, count = repos.len(), "repo cache store");
        map.insert(key.to_string(), repos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_miss_then_hit() {
        let store = CacheStore::new();
        assert!(store.user("alice").is_none());

        let user = User::from_object(json!({"login": "alice"}).as_object().unwrap().clone());
        store.store_user("alice", user);

        let cached = store.user("alice").unwrap();
        assert_eq!(cached.login(), Some("alice"));
    }

    #[test]
    fn repo_lists_are_stored_verbatim() {
        let store = CacheStore::new();
        let repos = vec![
            Repo::from_value(&json!({"id": 2, "name": "zlib"})),
            Repo::from_value(&json!({"id": 1, "name": "alib"})),
        ];
        store.store_repos("bob", repos.clone());

        // Order must match the stored sequence, not any sorted order.
        assert_eq!(store.repos("bob").unwrap(), repos);
    }

    #[test]
    fn keys_are_distinct_per_map() {
        let store = CacheStore::new();
        store.store_repos("carol", Vec::new());
        assert!(store.user("carol").is_none());
        assert!(store.repos("carol").is_some());
    }
}
