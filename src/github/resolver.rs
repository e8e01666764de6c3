//! Cache-or-fetch resolution for users and repo lists.
//!
//! The [`GithubGateway`] owns the check-cache / fetch / validate / store
//! sequence. Cache hits are unconditional: a stored entry is returned as-is,
//! never re-validated or refreshed. On a miss the dynamic JSON from the
//! fetcher is consumed here, at the validation boundary, and only the typed
//! result is stored — nothing is cached on any error path.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::cache::CacheStore;
use crate::config::UpstreamConfig;
use crate::github::fetch::{fetch_json, FetchError};
use crate::github::types::{Repo, User};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Schema-assumption failure: the fetch succeeded transport-wise but the
/// payload did not have the shape the upstream contract promises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The user payload was not an object with a `login` field.
    #[error("malformed user data from upstream")]
    MalformedUserData,
    /// The repo-list payload was not a top-level array.
    #[error("malformed repo list from upstream")]
    MalformedRepoList,
}

/// Combined resolver error, kept as two distinct sub-taxonomies so callers
/// can log transport and schema failures differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// Upstream API gateway with a shared in-memory cache.
///
/// Cheap to clone: the HTTP client and the cache are both handle types.
#[derive(Debug, Clone)]
pub struct GithubGateway {
    http: reqwest::Client,
    api_url: String,
    request_timeout: Duration,
    cache: Arc<CacheStore>,
}

impl GithubGateway {
    pub fn new(http: reqwest::Client, upstream: &UpstreamConfig, cache: Arc<CacheStore>) -> Self {
        Self {
            http,
            api_url: upstream.api_url.trim_end_matches('/').to_string(),
            request_timeout: upstream.request_timeout(),
            cache,
        }
    }

    /// Resolve a user, serving from cache when possible.
    ///
    /// The username is lowercased once and that form is used both as the
    /// cache key and in the outbound URL (the upstream API is itself
    /// case-insensitive on usernames, so the normalized form is safe).
    pub async fn get_user(&self, username: &str) -> Result<User, ResolveError> {
        let key = username.to_lowercase();
        if let Some(user) = self.cache.user(&key) {
            return Ok(user);
        }

        let url = format!("{}/users/{}", self.api_url, key);
        debug!(username = %key, "user cache miss, fetching upstream");
        let value = fetch_json(&self.http, &url, self.request_timeout).await?;

        let object = value
            .as_object()
            .filter(|o| o.contains_key("login"))
            .ok_or(ValidationError::MalformedUserData)?;

        let user = User::from_object(object.clone());
        self.cache.store_user(&key, user.clone());
        Ok(user)
    }

    /// Resolve a user's cleaned repo list, serving from cache when possible.
    ///
    /// On a miss the raw array is projected element-by-element into the
    /// eight-field [`Repo`] shape, preserving upstream order, and the cleaned
    /// sequence is what gets stored and returned.
    pub async fn get_repos(&self, username: &str) -> Result<Vec<Repo>, ResolveError> {
        let key = username.to_lowercase();
        if let Some(repos) = self.cache.repos(&key) {
            return Ok(repos);
        }

        let url = format!("{}/users/{}/repos", self.api_url, key);
        debug!(username = %key, "repo cache miss, fetching upstream");
        let value = fetch_json(&self.http, &url, self.request_timeout).await?;

        let raw = value
            .as_array()
            .ok_or(ValidationError::MalformedRepoList)?;

        let cleaned: Vec<Repo> = raw.iter().map(Repo::from_value).collect();
        self.cache.store_repos(&key, cleaned.clone());
        Ok(cleaned)
    }

    /// Find one repo by id in the user's cached/fetched list.
    ///
    /// The list endpoint is the sole source of truth — no single-repo
    /// upstream call is made. The first match in upstream order wins, which
    /// matters only for lists with duplicate or null ids.
    pub async fn find_repo_by_id(
        &self,
        username: &str,
        repo_id: i64,
    ) -> Result<Option<Repo>, ResolveError> {
        let repos = self.get_repos(username).await?;
        Ok(repos.into_iter().find(|repo| repo.id == Some(repo_id)))
    }
}
