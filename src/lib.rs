//! Caching HTTP gateway for the GitHub user/repo API.
//!
//! The gateway exposes a simplified read-only view of the upstream API and
//! answers repeat requests for the same username from an in-memory cache,
//! so each username costs at most one upstream call per endpoint for the
//! lifetime of the process.

pub mod cache;
pub mod config;
pub mod github;
pub mod http;

use std::sync::Arc;

use crate::config::Config;
use crate::github::GithubGateway;

/// Global state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gateway: GithubGateway,
}
