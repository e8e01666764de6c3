//! Main axum router and HTTP request handlers for the caching gateway.
//!
//! Routes:
//! - `GET /api/users/{username}`                  - 7-field user summary
//! - `GET /api/users/{username}/repos`            - filtered repo list
//! - `GET /api/users/{username}/repos/{repo_id}`  - single repo from the cached list
//! - `GET /healthz`                               - liveness probe
//!
//! Error bodies are a compatibility contract (see [`ApiError`]): every
//! resolver failure maps to a 502 with the taxonomy-specific JSON shape, a
//! malformed `min_stars` is a 400 caught before the core is invoked, and
//! unknown repo ids and unknown routes are 404s.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{instrument, warn};

use crate::github::{FetchError, ResolveError, ValidationError};
use crate::AppState;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the axum [`Router`] with all HTTP routes and shared state.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/users/{username}", get(handle_get_user))
        .route("/api/users/{username}/repos", get(handle_list_repos))
        .route(
            "/api/users/{username}/repos/{repo_id}",
            get(handle_repo_detail),
        )
        .route("/healthz", get(handle_health))
        .fallback(handle_unknown_route)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query parameter types
// ---------------------------------------------------------------------------

/// Raw filter parameters for the repo-list endpoint.
///
/// `min_stars` is taken as text so that a non-integer value produces our own
/// 400 body instead of axum's generic rejection.
#[derive(Debug, Deserialize)]
struct RepoListQuery {
    language: Option<String>,
    min_stars: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /api/users/{username}`
#[instrument(skip(state))]
async fn handle_get_user(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let user = state.gateway.get_user(&username).await?;
    Ok(Json(user.summary()).into_response())
}

/// `GET /api/users/{username}/repos?language=&min_stars=`
///
/// Filter parameters are parsed before the core is invoked; blank values are
/// treated as absent. The response is always `{"count": N, "items": [...]}`.
#[instrument(skip(state, query))]
async fn handle_list_repos(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
    Query(query): Query<RepoListQuery>,
) -> Result<Response, ApiError> {
    let language = non_blank(query.language.as_deref());
    let min_stars = match non_blank(query.min_stars.as_deref()) {
        Some(raw) => Some(
            raw.parse::<i64>()
                .map_err(|_| ApiError::BadRequest("min_stars must be an integer"))?,
        ),
        None => None,
    };

    let repos = state.gateway.get_repos(&username).await?;
    let items = crate::github::query::filter_repos(&repos, language, min_stars);

    Ok(Json(json!({ "count": items.len(), "items": items })).into_response())
}

/// `GET /api/users/{username}/repos/{repo_id}`
///
/// Served from the user's cached/fetched list; no single-repo upstream call.
/// A non-numeric `repo_id` does not name a resource and is a 404, matching
/// the route-shape behavior existing clients rely on.
#[instrument(skip(state))]
async fn handle_repo_detail(
    State(state): State<Arc<AppState>>,
    Path((username, repo_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let repo_id: i64 = repo_id
        .parse()
        .map_err(|_| ApiError::NotFound("Endpoint not found"))?;

    let repo = state
        .gateway
        .find_repo_by_id(&username, repo_id)
        .await?
        .ok_or(ApiError::NotFound("Repository not found"))?;

    Ok(Json(repo).into_response())
}

/// `GET /healthz`
async fn handle_health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Fallback for any route the gateway does not serve.
async fn handle_unknown_route() -> ApiError {
    ApiError::NotFound("Endpoint not found")
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Treat empty and whitespace-only query values as absent.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Application-level error type that maps cleanly to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The upstream fetch or validation failed; surfaced as 502 Bad Gateway.
    Upstream(ResolveError),
    /// The client sent an unparseable filter parameter.
    BadRequest(&'static str),
    /// The requested resource does not exist.
    NotFound(&'static str),
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        ApiError::Upstream(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Upstream(err) => {
                warn!(error = %err, "upstream resolution failed");
                (StatusCode::BAD_GATEWAY, Json(upstream_error_body(&err))).into_response()
            }
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
        }
    }
}

/// JSON body for a 502 response, by error category.
///
/// Field names and wording are part of the client compatibility contract.
fn upstream_error_body(err: &ResolveError) -> Value {
    match err {
        ResolveError::Fetch(FetchError::Timeout) => json!({
            "error": "Request to GitHub timed out",
            "code": "TIMEOUT",
        }),
        ResolveError::Fetch(FetchError::UpstreamHttp { status, details }) => json!({
            "error": "GitHub returned an error",
            "status_code": status,
            "details": details,
        }),
        ResolveError::Fetch(FetchError::MalformedData { details })
        | ResolveError::Fetch(FetchError::Network { details }) => json!({
            "error": "Network or parsing error",
            "details": details,
        }),
        ResolveError::Validation(ValidationError::MalformedUserData) => json!({
            "error": "Malformed user data from GitHub",
        }),
        ResolveError::Validation(ValidationError::MalformedRepoList) => json!({
            "error": "Malformed repo list from GitHub",
        }),
    }
}
