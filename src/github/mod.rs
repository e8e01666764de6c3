//! Upstream GitHub API interaction layer.
//!
//! All URL construction, response validation, and payload cleaning for the
//! upstream API lives here so that nothing forge-specific leaks into the HTTP
//! handlers. The split mirrors the request path: [`fetch`] performs one
//! bounded GET and classifies transport failures, [`resolver`] layers the
//! cache-or-fetch decision and schema validation on top, and [`query`]
//! applies client-requested filters over cached repo lists.

pub mod fetch;
pub mod query;
pub mod resolver;
pub mod types;

pub use fetch::FetchError;
pub use resolver::{GithubGateway, ResolveError, ValidationError};
