//! HTTP layer for the caching gateway.
//!
//! Thin plumbing around the core: the axum router dispatches the three API
//! operations to the resolver/filter layer and serializes results and error
//! taxonomies into the fixed JSON shapes existing clients expect.

pub mod handler;
