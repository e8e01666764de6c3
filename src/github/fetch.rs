//! Single bounded-time GET against the upstream API.
//!
//! This is the only place in the crate that talks to the network. One call,
//! one attempt: no retries, no cache access. Every failure mode is folded
//! into a tagged [`FetchError`] so callers can log and map each category
//! differently at the HTTP boundary.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Upper bound on the diagnostic snippet carried in
/// [`FetchError::UpstreamHttp`]. A deliberate bound to keep error payloads
/// small, not a best-effort limit.
pub const BODY_SNIPPET_CHARS: usize = 200;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Transport-level failure from a single upstream fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request did not complete within the configured timeout.
    #[error("request to upstream timed out")]
    Timeout,
    /// Upstream answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    UpstreamHttp { status: u16, details: String },
    /// The body was not parseable JSON, or parsed to a bare scalar.
    #[error("malformed data from upstream: {details}")]
    MalformedData { details: String },
    /// Any other transport or protocol fault.
    #[error("network or parsing error: {details}")]
    Network { details: String },
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Perform one GET against `url` and return the decoded JSON body.
///
/// Success requires a 2xx status and a body that decodes to a JSON object or
/// array; a bare scalar (`42`, `"oops"`, `null`, ...) is rejected as
/// [`FetchError::MalformedData`] because no upstream endpoint we consume
/// legitimately returns one.
pub async fn fetch_json(client: &Client, url: &str, timeout: Duration) -> Result<Value, FetchError> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .map_err(classify_transport_error)?;

    let status = response.status();
    let body = response.text().await.map_err(classify_transport_error)?;

    if !status.is_success() {
        warn!(url, status = status.as_u16(), "upstream returned non-success status");
        return Err(FetchError::UpstreamHttp {
            status: status.as_u16(),
            details: truncate_chars(&body, BODY_SNIPPET_CHARS),
        });
    }

    let value: Value = serde_json::from_str(&body).map_err(|e| FetchError::MalformedData {
        details: e.to_string(),
    })?;

    if !value.is_object() && !value.is_array() {
        return Err(FetchError::MalformedData {
            details: format!("expected a JSON object or array, got {}", json_type_name(&value)),
        });
    }

    Ok(value)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn classify_transport_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network {
            details: err.to_string(),
        }
    }
}

/// Truncate to at most `max` characters, staying on char boundaries.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_char_boundary_safe() {
        // 300 multi-byte chars; a byte-indexed slice at 200 would panic.
        let body: String = "é".repeat(300);
        let snippet = truncate_chars(&body, BODY_SNIPPET_CHARS);
        assert_eq!(snippet.chars().count(), 200);
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_chars("not found", BODY_SNIPPET_CHARS), "not found");
    }

    #[test]
    fn scalar_type_names() {
        assert_eq!(json_type_name(&serde_json::json!(42)), "a number");
        assert_eq!(json_type_name(&serde_json::json!(null)), "null");
        assert_eq!(json_type_name(&serde_json::json!("x")), "a string");
    }
}
