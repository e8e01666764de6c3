//! Typed views over upstream payloads.
//!
//! Upstream responses arrive as dynamic `serde_json::Value`s and are consumed
//! exactly once, at the validation boundary in the resolver. Past that point
//! the rest of the crate only sees these types: the raw-but-validated
//! [`User`] object, its fixed seven-field [`UserSummary`] projection, and the
//! cleaned eight-field [`Repo`] record.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// A validated upstream user object, retained verbatim.
///
/// Guaranteed by construction (resolver validation) to contain a `login`
/// field. All other fields are whatever upstream returned; consumers read
/// them defensively via [`UserSummary`], where an absent field becomes null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct User(Map<String, Value>);

impl User {
    pub fn from_object(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn login(&self) -> Option<&str> {
        self.0.get("login").and_then(Value::as_str)
    }

    /// Project into the fixed summary shape served over HTTP.
    ///
    /// Values are passed through untouched (numbers stay numbers, strings
    /// stay strings); a missing field becomes JSON null.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            login: self.field("login"),
            name: self.field("name"),
            public_repos: self.field("public_repos"),
            followers: self.field("followers"),
            following: self.field("following"),
            html_url: self.field("html_url"),
            bio: self.field("bio"),
        }
    }

    fn field(&self, key: &str) -> Value {
        self.0.get(key).cloned().unwrap_or(Value::Null)
    }
}

/// The seven-field user summary returned by `GET /api/users/{username}`.
///
/// Field names and null-defaulting are a compatibility contract with
/// existing clients; do not rename or drop fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub login: Value,
    pub name: Value,
    pub public_repos: Value,
    pub followers: Value,
    pub following: Value,
    pub html_url: Value,
    pub bio: Value,
}

// ---------------------------------------------------------------------------
// Repo
// ---------------------------------------------------------------------------

/// The cleaned repository record stored in the cache.
///
/// Exactly these eight fields survive the projection at cache-write time;
/// extra upstream fields are dropped and are not retrievable later. `id` is
/// only an identity within one user's list, not globally unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub full_name: Option<String>,
    pub html_url: Option<String>,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: i64,
    #[serde(default)]
    pub forks_count: i64,
}

impl Repo {
    /// Project one raw upstream repo object into the cleaned shape.
    ///
    /// Each field defaults independently: a missing or wrongly-typed string
    /// field becomes null, a missing count becomes 0 (never null). A
    /// non-object `value` yields an all-default record rather than an error;
    /// the resolver has already established the surrounding array shape.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: value.get("id").and_then(Value::as_i64),
            name: string_field(value, "name"),
            full_name: string_field(value, "full_name"),
            html_url: string_field(value, "html_url"),
            description: string_field(value, "description"),
            language: string_field(value, "language"),
            stargazers_count: count_field(value, "stargazers_count"),
            forks_count: count_field(value, "forks_count"),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn count_field(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ── Repo projection ─────────────────────────────────────────────────

    #[test]
    fn repo_projection_keeps_only_the_cleaned_fields() {
        let raw = json!({
            "id": 7,
            "name": "widgets",
            "full_name": "acme/widgets",
            "html_url": "https://github.com/acme/widgets",
            "description": "widget factory",
            "language": "Rust",
            "stargazers_count": 12,
            "forks_count": 3,
            "watchers_count": 99,
            "default_branch": "main"
        });
        let repo = Repo::from_value(&raw);
        assert_eq!(repo.id, Some(7));
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.stargazers_count, 12);

        // Extra upstream fields must not survive serialization.
        let serialized = serde_json::to_value(&repo).unwrap();
        assert_eq!(serialized.as_object().unwrap().len(), 8);
        assert!(serialized.get("watchers_count").is_none());
    }

    #[test]
    fn missing_counts_default_to_zero_not_null() {
        let repo = Repo::from_value(&json!({"id": 1, "name": "bare"}));
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);

        let serialized = serde_json::to_value(&repo).unwrap();
        assert_eq!(serialized["stargazers_count"], json!(0));
        assert_eq!(serialized["forks_count"], json!(0));
    }

    #[test]
    fn missing_id_and_strings_become_null() {
        let repo = Repo::from_value(&json!({"stargazers_count": 4}));
        assert_eq!(repo.id, None);
        assert_eq!(repo.name, None);

        let serialized = serde_json::to_value(&repo).unwrap();
        assert_eq!(serialized["id"], Value::Null);
        assert_eq!(serialized["language"], Value::Null);
    }

    // ── User summary ────────────────────────────────────────────────────

    #[test]
    fn summary_defaults_absent_fields_to_null() {
        let user = User::from_object(
            json!({"login": "bob", "public_repos": 3})
                .as_object()
                .unwrap()
                .clone(),
        );
        let summary = serde_json::to_value(user.summary()).unwrap();
        assert_eq!(
            summary,
            json!({
                "login": "bob",
                "name": null,
                "public_repos": 3,
                "followers": null,
                "following": null,
                "html_url": null,
                "bio": null
            })
        );
    }

    #[test]
    fn summary_passes_values_through_untouched() {
        let user = User::from_object(
            json!({"login": "ada", "bio": "", "followers": 0})
                .as_object()
                .unwrap()
                .clone(),
        );
        let summary = serde_json::to_value(user.summary()).unwrap();
        assert_eq!(summary["bio"], json!(""));
        assert_eq!(summary["followers"], json!(0));
    }
}
