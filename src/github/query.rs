//! Client-requested filters over cached repo lists.

use crate::github::types::Repo;

/// Filter a repo list by language and/or minimum star count.
///
/// Both criteria are conjunctive when present. Language comparison is
/// case-insensitive; a repo with a null `language` never matches a language
/// filter. Returns a new vector in the original order; the input (and thus
/// the cache) is never mutated.
///
/// Parsing `min_stars` from query text is the HTTP layer's responsibility —
/// this function only accepts an already-parsed integer.
pub fn filter_repos(repos: &[Repo], language: Option<&str>, min_stars: Option<i64>) -> Vec<Repo> {
    repos
        .iter()
        .filter(|repo| {
            let language_ok = match language {
                Some(wanted) => repo
                    .language
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(wanted)),
                None => true,
            };
            let stars_ok = match min_stars {
                Some(min) => repo.stargazers_count >= min,
                None => true,
            };
            language_ok && stars_ok
        })
        .cloned()
        .collect()
}
