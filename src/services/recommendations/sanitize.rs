use serde_json::Value;
use std::collections::HashSet;

use crate::models::Recommendation;

/// Upper bound on recommendations returned to callers
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Coerces a raw JSON candidate into a recommendation
///
/// Missing or non-string fields become empty strings; non-object values
/// produce an entry with an empty title, which `sanitize` drops.
pub fn coerce(value: &Value) -> Recommendation {
    let field = |name: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    Recommendation {
        title: field("title"),
        author: field("author"),
        reason: field("reason"),
    }
}

/// Trims, validates, de-duplicates and caps candidate recommendations
///
/// Entries with an empty title are dropped. Titles are compared
/// case-insensitively and the first occurrence wins. At most
/// [`MAX_RECOMMENDATIONS`] entries are returned, in input order.
pub fn sanitize(entries: Vec<Recommendation>) -> Vec<Recommendation> {
    let mut seen = HashSet::new();

    entries
        .into_iter()
        .map(|entry| Recommendation {
            title: entry.title.trim().to_string(),
            author: entry.author.trim().to_string(),
            reason: entry.reason.trim().to_string(),
        })
        .filter(|entry| !entry.title.is_empty() && seen.insert(entry.title.to_lowercase()))
        .take(MAX_RECOMMENDATIONS)
        .collect()
}
