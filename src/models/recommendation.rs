use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A single book suggestion produced from model output
///
/// `title` is never empty once a recommendation has been through the
/// sanitizer; `author` and `reason` may be empty strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub author: String,
    pub reason: String,
}

impl Recommendation {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            reason: reason.into(),
        }
    }
}

/// Which parse path produced a set of recommendations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecommendationSource {
    /// Strict JSON, optionally inside a fenced block
    #[serde(rename = "ai-json")]
    Json,
    /// Heuristic parse of a numbered or bulleted list
    #[serde(rename = "ai-structured")]
    Structured,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationSource::Json => "ai-json",
            RecommendationSource::Structured => "ai-structured",
        }
    }
}

impl Display for RecommendationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body returned by the recommendations endpoint on success
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub source: RecommendationSource,
    pub raw_output: String,
    pub used_books: usize,
}
