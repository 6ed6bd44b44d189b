//! Fallback parser for list-like prose.
//!
//! Model output that is not strict JSON usually still arrives as a numbered
//! or bulleted list, one recommendation per item:
//!
//! ```text
//! 1. Project Hail Mary
//! Andy Weir
//! A gripping survival story in space.
//! ```
//!
//! Each item becomes a block of lines. The first line is the title, the
//! second is either the author or the start of the reason, and the rest is
//! the reason.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Recommendation;

/// Words that mark a line as narrative rather than an author name
pub const DEFAULT_REASON_KEYWORDS: &[&str] = &[
    "because", "story", "novel", "reader", "plot", "love", "war", "future", "thriller", "epic",
];

/// Lines with more words than this are treated as narrative
pub const DEFAULT_REASON_WORD_THRESHOLD: usize = 10;

fn re_marker_only() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#\d+[.)]?|\d+[.)]|[-*])$").unwrap())
}

fn re_leading_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#\d+[.)]?|\d+[.)]|[-*])\s+").unwrap())
}

fn re_title_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^title[:\-]\s*").unwrap())
}

fn re_author_label() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^author[:\-]\s*").unwrap())
}

fn re_by_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^by\s+").unwrap())
}

/// How the line after a title is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    AuthorLine,
    ReasonLine,
}

/// Tuning for the author/reason classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeuristicConfig {
    /// Substrings that mark a line as narrative, matched case-insensitively
    pub reason_keywords: Vec<String>,
    /// Word count above which a line is narrative
    pub reason_word_threshold: usize,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            reason_keywords: DEFAULT_REASON_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            reason_word_threshold: DEFAULT_REASON_WORD_THRESHOLD,
        }
    }
}

/// Decides whether the line following a title names the author
///
/// Keyword matching is a case-insensitive substring test, so "Warren" counts
/// as containing "war". Short narrative lines without a keyword are read as
/// author names.
pub fn classify_line(line: &str, config: &HeuristicConfig) -> LineKind {
    let lowered = line.to_lowercase();
    let has_keyword = config
        .reason_keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && lowered.contains(&keyword.to_lowercase()));
    let is_long = line.split_whitespace().count() > config.reason_word_threshold;

    if has_keyword || is_long {
        LineKind::ReasonLine
    } else {
        LineKind::AuthorLine
    }
}

/// Segments list-like prose into title/author/reason records
#[derive(Debug, Clone, Default)]
pub struct BlockParser {
    config: HeuristicConfig,
}

impl BlockParser {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    /// Parses every marker-delimited block, in order of appearance
    ///
    /// Text before the first ordinal or bullet marker belongs to no block and
    /// is ignored, so plain prose yields an empty list.
    pub fn parse(&self, text: &str) -> Vec<Recommendation> {
        split_blocks(text)
            .into_iter()
            .filter_map(|block| self.parse_block(&block))
            .collect()
    }

    fn parse_block(&self, block: &[String]) -> Option<Recommendation> {
        let (raw_title, rest) = block.split_first()?;
        let title = re_title_label().replace(raw_title, "").trim().to_string();

        let (author, reason_lines) = match rest.split_first() {
            Some((second, after))
                if classify_line(second, &self.config) == LineKind::AuthorLine =>
            {
                let author = re_author_label().replace(second, "");
                let author = re_by_prefix().replace(&author, "").trim().to_string();
                (author, after)
            }
            _ => (String::new(), rest),
        };

        Some(Recommendation {
            title,
            author,
            reason: reason_lines.join(" ").trim().to_string(),
        })
    }
}

/// Groups trimmed, non-blank lines into marker-delimited blocks
fn split_blocks(text: &str) -> Vec<Vec<String>> {
    let mut blocks: Vec<Vec<String>> = Vec::new();
    let mut current: Option<Vec<String>> = None;

    let lines = text
        .split(|c: char| c == '\r' || c == '\n')
        .map(str::trim)
        .filter(|line| !line.is_empty());

    for line in lines {
        if re_marker_only().is_match(line) {
            blocks.extend(current.replace(Vec::new()));
            continue;
        }

        let cleaned = re_leading_marker().replace(line, "");
        if cleaned.len() != line.len() {
            blocks.extend(current.replace(vec![cleaned.into_owned()]));
            continue;
        }

        match current.as_mut() {
            Some(block) => block.push(line.to_string()),
            None => tracing::trace!(line = %line, "Skipping line outside any list item"),
        }
    }

    blocks.extend(current);
    blocks.retain(|block| !block.is_empty());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Vec<Recommendation> {
        BlockParser::default().parse(text)
    }

    #[test]
    fn test_numbered_item_with_author_and_reason() {
        let result = parse("1. Project Hail Mary\nAndy Weir\nA gripping survival story in space.");
        assert_eq!(
            result,
            vec![Recommendation::new(
                "Project Hail Mary",
                "Andy Weir",
                "A gripping survival story in space."
            )]
        );
    }

    #[test]
    fn test_long_second_line_is_reason() {
        let result = parse(
            "1. The Martian\nAn astronaut is stranded on Mars and must survive using ingenuity.",
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].author, "");
        assert_eq!(
            result[0].reason,
            "An astronaut is stranded on Mars and must survive using ingenuity."
        );
    }

    #[test]
    fn test_keyword_second_line_is_reason() {
        let result = parse("- Rebecca\nA gothic love story.\nHaunting and atmospheric.");
        assert_eq!(result[0].author, "");
        assert_eq!(result[0].reason, "A gothic love story. Haunting and atmospheric.");
    }

    #[test]
    fn test_multiple_items_in_order() {
        let text = "Here are my picks:\n\
                    1. Dune\n\
                    by Frank Herbert\n\
                    Desert politics.\n\
                    2) Emma\n\
                    Author: Jane Austen\n\
                    #3. Kindred\n\
                    * Beloved\n\
                    - Middlemarch";
        let titles: Vec<String> = parse(text).into_iter().map(|r| r.title).collect();
        assert_eq!(titles, vec!["Dune", "Emma", "Kindred", "Beloved", "Middlemarch"]);

        let result = parse(text);
        assert_eq!(result[0].author, "Frank Herbert");
        assert_eq!(result[0].reason, "Desert politics.");
        assert_eq!(result[1].author, "Jane Austen");
        assert_eq!(result[1].reason, "");
    }

    #[test]
    fn test_bare_markers_separate_blocks() {
        let text = "1.\nTitle: Dune\nFrank Herbert\n2)\nEmma\nJane Austen\nA witty matchmaking plot.";
        let result = parse(text);
        assert_eq!(
            result,
            vec![
                Recommendation::new("Dune", "Frank Herbert", ""),
                Recommendation::new("Emma", "Jane Austen", "A witty matchmaking plot."),
            ]
        );
    }

    #[test]
    fn test_bare_bullets_separate_blocks() {
        let result = parse("-\nDune\nFrank Herbert\n*\nEmma");
        assert_eq!(
            result,
            vec![
                Recommendation::new("Dune", "Frank Herbert", ""),
                Recommendation::new("Emma", "", ""),
            ]
        );
    }

    #[test]
    fn test_hash_ordinals_without_punctuation() {
        let result = parse("#1\nDune\nFrank Herbert\n#2\nEmma\nJane Austen");
        assert_eq!(
            result,
            vec![
                Recommendation::new("Dune", "Frank Herbert", ""),
                Recommendation::new("Emma", "Jane Austen", ""),
            ]
        );

        let result = parse("#1 Dune\nFrank Herbert");
        assert_eq!(result, vec![Recommendation::new("Dune", "Frank Herbert", "")]);
    }

    #[test]
    fn test_bare_number_is_not_a_marker() {
        assert!(parse("1\nDune").is_empty());
        assert!(parse("1984 Orwell").is_empty());
    }

    #[test]
    fn test_trailing_bare_marker_yields_no_block() {
        let result = parse("1. Dune\n2.\n\n   \n");
        assert_eq!(result, vec![Recommendation::new("Dune", "", "")]);
    }

    #[test]
    fn test_carriage_returns_split_lines() {
        let result = parse("1. Dune\r\nFrank Herbert\rDesert politics.");
        assert_eq!(
            result,
            vec![Recommendation::new("Dune", "Frank Herbert", "Desert politics.")]
        );
    }

    #[test]
    fn test_marker_without_space_is_content() {
        assert!(parse("1.Dune").is_empty());
    }

    #[test]
    fn test_plain_prose_yields_nothing() {
        assert!(parse("I don't have any recommendations right now.").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("  \n\n ").is_empty());
    }

    #[test]
    fn test_classify_line() {
        let config = HeuristicConfig::default();
        assert_eq!(classify_line("Andy Weir", &config), LineKind::AuthorLine);
        assert_eq!(classify_line("An EPIC saga", &config), LineKind::ReasonLine);
        assert_eq!(
            classify_line("one two three four five six seven eight nine ten", &config),
            LineKind::AuthorLine
        );
        assert_eq!(
            classify_line("one two three four five six seven eight nine ten eleven", &config),
            LineKind::ReasonLine
        );
    }

    #[test]
    fn test_classify_line_with_custom_config() {
        let config = HeuristicConfig {
            reason_keywords: vec!["mystery".to_string()],
            reason_word_threshold: 3,
        };
        assert_eq!(classify_line("A love story", &config), LineKind::AuthorLine);
        assert_eq!(classify_line("A mystery", &config), LineKind::ReasonLine);
        assert_eq!(classify_line("Four words right here", &config), LineKind::ReasonLine);
    }

    #[test]
    fn test_classify_line_ignores_keyword_case() {
        let config = HeuristicConfig {
            reason_keywords: vec!["Mystery".to_string(), String::new()],
            reason_word_threshold: 10,
        };
        assert_eq!(classify_line("A locked-room MYSTERY", &config), LineKind::ReasonLine);
        assert_eq!(classify_line("Agatha Christie", &config), LineKind::AuthorLine);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "1. Dune\nFrank Herbert\n2. Emma\nJane Austen";
        assert_eq!(parse(text), parse(text));
    }
}
