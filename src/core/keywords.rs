use std::collections::BTreeSet;

/// Normalize a free-text course query into a keyword set for the prefilter
///
/// Lowercases, drops everything outside `[a-z ]`, then splits on whitespace.
/// An empty or symbol-only query yields an empty set.
pub fn normalize_query(query: &str) -> BTreeSet<String> {
    let cleaned: String = query
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == ' ')
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Split a course query into keywords for the scorer's course factor
///
/// Unlike [`normalize_query`] punctuation and digits are kept. A blank query
/// produces a single empty keyword, which is contained in every tag.
/// Leading and trailing whitespace around a non-blank query produces no
/// empty keyword, so `" philosophy"` only matches on `philosophy`.
pub fn split_query(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let keywords: Vec<String> = lowered.split_whitespace().map(str::to_string).collect();

    if keywords.is_empty() {
        vec![String::new()]
    } else {
        keywords
    }
}

/// Asymmetric tag match: the tag contains the keyword, or the keyword
/// contains the tag's first space-delimited token
///
/// NOTE: this is a loose approximation of topical overlap ("comp" hits
/// "computer science", "aircraft" hits "ai"). Ranking depends on it, so a
/// stemmed match would have to replace it everywhere at once.
#[inline]
pub fn tag_matches(tag: &str, keyword: &str) -> bool {
    tag.contains(keyword) || keyword.contains(first_token(tag))
}

/// True if any tag matches any keyword
pub fn any_tag_matches<T, K>(tags: &[T], keywords: &[K]) -> bool
where
    T: AsRef<str>,
    K: AsRef<str>,
{
    tags.iter().any(|tag| {
        keywords
            .iter()
            .any(|keyword| tag_matches(tag.as_ref(), keyword.as_ref()))
    })
}

#[inline]
fn first_token(tag: &str) -> &str {
    tag.split(' ').next().unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_query_strips_symbols() {
        let keywords = normalize_query("  Computer-Science & AI 2025 ");
        let expected: BTreeSet<String> = ["computerscience", "ai"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(keywords, expected);
    }

    #[test]
    fn test_normalize_query_deduplicates() {
        let keywords = normalize_query("data data science");
        assert_eq!(keywords.len(), 2);
    }

    #[test]
    fn test_normalize_query_empty() {
        assert!(normalize_query("").is_empty());
        assert!(normalize_query("123 !!").is_empty());
    }

    #[test]
    fn test_split_query_keeps_punctuation() {
        assert_eq!(split_query("Data-Science  MBA"), vec!["data-science", "mba"]);
    }

    #[test]
    fn test_split_query_blank_is_single_empty_keyword() {
        assert_eq!(split_query(""), vec![String::new()]);
        assert_eq!(split_query("   "), vec![String::new()]);
    }

    #[test]
    fn test_split_query_padding_adds_no_empty_keyword() {
        assert_eq!(split_query(" philosophy"), vec!["philosophy"]);
        assert_eq!(split_query("law \t"), vec!["law"]);
    }

    #[test]
    fn test_tag_matches_substring_branch() {
        assert!(tag_matches("computer science", "comp"));
        assert!(tag_matches("computer science", "science"));
        assert!(!tag_matches("computer science", "physics"));
    }

    #[test]
    fn test_tag_matches_first_token_branch() {
        // keyword contains "machine", the first token of the tag
        assert!(tag_matches("machine learning", "machines"));
        // first token of "ai" is "ai"; "aircraft" contains it
        assert!(tag_matches("ai", "aircraft"));
        // second token of the tag is never used by this branch
        assert!(!tag_matches("machine learning", "learnings"));
    }

    #[test]
    fn test_empty_keyword_matches_every_tag() {
        assert!(tag_matches("law", ""));
    }

    #[test]
    fn test_any_tag_matches() {
        let tags = vec!["business".to_string(), "law".to_string()];
        assert!(any_tag_matches(tags.as_slice(), &["law"][..]));
        assert!(!any_tag_matches(tags.as_slice(), &["medicine", "nursing"][..]));
    }
}
