use std::collections::BTreeSet;

use crate::core::keywords::{normalize_query, tag_matches};
use crate::models::{ShortlistEntry, University};

/// Maximum number of universities carried from the prefilter into scoring
pub const SHORTLIST_LIMIT: usize = 10;

/// Shortlist universities for a destination country and course query
///
/// Candidates are the catalog entries in `country`, or the whole catalog when
/// none match (unsupported or "Other" destinations). Each candidate is ranked
/// by how many query keywords its course tags cover, ties going to the better
/// global rank.
pub fn prefilter(catalog: &[University], country: &str, course_query: &str) -> Vec<ShortlistEntry> {
    let mut candidates: Vec<&University> = catalog
        .iter()
        .filter(|university| university.country == country)
        .collect();

    if candidates.is_empty() {
        candidates = catalog.iter().collect();
    }

    let keywords = normalize_query(course_query);

    let mut shortlist: Vec<ShortlistEntry> = candidates
        .into_iter()
        .map(|university| ShortlistEntry {
            relevance: calculate_relevance(university, &keywords),
            university: university.clone(),
        })
        .collect();

    // Sort by relevance (descending) and then by global rank (ascending)
    shortlist.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| a.university.global_rank.cmp(&b.university.global_rank))
    });

    shortlist.truncate(SHORTLIST_LIMIT);
    shortlist
}

/// Number of keywords matched by at least one of the university's course tags
#[inline]
pub fn calculate_relevance(university: &University, keywords: &BTreeSet<String>) -> u32 {
    keywords
        .iter()
        .filter(|keyword| {
            university
                .course_tags
                .iter()
                .any(|tag| tag_matches(tag, keyword))
        })
        .count() as u32
}
