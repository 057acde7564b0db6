use std::sync::Arc;

use crate::core::{
    prefilter::prefilter,
    scoring::{score, select_pool},
};
use crate::models::{ScoredUniversity, ShortlistEntry, UserProfile};
use crate::services::Catalog;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredUniversity>,
    pub pool_size: usize,
}

/// Matching orchestrator over a shared, read-only catalog
///
/// # Pipeline Stages
/// 1. Relevance prefilter (country + course keywords) into a shortlist
/// 2. Pool selection (shortlist, or the profile's country as fallback)
/// 3. Compatibility scoring and ranking
#[derive(Debug, Clone)]
pub struct Matcher {
    catalog: Arc<Catalog>,
}

impl Matcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shortlist up to ten universities for a destination and course query
    pub fn shortlist(&self, country: &str, course_query: &str) -> Vec<ShortlistEntry> {
        let shortlist = prefilter(self.catalog.universities(), country, course_query);

        tracing::debug!(
            "Shortlisted {} universities for country={:?} course={:?}",
            shortlist.len(),
            country,
            course_query
        );

        shortlist
    }

    /// Rebuild a shortlist from university names, keeping the given order
    ///
    /// Names missing from the catalog are dropped.
    pub fn resolve_shortlist(&self, names: &[String]) -> Vec<ShortlistEntry> {
        names
            .iter()
            .filter_map(|name| match self.catalog.find(name) {
                Some(university) => Some(ShortlistEntry {
                    university: university.clone(),
                    relevance: 0,
                }),
                None => {
                    tracing::warn!("Ignoring unknown university in shortlist: {}", name);
                    None
                }
            })
            .collect()
    }

    /// Score the shortlist (or the country fallback pool) against a profile
    ///
    /// # Returns
    /// MatchResult with at most five universities, best first
    pub fn rank(&self, shortlist: &[ShortlistEntry], profile: &UserProfile) -> MatchResult {
        let pool = select_pool(shortlist, self.catalog.in_country(&profile.country));
        let matches = score(&pool, profile);

        tracing::debug!(
            "Scored {} universities from a pool of {} (shortlist: {})",
            matches.len(),
            pool.len(),
            shortlist.len()
        );

        MatchResult {
            matches,
            pool_size: pool.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EnglishTest, University};

    fn create_university(name: &str, country: &str, rank: u32, acceptance: u8, tags: &[&str]) -> University {
        University {
            name: name.to_string(),
            location: format!("Somewhere, {}", country),
            country: country.to_string(),
            global_rank: rank,
            acceptance_rate_percent: acceptance,
            min_gpa: 7.5,
            min_ielts: 6.5,
            min_toefl: 90,
            tuition_per_year: 30000,
            course_tags: tags.iter().map(|t| t.to_string()).collect(),
            loan_partner: true,
            highlight: None,
        }
    }

    fn create_matcher() -> Matcher {
        let catalog = Catalog::from_universities(vec![
            create_university("Selective", "UK", 2, 5, &["computer science"]),
            create_university("Open Doors", "UK", 90, 60, &["computer science"]),
            create_university("Arts Academy", "UK", 50, 60, &["arts"]),
            create_university("Maple", "Canada", 18, 43, &["business"]),
        ])
        .unwrap();

        Matcher::new(Arc::new(catalog))
    }

    #[test]
    fn test_shortlist_then_rank() {
        let matcher = create_matcher();
        let shortlist = matcher.shortlist("UK", "computer science");
        assert_eq!(shortlist[0].university.name, "Selective");

        let profile = UserProfile {
            country: "UK".to_string(),
            course_query: "computer science".to_string(),
            gpa: 8.0,
            english_test: EnglishTest::Ielts,
            english_score: 7.0,
            ..UserProfile::default()
        };
        let result = matcher.rank(&shortlist, &profile);

        assert_eq!(result.pool_size, 3);
        // Acceptance rate outweighs both global rank and the course match here
        assert_eq!(result.matches[0].university.name, "Open Doors");
        assert_eq!(result.matches[0].compatibility_score, 85);
        assert_eq!(result.matches[1].university.name, "Arts Academy");
        assert_eq!(result.matches[1].compatibility_score, 73);
        assert_eq!(result.matches[2].university.name, "Selective");
        assert_eq!(result.matches[2].compatibility_score, 70);
    }

    #[test]
    fn test_rank_without_shortlist_uses_country() {
        let matcher = create_matcher();
        let profile = UserProfile {
            country: "Canada".to_string(),
            ..UserProfile::default()
        };

        let result = matcher.rank(&[], &profile);
        assert_eq!(result.pool_size, 1);
        assert_eq!(result.matches[0].university.name, "Maple");
    }

    #[test]
    fn test_rank_unknown_country_without_shortlist_is_empty() {
        let matcher = create_matcher();
        let profile = UserProfile {
            country: "Other".to_string(),
            ..UserProfile::default()
        };

        let result = matcher.rank(&[], &profile);
        assert_eq!(result.pool_size, 0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_resolve_shortlist_drops_unknown_names() {
        let matcher = create_matcher();
        let names = vec!["Maple".to_string(), "Nowhere U".to_string(), "Selective".to_string()];

        let shortlist = matcher.resolve_shortlist(&names);
        let resolved: Vec<&str> = shortlist.iter().map(|e| e.university.name.as_str()).collect();
        assert_eq!(resolved, vec!["Maple", "Selective"]);
    }
}
