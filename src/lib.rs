//! Uni Match - university matching service for study-abroad onboarding
//!
//! This library provides the matching engine behind the onboarding flow: a
//! keyword relevance prefilter that shortlists universities for a destination
//! and course, and a compatibility scorer that ranks the shortlist against an
//! applicant's GPA, English test, loan needs and work experience.

pub mod config;
pub mod core;
pub mod models;
pub mod onboarding;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchResult, prefilter, score};
pub use models::{University, UserProfile, EnglishTest, ShortlistEntry, ScoredUniversity, MatchTier};
pub use onboarding::{build_profile, Answers, OnboardingSession, StepId};
pub use services::{Catalog, CatalogError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert!(prefilter(&[], "USA", "").is_empty());
        assert!(score(&[], &UserProfile::default()).is_empty());
    }
}
