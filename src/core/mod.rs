// Core algorithm exports
pub mod keywords;
pub mod matcher;
pub mod prefilter;
pub mod scoring;

pub use keywords::{normalize_query, split_query, tag_matches};
pub use matcher::{Matcher, MatchResult};
pub use prefilter::{prefilter, calculate_relevance, SHORTLIST_LIMIT};
pub use scoring::{score, select_pool, calculate_score_breakdown, minimum_english_score, MATCH_LIMIT, FALLBACK_POOL_LIMIT};
