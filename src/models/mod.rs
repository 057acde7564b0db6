// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Currency, EnglishTest, GpaScale, MatchTier, ScoreBreakdown, ScoredUniversity, ShortlistEntry,
    University, UserProfile, DEFAULT_COUNTRY, DEFAULT_GPA, SUPPORTED_COUNTRIES,
};
pub use requests::{MatchRequest, ShortlistRequest};
pub use responses::{
    ErrorResponse, HealthResponse, MatchResponse, MatchedUniversity, ShortlistResponse,
    StepDescriptor,
};
