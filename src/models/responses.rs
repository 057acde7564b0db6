use serde::{Deserialize, Serialize};
use crate::models::domain::{ScoredUniversity, ShortlistEntry};

/// Response for the shortlist endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortlistResponse {
    pub universities: Vec<ShortlistEntry>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Scored university with its display percentage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedUniversity {
    #[serde(flatten)]
    pub scored: ScoredUniversity,
    #[serde(rename = "compatibilityPercent")]
    pub compatibility_percent: String,
    #[serde(rename = "tuitionLabel")]
    pub tuition_label: String,
}

impl From<ScoredUniversity> for MatchedUniversity {
    fn from(scored: ScoredUniversity) -> Self {
        Self {
            compatibility_percent: scored.compatibility_percent(),
            tuition_label: scored.university.tuition_label(),
            scored,
        }
    }
}

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchedUniversity>,
    #[serde(rename = "poolSize")]
    pub pool_size: usize,
}

/// One onboarding step as exposed to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDescriptor {
    pub id: String,
    pub prompt: String,
    pub kind: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "catalogSize")]
    pub catalog_size: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
