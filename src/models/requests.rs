use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

use crate::models::domain::{GpaScale, DEFAULT_COUNTRY};

/// Request to shortlist universities for a destination and course
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShortlistRequest {
    #[serde(default = "default_country")]
    #[validate(length(min = 1, max = 64))]
    pub country: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub course: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

/// Request to score universities against onboarding answers
///
/// `answers` is keyed by onboarding step id (`gpa`, `english_test`, ...) and
/// holds the raw text the applicant entered. `gpaScale` says how the `gpa`
/// answer was entered (`cgpa` unless stated). `shortlist` names catalog
/// entries produced by an earlier shortlist call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[serde(default)]
    pub answers: HashMap<String, String>,
    #[serde(default, rename = "gpaScale")]
    pub gpa_scale: GpaScale,
    #[serde(default)]
    #[validate(length(max = 10))]
    pub shortlist: Vec<String>,
}
