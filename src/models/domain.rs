use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Study destinations a catalog entry may belong to
pub const SUPPORTED_COUNTRIES: &[&str] = &[
    "USA",
    "UK",
    "Canada",
    "Australia",
    "Germany",
    "Ireland",
    "Netherlands",
    "Sweden",
    "France",
    "Italy",
    "Spain",
    "Singapore",
];

pub const DEFAULT_COUNTRY: &str = "USA";
pub const DEFAULT_GPA: f64 = 6.5;

/// Catalog entry describing one institution and its admission thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct University {
    #[validate(length(min = 1))]
    pub name: String,
    pub location: String,
    #[validate(custom(function = "validate_country"))]
    pub country: String,
    #[serde(rename = "globalRank")]
    #[validate(range(min = 1))]
    pub global_rank: u32,
    #[serde(rename = "acceptanceRatePercent")]
    #[validate(range(max = 100))]
    pub acceptance_rate_percent: u8,
    #[serde(rename = "minGpa")]
    #[validate(range(min = 0.0, max = 10.0))]
    pub min_gpa: f64,
    #[serde(rename = "minIelts")]
    #[validate(range(min = 0.0, max = 9.0))]
    pub min_ielts: f64,
    #[serde(rename = "minToefl")]
    #[validate(range(max = 120))]
    pub min_toefl: u16,
    #[serde(rename = "tuitionPerYear")]
    #[validate(range(min = 1))]
    pub tuition_per_year: u32,
    #[serde(rename = "courseTags")]
    #[validate(length(min = 1), custom(function = "validate_course_tags"))]
    pub course_tags: Vec<String>,
    #[serde(rename = "loanPartner", default)]
    pub loan_partner: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

impl University {
    /// Currency tuition is quoted in
    pub fn currency(&self) -> Currency {
        Currency::for_country(&self.country)
    }

    /// Tuition formatted for display, e.g. `$57,986/yr`
    pub fn tuition_label(&self) -> String {
        format!(
            "{}{}/yr",
            self.currency().symbol(),
            group_thousands(self.tuition_per_year as u64)
        )
    }
}

fn validate_country(country: &str) -> Result<(), ValidationError> {
    if SUPPORTED_COUNTRIES.contains(&country) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_country"))
    }
}

fn validate_course_tags(tags: &[String]) -> Result<(), ValidationError> {
    let well_formed = tags
        .iter()
        .all(|tag| !tag.trim().is_empty() && !tag.chars().any(|c| c.is_uppercase()));

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("course_tags_not_lowercase"))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
}

impl Currency {
    pub fn for_country(country: &str) -> Self {
        if country == "Germany" {
            Currency::Eur
        } else {
            Currency::Usd
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

/// English proficiency test the applicant has taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnglishTest {
    Ielts,
    Toefl,
    Pte,
    Duolingo,
    #[default]
    #[serde(rename = "none")]
    NotTaken,
}

impl EnglishTest {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnglishTest::Ielts => "ielts",
            EnglishTest::Toefl => "toefl",
            EnglishTest::Pte => "pte",
            EnglishTest::Duolingo => "duolingo",
            EnglishTest::NotTaken => "none",
        }
    }
}

impl fmt::Display for EnglishTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown english test: {0}")]
pub struct UnknownEnglishTest(pub String);

impl FromStr for EnglishTest {
    type Err = UnknownEnglishTest;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ielts" => Ok(EnglishTest::Ielts),
            "toefl" => Ok(EnglishTest::Toefl),
            "pte" => Ok(EnglishTest::Pte),
            "duolingo" => Ok(EnglishTest::Duolingo),
            "none" | "" => Ok(EnglishTest::NotTaken),
            other => Err(UnknownEnglishTest(other.to_string())),
        }
    }
}

/// Scale the applicant entered their academic score on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpaScale {
    /// Cumulative GPA out of 10
    #[default]
    Cgpa,
    Percentage,
}

/// Applicant profile assembled during onboarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(rename = "courseQuery", default)]
    pub course_query: String,
    #[serde(default = "default_gpa")]
    pub gpa: f64,
    #[serde(rename = "englishTest", default)]
    pub english_test: EnglishTest,
    #[serde(rename = "englishScore", default)]
    pub english_score: f64,
    #[serde(rename = "loanAmountRequested", default)]
    pub loan_amount_requested: u64,
    #[serde(rename = "workExperienceMonths", default)]
    pub work_experience_months: u32,
}

fn default_country() -> String { DEFAULT_COUNTRY.to_string() }
fn default_gpa() -> f64 { DEFAULT_GPA }

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            country: default_country(),
            course_query: String::new(),
            gpa: default_gpa(),
            english_test: EnglishTest::NotTaken,
            english_score: 0.0,
            loan_amount_requested: 0,
            work_experience_months: 0,
        }
    }
}

/// Prefilter output: a university and how many query keywords it covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    #[serde(flatten)]
    pub university: University,
    pub relevance: u32,
}

/// Presentation bucket for a compatibility score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    High,
    Mid,
    Low,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            MatchTier::High
        } else if score >= 45 {
            MatchTier::Mid
        } else {
            MatchTier::Low
        }
    }
}

/// Points awarded per factor before the total is clamped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub gpa: u8,
    pub english: u8,
    pub course: u8,
    pub acceptance: u8,
    pub bonus: u8,
}

impl ScoreBreakdown {
    /// Sum of all factors, truncated at 100
    pub fn total(&self) -> u8 {
        let raw = self.gpa as u16
            + self.english as u16
            + self.course as u16
            + self.acceptance as u16
            + self.bonus as u16;
        raw.min(100) as u8
    }
}

/// Scorer output for one university
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredUniversity {
    #[serde(flatten)]
    pub university: University,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    pub tier: MatchTier,
    pub breakdown: ScoreBreakdown,
}

impl ScoredUniversity {
    pub fn from_breakdown(university: University, breakdown: ScoreBreakdown) -> Self {
        let compatibility_score = breakdown.total();
        Self {
            university,
            compatibility_score,
            tier: MatchTier::from_score(compatibility_score),
            breakdown,
        }
    }

    pub fn compatibility_percent(&self) -> String {
        format!("{}%", self.compatibility_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_university() -> University {
        University {
            name: "Technical University of Munich".to_string(),
            location: "Munich, Germany".to_string(),
            country: "Germany".to_string(),
            global_rank: 37,
            acceptance_rate_percent: 8,
            min_gpa: 8.0,
            min_ielts: 6.5,
            min_toefl: 88,
            tuition_per_year: 2600,
            course_tags: vec!["computer science".to_string(), "robotics".to_string()],
            loan_partner: false,
            highlight: None,
        }
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(MatchTier::from_score(100), MatchTier::High);
        assert_eq!(MatchTier::from_score(70), MatchTier::High);
        assert_eq!(MatchTier::from_score(69), MatchTier::Mid);
        assert_eq!(MatchTier::from_score(45), MatchTier::Mid);
        assert_eq!(MatchTier::from_score(44), MatchTier::Low);
        assert_eq!(MatchTier::from_score(0), MatchTier::Low);
    }

    #[test]
    fn test_breakdown_total_is_clamped() {
        let breakdown = ScoreBreakdown { gpa: 35, english: 25, course: 20, acceptance: 15, bonus: 8 };
        assert_eq!(breakdown.total(), 100);

        let breakdown = ScoreBreakdown { gpa: 30, english: 20, course: 20, acceptance: 0, bonus: 8 };
        assert_eq!(breakdown.total(), 78);
    }

    #[test]
    fn test_tuition_label_uses_country_currency() {
        let mut university = sample_university();
        assert_eq!(university.tuition_label(), "€2,600/yr");

        university.country = "USA".to_string();
        university.tuition_per_year = 57986;
        assert_eq!(university.tuition_label(), "$57,986/yr");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_university_validation() {
        let university = sample_university();
        assert!(university.validate().is_ok());

        let mut bad_gpa = sample_university();
        bad_gpa.min_gpa = 10.5;
        assert!(bad_gpa.validate().is_err());

        let mut bad_country = sample_university();
        bad_country.country = "Atlantis".to_string();
        assert!(bad_country.validate().is_err());

        let mut no_tags = sample_university();
        no_tags.course_tags.clear();
        assert!(no_tags.validate().is_err());

        let mut shouty_tags = sample_university();
        shouty_tags.course_tags = vec!["Computer Science".to_string()];
        assert!(shouty_tags.validate().is_err());
    }

    #[test]
    fn test_english_test_parsing() {
        assert_eq!("IELTS".parse::<EnglishTest>(), Ok(EnglishTest::Ielts));
        assert_eq!(" pte ".parse::<EnglishTest>(), Ok(EnglishTest::Pte));
        assert_eq!("none".parse::<EnglishTest>(), Ok(EnglishTest::NotTaken));
        let err = "Cambridge".parse::<EnglishTest>().unwrap_err();
        assert_eq!(err, UnknownEnglishTest("cambridge".to_string()));
        assert_eq!(err.to_string(), "unknown english test: cambridge");
    }

    #[test]
    fn test_profile_defaults_from_empty_json() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.country, "USA");
        assert_eq!(profile.gpa, 6.5);
        assert_eq!(profile.english_test, EnglishTest::NotTaken);
    }
}
