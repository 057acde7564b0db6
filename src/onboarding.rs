//! Onboarding flow that collects an applicant profile step by step.
//!
//! The flow is a fixed sequence of typed steps. Question steps take a raw
//! text answer; computation steps (`ai_search`, `ai_match`) run the matcher.
//! Answers stay raw until [`build_profile`] parses them, falling back to the
//! profile defaults for anything unparsable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::core::{MatchResult, Matcher};
pub use crate::models::GpaScale;
use crate::models::{EnglishTest, ShortlistEntry, UserProfile, DEFAULT_COUNTRY, DEFAULT_GPA};

/// Errors raised when the flow is driven out of order
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("Expected step '{expected}', got '{got}'")]
    UnexpectedStep { expected: StepId, got: StepId },

    #[error("Onboarding flow is already complete")]
    Complete,

    #[error("Step '{0}' is computed and does not accept answers")]
    ComputedStep(StepId),

    #[error("Unknown onboarding step: {0}")]
    UnknownStep(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Goal,
    Country,
    Course,
    AiSearch,
    AdmitStatus,
    IntakeMonth,
    Gpa,
    EnglishTest,
    EnglishScore,
    LoanAmount,
    WorkExp,
    AiMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Question,
    Computation,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Question => "question",
            StepKind::Computation => "computation",
        }
    }
}

impl StepId {
    /// Steps in the order they are presented
    pub const SEQUENCE: [StepId; 12] = [
        StepId::Goal,
        StepId::Country,
        StepId::Course,
        StepId::AiSearch,
        StepId::AdmitStatus,
        StepId::IntakeMonth,
        StepId::Gpa,
        StepId::EnglishTest,
        StepId::EnglishScore,
        StepId::LoanAmount,
        StepId::WorkExp,
        StepId::AiMatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Goal => "goal",
            StepId::Country => "country",
            StepId::Course => "course",
            StepId::AiSearch => "ai_search",
            StepId::AdmitStatus => "admit_status",
            StepId::IntakeMonth => "intake_month",
            StepId::Gpa => "gpa",
            StepId::EnglishTest => "english_test",
            StepId::EnglishScore => "english_score",
            StepId::LoanAmount => "loan_amount",
            StepId::WorkExp => "work_exp",
            StepId::AiMatch => "ai_match",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            StepId::Goal => "How can we support you with your master's?",
            StepId::Country => "Where are you planning to do your master's?",
            StepId::Course => "Which course are you going to pursue?",
            StepId::AiSearch => "Finding universities for your course",
            StepId::AdmitStatus => "Help me understand your admit status.",
            StepId::IntakeMonth => "Please select your enrolling month for your masters.",
            StepId::Gpa => "What is your current academic score?",
            StepId::EnglishTest => "Have you taken any English proficiency test?",
            StepId::EnglishScore => "What is your English test score?",
            StepId::LoanAmount => "How much loan amount do you need?",
            StepId::WorkExp => "Enter your work experience (in months).",
            StepId::AiMatch => "Matching you with your top universities",
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            StepId::AiSearch | StepId::AiMatch => StepKind::Computation,
            _ => StepKind::Question,
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepId {
    type Err = OnboardingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StepId::SEQUENCE
            .iter()
            .copied()
            .find(|step| step.as_str() == s.trim())
            .ok_or_else(|| OnboardingError::UnknownStep(s.to_string()))
    }
}

/// Raw answer to one step: the stored value and what the applicant saw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub value: String,
    pub label: String,
}

impl Answer {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Answer whose label is the value itself
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// Answers collected so far, keyed by step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<StepId, Answer>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build answers from string-keyed raw values, ignoring unknown steps
    pub fn from_raw<I, K, V>(raw: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut answers = Self::new();
        for (key, value) in raw {
            match key.as_ref().parse::<StepId>() {
                Ok(step) => answers.insert(step, Answer::plain(value)),
                Err(_) => tracing::debug!("Ignoring answer for unknown step: {}", key.as_ref()),
            }
        }
        answers
    }

    /// Rewrite a raw `gpa` answer entered on `scale` onto the 0-10 scale
    ///
    /// Unparsable answers are left alone for [`build_profile`] to default.
    pub fn apply_gpa_scale(&mut self, scale: GpaScale) {
        let Some(raw) = self.value(StepId::Gpa).map(str::to_string) else {
            return;
        };

        match gpa_answer(&raw, scale) {
            Some(answer) => self.insert(StepId::Gpa, answer),
            None => tracing::debug!("Leaving unparsable gpa answer {:?} unscaled", raw),
        }
    }

    pub fn insert(&mut self, step: StepId, answer: Answer) {
        self.0.insert(step, answer);
    }

    pub fn get(&self, step: StepId) -> Option<&Answer> {
        self.0.get(&step)
    }

    pub fn value(&self, step: StepId) -> Option<&str> {
        self.0.get(&step).map(|answer| answer.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn english_test(&self) -> EnglishTest {
        self.value(StepId::EnglishTest)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

/// Convert a raw academic score to the 0-10 scale
///
/// Percentages are divided by ten and rounded to two decimals. A trailing
/// `%` marks the input as a percentage whatever `scale` says. Negative or
/// non-numeric input is rejected.
pub fn normalize_gpa(raw: &str, scale: GpaScale) -> Option<f64> {
    let (number, scale) = split_percent(raw, scale);
    let value = parse_decimal(number)?;
    if value < 0.0 {
        return None;
    }

    match scale {
        GpaScale::Cgpa => Some(value),
        GpaScale::Percentage => Some((value / 10.0 * 100.0).round() / 100.0),
    }
}

/// Build the answer stored for the `gpa` step
pub fn gpa_answer(raw: &str, scale: GpaScale) -> Option<Answer> {
    let (number, scale) = split_percent(raw, scale);
    let entered = parse_decimal(number)?;
    let normalized = normalize_gpa(number, scale)?;

    let label = match scale {
        GpaScale::Cgpa => format!("{} / 10", entered),
        GpaScale::Percentage => format!("{}%", entered),
    };

    Some(Answer::new(normalized.to_string(), label))
}

fn split_percent(raw: &str, scale: GpaScale) -> (&str, GpaScale) {
    match raw.trim().strip_suffix('%') {
        Some(number) => (number, GpaScale::Percentage),
        None => (raw, scale),
    }
}

/// Parse free text as a finite decimal
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse free text as a non-negative whole number
///
/// Thousands separators, a leading currency sign and surrounding whitespace
/// are tolerated; fractional input is truncated.
pub fn parse_whole(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(['₹', '$', '€', '£'])
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();

    if let Ok(value) = cleaned.parse::<u64>() {
        return Some(value);
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(|value| value.trunc() as u64)
}

/// Build a scoring profile from raw answers
///
/// Never fails: every missing or unparsable field takes its default.
pub fn build_profile(answers: &Answers) -> UserProfile {
    let country = answers
        .value(StepId::Country)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_COUNTRY)
        .to_string();

    let course_query = answers.value(StepId::Course).unwrap_or_default().to_string();

    let gpa = match answers.value(StepId::Gpa) {
        Some(raw) => normalize_gpa(raw, GpaScale::Cgpa).unwrap_or_else(|| {
            tracing::debug!("Unparsable gpa answer {:?}, using default", raw);
            DEFAULT_GPA
        }),
        None => DEFAULT_GPA,
    };

    let english_test = answers.english_test();
    let english_score = answers
        .value(StepId::EnglishScore)
        .and_then(parse_decimal)
        .unwrap_or(0.0);

    let loan_amount_requested = answers
        .value(StepId::LoanAmount)
        .and_then(parse_whole)
        .unwrap_or(0);

    let work_experience_months = answers
        .value(StepId::WorkExp)
        .and_then(parse_whole)
        .and_then(|months| u32::try_from(months).ok())
        .unwrap_or(0);

    UserProfile {
        country,
        course_query,
        gpa,
        english_test,
        english_score,
        loan_amount_requested,
        work_experience_months,
    }
}

/// One applicant's pass through the onboarding steps
#[derive(Debug, Clone, Default)]
pub struct OnboardingSession {
    answers: Answers,
    cursor: usize,
    shortlist: Vec<ShortlistEntry>,
}

impl OnboardingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> Option<StepId> {
        StepId::SEQUENCE.get(self.cursor).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= StepId::SEQUENCE.len()
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn shortlist(&self) -> &[ShortlistEntry] {
        &self.shortlist
    }

    pub fn profile(&self) -> UserProfile {
        build_profile(&self.answers)
    }

    /// Record the answer to the current question step and move on
    ///
    /// Returns the next step, or `None` once the flow is complete.
    pub fn submit(&mut self, step: StepId, answer: Answer) -> Result<Option<StepId>, OnboardingError> {
        self.expect_step(step)?;
        if step.kind() == StepKind::Computation {
            return Err(OnboardingError::ComputedStep(step));
        }

        self.answers.insert(step, answer);
        self.advance();
        Ok(self.current_step())
    }

    /// Complete the `ai_search` step by shortlisting for the collected
    /// country and course
    pub fn run_search(&mut self, matcher: &Matcher) -> Result<&[ShortlistEntry], OnboardingError> {
        self.expect_step(StepId::AiSearch)?;

        let profile = self.profile();
        self.shortlist = matcher.shortlist(&profile.country, &profile.course_query);
        self.advance();

        Ok(&self.shortlist)
    }

    /// Complete the `ai_match` step by scoring the shortlist against the
    /// collected profile
    pub fn run_match(&mut self, matcher: &Matcher) -> Result<MatchResult, OnboardingError> {
        self.expect_step(StepId::AiMatch)?;

        let result = matcher.rank(&self.shortlist, &self.profile());
        self.advance();

        Ok(result)
    }

    fn expect_step(&self, step: StepId) -> Result<(), OnboardingError> {
        match self.current_step() {
            None => Err(OnboardingError::Complete),
            Some(expected) if expected != step => Err(OnboardingError::UnexpectedStep { expected, got: step }),
            Some(_) => Ok(()),
        }
    }

    fn advance(&mut self) {
        self.cursor += 1;

        // No test taken means there is no score to ask for
        if self.current_step() == Some(StepId::EnglishScore)
            && self.answers.english_test() == EnglishTest::NotTaken
        {
            self.answers.insert(StepId::EnglishScore, Answer::new("none", "N/A"));
            self.cursor += 1;
        }
    }
}
