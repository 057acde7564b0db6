use crate::core::keywords::{any_tag_matches, split_query};
use crate::models::{EnglishTest, ScoreBreakdown, ScoredUniversity, ShortlistEntry, University, UserProfile};

/// Maximum number of universities returned by the scorer
pub const MATCH_LIMIT: usize = 5;

/// Cap applied to the country fallback pool when no shortlist exists
pub const FALLBACK_POOL_LIMIT: usize = 10;

/// Duolingo has no per-university threshold in the catalog
const DUOLINGO_MINIMUM: f64 = 100.0;

/// Choose the universities to score
///
/// A non-empty shortlist is used as-is. Otherwise the first
/// [`FALLBACK_POOL_LIMIT`] of `country_candidates` (the catalog entries in
/// the profile's country, in catalog order) are used.
pub fn select_pool<'a, I>(shortlist: &[ShortlistEntry], country_candidates: I) -> Vec<University>
where
    I: IntoIterator<Item = &'a University>,
{
    if !shortlist.is_empty() {
        return shortlist.iter().map(|entry| entry.university.clone()).collect();
    }

    country_candidates
        .into_iter()
        .take(FALLBACK_POOL_LIMIT)
        .cloned()
        .collect()
}

/// Score every university in the pool and keep the best [`MATCH_LIMIT`]
///
/// Sorting is stable, so equal scores keep their pool order.
pub fn score(pool: &[University], profile: &UserProfile) -> Vec<ScoredUniversity> {
    let mut scored: Vec<ScoredUniversity> = pool
        .iter()
        .map(|university| {
            let breakdown = calculate_score_breakdown(university, profile);
            ScoredUniversity::from_breakdown(university.clone(), breakdown)
        })
        .collect();

    scored.sort_by(|a, b| b.compatibility_score.cmp(&a.compatibility_score));
    scored.truncate(MATCH_LIMIT);
    scored
}

/// Calculate the per-factor points (total 0-100) for one university
///
/// Scoring formula:
/// score = min(100,
///     gpa_fit          # 0-35, by gap to the university's minimum GPA
///   + english_fit      # 0-25, by gap to the test's minimum (flat 12 if untested)
///   + course_fit       # 20 if any course tag matches, else 8
///   + acceptance_fit   # 0-15, by acceptance rate
///   + bonus            # 0-8, loan partner and work experience
/// )
pub fn calculate_score_breakdown(university: &University, profile: &UserProfile) -> ScoreBreakdown {
    ScoreBreakdown {
        gpa: calculate_gpa_score(profile.gpa, university.min_gpa),
        english: calculate_english_score(profile.english_test, profile.english_score, university),
        course: calculate_course_score(&profile.course_query, &university.course_tags),
        acceptance: calculate_acceptance_score(university.acceptance_rate_percent),
        bonus: calculate_bonus_score(
            university.loan_partner,
            profile.loan_amount_requested,
            profile.work_experience_months,
        ),
    }
}

#[inline]
fn calculate_gpa_score(gpa: f64, min_gpa: f64) -> u8 {
    let gap = gpa - min_gpa;

    if gap >= 1.0 {
        35
    } else if gap >= 0.3 {
        30
    } else if gap >= 0.0 {
        24
    } else if gap >= -0.5 {
        14
    } else if gap >= -1.0 {
        6
    } else {
        0
    }
}

/// Minimum score a university expects on the given test
///
/// PTE has no catalog column, so an IELTS-equivalent threshold is derived as
/// `round(min_ielts * 9 + 10)`.
#[inline]
pub fn minimum_english_score(test: EnglishTest, university: &University) -> Option<f64> {
    match test {
        EnglishTest::Ielts => Some(university.min_ielts),
        EnglishTest::Toefl => Some(university.min_toefl as f64),
        EnglishTest::Pte => Some((university.min_ielts * 9.0 + 10.0).round()),
        EnglishTest::Duolingo => Some(DUOLINGO_MINIMUM),
        EnglishTest::NotTaken => None,
    }
}

#[inline]
fn calculate_english_score(test: EnglishTest, english_score: f64, university: &University) -> u8 {
    // Untested applicants (or a missing score) get a flat allowance
    if english_score.is_nan() || english_score <= 0.0 {
        return 12;
    }

    let Some(minimum) = minimum_english_score(test, university) else {
        return 12;
    };

    let gap = english_score - minimum;

    if gap >= 5.0 {
        25
    } else if gap >= 0.0 {
        20
    } else if gap >= -3.0 {
        12
    } else {
        5
    }
}

#[inline]
fn calculate_course_score(course_query: &str, course_tags: &[String]) -> u8 {
    let keywords = split_query(course_query);

    if any_tag_matches(course_tags, keywords.as_slice()) {
        20
    } else {
        8
    }
}

#[inline]
fn calculate_acceptance_score(acceptance_rate_percent: u8) -> u8 {
    if acceptance_rate_percent >= 50 {
        15
    } else if acceptance_rate_percent >= 25 {
        10
    } else if acceptance_rate_percent >= 10 {
        5
    } else {
        0
    }
}

#[inline]
fn calculate_bonus_score(loan_partner: bool, loan_amount_requested: u64, work_experience_months: u32) -> u8 {
    let loan = if loan_partner && loan_amount_requested > 0 { 5 } else { 0 };

    let experience = if work_experience_months >= 12 {
        3
    } else if work_experience_months >= 6 {
        1
    } else {
        0
    };

    loan + experience
}
