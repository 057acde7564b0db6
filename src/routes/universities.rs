use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    ErrorResponse, HealthResponse, MatchRequest, MatchResponse, MatchedUniversity,
    ShortlistRequest, ShortlistResponse, StepDescriptor,
};
use crate::onboarding::{build_profile, Answers, StepId};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
}

/// Configure all university-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/onboarding/steps", web::get().to(onboarding_steps))
        .route("/universities/shortlist", web::post().to(shortlist))
        .route("/universities/match", web::post().to(match_universities));
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        catalog_size: state.matcher.catalog().len(),
    })
}

/// List the onboarding steps in presentation order
///
/// GET /api/v1/onboarding/steps
async fn onboarding_steps() -> impl Responder {
    let steps: Vec<StepDescriptor> = StepId::SEQUENCE
        .iter()
        .map(|step| StepDescriptor {
            id: step.as_str().to_string(),
            prompt: step.prompt().to_string(),
            kind: step.kind().as_str().to_string(),
        })
        .collect();

    HttpResponse::Ok().json(steps)
}

/// Shortlist endpoint
///
/// POST /api/v1/universities/shortlist
///
/// Request body:
/// ```json
/// {
///   "country": "USA",
///   "course": "computer science"
/// }
/// ```
async fn shortlist(
    state: web::Data<AppState>,
    req: web::Json<ShortlistRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for shortlist request: field_errors={:?}", errors);
        return validation_failed(errors);
    }

    let universities = state.matcher.shortlist(&req.country, &req.course);
    let total_candidates = universities.len();

    tracing::info!(
        "Returning {} shortlisted universities for country={} course={:?}",
        total_candidates,
        req.country,
        req.course
    );

    HttpResponse::Ok().json(ShortlistResponse {
        universities,
        total_candidates,
    })
}

/// Match endpoint
///
/// POST /api/v1/universities/match
///
/// Request body:
/// ```json
/// {
///   "answers": {
///     "country": "USA",
///     "course": "computer science",
///     "gpa": "9.5",
///     "english_test": "ielts",
///     "english_score": "7.5",
///     "loan_amount": "5000000",
///     "work_exp": "14"
///   },
///   "gpaScale": "cgpa",
///   "shortlist": ["Massachusetts Institute of Technology"]
/// }
/// ```
async fn match_universities(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: field_errors={:?}", errors);
        return validation_failed(errors);
    }

    let MatchRequest { answers, gpa_scale, shortlist } = req.into_inner();

    let mut answers = Answers::from_raw(answers);
    answers.apply_gpa_scale(gpa_scale);
    let profile = build_profile(&answers);
    let shortlist = state.matcher.resolve_shortlist(&shortlist);

    tracing::debug!("Matching profile {:?} against {} shortlisted", profile, shortlist.len());

    let result = state.matcher.rank(&shortlist, &profile);

    tracing::info!(
        "Returning {} matches for country={} (pool of {})",
        result.matches.len(),
        profile.country,
        result.pool_size
    );

    HttpResponse::Ok().json(MatchResponse {
        matches: result.matches.into_iter().map(MatchedUniversity::from).collect(),
        pool_size: result.pool_size,
    })
}
