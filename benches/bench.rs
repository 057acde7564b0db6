// Criterion benchmarks for Uni Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use uni_match::core::{keywords::normalize_query, prefilter::prefilter, scoring::score};
use uni_match::models::{EnglishTest, University, UserProfile};

const COUNTRIES: [&str; 6] = ["USA", "UK", "Canada", "Australia", "Germany", "Ireland"];
const TAGS: [&str; 8] = [
    "computer science",
    "data science",
    "engineering",
    "business",
    "medicine",
    "law",
    "ai",
    "mathematics",
];

fn create_university(id: usize) -> University {
    University {
        name: format!("University {}", id),
        location: "Somewhere".to_string(),
        country: COUNTRIES[id % COUNTRIES.len()].to_string(),
        global_rank: (id + 1) as u32,
        acceptance_rate_percent: (id % 80) as u8,
        min_gpa: 6.0 + (id % 40) as f64 * 0.1,
        min_ielts: 6.0 + (id % 3) as f64 * 0.5,
        min_toefl: 80 + (id % 30) as u16,
        tuition_per_year: 20000 + id as u32 * 10,
        course_tags: TAGS
            .iter()
            .cycle()
            .skip(id % TAGS.len())
            .take(3)
            .map(|t| t.to_string())
            .collect(),
        loan_partner: id % 2 == 0,
        highlight: None,
    }
}

fn create_profile() -> UserProfile {
    UserProfile {
        country: "USA".to_string(),
        course_query: "computer science".to_string(),
        gpa: 8.4,
        english_test: EnglishTest::Toefl,
        english_score: 102.0,
        loan_amount_requested: 2_000_000,
        work_experience_months: 12,
    }
}

fn bench_normalize_query(c: &mut Criterion) {
    c.bench_function("normalize_query", |b| {
        b.iter(|| normalize_query(black_box("Computer Science & Artificial Intelligence (MSc)")));
    });
}

fn bench_prefilter(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefilter");

    for catalog_size in [8, 50, 500].iter() {
        let catalog: Vec<University> = (0..*catalog_size).map(create_university).collect();

        group.bench_with_input(
            BenchmarkId::new("prefilter", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| prefilter(black_box(&catalog), black_box("USA"), black_box("data science ai")));
            },
        );
    }

    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let profile = create_profile();
    let pool: Vec<University> = (0..10).map(create_university).collect();

    c.bench_function("score_pool_of_10", |b| {
        b.iter(|| score(black_box(&pool), black_box(&profile)));
    });
}

criterion_group!(
    benches,
    bench_normalize_query,
    bench_prefilter,
    bench_scoring
);

criterion_main!(benches);
