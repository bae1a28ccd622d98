// Criterion benchmarks for Crush Algo

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crush_algo::core::{calculate_compatibility, CrushIndex, Ranker};
use crush_algo::models::{CrushDeclaration, ScoringWeights, SurveyProfile};

const INTERESTS: &[&str] = &[
    "chess", "hiking", "movies", "music", "cooking", "running", "reading", "gaming",
];
const VALUES: &[&str] = &["honesty", "family", "ambition", "kindness", "growth"];
const PERSONALITIES: &[&str] = &["INTJ", "INTP", "INFJ", "INFP", "ENTJ", "ENTP", "ENFJ", "ENFP"];

fn create_profile(id: usize) -> SurveyProfile {
    SurveyProfile {
        user_id: format!("user{}", id),
        email: format!("user{}@campus.edu", id),
        personality_type: PERSONALITIES[id % PERSONALITIES.len()].to_string(),
        interests: (0..3)
            .map(|k| INTERESTS[(id + k) % INTERESTS.len()].to_string())
            .collect(),
        values: (0..2)
            .map(|k| VALUES[(id + k) % VALUES.len()].to_string())
            .collect(),
        lifestyle: if id % 2 == 0 { "active" } else { "relaxed" }.to_string(),
        is_complete: true,
    }
}

fn create_pool(size: usize) -> Vec<SurveyProfile> {
    (0..size).map(create_profile).collect()
}

fn bench_compatibility_score(c: &mut Criterion) {
    let weights = ScoringWeights::default();
    let a = create_profile(0);
    let b = create_profile(1);

    c.bench_function("calculate_compatibility", |bencher| {
        bencher.iter(|| calculate_compatibility(black_box(&a), black_box(&b), black_box(&weights)));
    });
}

fn bench_crush_index_build(c: &mut Criterion) {
    let pool = create_pool(500);
    // Every adjacent pair declares each other
    let declarations: Vec<CrushDeclaration> = (0..500)
        .map(|i| CrushDeclaration {
            user_id: format!("user{}", i),
            crush_email: format!("user{}@campus.edu", (i + 1) % 500),
            rank: 1,
        })
        .collect();

    c.bench_function("crush_index_build_500", |bencher| {
        bencher.iter(|| CrushIndex::build(black_box(&pool), black_box(&declarations)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let ranker = Ranker::with_default_weights();
    let index = CrushIndex::default();

    let mut group = c.benchmark_group("ranking");

    for pool_size in [10, 50, 100, 500, 1000].iter() {
        let pool = create_pool(*pool_size);

        group.bench_with_input(
            BenchmarkId::new("rank_top_7", pool_size),
            pool_size,
            |bencher, _| {
                bencher.iter(|| {
                    ranker
                        .rank(
                            black_box("user0"),
                            black_box(&pool),
                            black_box(&index),
                            black_box(7),
                        )
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compatibility_score,
    bench_crush_index_build,
    bench_ranking
);

criterion_main!(benches);
