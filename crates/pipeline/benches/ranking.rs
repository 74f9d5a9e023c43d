//! Benchmarks for aggregation, ranking, and recommendation
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic dataset so no data files are needed.

use criterion::{criterion_group, criterion_main, Criterion};
use data_loader::{DataStore, Movie, RatingRecord};
use pipeline::{popularity, recommender, user_context::build_user_context};
use std::hint::black_box;

const GENRES: [&str; 8] = [
    "Action", "Comedy", "Drama", "Horror", "Romance", "Sci-Fi", "Thriller", "Western",
];

fn build_test_store() -> DataStore {
    let movies = (0..2_000).map(|i| Movie {
        genre: GENRES[i % GENRES.len()].to_string(),
        id: format!("m{}", i),
        name: format!("Movie {} ({})", i, 1950 + i % 70),
    });

    // Deterministic pseudo-random spread of ratings over half-star steps
    let ratings = (0..500).flat_map(|user| {
        (0..60).map(move |j| {
            let movie = (user * 37 + j * 101) % 2_000;
            RatingRecord {
                movie_name: format!("Movie {} ({})", movie, 1950 + movie % 70),
                user_id: format!("u{}", user),
                value: ((user + j) % 11) as f64 * 0.5,
            }
        })
    });

    let mut store = DataStore::new();
    store.ingest_movies(movies);
    store.ingest_ratings(ratings);
    store
}

fn bench_top_movies(c: &mut Criterion) {
    let store = build_test_store();

    c.bench_function("top_movies_all", |b| {
        b.iter(|| black_box(popularity::top_movies(black_box(&store), None)))
    });
}

fn bench_top_genres(c: &mut Criterion) {
    let store = build_test_store();

    c.bench_function("top_genres_all", |b| {
        b.iter(|| black_box(popularity::top_genres(black_box(&store), None)))
    });
}

fn bench_recommend(c: &mut Criterion) {
    let store = build_test_store();

    c.bench_function("build_user_context", |b| {
        b.iter(|| black_box(build_user_context(black_box(&store), "u1")))
    });

    c.bench_function("recommend_3", |b| {
        b.iter(|| black_box(recommender::recommend(black_box(&store), "u1", 3)))
    });
}

criterion_group!(benches, bench_top_movies, bench_top_genres, bench_recommend);
criterion_main!(benches);
