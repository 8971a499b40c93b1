//! Benchmarks for the relevance signals
//!
//! Run with: cargo bench --package sources
//!
//! Uses a synthetic catalog so no dataset files are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{Catalog, Interaction, Movie};
use sources::{
    aggregate_interactions, collaborative_scores, ContentSource, TfidfVectorizer, UserItemMatrix,
};

const WORDS: &[&str] = &[
    "galaxy", "pirates", "robot", "heist", "romance", "detective", "dragon", "kingdom",
    "ocean", "desert", "murder", "wedding", "spy", "ghost", "zombie", "racing",
];

fn synthetic_catalog(size: u32) -> Catalog {
    (0..size)
        .map(|id| {
            let i = id as usize;
            let description = format!(
                "{} {} {}",
                WORDS[i % WORDS.len()],
                WORDS[(i * 7 + 3) % WORDS.len()],
                WORDS[(i * 13 + 5) % WORDS.len()]
            );
            Movie::new(id, format!("Movie {id}"), description)
                .with_genres([WORDS[(i * 3) % WORDS.len()]])
        })
        .collect()
}

fn synthetic_interactions(users: u32, movies: u32) -> Vec<Interaction> {
    (0..users)
        .flat_map(|user| {
            (0..8).map(move |k| Interaction::new(user, (user * 17 + k * 31) % movies, 0.8))
        })
        .collect()
}

fn bench_collaborative(c: &mut Criterion) {
    let catalog = synthetic_catalog(500);
    let agg = aggregate_interactions(&synthetic_interactions(200, 500));
    let matrix = UserItemMatrix::build(&agg, &catalog.movie_ids());

    c.bench_function("collaborative_scores_500", |b| {
        b.iter(|| black_box(collaborative_scores(black_box(1), &matrix, &agg)))
    });
}

fn bench_content(c: &mut Criterion) {
    let catalog = synthetic_catalog(500);
    let agg = aggregate_interactions(&synthetic_interactions(200, 500));
    let content = ContentSource::new();

    c.bench_function("content_scores_500", |b| {
        b.iter(|| black_box(content.scores(black_box(1), &catalog, &agg)))
    });
}

fn bench_tfidf_fit(c: &mut Criterion) {
    let documents = synthetic_catalog(2000).documents();
    let vectorizer = TfidfVectorizer::new().with_ngram_range(1, 2);

    c.bench_function("tfidf_fit_2000_bigrams", |b| {
        b.iter(|| black_box(vectorizer.fit_transform(black_box(&documents))))
    });
}

criterion_group!(benches, bench_collaborative, bench_content, bench_tfidf_fit);
criterion_main!(benches);
