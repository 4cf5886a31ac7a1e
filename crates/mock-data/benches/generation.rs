//! Benchmarks for mock table generation
//!
//! Run with: cargo bench --package mock-data

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mock_data::{DistributedRequest, GenerationRequest, LocalSession, MockMovielens};

fn bench_get_df(c: &mut Criterion) {
    let generator = MockMovielens::new();
    let request = GenerationRequest::new(10_000).with_seed(42);

    c.bench_function("get_df_10k", |b| {
        b.iter(|| {
            let table = generator.get_df(black_box(&request)).unwrap();
            black_box(table)
        })
    });
}

fn bench_get_df_prefix(c: &mut Criterion) {
    let generator = MockMovielens::new();
    let request = GenerationRequest::new(10_000)
        .with_seed(42)
        .keep_first_n_cols(2)
        .keep_title_col(false)
        .keep_genre_col(false);

    c.bench_function("get_df_10k_first_2_cols", |b| {
        b.iter(|| {
            let table = generator.get_df(black_box(&request)).unwrap();
            black_box(table)
        })
    });
}

fn bench_get_distributed_df(c: &mut Criterion) {
    let generator = MockMovielens::new();
    let session = LocalSession::default();
    let request = DistributedRequest::new(10_000).with_seed(42);

    c.bench_function("get_distributed_df_10k", |b| {
        b.iter(|| {
            let table = generator
                .get_distributed_df(&session, black_box(&request))
                .unwrap();
            black_box(table)
        })
    });
}

criterion_group!(
    benches,
    bench_get_df,
    bench_get_df_prefix,
    bench_get_distributed_df
);
criterion_main!(benches);
