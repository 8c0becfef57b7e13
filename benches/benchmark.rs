// Benchmarks for the clustering core
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::rngs::StdRng;
use seqclust::{ConnectivityClusterer, DistanceWeights, Entry, Summarizer};

const ALPHABET: [char; 4] = ['A', 'C', 'G', 'T'];

fn generate_entries(n: usize, seed: u64) -> Vec<Entry> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let len = rng.random_range(9..30);
            let sequence: String = (0..len)
                .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
                .collect();
            Entry::new(format!("seq_{}", i % 10), rng.random_range(0..5000u64), sequence)
        })
        .collect()
}

fn benchmark_distance(c: &mut Criterion) {
    let entries = generate_entries(2, 1);
    c.bench_function("distance", |b| {
        b.iter(|| DistanceWeights::CLUSTERING.distance(black_box(&entries[0]), black_box(&entries[1])))
    });
}

fn benchmark_cluster(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster");

    for size in [100, 1000, 3000].iter() {
        let entries = generate_entries(*size, 42);

        group.bench_with_input(BenchmarkId::new("sequential", size), &entries, |b, entries| {
            let clusterer = ConnectivityClusterer::new(21, DistanceWeights::CLUSTERING);
            b.iter(|| clusterer.cluster(black_box(entries)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("parallel", size), &entries, |b, entries| {
            let clusterer =
                ConnectivityClusterer::new(21, DistanceWeights::CLUSTERING).with_parallel(true);
            b.iter(|| clusterer.cluster(black_box(entries)).unwrap())
        });
    }

    group.finish();
}

fn benchmark_summarize(c: &mut Criterion) {
    let entries = generate_entries(1000, 7);
    // Wide threshold to produce large clusters
    let clustering = ConnectivityClusterer::new(400, DistanceWeights::CLUSTERING)
        .cluster(&entries)
        .unwrap();

    c.bench_function("summarize_1000", |b| {
        b.iter(|| {
            Summarizer::default()
                .summarize(black_box(&clustering.clusters), black_box(&entries))
                .unwrap()
        })
    });
}

criterion_group!(benches, benchmark_distance, benchmark_cluster, benchmark_summarize);
criterion_main!(benches);
