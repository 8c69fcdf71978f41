#![allow(
    missing_docs,
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::similar_names,
    clippy::arithmetic_side_effects
)]
use std::collections::HashMap;

use criterion::{Criterion, criterion_group, criterion_main};
use probemap::{DEFAULT_K, ProbingHashTable, top_k};
use proptest::{
    collection::vec,
    prelude::{Strategy, any},
    strategy::ValueTree,
    test_runner::TestRunner,
};

const ITEMS_AMOUNT: usize = 1000;
const SAMPLE_SIZE: usize = 10;

fn hash_table_benches(c: &mut Criterion) {
    let mut runner = TestRunner::default();
    let items = vec((any::<String>(), any::<u64>()), ITEMS_AMOUNT)
        .new_tree(&mut runner)
        .unwrap()
        .current();
    // Few distinct keys, many repeats, like filenames in an access log
    let visits: Vec<String> =
        items.iter().map(|(_, n)| format!("/images/{}.gif", n % 64)).collect();

    let mut group = c.benchmark_group("Hash table comparison benchmark");
    group.sample_size(SAMPLE_SIZE);
    let mut probing_table = ProbingHashTable::new();
    let mut rust_map = HashMap::new();
    group.bench_function("probing insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                probing_table.insert(key, value).unwrap();
            }
        });
    });
    group.bench_function("rust std insert", |b| {
        b.iter(|| {
            for (key, value) in items.clone() {
                rust_map.insert(key, value);
            }
        });
    });
    group.bench_function("probing search", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = probing_table.search(key);
            }
        });
    });
    group.bench_function("rust std get", |b| {
        b.iter(|| {
            for (key, _) in &items {
                let _ = rust_map.get(key);
            }
        });
    });
    group.bench_function("probing tally + top 10", |b| {
        b.iter(|| {
            let mut counts = ProbingHashTable::new();
            for visit in &visits {
                counts.increment(visit.clone()).unwrap();
            }
            top_k(counts.snapshot(), DEFAULT_K)
        });
    });
    group.bench_function("rust std tally + top 10", |b| {
        b.iter(|| {
            let mut counts: HashMap<String, u64> = HashMap::new();
            for visit in &visits {
                *counts.entry(visit.clone()).or_insert(0) += 1;
            }
            top_k(counts, DEFAULT_K)
        });
    });
    group.finish();
}

criterion_group!(benches, hash_table_benches);

criterion_main!(benches);
