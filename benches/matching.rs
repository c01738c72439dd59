//! Build and scan benchmarks for the automaton.
//!
//! Build time should stay linear in total pattern length, and scan
//! throughput should not depend on how many patterns were compiled in.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use multimatch::TrieBuilder;

fn synthetic_patterns(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("needle-{:05}", i)).collect()
}

fn haystack(len: usize) -> Vec<u8> {
    const LOREM: &[u8] = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit, \
        sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. needle-00042 ";
    LOREM.iter().copied().cycle().take(len).collect()
}

fn bench_build(c: &mut Criterion) {
    for count in [100, 1_000, 10_000] {
        let patterns = synthetic_patterns(count);
        c.bench_function(&format!("build_{}", count), |b| {
            b.iter(|| {
                let mut builder = TrieBuilder::new();
                builder.add_patterns(black_box(&patterns)).unwrap();
                builder.build().unwrap()
            })
        });
    }
}

fn bench_scan(c: &mut Criterion) {
    let input = haystack(100 * 1024);

    for count in [10, 1_000] {
        let mut builder = TrieBuilder::new();
        builder.add_patterns(synthetic_patterns(count)).unwrap();
        let trie = builder.build().unwrap();

        c.bench_function(&format!("match_all_100k_{}_patterns", count), |b| {
            b.iter(|| trie.match_all(black_box(&input)))
        });

        c.bench_function(&format!("walk_count_100k_{}_patterns", count), |b| {
            b.iter(|| {
                let mut matches = 0u64;
                trie.walk(black_box(&input), |_, _, _| {
                    matches += 1;
                    true
                });
                matches
            })
        });
    }
}

fn bench_match_first(c: &mut Criterion) {
    let mut builder = TrieBuilder::new();
    builder.add_patterns(synthetic_patterns(1_000)).unwrap();
    let trie = builder.build().unwrap();
    let input = haystack(100 * 1024);

    c.bench_function("match_first_100k", |b| {
        b.iter(|| trie.match_first(black_box(&input)))
    });
}

criterion_group!(benches, bench_build, bench_scan, bench_match_first);
criterion_main!(benches);
