//! Benchmarks for hostmatch rule building and address matching.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hostmatch::RuleSet;

/// Generate a mixed rule list of roughly `count` entries.
fn generate_rules(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 5 {
            0 => format!("domain{}.example.com", i),
            1 => format!(".suffix{}.com:443", i),
            2 => format!("10.{}.0.0/16", i % 256),
            3 => format!("192.168.{}.{}", (i / 256) % 256, i % 256),
            _ => format!("api{}.example.org/v1/**", i),
        })
        .collect()
}

/// Generate queries: the first half hit, the second half miss.
fn generate_queries(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            if i < count / 2 {
                match i % 4 {
                    0 => format!("www.domain{}.example.com", i * 5),
                    1 => format!("10.{}.1.1:22", i % 256),
                    2 => format!("a.suffix{}.com:443", i * 5 + 1),
                    _ => format!("api{}.example.org/v1/users/{}", i * 5 + 4, i),
                }
            } else {
                format!("unknown{}.nonexistent.net", i)
            }
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in [10usize, 100, 1000] {
        let rules = generate_rules(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &rules, |b, rules| {
            b.iter(|| RuleSet::new(black_box(rules)))
        });
    }

    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");
    let queries = generate_queries(1000);

    for size in [10usize, 100, 1000] {
        let ruleset = RuleSet::new(generate_rules(size));
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &ruleset, |b, ruleset| {
            b.iter(|| {
                for query in &queries {
                    black_box(ruleset.matches(black_box(query)));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_match);
criterion_main!(benches);
