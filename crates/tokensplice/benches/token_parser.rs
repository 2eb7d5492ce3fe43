//! Benchmark – `tokensplice::TokenParser`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tokensplice::{TokenParser, handlers::Collector};

/// Produce a deterministic template of exactly `target_len` bytes where one in
/// every `stride` words is a `${...}` placeholder. A handful of escaped
/// placeholders are mixed in so the escape path is exercised too.
fn make_template(target_len: usize, stride: usize) -> String {
    let mut s = String::with_capacity(target_len + 16);
    let mut i = 0usize;
    while s.len() < target_len {
        if i % stride == 0 {
            if i % (stride * 7) == 0 {
                s.push('\\');
            }
            s.push_str("${key");
            s.push_str(&(i % 97).to_string());
            s.push('}');
        } else {
            s.push_str("lorem");
        }
        s.push(' ');
        i += 1;
    }
    s.truncate(target_len);
    s
}

fn bench_token_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("token_parser");

    for &stride in &[1usize, 10, 1_000] {
        let payload = make_template(100_000, stride);
        group.throughput(Throughput::Bytes(payload.len() as u64));

        let uppercase = TokenParser::new("${", "}", |expr: &str| expr.to_uppercase());
        group.bench_with_input(
            BenchmarkId::new("uppercase", stride),
            &payload,
            |b, payload| b.iter(|| black_box(uppercase.substitute(black_box(payload)).len())),
        );

        let collect = TokenParser::new("${", "}", Collector::new("?"));
        group.bench_with_input(BenchmarkId::new("collect", stride), &payload, |b, payload| {
            b.iter(|| {
                let out = collect.substitute(black_box(payload)).len();
                black_box(collect.handler().take_expressions());
                black_box(out)
            });
        });
    }

    let plain = "lorem ipsum ".repeat(10_000);
    let parser = TokenParser::new("${", "}", |expr: &str| expr.to_uppercase());
    group.bench_function("no_tokens", |b| {
        b.iter(|| black_box(parser.substitute(black_box(&plain)).len()));
    });

    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_token_parser }
criterion_main!(benches);
