//! Criterion micro-benchmarks for parsing, the reducer, and sessions.

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion};
use gridbot_bench::{random_script, reference_profile, stress_profile};
use gridbot_core::SimulationState;
use gridbot_engine::{apply, parse, Session};

/// Benchmark: parse 1000 mixed command lines.
fn bench_parse(c: &mut Criterion) {
    let script = random_script(42, 1000, 5);

    c.bench_function("parse_1000_lines", |b| {
        b.iter(|| {
            for line in &script {
                black_box(parse(line));
            }
        });
    });
}

/// Benchmark: fold 1000 parsed commands through `apply`.
fn bench_apply_fold(c: &mut Criterion) {
    let commands: Vec<_> = random_script(42, 1000, 5)
        .iter()
        .map(|line| parse(line))
        .collect();

    c.bench_function("apply_fold_1000", |b| {
        b.iter(|| {
            let mut state = SimulationState::default();
            for cmd in &commands {
                state = apply(&state, cmd).state;
            }
            black_box(state);
        });
    });
}

/// Benchmark: a full session on the reference and stress profiles.
fn bench_session_submit(c: &mut Criterion) {
    let small = random_script(7, 1000, 5);
    let large = random_script(7, 1000, 256);

    c.bench_function("session_submit_1000_reference", |b| {
        b.iter(|| {
            let mut session = Session::new(reference_profile()).unwrap();
            let now = Instant::now();
            for line in &small {
                black_box(session.submit(line, now));
            }
        });
    });

    c.bench_function("session_submit_1000_stress", |b| {
        b.iter(|| {
            let mut session = Session::new(stress_profile()).unwrap();
            let now = Instant::now();
            for line in &large {
                black_box(session.submit(line, now));
            }
        });
    });
}

criterion_group!(benches, bench_parse, bench_apply_fold, bench_session_submit);
criterion_main!(benches);
