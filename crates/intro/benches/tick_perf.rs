//! Benchmark: measure per-tick cost of the intro simulators.
//!
//! Target: everything the page runs between two animation frames must fit
//! comfortably inside a 16.7 ms frame budget (60 Hz) alongside the DOM work,
//! so each tick here should cost microseconds, not milliseconds.
//!
//! Populations are re-seeded with `iter_batched` so we measure a full
//! boiling flask and a fresh burst, not an emptied one.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use intro::bubbles::Bubbles;
use intro::explosion::Explosion;
use intro::heat::BOILING_LEVEL_FLOOR;
use intro::{IntroConfig, Phase, Sequencer};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Bubble tick at the boiling cap: spawn attempts, 50 wobbling bubbles, cull.
fn bench_bubble_tick_boiling(c: &mut Criterion) {
    c.bench_function("bubble_tick_boiling_cap", |b| {
        b.iter_batched(
            || {
                let mut rng = SmallRng::seed_from_u64(1);
                let mut bubbles = Bubbles::new();
                for _ in 0..20 {
                    bubbles.tick(Phase::Boiling, BOILING_LEVEL_FLOOR, &mut rng);
                }
                (bubbles, rng)
            },
            |(mut bubbles, mut rng)| {
                bubbles.tick(Phase::Boiling, BOILING_LEVEL_FLOOR, &mut rng);
                black_box(&bubbles);
            },
            BatchSize::SmallInput,
        );
    });
}

/// Generating the 190-particle burst.
fn bench_detonate(c: &mut Criterion) {
    c.bench_function("explosion_detonate", |b| {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut explosion = Explosion::new();
        b.iter(|| {
            explosion.detonate(&mut rng);
            black_box(&explosion);
        });
    });
}

/// One animation frame over a fresh burst.
fn bench_explosion_frame(c: &mut Criterion) {
    c.bench_function("explosion_frame_fresh_burst", |b| {
        b.iter_batched(
            || {
                let mut rng = SmallRng::seed_from_u64(3);
                let mut explosion = Explosion::new();
                explosion.detonate(&mut rng);
                explosion
            },
            |mut explosion| {
                explosion.step();
                black_box(&explosion);
            },
            BatchSize::SmallInput,
        );
    });
}

/// The whole sequence at 60 Hz frame deltas, as the browser drives it.
fn bench_full_run(c: &mut Criterion) {
    c.bench_function("sequencer_full_run_16ms_frames", |b| {
        b.iter_batched(
            || {
                let mut seq =
                    Sequencer::new(IntroConfig::default(), SmallRng::seed_from_u64(4), || {});
                seq.start();
                seq
            },
            |mut seq| {
                while !seq.is_complete() {
                    seq.advance(16);
                }
                black_box(&seq);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_bubble_tick_boiling,
    bench_detonate,
    bench_explosion_frame,
    bench_full_run,
);
criterion_main!(benches);
