use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ragerank_core::engine::ScoreEngine;
use ragerank_core::model::{ColorTag, Collection, TeacherId, TeacherRecord};
use ragerank_core::ranking::{rank, standings};
use ragerank_core::traits::{ManualClock, NoopHook};
use uuid::Uuid;

fn make_collection(n: usize) -> Collection {
    let created = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    Collection::from_records(
        (0..n)
            .map(|i| {
                TeacherRecord::seeded(
                    TeacherId::new(Uuid::from_u128(i as u128 + 1)),
                    format!("Teacher {i}"),
                    "Bench",
                    ColorTag::ALL[i % ColorTag::ALL.len()],
                    // Plenty of ties so dense ranking has work to do.
                    (i % 37) as u32,
                    created,
                )
            })
            .collect(),
    )
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for n in [10usize, 100, 1000] {
        let collection = make_collection(n);
        let last = collection.records().last().unwrap().clone();

        group.bench_function(format!("rank n={n}"), |b| {
            b.iter(|| rank(black_box(&last), black_box(&collection)))
        });

        group.bench_function(format!("standings n={n}"), |b| {
            b.iter(|| standings(black_box(&collection)))
        });
    }

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");
    let engine = ScoreEngine::default();
    let clock = ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());

    group.bench_function("adjust_pending", |b| {
        let mut record = make_collection(1).records()[0].clone();
        b.iter(|| engine.adjust_pending(&mut record, black_box(1), &mut NoopHook))
    });

    group.bench_function("commit at history cap", |b| {
        let mut record = make_collection(1).records()[0].clone();
        b.iter(|| {
            engine.adjust_pending(&mut record, 1, &mut NoopHook);
            clock.advance(chrono::Duration::seconds(1));
            engine.commit(&mut record, &clock)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_ranking, bench_engine);
criterion_main!(benches);
