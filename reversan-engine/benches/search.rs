use criterion::*;

use reversan_engine::{new_engine, Algorithm, SearchSettings};
use reversan_othello::{Board, Player};

fn criterion_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for &(name, algorithm, threads) in [
        ("alphabeta", Algorithm::Alphabeta, 1),
        ("negascout", Algorithm::Negascout, 1),
        ("negascout-4t", Algorithm::Negascout, 4),
    ]
    .iter()
    {
        for depth in [4u8, 6, 8].iter() {
            let settings = SearchSettings {
                threads,
                ..SearchSettings::with_depth(*depth)
            };
            let mut engine = new_engine(algorithm, settings).unwrap();

            group.bench_with_input(BenchmarkId::new(name, depth), depth, |b, _| {
                b.iter(|| engine.analyze(black_box(Board::BENCHMARK), Player::Black))
            });
        }
    }

    group.finish();
}

fn criterion_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("transposition");
    group.sample_size(10);

    for &enabled in [true, false].iter() {
        let settings = SearchSettings {
            transposition_enabled: enabled,
            ..SearchSettings::with_depth(7)
        };
        let mut engine = new_engine(Algorithm::Negascout, settings).unwrap();

        group.bench_function(if enabled { "enabled" } else { "disabled" }, |b| {
            b.iter(|| engine.analyze(black_box(Board::BENCHMARK), Player::Black))
        });
    }

    group.finish();
}

criterion_group!(search, criterion_search, criterion_table);
criterion_main!(search);
