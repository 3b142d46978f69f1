use criterion::{criterion_group, criterion_main, Criterion};
use minesweep_core::*;
use rand::prelude::*;
use std::hint::black_box;

const TIERS: [(&str, GameConfig); 3] = [
    ("beginner", GameConfig::beginner()),
    ("intermediate", GameConfig::intermediate()),
    ("expert", GameConfig::expert()),
];

fn bench_create_board(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(12345);
    for (name, config) in TIERS {
        c.bench_function(&format!("create_board_{name}"), |b| {
            b.iter(|| {
                create_board(
                    &mut rng,
                    black_box(config.h_tiles),
                    black_box(config.v_tiles),
                    black_box(config.bombs),
                    &[],
                )
            })
        });
    }
}

fn bench_initial_reveal(c: &mut Criterion) {
    for (name, config) in TIERS {
        let mut seed = 0;
        c.bench_function(&format!("initial_reveal_{name}"), |b| {
            b.iter(|| {
                seed += 1;
                let mut store = GameStore::new(config, seed).expect("valid preset");
                store.initial_reveal(black_box(Position::new(0, 0)))
            })
        });
    }
}

fn bench_flood_fill(c: &mut Criterion) {
    c.bench_function("flood_fill_empty_expert", |b| {
        b.iter(|| {
            let mut store = GameStore::new(GameConfig::new_unchecked(30, 16, 0), 0).expect("valid");
            store.set_pristine(false);
            store.reveal(black_box(Position::new(8, 15)))
        })
    });
}

criterion_group!(
    benches,
    bench_create_board,
    bench_initial_reveal,
    bench_flood_fill
);
criterion_main!(benches);
