use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_smash::core::{find_matches, mark_destroyed_tiles, Board, SimpleRng};
use tile_smash::types::TileColor::*;

fn bench_find_matches(c: &mut Criterion) {
    let board = Board::generate(8, 8, &mut SimpleRng::new(12345), Instant::now()).unwrap();

    c.bench_function("find_matches_8x8_no_runs", |b| {
        b.iter(|| find_matches(black_box(&board)))
    });
}

fn bench_mark_striped(c: &mut Criterion) {
    // Every row is one long run.
    let rows = [Red, Green, Blue, Yellow, Purple, Orange, Red, Green]
        .iter()
        .map(|&color| vec![color; 8])
        .collect();
    let striped = Board::from_rows(rows).unwrap();

    c.bench_function("mark_destroyed_8x8_striped", |b| {
        b.iter(|| {
            let mut board = striped.clone();
            mark_destroyed_tiles(&mut board, Instant::now())
        })
    });
}

fn bench_generate(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);
    let now = Instant::now();

    c.bench_function("generate_8x8", |b| {
        b.iter(|| Board::generate(8, 8, &mut rng, now).unwrap())
    });
}

criterion_group!(benches, bench_find_matches, bench_mark_striped, bench_generate);
criterion_main!(benches);
