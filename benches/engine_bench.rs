use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use terrachess::board::{BoardState, Mode, Player};
use terrachess::gen::{self, Symmetry};
use terrachess::movegen::legal_move_pairs;
use terrachess::search;

fn opening_position() -> BoardState {
    let mut state = BoardState::new(Mode::NorthSouth);
    let mut rng = StdRng::seed_from_u64(42);
    for &p in Mode::NorthSouth.players() {
        gen::apply_classical(&mut state, p);
        gen::randomize_terrain(&mut state, p, &mut rng);
    }
    state
}

fn bench_search(c: &mut Criterion) {
    let state = opening_position();
    c.bench_function("search_depth_2_opening", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(1);
            search::search(Player::Red, black_box(&state), 2, &mut rng)
        })
    });
}

fn bench_movegen(c: &mut Criterion) {
    let state = opening_position();
    c.bench_function("legal_moves_full_side", |b| {
        b.iter(|| legal_move_pairs(Player::Red, black_box(&state)))
    });
}

fn bench_terrain_generation(c: &mut Criterion) {
    c.bench_function("terrain_generate_rotational", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            gen::generate(Mode::FourPlayer, black_box(seed), Symmetry::Rotational)
        })
    });
}

criterion_group!(benches, bench_search, bench_movegen, bench_terrain_generation);
criterion_main!(benches);
