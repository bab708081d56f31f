use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gridfront::board::Rules;
use gridfront::eval::evaluate;
use gridfront::movegen::legal_moves;
use gridfront::protocol::{encode_position, parse_move, parse_position, START_POSITION};
use gridfront::resolve::{apply_move, BombardmentMap, GameState};

/// A crowded midgame: artillery on both sides, pieces in contact.
const MIDGAME: &str = "1a^p1h1av1/i1i2it1/2t1I3/1T2s>3/3i4/2I2A^2/I4IT1/1A^P1HP2 IPSG ipg r -";

fn bench_legal_moves_start(c: &mut Criterion) {
    let position = parse_position(START_POSITION).unwrap();
    let rules = Rules::default();
    c.bench_function("legal_moves_start", |b| b.iter(|| legal_moves(black_box(&position), black_box(&rules))));
}

fn bench_legal_moves_midgame(c: &mut Criterion) {
    let position = parse_position(MIDGAME).unwrap();
    let rules = Rules::default();
    c.bench_function("legal_moves_midgame", |b| b.iter(|| legal_moves(black_box(&position), black_box(&rules))));
}

fn bench_bombardment(c: &mut Criterion) {
    let position = parse_position(MIDGAME).unwrap();
    c.bench_function("bombardment_map", |b| b.iter(|| BombardmentMap::compute(black_box(&position.board))));
}

fn bench_apply_move(c: &mut Criterion) {
    let state = GameState::new(parse_position(START_POSITION).unwrap(), Rules::default());
    let mv = parse_move("b2b4").unwrap();
    c.bench_function("apply_move_start", |b| b.iter(|| apply_move(black_box(&state), black_box(&mv))));
}

fn bench_full_turn(c: &mut Criterion) {
    let state = GameState::new(parse_position(START_POSITION).unwrap(), Rules::default());
    let moves: Vec<_> = ["b2b4", "c2c3", "g2g4"].iter().map(|m| parse_move(m).unwrap()).collect();
    c.bench_function("apply_full_turn", |b| {
        b.iter(|| {
            let mut s = state.clone();
            for mv in &moves {
                s = apply_move(&s, mv).unwrap();
            }
            s
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let position = parse_position(MIDGAME).unwrap();
    c.bench_function("evaluate_midgame", |b| b.iter(|| evaluate(black_box(&position.board))));
}

fn bench_position_notation(c: &mut Criterion) {
    let position = parse_position(MIDGAME).unwrap();
    c.bench_function("parse_position", |b| b.iter(|| parse_position(black_box(MIDGAME))));
    c.bench_function("encode_position", |b| b.iter(|| encode_position(black_box(&position))));
}

criterion_group!(
    benches,
    bench_legal_moves_start,
    bench_legal_moves_midgame,
    bench_bombardment,
    bench_apply_move,
    bench_full_turn,
    bench_evaluate,
    bench_position_notation,
);
criterion_main!(benches);
