//! MCTS benchmarks for performance profiling.
//!
//! Run with: `cargo bench -p mcts`
//!
//! These benchmarks measure:
//! - Full MCTS search with varying playout counts
//! - Search from different game phases (opening, middlegame, endgame)
//! - Single rollouts and move generation
//! - Tree operations (selection, backpropagation)
//! - Rollout depth comparison

use chess_core::{Board, Chess, Color, Game, Move, MoveGenerator};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mcts::{rollout, run_mcts, MaterialEvaluator, MctsConfig, MctsSearch, MctsTree};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const MIDDLEGAME_FEN: &str = "r1bq1rk1/pp2bppp/2n1pn2/3p4/2PP4/2N1PN2/PP2BPPP/R2QKB1R w - - 0 1";
const ENDGAME_FEN: &str = "8/5k2/3p4/1p1Pp2p/pP2Pp1P/P4P1K/8/8 b - - 0 1";

// =============================================================================
// Full MCTS Search Benchmarks
// =============================================================================

fn bench_mcts_search_playouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_search_playouts");
    group.sample_size(20);

    for playouts in [50, 100, 200, 400, 800] {
        group.throughput(Throughput::Elements(playouts as u64));
        group.bench_with_input(
            BenchmarkId::new("opening", playouts),
            &playouts,
            |b, &playouts| {
                let chess = Chess::default();
                let evaluator = MaterialEvaluator::new();
                let config = MctsConfig::default().with_playouts(playouts);

                b.iter(|| {
                    let mut rng = ChaCha20Rng::seed_from_u64(42);
                    let mut search = MctsSearch::new(
                        &chess,
                        &evaluator,
                        config.clone(),
                        Board::starting_position(),
                    )
                    .unwrap();

                    black_box(search.run(&mut rng).unwrap())
                });
            },
        );
    }

    group.finish();
}

fn bench_mcts_game_phases(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_game_phases");
    group.sample_size(20);

    let chess = Chess::default();
    let evaluator = MaterialEvaluator::new();
    let config = MctsConfig::default().with_playouts(200);

    let positions = [
        ("opening", Board::starting_position()),
        ("middlegame", Board::from_fen(MIDDLEGAME_FEN).unwrap()),
        ("endgame", Board::from_fen(ENDGAME_FEN).unwrap()),
    ];

    for (name, board) in positions {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(
                    run_mcts(&chess, &evaluator, config.clone(), board.clone(), &mut rng).unwrap(),
                )
            });
        });
    }

    group.finish();
}

// =============================================================================
// Rollout and Move Generation Benchmarks
// =============================================================================

fn bench_rollouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollouts");

    let chess = Chess::default();
    let evaluator = MaterialEvaluator::new();
    let sim = Board::starting_position().to_lightweight();

    for depth in [10u32, 50, 200] {
        group.bench_with_input(BenchmarkId::new("depth", depth), &depth, |b, &depth| {
            let mut rng = ChaCha20Rng::seed_from_u64(42);
            b.iter(|| {
                black_box(
                    rollout(
                        &chess,
                        &evaluator,
                        sim,
                        Color::White,
                        Color::White,
                        depth,
                        &mut rng,
                    )
                    .unwrap(),
                )
            });
        });
    }

    group.finish();
}

fn bench_move_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("move_generation");

    let board = Board::from_fen(MIDDLEGAME_FEN).unwrap();
    let sim = board.to_lightweight();
    let generator = MoveGenerator::default();

    group.bench_function("full_board", |b| {
        b.iter(|| black_box(generator.generate_moves(&board, Color::White)))
    });
    group.bench_function("lightweight_board", |b| {
        b.iter(|| black_box(sim.generate_moves(Color::White)))
    });

    group.finish();
}

// =============================================================================
// Tree Operation Benchmarks
// =============================================================================

fn bench_tree_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_tree_ops");

    let chess = Chess::default();
    let start = Board::starting_position();
    let root_moves = chess.generate_moves(&start, Color::White).unwrap();

    // Benchmark child selection (UCB calculation)
    group.bench_function("select_child_20", |b| {
        let mut tree: MctsTree<Board, Move> =
            MctsTree::new(start.clone(), Color::White, root_moves.clone());

        for (i, mv) in root_moves.iter().enumerate() {
            let child_id = tree.add_child(tree.root(), *mv, start.clone(), Vec::new());
            // Simulate some visits
            let child = tree.get_mut(child_id);
            child.visit_count = (i as u32 + 1) * 10;
            child.win_count = child.visit_count as f64 * (i as f64 / 20.0);
        }
        tree.get_mut(tree.root()).visit_count = 2100;

        b.iter(|| black_box(tree.select_child(tree.root(), false, 1.0)));
    });

    // Benchmark backpropagation
    group.bench_function("backpropagate_depth_20", |b| {
        b.iter_batched(
            || {
                let mut tree: MctsTree<u32, u32> = MctsTree::new(0, Color::White, vec![0]);
                let mut parent = tree.root();
                for i in 0..20 {
                    parent = tree.add_child(parent, i, i, vec![i + 1]);
                }
                (tree, parent)
            },
            |(mut tree, leaf)| {
                tree.backpropagate(leaf, 1.0);
                black_box(tree)
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// =============================================================================
// Configuration Comparison Benchmarks
// =============================================================================

fn bench_rollout_depth_configs(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcts_rollout_depth");
    group.sample_size(20);

    let chess = Chess::default();
    let evaluator = MaterialEvaluator::new();
    let board = Board::from_fen(MIDDLEGAME_FEN).unwrap();

    for depth in [0u32, 10, 50] {
        let config = MctsConfig::default()
            .with_playouts(200)
            .with_rollout_depth(depth);
        group.bench_with_input(BenchmarkId::new("depth", depth), &config, |b, config| {
            b.iter(|| {
                let mut rng = ChaCha20Rng::seed_from_u64(42);
                black_box(
                    run_mcts(&chess, &evaluator, config.clone(), board.clone(), &mut rng).unwrap(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_mcts_search_playouts,
    bench_mcts_game_phases,
    bench_rollouts,
    bench_move_generation,
    bench_tree_operations,
    bench_rollout_depth_configs,
);

criterion_main!(benches);
