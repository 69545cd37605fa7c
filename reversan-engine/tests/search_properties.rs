//! Properties every engine must share, checked on seeded random positions.

use rand::rngs::StdRng;
use rand::SeedableRng;
use reversan_engine::{new_engine, Algorithm, Engine, OrderPreset, SearchSettings};
use reversan_othello::test_utils::random_position;
use reversan_othello::{Action, Board, Game, Player};

fn positions(seed: u64, count: usize) -> Vec<Game> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| random_position(&mut rng, 4 + (i * 7) % 50))
        .collect()
}

fn engine(algorithm: Algorithm, settings: SearchSettings) -> Box<dyn Engine> {
    new_engine(algorithm, settings).unwrap()
}

#[test]
fn alphabeta_and_negascout_agree() {
    let settings = SearchSettings::with_depth(4);
    let mut alphabeta = engine(Algorithm::Alphabeta, settings.clone());
    let mut negascout = engine(Algorithm::Negascout, settings);

    for game in positions(1, 20) {
        let expected = alphabeta.analyze(game.board, game.active_player);
        let outcome = negascout.analyze(game.board, game.active_player);
        assert_eq!(outcome, expected, "position:\n{}", game);
    }
}

#[test]
fn transposition_table_does_not_change_results() {
    let enabled = SearchSettings::with_depth(5);
    let disabled = SearchSettings {
        transposition_enabled: false,
        ..enabled.clone()
    };

    for &algorithm in [Algorithm::Alphabeta, Algorithm::Negascout].iter() {
        let mut cached = engine(algorithm, enabled.clone());
        let mut uncached = engine(algorithm, disabled.clone());

        for game in positions(2, 12) {
            let expected = uncached.analyze(game.board, game.active_player);
            let outcome = cached.analyze(game.board, game.active_player);
            assert_eq!(outcome, expected, "position:\n{}", game);
        }
    }
}

#[test]
fn parallel_negascout_matches_sequential_score() {
    let sequential = SearchSettings::with_depth(5);
    let parallel = SearchSettings {
        threads: 4,
        ..sequential.clone()
    };
    let mut sequential = engine(Algorithm::Negascout, sequential);
    let mut parallel = engine(Algorithm::Negascout, parallel);

    for game in positions(3, 12) {
        let expected = sequential.analyze(game.board, game.active_player);
        let outcome = parallel.analyze(game.board, game.active_player);
        assert_eq!(outcome.score, expected.score, "position:\n{}", game);
        assert_eq!(outcome.best_move.is_some(), expected.best_move.is_some());
        if let Some(mv) = outcome.best_move {
            assert!(game.moves().contains(mv));
        }
    }
}

#[test]
fn move_order_does_not_change_the_score() {
    for game in positions(4, 8) {
        let scores: Vec<i32> = [
            OrderPreset::LineByLine,
            OrderPreset::Optimized,
            OrderPreset::OptimizedAlt,
        ]
        .iter()
        .map(|&preset| {
            let settings = SearchSettings {
                move_order: preset.into(),
                ..SearchSettings::with_depth(4)
            };
            engine(Algorithm::Negascout, settings)
                .analyze(game.board, game.active_player)
                .score
        })
        .collect();

        assert!(scores.windows(2).all(|pair| pair[0] == pair[1]), "{:?}", scores);
    }
}

#[test]
fn first_search_from_the_opening() {
    let mut engine = engine(Algorithm::Negascout, SearchSettings::with_depth(1));
    let moves = Board::INITIAL.find_moves(Player::Black);

    let outcome = engine.analyze(Board::INITIAL, Player::Black);
    assert!(moves.contains(outcome.best_move.unwrap()));

    // All four openings are mirror images of each other.
    for mv in moves {
        let mut board = Board::INITIAL;
        board.play_move(Player::Black, mv).unwrap();
        assert_eq!(board.rate_board(), outcome.score);
    }
}

#[test]
fn benchmark_search_is_deterministic() {
    for &algorithm in [Algorithm::Alphabeta, Algorithm::Negascout].iter() {
        let mut engine = engine(algorithm, SearchSettings::with_depth(6));
        let first = engine.analyze(Board::BENCHMARK, Player::Black);
        let first_stats = engine.last_stats();
        let second = engine.analyze(Board::BENCHMARK, Player::Black);

        assert_eq!(first, second);
        assert_eq!(first_stats, engine.last_stats());
        assert!(Board::BENCHMARK
            .find_moves(Player::Black)
            .contains(first.best_move.unwrap()));
    }
}

#[test]
fn engine_finishes_a_game_against_itself() {
    let mut engine = engine(Algorithm::Negascout, SearchSettings::with_depth(3));
    let mut game = Game::default();
    let mut plies = 0;

    while !game.is_finished() {
        let action = Action::from(engine.search(game.board, game.active_player));
        game = game.apply(action).unwrap();
        plies += 1;
        assert!(plies <= 120, "game did not end");
    }

    assert!(game.board.count_empty() < 60);
    assert!(engine.total_stats().nodes >= engine.last_stats().nodes);
}
