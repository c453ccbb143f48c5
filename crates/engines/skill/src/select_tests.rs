use super::*;
use chess_core::Game;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::time::Duration;

#[test]
fn candidate_count_policy() {
    assert_eq!(candidate_count(5, 0.0), 5);
    assert_eq!(candidate_count(1, 0.0), 1);
    assert_eq!(candidate_count(1, 0.35), 1);
    assert_eq!(candidate_count(4, 0.35), 1);
    assert_eq!(candidate_count(6, 0.35), 2);
    assert_eq!(candidate_count(10, 0.75), 7);
    assert_eq!(candidate_count(20, 0.05), 1);
    assert_eq!(candidate_count(0, 0.5), 0);
}

#[test]
fn no_legal_moves_yields_none() {
    let mut rng = StdRng::seed_from_u64(1);
    let profile = DifficultyProfile::new(3, 0.0, "Master");
    let mut mated =
        Game::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1").unwrap();
    assert!(select_move(&mut mated, &profile, &mut rng).is_none());
}

#[test]
fn random_play_skips_search() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = Game::startpos();
    let legal = game.legal_moves();
    let profile = DifficultyProfile::new(3, 0.9, "Beginner");

    let selection = select_move(&mut game, &profile, &mut rng).unwrap();
    assert!(legal.contains(&selection.mv));
    assert_eq!(selection.score, None);
    assert_eq!(selection.depth, 0);
    assert_eq!(selection.stats, SearchStats::default());
}

#[test]
fn zero_randomness_picks_from_best_group() {
    let mut game =
        Game::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3").unwrap();
    let profile = DifficultyProfile::new(2, 0.0, "Experienced");

    let first = select_move(&mut game, &profile, &mut StdRng::seed_from_u64(0)).unwrap();
    assert_eq!(first.depth, 2);
    assert!(first.best_moves.contains(&first.mv));

    for seed in 1..8 {
        let again = select_move(&mut game, &profile, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert_eq!(again.score, first.score);
        assert_eq!(again.best_moves, first.best_moves);
        assert!(first.best_moves.contains(&again.mv));
    }
}

#[test]
fn partial_randomness_samples_head_of_best_group() {
    // King on g1 loses placement wherever it goes and the rook's c7 square
    // is blocked, so at depth 1 the rook has seven equal quiet moves:
    // c1, c2, b3, d3, e3, f3, g3.
    let mut game = Game::from_fen("7k/8/8/2p5/2P5/2R5/8/6K1 w - - 0 1").unwrap();

    for (randomness, expected_pool) in [(0.5, 3), (0.75, 5)] {
        let profile = DifficultyProfile::new(1, randomness, "Amateur");
        let mut picks = HashMap::new();

        for seed in 0..300 {
            let selection =
                select_move(&mut game, &profile, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_eq!(selection.best_moves.len(), 7);
            let pool = candidate_count(selection.best_moves.len(), randomness);
            assert_eq!(pool, expected_pool);
            assert!(
                selection.best_moves[..pool].contains(&selection.mv),
                "picked {:?} outside the first {pool} of {:?}",
                selection.mv,
                selection.best_moves
            );
            *picks.entry(selection.mv).or_insert(0u32) += 1;
        }

        assert_eq!(picks.len(), expected_pool, "randomness {randomness}: {picks:?}");
    }
}

#[test]
fn generous_budget_completes_every_iteration() {
    let mut game = Game::startpos();
    let profile = DifficultyProfile::new(2, 0.0, "Experienced");
    let budget = TimeBudget::new(Some(Duration::from_secs(600)));

    let timed = select_move_with(&mut game, &profile, budget, &mut StdRng::seed_from_u64(5)).unwrap();
    let untimed = select_move(&mut game, &profile, &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(timed.depth, 2);
    assert_eq!(timed.score, untimed.score);
    assert_eq!(timed.best_moves, untimed.best_moves);
    // Iterative deepening searched depth 1 as well.
    assert!(timed.stats.nodes > untimed.stats.nodes);
}

#[test]
fn exhausted_budget_still_returns_a_legal_move() {
    let mut game = Game::startpos();
    let legal = game.legal_moves();
    let profile = DifficultyProfile::new(3, 0.0, "Master");
    let budget = TimeBudget::new(Some(Duration::ZERO));

    let selection =
        select_move_with(&mut game, &profile, budget, &mut StdRng::seed_from_u64(9)).unwrap();
    assert!(legal.contains(&selection.mv));
    assert_eq!(selection.depth, 0);
    assert_eq!(selection.score, None);
    assert_eq!(game.ply(), 0);
}
