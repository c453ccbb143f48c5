//! End-to-end properties of move selection
//!
//! - Zero legal moves never reach the search
//! - Random play never searches and is uniform over legal moves
//! - Deterministic scores at randomness 0
//! - Mate in one is found and preferred
//! - Depth 3 does not hang material

use std::collections::HashMap;

use chess_core::{Color, DrawReason, Game, Move, Piece, PieceKind, move_to_uci};
use rand::SeedableRng;
use rand::rngs::StdRng;
use skill_engine::{
    DifficultyProfile, DifficultyTable, MATE_SCORE, Rules, evaluate, piece_value, select_move,
};

/// Wraps a game and counts how often the search touches it.
struct CountingRules {
    game: Game,
    applies: usize,
    undos: usize,
    move_lists: usize,
}

impl CountingRules {
    fn new(fen: &str) -> Self {
        Self {
            game: Game::from_fen(fen).unwrap(),
            applies: 0,
            undos: 0,
            move_lists: 0,
        }
    }
}

impl Rules for CountingRules {
    fn side_to_move(&self) -> Color {
        Rules::side_to_move(&self.game)
    }

    fn piece_at(&self, sq: u8) -> Option<Piece> {
        Rules::piece_at(&self.game, sq)
    }

    fn legal_moves(&mut self, out: &mut Vec<Move>) {
        self.move_lists += 1;
        Rules::legal_moves(&mut self.game, out);
    }

    fn apply(&mut self, mv: Move) {
        self.applies += 1;
        Rules::apply(&mut self.game, mv);
    }

    fn undo(&mut self) {
        self.undos += 1;
        Rules::undo(&mut self.game);
    }

    fn in_check(&self) -> bool {
        Rules::in_check(&self.game)
    }

    fn draw_reason(&self) -> Option<DrawReason> {
        Rules::draw_reason(&self.game)
    }
}

const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn level(n: u8) -> DifficultyProfile {
    DifficultyTable::standard().profile(n).clone()
}

// =============================================================================
// Boundaries
// =============================================================================

#[test]
fn checkmate_returns_no_move_without_searching() {
    let mut rules =
        CountingRules::new("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1");
    let mut rng = StdRng::seed_from_u64(11);

    assert!(select_move(&mut rules, &level(5), &mut rng).is_none());
    assert_eq!(rules.applies, 0);
    assert_eq!(rules.move_lists, 1);
}

#[test]
fn stalemate_returns_no_move_without_searching() {
    let mut rules = CountingRules::new("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1");
    let mut rng = StdRng::seed_from_u64(12);

    assert!(select_move(&mut rules, &level(4), &mut rng).is_none());
    assert_eq!(rules.applies, 0);
    assert_eq!(rules.move_lists, 1);
}

// =============================================================================
// Random play
// =============================================================================

#[test]
fn high_randomness_never_searches() {
    for randomness in [0.76, 0.9, 1.0] {
        let mut rules = CountingRules::new(START);
        let profile = DifficultyProfile::new(3, randomness, "Random");
        let mut rng = StdRng::seed_from_u64(13);

        let selection = select_move(&mut rules, &profile, &mut rng).unwrap();
        assert_eq!(rules.applies, 0);
        assert_eq!(rules.move_lists, 1);
        assert_eq!(selection.stats.nodes, 0);
        assert_eq!(selection.score, None);
    }
}

#[test]
fn high_randomness_is_uniform_over_legal_moves() {
    const TRIALS: usize = 20_000;

    let mut rules = CountingRules::new(START);
    let profile = DifficultyProfile::new(1, 1.0, "Random");
    let mut rng = StdRng::seed_from_u64(2024);

    let mut counts: HashMap<Move, usize> = HashMap::new();
    for _ in 0..TRIALS {
        let selection = select_move(&mut rules, &profile, &mut rng).unwrap();
        *counts.entry(selection.mv).or_default() += 1;
    }

    assert_eq!(rules.applies, 0);
    assert_eq!(counts.len(), 20, "every legal move should be played");
    // Expected 1000 each; the bounds sit more than nine standard deviations out.
    for (mv, count) in counts {
        assert!(
            (700..=1300).contains(&count),
            "{} chosen {count} times",
            move_to_uci(mv)
        );
    }
}

#[test]
fn threshold_itself_still_searches() {
    let mut rules = CountingRules::new(START);
    let profile = DifficultyProfile::new(1, 0.75, "Edge");
    let mut rng = StdRng::seed_from_u64(14);

    let selection = select_move(&mut rules, &profile, &mut rng).unwrap();
    assert_eq!(rules.applies, 20);
    assert_eq!(rules.undos, 20);
    assert!(selection.score.is_some());
}

// =============================================================================
// Search-backed selection
// =============================================================================

#[test]
fn depth_one_choice_has_best_single_ply_score() {
    let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
    let mut game = Game::from_fen(fen).unwrap();
    let mut best = f64::NEG_INFINITY;
    for mv in game.legal_moves() {
        game.play(mv);
        best = best.max(evaluate(&mut game));
        game.undo();
    }

    let mut rules = CountingRules::new(fen);
    let profile = DifficultyProfile::new(1, 0.0, "Greedy");
    let selection = select_move(&mut rules, &profile, &mut StdRng::seed_from_u64(15)).unwrap();

    assert!((selection.score.unwrap() - best).abs() <= 1e-6);
    assert_eq!(rules.applies, rules.undos);
}

#[test]
fn zero_randomness_is_deterministic_in_score() {
    let mut scores = Vec::new();
    let mut groups = Vec::new();
    for seed in 0..5 {
        let mut rules = CountingRules::new(START);
        let selection = select_move(&mut rules, &level(5), &mut StdRng::seed_from_u64(seed)).unwrap();
        assert!(selection.best_moves.contains(&selection.mv));
        scores.push(selection.score);
        groups.push(selection.best_moves);
    }
    assert!(scores.windows(2).all(|w| w[0] == w[1]));
    assert!(groups.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn mate_in_one_is_found_at_depth_one() {
    let mut rules = CountingRules::new("k7/ppp2ppp/8/4Q3/8/8/PP3PPP/6K1 w - - 0 1");
    let profile = DifficultyProfile::new(1, 0.0, "Greedy");

    let selection = select_move(&mut rules, &profile, &mut StdRng::seed_from_u64(16)).unwrap();

    assert_eq!(move_to_uci(selection.mv), "e5e8");
    assert_eq!(selection.score, Some(MATE_SCORE));
    assert_eq!(selection.best_moves.len(), 1);
}

#[test]
fn mate_in_one_beats_winning_material() {
    // Qxc7 wins a pawn, Qe8 mates; the deeper search must still prefer mate.
    let mut rules = CountingRules::new("k7/ppp2ppp/8/4Q3/8/8/PP3PPP/6K1 w - - 0 1");
    let profile = DifficultyProfile::new(2, 0.0, "Deeper");

    let selection = select_move(&mut rules, &profile, &mut StdRng::seed_from_u64(17)).unwrap();

    assert_eq!(move_to_uci(selection.mv), "e5e8");
    assert_eq!(selection.score, Some(MATE_SCORE));
    assert_eq!(selection.best_moves.len(), 1);
}

#[test]
fn depth_three_does_not_hang_the_rook() {
    // Black's rook on c3 is attacked by the bishop on b2 and must move.
    let fen = "4k3/8/8/8/8/2r5/1B6/4K3 b - - 0 1";
    for seed in 0..4 {
        let mut rules = CountingRules::new(fen);
        let selection =
            select_move(&mut rules, &level(5), &mut StdRng::seed_from_u64(seed)).unwrap();

        let mut game = Game::from_fen(fen).unwrap();
        game.play(selection.mv);
        let rook_taken = game
            .legal_moves()
            .into_iter()
            .any(|reply| reply.captured == Some(PieceKind::Rook));
        assert!(
            !rook_taken,
            "seed {seed}: {} leaves the rook en prise",
            move_to_uci(selection.mv)
        );
    }
}

#[test]
fn depth_three_from_start_keeps_material_safe() {
    let mut rules = CountingRules::new(START);
    let selection = select_move(&mut rules, &level(5), &mut StdRng::seed_from_u64(18)).unwrap();
    assert_eq!(selection.depth, 3);

    // After the chosen move no Black capture wins material outright.
    let mut game = Game::startpos();
    game.play(selection.mv);
    for reply in game.legal_moves() {
        if let Some(victim) = reply.captured {
            let attacker = Rules::piece_at(&game, reply.from).unwrap();
            assert!(
                piece_value(victim) <= piece_value(attacker.kind),
                "{} hangs a piece",
                move_to_uci(selection.mv)
            );
        }
    }
    assert_eq!(rules.applies, rules.undos);
    assert_eq!(rules.game.ply(), 0);
}
