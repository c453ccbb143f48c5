use super::*;
use chess_core::{Game, PieceKind, move_to_uci};

#[test]
fn captures_first_by_capturing_piece_value() {
    let mut game = Game::from_fen("4k3/8/8/3p4/2P5/4N3/8/3QK3 w - - 0 1").unwrap();
    let mut moves = game.legal_moves();
    order_moves(&game, &mut moves);

    let head: Vec<String> = moves.iter().take(3).map(|&mv| move_to_uci(mv)).collect();
    assert_eq!(head, ["d1d5", "e3d5", "c4d5"]);
    assert!(moves[3..].iter().all(|mv| !mv.is_capture()));

    assert_eq!(move_order_key(&game, &moves[0]), CAPTURE_BONUS + 900);
    assert_eq!(move_order_key(&game, &moves[2]), CAPTURE_BONUS + 100);
    assert_eq!(move_order_key(&game, &moves[3]), 0);
}

#[test]
fn ordering_is_stable_and_keeps_every_move() {
    let mut game =
        Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .unwrap();
    let generated = game.legal_moves();
    let mut ordered = generated.clone();
    order_moves(&game, &mut ordered);

    assert_eq!(ordered.len(), generated.len());
    for mv in &generated {
        assert!(ordered.contains(mv));
    }

    let quiet_generated: Vec<_> = generated.iter().filter(|m| !m.is_capture()).collect();
    let quiet_ordered: Vec<_> = ordered.iter().filter(|m| !m.is_capture()).collect();
    assert_eq!(quiet_generated, quiet_ordered);

    let keys: Vec<i32> = ordered.iter().map(|mv| move_order_key(&game, mv)).collect();
    assert!(keys.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn en_passant_is_keyed_by_the_capturing_pawn() {
    let mut game = Game::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let mut moves = game.legal_moves();
    order_moves(&game, &mut moves);
    assert!(moves[0].is_en_passant);
    assert_eq!(moves[0].captured, Some(PieceKind::Pawn));
    assert_eq!(move_order_key(&game, &moves[0]), CAPTURE_BONUS + 100);
}

#[test]
fn ordering_empty_list_is_noop() {
    let game = Game::startpos();
    let mut moves = Vec::new();
    order_moves(&game, &mut moves);
    assert!(moves.is_empty());
}
