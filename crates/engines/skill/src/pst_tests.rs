use super::*;
use chess_core::coord_to_sq;

fn at(color: Color, kind: PieceKind, coord: &str) -> i32 {
    bonus(Piece::new(color, kind), coord_to_sq(coord).unwrap())
}

#[test]
fn white_reads_its_own_ranks() {
    assert_eq!(at(Color::White, PieceKind::Pawn, "e2"), -25);
    assert_eq!(at(Color::White, PieceKind::Pawn, "e4"), 25);
    assert_eq!(at(Color::White, PieceKind::Pawn, "e7"), 50);
    assert_eq!(at(Color::White, PieceKind::King, "g1"), 30);
    assert_eq!(at(Color::White, PieceKind::Knight, "a1"), -50);
}

#[test]
fn black_reads_the_mirrored_table() {
    for kind in PieceKind::ALL {
        for sq in 0..64u8 {
            assert_eq!(
                bonus(Piece::new(Color::Black, kind), sq),
                bonus(Piece::new(Color::White, kind), mirror(sq)),
                "{kind:?} on {sq}"
            );
        }
    }
    assert_eq!(at(Color::Black, PieceKind::Pawn, "d5"), 25);
    assert_eq!(at(Color::Black, PieceKind::King, "b8"), 30);
}

#[test]
fn queen_table_is_not_left_right_symmetric() {
    // Only vertical mirroring is applied, so file asymmetry must survive.
    assert_ne!(
        at(Color::White, PieceKind::Queen, "b3"),
        at(Color::White, PieceKind::Queen, "g3")
    );
    assert_eq!(
        at(Color::White, PieceKind::Queen, "b3"),
        at(Color::Black, PieceKind::Queen, "b6")
    );
}

#[test]
fn pawn_back_ranks_are_zero() {
    for i in 0..8 {
        assert_eq!(PAWN[i], 0);
        assert_eq!(PAWN[56 + i], 0);
    }
}
