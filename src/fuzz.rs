use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    board_display::BoardDisplay,
    coord::Coord,
    fen::{decode, encode},
    movement::Lan,
    piece::PieceKind,
    position::Position,
};

impl From<chess::Piece> for PieceKind {
    fn from(value: chess::Piece) -> Self {
        match value {
            chess::Piece::Pawn => PieceKind::Pawn,
            chess::Piece::Knight => PieceKind::Knight,
            chess::Piece::Bishop => PieceKind::Bishop,
            chess::Piece::Rook => PieceKind::Rook,
            chess::Piece::Queen => PieceKind::Queen,
            chess::Piece::King => PieceKind::King,
        }
    }
}
impl From<chess::Square> for Coord {
    fn from(value: chess::Square) -> Self {
        Coord::new(
            value.get_file().to_index().try_into().unwrap(),
            (7 - value.get_rank().to_index()).try_into().unwrap(),
        )
    }
}
impl From<chess::ChessMove> for Lan {
    fn from(value: chess::ChessMove) -> Self {
        Lan {
            origin: value.get_source().into(),
            destination: value.get_dest().into(),
            promotion: value.get_promotion().map(Into::into),
        }
    }
}
fn compare(position: &Position) {
    let moves: FxHashSet<Lan> = position
        .legal_moves()
        .into_iter()
        .map(|movement| movement.lan())
        .collect();
    let fen = encode(position);
    let board: chess::Board = fen.parse().unwrap();
    let moves2: FxHashSet<Lan> = chess::MoveGen::new_legal(&board).map(Into::into).collect();
    if let Some(movement) = moves.difference(&moves2).next() {
        panic!(
            "found {movement} but it's not a legal move\n{}\n{fen}",
            BoardDisplay::new(position),
        );
    }
    if let Some(movement) = moves2.difference(&moves).next() {
        panic!("{movement} not found\n{}\n{fen}", BoardDisplay::new(position));
    }
    assert_eq!(
        position.is_check(),
        board.checkers().popcnt() > 0,
        "check mismatch\n{fen}"
    );
    assert_eq!(decode(&fen).as_ref(), Ok(position), "round trip\n{fen}");
}
#[test]
fn random_games_agree_with_reference() {
    let mut rng = SmallRng::seed_from_u64(0x00c0_ffee);
    for _ in 0..100 {
        let mut position = Position::starting_position();
        for _ in 0..300 {
            compare(&position);
            let moves = position.legal_moves();
            if moves.is_empty() || position.classify().is_over() {
                break;
            }
            let movement = moves[rng.random_range(0..moves.len())];
            let (next, _) = position.play(movement);
            assert!(!next.is_king_attacked(!next.current_player()));
            position = next;
        }
    }
}
