use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    ops::Index,
};

use rustc_hash::FxHasher;

use crate::{
    castling_right::{CastlingRight, CastlingSide, king_origin},
    color::Color,
    coord::{Coord, Vector, en_passant_rank, pawn_promotion_rank},
    piece::{ColoredPieceKind, PieceKind},
    simple_board::SimpleBoard,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidPosition {
    KingCount(Color),
    PawnOnBackRank(Coord),
    NonPlayerInCheck,
    InvalidCastlingRight,
    InvalidEnPassantTarget,
}
impl Display for InvalidPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidPosition::KingCount(color) => write!(f, "{color} must have exactly one king")?,
            InvalidPosition::PawnOnBackRank(position) => {
                write!(f, "found pawn on back rank at {position}")?;
            }
            InvalidPosition::NonPlayerInCheck => write!(f, "non-player in check")?,
            InvalidPosition::InvalidCastlingRight => write!(f, "invalid castling right")?,
            InvalidPosition::InvalidEnPassantTarget => write!(f, "invalid en passant target")?,
        }
        Ok(())
    }
}
impl Error for InvalidPosition {}

/// A full chess position. Positions are values: playing a move produces a new
/// one and leaves the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) board: SimpleBoard<Option<ColoredPieceKind>>,
    pub(crate) current_player: Color,
    pub(crate) castling_right: CastlingRight,
    pub(crate) en_passant_target: Option<Coord>,
    pub(crate) half_move: u32,
    pub(crate) full_move: u32,
}
impl Position {
    pub fn starting_position() -> Self {
        let configuration = PieceKind::STARTING_CONFIGURATION;
        let board = [
            configuration.map(|piece| Some(ColoredPieceKind::new(Color::Black, piece))),
            [Some(ColoredPieceKind::new(Color::Black, PieceKind::Pawn)); 8],
            [None; 8],
            [None; 8],
            [None; 8],
            [None; 8],
            [Some(ColoredPieceKind::new(Color::White, PieceKind::Pawn)); 8],
            configuration.map(|piece| Some(ColoredPieceKind::new(Color::White, piece))),
        ];
        Position {
            board: SimpleBoard(board),
            current_player: Color::White,
            castling_right: CastlingRight::all(),
            en_passant_target: None,
            half_move: 0,
            full_move: 1,
        }
    }
    pub fn current_player(&self) -> Color {
        self.current_player
    }
    pub fn castling_right(&self) -> CastlingRight {
        self.castling_right
    }
    pub fn en_passant_target(&self) -> Option<Coord> {
        self.en_passant_target
    }
    pub fn half_move(&self) -> u32 {
        self.half_move
    }
    pub fn full_move(&self) -> u32 {
        self.full_move
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, ColoredPieceKind)> {
        self.board.occupied()
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, ColoredPieceKind)> {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }
    pub fn king(&self, color: Color) -> Option<Coord> {
        self.pieces()
            .find(|(_, piece)| piece.is(color, PieceKind::King))
            .map(|(position, _)| position)
    }
    fn has(&self, position: Coord, color: Color, piece: PieceKind) -> bool {
        self.board[position].is_some_and(|found| found.is(color, piece))
    }
    fn any_step_has(
        &self,
        position: Coord,
        moves: &[Vector],
        color: Color,
        piece: PieceKind,
    ) -> bool {
        moves
            .iter()
            .filter_map(|movement| position.move_by(*movement))
            .any(|origin| self.has(origin, color, piece))
    }
    fn any_line_has(
        &self,
        position: Coord,
        directions: &[Vector],
        color: Color,
        pieces: [PieceKind; 2],
    ) -> bool {
        directions.iter().any(|direction| {
            position
                .line_exclusive(*direction)
                .find_map(|origin| self.board[origin])
                .is_some_and(|found| {
                    found.color() == color && pieces.contains(&found.piece())
                })
        })
    }
    /// Whether any piece of `color` attacks `position`, looking outward from
    /// the target square.
    pub fn is_attacked(&self, position: Coord, color: Color) -> bool {
        let pawn_origins = Vector::pawn_attacks(color).map(|attack| -attack);
        self.any_step_has(position, &pawn_origins, color, PieceKind::Pawn)
            || self.any_step_has(position, &Vector::KNIGHT_MOVES, color, PieceKind::Knight)
            || self.any_step_has(position, &Vector::KING_MOVES, color, PieceKind::King)
            || self.any_line_has(
                position,
                &Vector::BISHOP_DIRECTIONS,
                color,
                [PieceKind::Bishop, PieceKind::Queen],
            )
            || self.any_line_has(
                position,
                &Vector::ROOK_DIRECTIONS,
                color,
                [PieceKind::Rook, PieceKind::Queen],
            )
    }
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.king(color)
            .is_some_and(|king| self.is_attacked(king, !color))
    }
    /// Whether the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.is_king_attacked(self.current_player)
    }
    pub(crate) fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
    pub fn validate(&self) -> Result<(), InvalidPosition> {
        for color in Color::ALL {
            let kings = self
                .pieces()
                .filter(|(_, piece)| piece.is(color, PieceKind::King))
                .count();
            if kings != 1 {
                return Err(InvalidPosition::KingCount(color));
            }
        }
        if let Some((position, _)) = self.pieces().find(|(position, piece)| {
            piece.piece() == PieceKind::Pawn
                && Color::ALL
                    .into_iter()
                    .any(|color| position.y() == pawn_promotion_rank(color))
        }) {
            return Err(InvalidPosition::PawnOnBackRank(position));
        }
        if self.is_king_attacked(!self.current_player) {
            return Err(InvalidPosition::NonPlayerInCheck);
        }
        let castling_is_valid = Color::ALL.into_iter().all(|color| {
            self.castling_right.sides(color).all(|side: CastlingSide| {
                self.has(king_origin(color), color, PieceKind::King)
                    && self.has(side.rook_origin(color), color, PieceKind::Rook)
            })
        });
        if !castling_is_valid {
            return Err(InvalidPosition::InvalidCastlingRight);
        }
        if let Some(target) = self.en_passant_target {
            // the pawn that just double pushed belongs to the non-player
            let pusher = !self.current_player;
            let pushed = target.move_by(Vector::pawn_single_move(pusher));
            let origin = target.move_by(-Vector::pawn_single_move(pusher));
            let is_valid = target.y() == en_passant_rank(pusher)
                && self.board[target].is_none()
                && origin.is_some_and(|origin| self.board[origin].is_none())
                && pushed.is_some_and(|pushed| self.has(pushed, pusher, PieceKind::Pawn));
            if !is_valid {
                return Err(InvalidPosition::InvalidEnPassantTarget);
            }
        }
        Ok(())
    }
}
impl Default for Position {
    fn default() -> Self {
        Position::starting_position()
    }
}
impl Index<Coord> for Position {
    type Output = Option<ColoredPieceKind>;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.board[index]
    }
}
