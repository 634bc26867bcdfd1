use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    castling_right::CastlingRight,
    color::Color,
    coord::Coord,
    piece::{ColoredPieceKind, PieceKind},
    position::Position,
    simple_board::SimpleBoard,
};

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_HALF_MOVES: u32 = 100;
pub const REPETITION_LIMIT: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}
impl Display for DrawReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::Stalemate => write!(f, "stalemate")?,
            DrawReason::InsufficientMaterial => write!(f, "insufficient material")?,
            DrawReason::FiftyMoveRule => write!(f, "fifty-move rule")?,
            DrawReason::ThreefoldRepetition => write!(f, "threefold repetition")?,
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    Ongoing,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}
impl Termination {
    pub fn is_over(self) -> bool {
        self != Termination::Ongoing
    }
    /// The result for the position this was classified from. The mated side
    /// is the side to move, so the win goes to the other one.
    pub fn result(self, position: &Position) -> Option<GameResult> {
        match self {
            Termination::Ongoing => None,
            Termination::Checkmate => Some(GameResult::win(!position.current_player())),
            Termination::Stalemate | Termination::Draw(_) => Some(GameResult::Draw),
        }
    }
    pub fn draw_reason(self) -> Option<DrawReason> {
        match self {
            Termination::Stalemate => Some(DrawReason::Stalemate),
            Termination::Draw(reason) => Some(reason),
            _ => None,
        }
    }
}
impl Display for Termination {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Ongoing => write!(f, "ongoing")?,
            Termination::Checkmate => write!(f, "checkmate")?,
            Termination::Stalemate => write!(f, "stalemate")?,
            Termination::Draw(reason) => write!(f, "draw by {reason}")?,
        }
        Ok(())
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    WhiteWin,
    BlackWin,
    Draw,
}
impl GameResult {
    pub fn win(color: Color) -> Self {
        match color {
            Color::White => GameResult::WhiteWin,
            Color::Black => GameResult::BlackWin,
        }
    }
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWin => Some(Color::White),
            GameResult::BlackWin => Some(Color::Black),
            GameResult::Draw => None,
        }
    }
}
impl Display for GameResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(color) => write!(f, "{color} wins")?,
            None => write!(f, "draw")?,
        }
        Ok(())
    }
}
/// The part of a position that decides whether two positions repeat: move
/// counters are left out, and the en passant target only counts when a
/// capture is actually possible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepetitionKey {
    board: SimpleBoard<Option<ColoredPieceKind>>,
    current_player: Color,
    castling_right: CastlingRight,
    en_passant_target: Option<Coord>,
}
impl Position {
    pub fn repetition_key(&self) -> RepetitionKey {
        RepetitionKey {
            board: self.board,
            current_player: self.current_player,
            castling_right: self.castling_right,
            en_passant_target: self
                .en_passant_target
                .filter(|_| self.has_legal_en_passant()),
        }
    }
    /// No pawns, rooks or queens, and either at most one minor piece or only
    /// bishops that all stand on one square colour.
    pub fn has_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_square_colors = [false; 2];
        for (position, piece) in self.pieces() {
            match piece.piece() {
                PieceKind::King => (),
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_square_colors[usize::from(position.color() == Color::Black)] = true;
                }
            }
        }
        minors <= 1 || (knights == 0 && bishop_square_colors != [true, true])
    }
    /// Classifies a position on its own, without repetition history.
    pub fn classify(&self) -> Termination {
        classify(self, 1)
    }
}
/// Classifies `position`, given how many times its [`RepetitionKey`] has
/// occurred in the game so far (including this occurrence).
///
/// Checkmate is decided first, so a mate on the hundredth half-move is a mate.
pub fn classify(position: &Position, occurrences: u8) -> Termination {
    if !position.has_legal_moves() {
        if position.is_check() {
            Termination::Checkmate
        } else {
            Termination::Stalemate
        }
    } else if position.has_insufficient_material() {
        Termination::Draw(DrawReason::InsufficientMaterial)
    } else if position.half_move() >= FIFTY_MOVE_HALF_MOVES {
        Termination::Draw(DrawReason::FiftyMoveRule)
    } else if occurrences >= REPETITION_LIMIT {
        Termination::Draw(DrawReason::ThreefoldRepetition)
    } else {
        Termination::Ongoing
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        fen::decode,
        position::Position,
        termination::{DrawReason, GameResult, Termination, classify},
    };

    #[test]
    fn starting_position_is_ongoing() {
        let position = Position::starting_position();
        assert_eq!(position.classify(), Termination::Ongoing);
        assert_eq!(position.classify().result(&position), None);
    }
    #[test]
    fn back_rank_mate() {
        let position = decode("R5k1/5ppp/8/8/8/8/8/4K3 b - - 1 1").unwrap();
        assert_eq!(position.classify(), Termination::Checkmate);
        assert_eq!(
            position.classify().result(&position),
            Some(GameResult::WhiteWin)
        );
    }
    #[test]
    fn stalemate() {
        let position = decode("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(position.classify(), Termination::Stalemate);
        assert_eq!(position.classify().result(&position), Some(GameResult::Draw));
        assert_eq!(
            position.classify().draw_reason(),
            Some(DrawReason::Stalemate)
        );
    }
    #[test]
    fn bare_kings_are_a_draw() {
        let position = decode("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(position.has_legal_moves());
        assert_eq!(
            position.classify(),
            Termination::Draw(DrawReason::InsufficientMaterial)
        );
    }
    #[test]
    fn insufficient_material_table() {
        for fen in [
            "4k3/8/8/8/8/8/8/4KN2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KB2 w - - 0 1",
            "4k1b1/8/8/8/8/8/8/4KB2 w - - 0 1",
            "4k3/8/8/8/8/3B4/8/4KB2 w - - 0 1",
        ] {
            assert!(decode(fen).unwrap().has_insufficient_material(), "{fen}");
        }
        for fen in [
            "4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1",
            "4kb2/8/8/8/8/8/8/4KB2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KNN1 w - - 0 1",
            "4kn2/8/8/8/8/8/8/4KB2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4KR2 w - - 0 1",
            "4k3/8/8/8/8/8/P7/4K3 w - - 0 1",
        ] {
            assert!(!decode(fen).unwrap().has_insufficient_material(), "{fen}");
        }
    }
    #[test]
    fn fifty_move_rule() {
        let position = decode("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
        assert_eq!(
            position.classify(),
            Termination::Draw(DrawReason::FiftyMoveRule)
        );
        let position = decode("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
        assert_eq!(position.classify(), Termination::Ongoing);
    }
    #[test]
    fn mate_beats_fifty_move_rule() {
        let position = decode("R5k1/5ppp/8/8/8/8/8/4K3 b - - 100 60").unwrap();
        assert_eq!(position.classify(), Termination::Checkmate);
    }
    #[test]
    fn repetition_needs_three_occurrences() {
        let position = Position::starting_position();
        assert_eq!(classify(&position, 2), Termination::Ongoing);
        assert_eq!(
            classify(&position, 3),
            Termination::Draw(DrawReason::ThreefoldRepetition)
        );
    }
    #[test]
    fn unusable_en_passant_target_does_not_change_key() {
        let with_target =
            decode("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        let without_target =
            decode("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert_eq!(with_target.repetition_key(), without_target.repetition_key());
        assert_eq!(without_target.current_player(), Color::Black);
    }
}
