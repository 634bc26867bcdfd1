use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};

use crate::{
    castling_right::InvalidCastlingRight,
    color::Color,
    coord::{Coord, ParseCoordError},
    piece::{ColoredPieceKind, InvalidFenPiece},
    position::{InvalidPosition, Position},
    simple_board::SimpleBoard,
};

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFenError {
    FieldCount(usize),
    NotEnoughSquaresOnRow,
    ExceedingSquaresOnRow,
    RowCount(usize),
    UnexpectedChar(char),
    InvalidFenPiece(InvalidFenPiece),
    InvalidPlayer(String),
    InvalidCastlingRight(InvalidCastlingRight),
    InvalidEnPassantTarget(ParseCoordError),
    InvalidClock(ParseIntError),
    ZeroFullMove,
    InvalidPosition(InvalidPosition),
}
impl From<InvalidFenPiece> for ParseFenError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseFenError::InvalidFenPiece(value)
    }
}
impl From<InvalidCastlingRight> for ParseFenError {
    fn from(value: InvalidCastlingRight) -> Self {
        ParseFenError::InvalidCastlingRight(value)
    }
}
impl From<ParseCoordError> for ParseFenError {
    fn from(value: ParseCoordError) -> Self {
        ParseFenError::InvalidEnPassantTarget(value)
    }
}
impl From<ParseIntError> for ParseFenError {
    fn from(value: ParseIntError) -> Self {
        ParseFenError::InvalidClock(value)
    }
}
impl From<InvalidPosition> for ParseFenError {
    fn from(value: InvalidPosition) -> Self {
        ParseFenError::InvalidPosition(value)
    }
}
impl Display for ParseFenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseFenError::FieldCount(count) => {
                write!(f, "found {count} fields, 4 or 6 were expected")?;
            }
            ParseFenError::NotEnoughSquaresOnRow => write!(f, "not enough squares on a row")?,
            ParseFenError::ExceedingSquaresOnRow => write!(f, "too many squares on a row")?,
            ParseFenError::RowCount(count) => write!(f, "found {count} rows, 8 were expected")?,
            ParseFenError::UnexpectedChar(c) => write!(f, "unexpected `{c}`")?,
            ParseFenError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseFenError::InvalidPlayer(token) => {
                write!(f, "found `{token}`, `w` or `b` were expected")?;
            }
            ParseFenError::InvalidCastlingRight(err) => write!(f, "{err}")?,
            ParseFenError::InvalidEnPassantTarget(err) => {
                write!(f, "invalid en passant target: {err}")?;
            }
            ParseFenError::InvalidClock(err) => write!(f, "invalid move counter: {err}")?,
            ParseFenError::ZeroFullMove => write!(f, "full move number starts at 1")?,
            ParseFenError::InvalidPosition(err) => write!(f, "{err}")?,
        }
        Ok(())
    }
}
impl Error for ParseFenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseFenError::InvalidFenPiece(err) => Some(err),
            ParseFenError::InvalidCastlingRight(err) => Some(err),
            ParseFenError::InvalidEnPassantTarget(err) => Some(err),
            ParseFenError::InvalidClock(err) => Some(err),
            ParseFenError::InvalidPosition(err) => Some(err),
            _ => None,
        }
    }
}
fn parse_placement(src: &str) -> Result<SimpleBoard<Option<ColoredPieceKind>>, ParseFenError> {
    let rows: Vec<_> = src.split('/').collect();
    if rows.len() != 8 {
        return Err(ParseFenError::RowCount(rows.len()));
    }
    let mut board = SimpleBoard([[None; 8]; 8]);
    for (y, row) in (0..).zip(rows) {
        let mut x: u8 = 0;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(ParseFenError::UnexpectedChar(c));
                }
                x += u8::try_from(skip).map_err(|_| ParseFenError::UnexpectedChar(c))?;
                if x > 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
            } else {
                if x >= 8 {
                    return Err(ParseFenError::ExceedingSquaresOnRow);
                }
                board[Coord::new(x, y)] = Some(ColoredPieceKind::from_fen(c)?);
                x += 1;
            }
        }
        if x < 8 {
            return Err(ParseFenError::NotEnoughSquaresOnRow);
        }
    }
    Ok(board)
}
/// Decodes a position string. Six fields are canonical; the two move counters
/// may be left out, defaulting to `0 1`.
pub fn decode(text: &str) -> Result<Position, ParseFenError> {
    let fields: Vec<_> = text.split_whitespace().collect();
    let (placement, player, castling_right, en_passant_target, half_move, full_move) =
        match fields[..] {
            [a, b, c, d] => (a, b, c, d, "0", "1"),
            [a, b, c, d, e, f] => (a, b, c, d, e, f),
            _ => return Err(ParseFenError::FieldCount(fields.len())),
        };
    let board = parse_placement(placement)?;
    let current_player = Color::from_fen(player)
        .ok_or_else(|| ParseFenError::InvalidPlayer(player.to_string()))?;
    let castling_right = castling_right.parse()?;
    let en_passant_target = match en_passant_target {
        "-" => None,
        target => Some(target.parse()?),
    };
    let half_move = half_move.parse()?;
    let full_move = full_move.parse()?;
    if full_move == 0 {
        return Err(ParseFenError::ZeroFullMove);
    }
    let position = Position {
        board,
        current_player,
        castling_right,
        en_passant_target,
        half_move,
        full_move,
    };
    position.validate()?;
    Ok(position)
}
pub fn encode(position: &Position) -> String {
    position.to_string()
}
impl FromStr for Position {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}
impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (y, row) in self.board.rows().enumerate() {
            if y != 0 {
                write!(f, "/")?;
            }
            let mut pieces = row.iter().copied().peekable();
            while let Some(piece) = pieces.next() {
                if let Some(piece) = piece {
                    write!(f, "{}", piece.fen())?;
                } else {
                    let mut count = 1;
                    while pieces.next_if(Option::is_none).is_some() {
                        count += 1;
                    }
                    write!(f, "{count}")?;
                }
            }
        }
        write!(f, " {}", self.current_player.lowercase())?;
        write!(f, " {}", self.castling_right)?;
        if let Some(position) = self.en_passant_target {
            write!(f, " {position}")?;
        } else {
            write!(f, " -")?;
        }
        write!(f, " {} {}", self.half_move, self.full_move)?;
        Ok(())
    }
}
