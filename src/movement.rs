use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    castling_right::CastlingSide,
    coord::{Coord, ParseCoordError},
    piece::{InvalidFenPiece, PieceKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseLanError {
    InvalidChar,
    ParseCoordError(ParseCoordError),
    InvalidFenPiece(InvalidFenPiece),
    InvalidPromotion(PieceKind),
    Unexpected(char),
}
impl From<ParseCoordError> for ParseLanError {
    fn from(value: ParseCoordError) -> Self {
        ParseLanError::ParseCoordError(value)
    }
}
impl From<InvalidFenPiece> for ParseLanError {
    fn from(value: InvalidFenPiece) -> Self {
        ParseLanError::InvalidFenPiece(value)
    }
}
impl Display for ParseLanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseLanError::InvalidChar => write!(f, "provided string contains invalid character")?,
            ParseLanError::ParseCoordError(err) => write!(f, "{err}")?,
            ParseLanError::InvalidFenPiece(err) => write!(f, "{err}")?,
            ParseLanError::InvalidPromotion(piece) => write!(f, "cannot promote to {piece}")?,
            ParseLanError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseLanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseLanError::ParseCoordError(err) => Some(err),
            ParseLanError::InvalidFenPiece(err) => Some(err),
            _ => None,
        }
    }
}
/// A candidate move in origin-destination-promotion form, e.g. `e7e8q`.
///
/// It says nothing about legality, which only exists relative to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lan {
    pub origin: Coord,
    pub destination: Coord,
    pub promotion: Option<PieceKind>,
}
impl Lan {
    pub fn new(origin: Coord, destination: Coord) -> Self {
        Lan {
            origin,
            destination,
            promotion: None,
        }
    }
    pub fn with_promotion(self, promotion: PieceKind) -> Self {
        Lan {
            promotion: Some(promotion),
            ..self
        }
    }
}
impl Display for Lan {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.lowercase())?;
        }
        Ok(())
    }
}
impl FromStr for Lan {
    type Err = ParseLanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let origin = s.get(0..2).ok_or(ParseLanError::InvalidChar)?.parse()?;
        let destination = s.get(2..4).ok_or(ParseLanError::InvalidChar)?.parse()?;
        let mut rest = s
            .get(4..)
            .ok_or(ParseLanError::InvalidChar)?
            .chars()
            .fuse();
        let promotion = rest.next().map(PieceKind::from_fen).transpose()?;
        if let Some(piece) = promotion
            && !piece.is_promotion_choice()
        {
            return Err(ParseLanError::InvalidPromotion(piece));
        }

        if let Some(c) = rest.next() {
            return Err(ParseLanError::Unexpected(c));
        }
        Ok(Lan {
            origin,
            destination,
            promotion,
        })
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum MoveKind {
    Normal,
    DoublePush,
    EnPassant(Coord),
    Castling(CastlingSide),
}
/// A pseudo-legal move with everything needed to play it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Candidate {
    pub(crate) lan: Lan,
    pub(crate) piece: PieceKind,
    pub(crate) kind: MoveKind,
    pub(crate) capture: Option<PieceKind>,
}
/// A move the legality checker has accepted for one specific position.
///
/// This type can only be obtained from [`Position::legal_moves`] or
/// [`Position::legal_move`], which makes playing an unchecked move impossible.
///
/// [`Position::legal_moves`]: crate::position::Position::legal_moves
/// [`Position::legal_move`]: crate::position::Position::legal_move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegalMove {
    pub(crate) candidate: Candidate,
    pub(crate) issued_for: u64,
}
impl LegalMove {
    pub fn lan(self) -> Lan {
        self.candidate.lan
    }
    pub fn origin(self) -> Coord {
        self.candidate.lan.origin
    }
    pub fn destination(self) -> Coord {
        self.candidate.lan.destination
    }
    pub fn piece(self) -> PieceKind {
        self.candidate.piece
    }
    pub fn promotion(self) -> Option<PieceKind> {
        self.candidate.lan.promotion
    }
    pub fn captured(self) -> Option<PieceKind> {
        self.candidate.capture
    }
    pub fn is_capture(self) -> bool {
        self.candidate.capture.is_some()
    }
    pub fn is_en_passant(self) -> bool {
        matches!(self.candidate.kind, MoveKind::EnPassant(_))
    }
    pub fn castling_side(self) -> Option<CastlingSide> {
        match self.candidate.kind {
            MoveKind::Castling(side) => Some(side),
            _ => None,
        }
    }
}
impl Display for LegalMove {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.candidate.lan)?;
        Ok(())
    }
}
