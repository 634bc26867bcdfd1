use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{
    color::Color,
    coord::{Coord, FILE_A, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H, home_rank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidCastlingRight {
    Character(char),
    Empty,
}
impl Display for InvalidCastlingRight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            InvalidCastlingRight::Character(c) => write!(
                f,
                "found `{c}`, expected one of `K`, `Q`, `k`, `q`, or `-`"
            )?,
            InvalidCastlingRight::Empty => write!(f, "castling field is empty")?,
        }
        Ok(())
    }
}
impl Error for InvalidCastlingRight {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    pub fn rook_origin(self, color: Color) -> Coord {
        let x = match self {
            CastlingSide::Kingside => FILE_H,
            CastlingSide::Queenside => FILE_A,
        };
        Coord::new(x, home_rank(color))
    }
    pub fn king_destination(self, color: Color) -> Coord {
        let x = match self {
            CastlingSide::Kingside => FILE_G,
            CastlingSide::Queenside => FILE_C,
        };
        Coord::new(x, home_rank(color))
    }
    pub fn rook_destination(self, color: Color) -> Coord {
        let x = match self {
            CastlingSide::Kingside => FILE_F,
            CastlingSide::Queenside => FILE_D,
        };
        Coord::new(x, home_rank(color))
    }
    pub fn notation(self) -> &'static str {
        match self {
            CastlingSide::Kingside => "O-O",
            CastlingSide::Queenside => "O-O-O",
        }
    }
    fn bit(self, color: Color) -> u8 {
        match (color, self) {
            (Color::White, CastlingSide::Kingside) => 0b_0001,
            (Color::White, CastlingSide::Queenside) => 0b_0010,
            (Color::Black, CastlingSide::Kingside) => 0b_0100,
            (Color::Black, CastlingSide::Queenside) => 0b_1000,
        }
    }
    fn fen(self, color: Color) -> char {
        match (color, self) {
            (Color::White, CastlingSide::Kingside) => 'K',
            (Color::White, CastlingSide::Queenside) => 'Q',
            (Color::Black, CastlingSide::Kingside) => 'k',
            (Color::Black, CastlingSide::Queenside) => 'q',
        }
    }
}
pub fn king_origin(color: Color) -> Coord {
    Coord::new(FILE_E, home_rank(color))
}

/// The four independent castling flags, white/black × kingside/queenside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRight(u8);

impl CastlingRight {
    pub fn none() -> Self {
        CastlingRight(0)
    }
    pub fn all() -> Self {
        CastlingRight(0b_1111)
    }
    pub fn get(self, color: Color, side: CastlingSide) -> bool {
        self.0 & side.bit(color) != 0
    }
    pub fn sides(self, color: Color) -> impl Iterator<Item = CastlingSide> {
        CastlingSide::ALL
            .into_iter()
            .filter(move |side| self.get(color, *side))
    }
    pub fn is_none(self) -> bool {
        self.0 == 0
    }
    pub fn add(&mut self, color: Color, side: CastlingSide) {
        self.0 |= side.bit(color);
    }
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !side.bit(color);
    }
    pub fn clear(&mut self, color: Color) {
        for side in CastlingSide::ALL {
            self.remove(color, side);
        }
    }
    /// Drops every right whose king or rook home square is touched, either by
    /// a piece leaving it or by a capture landing on it.
    pub fn remove_for_square(&mut self, position: Coord) {
        for color in Color::ALL {
            if position == king_origin(color) {
                self.clear(color);
            }
            for side in CastlingSide::ALL {
                if position == side.rook_origin(color) {
                    self.remove(color, side);
                }
            }
        }
    }
    pub fn to_removed_for_move(self, origin: Coord, destination: Coord) -> Self {
        let mut new = self;
        new.remove_for_square(origin);
        new.remove_for_square(destination);
        new
    }
}
impl Display for CastlingRight {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "-")?;
            return Ok(());
        }
        for color in Color::ALL {
            for side in self.sides(color) {
                write!(f, "{}", side.fen(color))?;
            }
        }
        Ok(())
    }
}
impl FromStr for CastlingRight {
    type Err = InvalidCastlingRight;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(CastlingRight::none());
        }
        if s.is_empty() {
            return Err(InvalidCastlingRight::Empty);
        }
        let mut castling_right = CastlingRight::none();
        for c in s.chars() {
            match c {
                'K' => castling_right.add(Color::White, CastlingSide::Kingside),
                'Q' => castling_right.add(Color::White, CastlingSide::Queenside),
                'k' => castling_right.add(Color::Black, CastlingSide::Kingside),
                'q' => castling_right.add(Color::Black, CastlingSide::Queenside),
                c => return Err(InvalidCastlingRight::Character(c)),
            }
        }
        Ok(castling_right)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        castling_right::{CastlingRight, CastlingSide, InvalidCastlingRight},
        color::Color,
        coord,
    };

    #[test]
    fn fen_field() {
        assert_eq!(CastlingRight::all().to_string(), "KQkq");
        assert_eq!(CastlingRight::none().to_string(), "-");
        let castling_right: CastlingRight = "Kq".parse().unwrap();
        assert!(castling_right.get(Color::White, CastlingSide::Kingside));
        assert!(!castling_right.get(Color::White, CastlingSide::Queenside));
        assert!(castling_right.get(Color::Black, CastlingSide::Queenside));
        assert_eq!(castling_right.to_string(), "Kq");
        assert_eq!(
            "KX".parse::<CastlingRight>(),
            Err(InvalidCastlingRight::Character('X'))
        );
        assert_eq!(
            "".parse::<CastlingRight>(),
            Err(InvalidCastlingRight::Empty)
        );
    }
    #[test]
    fn king_move_clears_both_sides() {
        let castling_right = CastlingRight::all().to_removed_for_move(coord!("e1"), coord!("e2"));
        assert_eq!(castling_right.to_string(), "kq");
    }
    #[test]
    fn rook_capture_on_home_square() {
        let castling_right = CastlingRight::all().to_removed_for_move(coord!("b7"), coord!("a8"));
        assert_eq!(castling_right.to_string(), "KQk");
    }
}
