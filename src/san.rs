use std::fmt::{self, Display, Formatter, Write};

use serde::{Deserialize, Serialize};

use crate::{movement::LegalMove, piece::PieceKind, position::Position};

/// Standard algebraic notation of a played move, e.g. `Nbd7`, `exd6`,
/// `e8=Q+`, `O-O-O`, `Qh4#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct San(String);

impl San {
    pub(crate) fn new(before: &Position, movement: LegalMove, after: &Position) -> Self {
        let mut san = String::new();
        if let Some(side) = movement.castling_side() {
            san.push_str(side.notation());
        } else {
            let origin = movement.origin();
            let destination = movement.destination();
            if let Some(letter) = movement.piece().san_letter() {
                san.push(letter);
                if movement.piece() != PieceKind::King {
                    write_disambiguation(&mut san, before, movement);
                }
            } else if movement.is_capture() {
                san.push(origin.file_char());
            }
            if movement.is_capture() {
                san.push('x');
            }
            // writing into a `String` cannot fail
            let _ = write!(san, "{destination}");
            if let Some(promotion) = movement.promotion() {
                san.push('=');
                san.push(promotion.uppercase());
            }
        }
        if after.is_check() {
            if after.has_legal_moves() {
                san.push('+');
            } else {
                san.push('#');
            }
        }
        San(san)
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    /// The notation without its check or checkmate marker.
    pub fn without_suffix(&self) -> &str {
        strip_suffix(&self.0)
    }
}
fn strip_suffix(san: &str) -> &str {
    san.trim_end_matches(['+', '#', '!', '?'])
}
fn write_disambiguation(san: &mut String, before: &Position, movement: LegalMove) {
    let origin = movement.origin();
    let rivals: Vec<_> = before
        .legal_moves()
        .into_iter()
        .filter(|other| {
            other.piece() == movement.piece()
                && other.destination() == movement.destination()
                && other.origin() != origin
        })
        .map(LegalMove::origin)
        .collect();
    if rivals.is_empty() {
        return;
    }
    let shares_file = rivals.iter().any(|rival| rival.x() == origin.x());
    let shares_rank = rivals.iter().any(|rival| rival.y() == origin.y());
    if !shares_file {
        san.push(origin.file_char());
    } else if !shares_rank {
        san.push(origin.rank_char());
    } else {
        san.push(origin.file_char());
        san.push(origin.rank_char());
    }
}
impl Display for San {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;
        Ok(())
    }
}
impl PartialEq<str> for San {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}
impl PartialEq<&str> for San {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
impl Position {
    /// Finds the legal move written as `san`. Check markers are optional.
    pub fn parse_san(&self, san: &str) -> Option<LegalMove> {
        let san = strip_suffix(san.trim());
        self.legal_moves()
            .into_iter()
            .find(|movement| self.play(*movement).1.without_suffix() == san)
    }
}
#[cfg(test)]
mod test {
    use crate::{fen::decode, position::Position};

    fn san(position: &Position, lan: &str) -> String {
        let movement = position.legal_move(lan.parse().unwrap()).unwrap();
        position.play(movement).1.to_string()
    }

    #[test]
    fn pieces_and_pawns() {
        let position = Position::starting_position();
        assert_eq!(san(&position, "e2e4"), "e4");
        assert_eq!(san(&position, "g1f3"), "Nf3");
    }
    #[test]
    fn pawn_capture_and_en_passant() {
        let position =
            decode("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3").unwrap();
        assert_eq!(san(&position, "e5d6"), "exd6");
    }
    #[test]
    fn file_disambiguation() {
        let position = decode("4k3/8/8/8/8/8/4K3/R6R w - - 0 1").unwrap();
        assert_eq!(san(&position, "a1d1"), "Rad1");
        assert_eq!(san(&position, "h1f1"), "Rhf1");
    }
    #[test]
    fn rank_disambiguation() {
        let position = decode("4k3/R7/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(san(&position, "a1a4"), "R1a4");
        assert_eq!(san(&position, "a7a4"), "R7a4");
    }
    #[test]
    fn square_disambiguation() {
        let position = decode("7k/8/8/8/2Q1Q3/8/2Q5/4K3 w - - 0 1").unwrap();
        assert_eq!(san(&position, "c4d3"), "Qc4d3");
        assert_eq!(san(&position, "e4d3"), "Qed3");
        assert_eq!(san(&position, "c2d3"), "Q2d3");
    }
    #[test]
    fn pinned_rival_does_not_disambiguate() {
        // the knight on e3 is pinned, so Nc3-d5 needs no file
        let position = decode("4k3/4r3/8/8/8/2N1N3/8/4K3 w - - 0 1").unwrap();
        assert_eq!(san(&position, "c3d5"), "Nd5");
    }
    #[test]
    fn castling_and_promotion() {
        let position = decode("r3k3/1P6/8/8/8/8/8/R3K2R w KQq - 0 1").unwrap();
        assert_eq!(san(&position, "e1g1"), "O-O");
        assert_eq!(san(&position, "e1c1"), "O-O-O");
        assert_eq!(san(&position, "b7b8q"), "b8=Q+");
        assert_eq!(san(&position, "b7a8r"), "bxa8=R+");
    }
    #[test]
    fn check_and_mate() {
        let position = decode("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(san(&position, "a1a8"), "Ra8#");
        assert_eq!(san(&position, "a1a7"), "Ra7");
        let position = decode("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(san(&position, "a1a8"), "Ra8+");
    }
    #[test]
    fn parse_notation() {
        let position = Position::starting_position();
        let movement = position.parse_san("Nf3").unwrap();
        assert_eq!(movement.lan().to_string(), "g1f3");
        assert!(position.parse_san("Nf4").is_none());
        let position = decode("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        assert_eq!(
            position.parse_san("Ra8").map(|movement| movement.to_string()),
            Some("a1a8".to_string())
        );
    }
}
