use std::fmt::{self, Display, Formatter};

use crate::{color::Color, coord::Coord, piece::ColoredPieceKind, position::Position};

const LIGHT: &str = "\x1b[30;107m";
const DARK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const LAST_MOVE: &str = "\x1b[30;106m";
const CHECKED: &str = "\x1b[30;101m";
const RESET: &str = "\x1b[0m";

/// Renders a position for an ANSI terminal, with optional text lines shown
/// to the right of the board.
pub struct BoardDisplay<'a> {
    pub position: &'a Position,
    pub view: Color,
    pub highlighted: &'a [Coord],
    pub last_move: Option<(Coord, Coord)>,
    pub info: &'a str,
}
impl<'a> BoardDisplay<'a> {
    pub fn new(position: &'a Position) -> Self {
        BoardDisplay {
            position,
            view: Color::White,
            highlighted: &[],
            last_move: None,
            info: "",
        }
    }
    fn background(&self, position: Coord) -> &'static str {
        let checked_king = self
            .position
            .is_check()
            .then(|| self.position.king(self.position.current_player()))
            .flatten();
        if checked_king == Some(position) {
            CHECKED
        } else if self.highlighted.contains(&position) {
            HIGHLIGHTED
        } else if self
            .last_move
            .is_some_and(|(origin, destination)| position == origin || position == destination)
        {
            LAST_MOVE
        } else {
            match position.color() {
                Color::White => LIGHT,
                Color::Black => DARK,
            }
        }
    }
}
impl Display for BoardDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for y in 0..8 {
            let y = match self.view {
                Color::White => y,
                Color::Black => 7 - y,
            };
            for x in 0..8 {
                let x = match self.view {
                    Color::White => x,
                    Color::Black => 7 - x,
                };
                let position = Coord::new(x, y);
                let background = self.background(position);
                let figurine = self.position[position].map_or(' ', ColoredPieceKind::figurine);
                write!(f, "{background}{figurine} {RESET}")?;
            }
            write!(f, "{}", 8 - y)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use crate::{board_display::BoardDisplay, color::Color, fen::decode, position::Position};

    #[test]
    fn side_panel() {
        let position = Position::starting_position();
        let display = BoardDisplay {
            info: "one\ntwo",
            ..BoardDisplay::new(&position)
        };
        let text = display.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].ends_with("8 one"));
        assert!(lines[1].ends_with("7 two"));
        assert_eq!(lines[8], "a b c d e f g h");
    }
    #[test]
    fn flipped() {
        let position = decode("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let display = BoardDisplay {
            view: Color::Black,
            ..BoardDisplay::new(&position)
        };
        let text = display.to_string();
        assert!(text.lines().next().is_some_and(|line| line.ends_with('1')));
        assert!(text.ends_with("h g f e d c b a\n"));
    }
}
