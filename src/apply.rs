use crate::{
    color::Color,
    coord::Vector,
    movement::{Candidate, LegalMove, MoveKind},
    piece::{ColoredPieceKind, PieceKind},
    position::Position,
    san::San,
};

impl Position {
    /// The successor position of a pseudo-legal move. The en passant target of
    /// a double push is recorded unconditionally here.
    pub(crate) fn after(&self, candidate: &Candidate) -> Position {
        let color = self.current_player;
        let origin = candidate.lan.origin;
        let destination = candidate.lan.destination;
        let mut next = self.clone();

        next.board[origin] = None;
        if let MoveKind::EnPassant(captured) = candidate.kind {
            next.board[captured] = None;
        }
        let piece = candidate.lan.promotion.unwrap_or(candidate.piece);
        next.board[destination] = Some(ColoredPieceKind::new(color, piece));
        if let MoveKind::Castling(side) = candidate.kind {
            next.board[side.rook_origin(color)] = None;
            next.board[side.rook_destination(color)] =
                Some(ColoredPieceKind::new(color, PieceKind::Rook));
        }
        next.castling_right = self
            .castling_right
            .to_removed_for_move(origin, destination);
        next.en_passant_target = match candidate.kind {
            MoveKind::DoublePush => origin.move_by(Vector::pawn_single_move(color)),
            _ => None,
        };
        next.half_move = if candidate.piece == PieceKind::Pawn || candidate.capture.is_some() {
            0
        } else {
            self.half_move.saturating_add(1)
        };
        if color == Color::Black {
            next.full_move = next.full_move.saturating_add(1);
        }
        next.current_player = !color;
        next
    }
    /// Plays a legal move, returning the successor position and the move's
    /// algebraic notation.
    ///
    /// After a double push the en passant target is kept only when the
    /// opponent actually has a legal en passant capture.
    pub fn play(&self, movement: LegalMove) -> (Position, San) {
        debug_assert_eq!(
            movement.issued_for,
            self.fingerprint(),
            "{movement} was issued for a different position"
        );
        let mut next = self.after(&movement.candidate);
        if next.en_passant_target.is_some() && !next.has_legal_en_passant() {
            next.en_passant_target = None;
        }
        let san = San::new(self, movement, &next);
        (next, san)
    }
}
/// Free-standing form of [`Position::play`].
pub fn apply(position: &Position, movement: LegalMove) -> (Position, San) {
    position.play(movement)
}
#[cfg(test)]
mod test {
    use crate::{
        apply::apply,
        castling_right::CastlingRight,
        color::Color,
        coord,
        fen::{decode, encode},
        piece::{ColoredPieceKind, PieceKind},
        position::Position,
    };

    fn play(position: &Position, lan: &str) -> Position {
        let movement = position.legal_move(lan.parse().unwrap()).unwrap();
        position.play(movement).0
    }

    #[test]
    fn king_pawn_opening() {
        let position = Position::starting_position();
        let movement = position.legal_move("e2e4".parse().unwrap()).unwrap();
        let (after, san) = apply(&position, movement);
        assert_eq!(san.as_str(), "e4");
        assert_eq!(after.current_player(), Color::Black);
        assert_eq!(after.en_passant_target(), None);
        assert_eq!(
            encode(&after),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1"
        );
        // the original is untouched
        assert_eq!(position, Position::starting_position());
    }
    #[test]
    fn en_passant_target_kept_when_capturable() {
        let position =
            decode("rnbqkbnr/ppp1pppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 2").unwrap();
        let after = play(&position, "d7d5");
        assert_eq!(after.en_passant_target(), Some(coord!("d6")));
        assert_eq!(
            encode(&after),
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
        );
        let after = play(&after, "e5d6");
        assert_eq!(after[coord!("d5")], None);
        assert_eq!(
            after[coord!("d6")],
            Some(ColoredPieceKind::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(after.en_passant_target(), None);
    }
    #[test]
    fn castling_moves_rook() {
        let position = decode("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").unwrap();
        let after = play(&position, "e1g1");
        assert_eq!(
            after[coord!("f1")],
            Some(ColoredPieceKind::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(after[coord!("h1")], None);
        assert_eq!(after.castling_right().to_string(), "kq");
        assert_eq!(after.half_move(), 4);
        let after = play(&after, "e8c8");
        assert_eq!(
            after[coord!("d8")],
            Some(ColoredPieceKind::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(after.castling_right(), CastlingRight::none());
        assert_eq!(after.full_move(), 11);
    }
    #[test]
    fn rook_capture_removes_right() {
        let position = decode("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let after = play(&position, "h1h8");
        assert_eq!(after.castling_right().to_string(), "Qq");
        assert_eq!(after.half_move(), 0);
    }
    #[test]
    fn rook_leaving_home_removes_right() {
        let position = decode("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let after = play(&position, "h1h2");
        assert_eq!(after.castling_right().to_string(), "Qkq");
        let after = play(&after, "a8a7");
        assert_eq!(after.castling_right().to_string(), "Qk");
    }
    #[test]
    fn clocks_saturate() {
        let position = decode("4k3/8/8/8/8/8/8/R3K3 w - - 4294967295 80").unwrap();
        assert_eq!(position.legal_moves().len(), 15);
        assert!(position.is_legal("a1a2".parse().unwrap()));
        let after = play(&position, "a1a2");
        assert_eq!(after.half_move(), u32::MAX);

        let position = decode("r3k3/8/8/8/8/8/8/4K3 b - - 0 4294967295").unwrap();
        let after = play(&position, "a8a7");
        assert_eq!(after.full_move(), u32::MAX);
        let fen = encode(&after);
        assert_eq!(fen, "4k3/r7/8/8/8/8/8/4K3 w - - 1 4294967295");
        assert_eq!(decode(&fen), Ok(after));
    }
    #[test]
    fn promotion_replaces_pawn() {
        let position = decode("8/4P3/8/8/8/8/8/k6K w - - 5 40").unwrap();
        let after = play(&position, "e7e8n");
        assert_eq!(
            after[coord!("e8")],
            Some(ColoredPieceKind::new(Color::White, PieceKind::Knight))
        );
        assert_eq!(after.half_move(), 0);
        assert_eq!(after.full_move(), 40);
    }
}
