use log::trace;

use crate::{
    castling_right::king_origin,
    color::Color,
    coord::{Coord, Vector, pawn_home_rank, pawn_promotion_rank},
    movement::{Candidate, Lan, LegalMove, MoveKind},
    piece::{ColoredPieceKind, PieceKind},
    position::Position,
};

impl Position {
    fn step_candidates(
        &self,
        origin: Coord,
        piece: ColoredPieceKind,
        moves: &[Vector],
        candidates: &mut Vec<Candidate>,
    ) {
        for destination in moves.iter().filter_map(|movement| origin.move_by(*movement)) {
            match self[destination] {
                Some(target) if target.color() == piece.color() => (),
                target => candidates.push(Candidate {
                    lan: Lan::new(origin, destination),
                    piece: piece.piece(),
                    kind: MoveKind::Normal,
                    capture: target.map(ColoredPieceKind::piece),
                }),
            }
        }
    }
    fn directional_candidates(
        &self,
        origin: Coord,
        piece: ColoredPieceKind,
        directions: &[Vector],
        candidates: &mut Vec<Candidate>,
    ) {
        for direction in directions {
            for destination in origin.line_exclusive(*direction) {
                let target = self[destination];
                if target.is_some_and(|target| target.color() == piece.color()) {
                    break;
                }
                candidates.push(Candidate {
                    lan: Lan::new(origin, destination),
                    piece: piece.piece(),
                    kind: MoveKind::Normal,
                    capture: target.map(ColoredPieceKind::piece),
                });
                if target.is_some() {
                    break;
                }
            }
        }
    }
    fn pawn_candidates(&self, origin: Coord, color: Color, candidates: &mut Vec<Candidate>) {
        let mut moves = Vec::new();
        let forward_jumps = if origin.y() == pawn_home_rank(color) {
            2
        } else {
            1
        };
        for (destination, kind) in origin
            .line_exclusive(Vector::pawn_single_move(color))
            .take(forward_jumps)
            .take_while(|position| self[*position].is_none())
            .zip([MoveKind::Normal, MoveKind::DoublePush])
        {
            moves.push((destination, kind, None));
        }
        for destination in Vector::pawn_attacks(color)
            .into_iter()
            .filter_map(|movement| origin.move_by(movement))
        {
            if let Some(target) = self[destination] {
                if target.color() != color {
                    moves.push((destination, MoveKind::Normal, Some(target.piece())));
                }
            } else if Some(destination) == self.en_passant_target {
                let captured = destination.move_by(Vector::pawn_single_move(!color));
                if let Some(captured) = captured
                    && self[captured].is_some_and(|piece| piece.is(!color, PieceKind::Pawn))
                {
                    moves.push((
                        destination,
                        MoveKind::EnPassant(captured),
                        Some(PieceKind::Pawn),
                    ));
                }
            }
        }
        for (destination, kind, capture) in moves {
            let lan = Lan::new(origin, destination);
            let candidate = Candidate {
                lan,
                piece: PieceKind::Pawn,
                kind,
                capture,
            };
            if destination.y() == pawn_promotion_rank(color) {
                candidates.extend(PieceKind::PROMOTION_CHOICES.map(|promotion| Candidate {
                    lan: lan.with_promotion(promotion),
                    ..candidate
                }));
            } else {
                candidates.push(candidate);
            }
        }
    }
    fn castling_candidates(&self, candidates: &mut Vec<Candidate>) {
        let color = self.current_player;
        let king = king_origin(color);
        if !self[king].is_some_and(|piece| piece.is(color, PieceKind::King))
            || self.is_attacked(king, !color)
        {
            return;
        }
        for side in self.castling_right.sides(color) {
            let rook = side.rook_origin(color);
            let king_destination = side.king_destination(color);
            if !self[rook].is_some_and(|piece| piece.is(color, PieceKind::Rook)) {
                continue;
            }
            let direction = Vector {
                x: (rook - king).x.signum(),
                y: 0,
            };
            let path_is_empty = king
                .line_exclusive(direction)
                .take_while(|position| *position != rook)
                .all(|position| self[position].is_none());
            let path_is_safe = king
                .line_exclusive(direction)
                .take(2)
                .all(|position| !self.is_attacked(position, !color));
            if path_is_empty && path_is_safe {
                candidates.push(Candidate {
                    lan: Lan::new(king, king_destination),
                    piece: PieceKind::King,
                    kind: MoveKind::Castling(side),
                    capture: None,
                });
            }
        }
    }
    /// Moves following each piece's movement pattern, ignoring whether the
    /// mover's king is left attacked. Castling is only produced when the king
    /// neither starts in, passes through, nor lands on an attacked square.
    pub(crate) fn pseudo_legal_moves(&self) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(64);
        for (origin, piece) in self.pieces_of(self.current_player) {
            match piece.piece() {
                PieceKind::Pawn => self.pawn_candidates(origin, piece.color(), &mut candidates),
                PieceKind::Knight => {
                    self.step_candidates(origin, piece, &Vector::KNIGHT_MOVES, &mut candidates);
                }
                PieceKind::Bishop => self.directional_candidates(
                    origin,
                    piece,
                    &Vector::BISHOP_DIRECTIONS,
                    &mut candidates,
                ),
                PieceKind::Rook => self.directional_candidates(
                    origin,
                    piece,
                    &Vector::ROOK_DIRECTIONS,
                    &mut candidates,
                ),
                PieceKind::Queen => self.directional_candidates(
                    origin,
                    piece,
                    &Vector::QUEEN_DIRECTIONS,
                    &mut candidates,
                ),
                PieceKind::King => {
                    self.step_candidates(origin, piece, &Vector::KING_MOVES, &mut candidates);
                }
            }
        }
        self.castling_candidates(&mut candidates);
        candidates
    }
    fn leaves_king_safe(&self, candidate: &Candidate) -> bool {
        !self
            .after(candidate)
            .is_king_attacked(self.current_player)
    }
    /// Every legal move for the side to move.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        let issued_for = self.fingerprint();
        self.pseudo_legal_moves()
            .into_iter()
            .filter(|candidate| self.leaves_king_safe(candidate))
            .map(|candidate| LegalMove {
                candidate,
                issued_for,
            })
            .collect()
    }
    pub fn has_legal_moves(&self) -> bool {
        self.pseudo_legal_moves()
            .iter()
            .any(|candidate| self.leaves_king_safe(candidate))
    }
    /// Legal moves in origin-destination-promotion text form.
    pub fn legal_lans(&self) -> Vec<String> {
        self.legal_moves()
            .into_iter()
            .map(|movement| movement.lan().to_string())
            .collect()
    }
    pub fn legal_move(&self, lan: Lan) -> Option<LegalMove> {
        let found = self
            .legal_moves()
            .into_iter()
            .find(|movement| movement.lan() == lan);
        if found.is_none() {
            trace!("{lan} is not legal in {self}");
        }
        found
    }
    pub fn is_legal(&self, lan: Lan) -> bool {
        self.legal_move(lan).is_some()
    }
    /// Whether the side to move could capture en passant right now.
    pub(crate) fn has_legal_en_passant(&self) -> bool {
        let Some(target) = self.en_passant_target else {
            return false;
        };
        let color = self.current_player;
        Vector::pawn_attacks(color)
            .into_iter()
            .filter_map(|attack| target.move_by(-attack))
            .filter(|origin| self[*origin].is_some_and(|piece| piece.is(color, PieceKind::Pawn)))
            .any(|origin| {
                let mut candidates = Vec::new();
                self.pawn_candidates(origin, color, &mut candidates);
                candidates
                    .iter()
                    .filter(|candidate| matches!(candidate.kind, MoveKind::EnPassant(_)))
                    .any(|candidate| self.leaves_king_safe(candidate))
            })
    }
    /// Counts leaf nodes of the legal move tree, the standard way of checking a
    /// move generator against published numbers.
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }
        moves
            .into_iter()
            .map(|movement| self.after(&movement.candidate).perft(depth - 1))
            .sum()
    }
}
/// Free-standing form of [`Position::is_legal`]; never fails, anything that is
/// not a legal move is simply `false`.
pub fn is_legal(position: &Position, lan: Lan) -> bool {
    position.is_legal(lan)
}
