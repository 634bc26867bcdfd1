#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

//! Chess rules and a human-versus-opponent game session.
//!
//! [`Position`] holds a board state and reads and writes it as FEN. The
//! legality checker hands out [`LegalMove`] tokens, and only those can be
//! played, producing the next position and its algebraic notation. [`Game`]
//! wraps a sequence of positions, tracks repetitions and finishes exactly
//! once when the latest position is checkmate, stalemate or a draw.

pub mod apply;
pub mod board_display;
pub mod castling_right;
pub mod color;
pub mod coord;
pub mod difficulty;
pub mod error;
pub mod fen;
pub mod movegen;
pub mod movement;
pub mod opponent;
pub mod piece;
pub mod position;
pub mod san;
pub mod session;
pub mod simple_board;
pub mod snapshot;
pub mod termination;

#[cfg(test)]
mod fuzz;

pub use crate::{
    color::Color,
    coord::Coord,
    difficulty::{Difficulty, OpponentConfig},
    error::GameError,
    movement::{Lan, LegalMove},
    opponent::{MoveSelector, RandomMover},
    position::Position,
    san::San,
    session::{Game, MoveRecord, SessionStatus, TurnReport},
    snapshot::{GameSnapshot, MoveSnapshot},
    termination::{DrawReason, GameResult, Termination},
};
