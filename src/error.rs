use thiserror::Error;

use crate::fen::ParseFenError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("malformed position: {0}")]
    MalformedInput(#[from] ParseFenError),
    #[error("illegal move: {input}")]
    IllegalMove { input: String },
    #[error("game already finished")]
    GameAlreadyFinished,
    #[error("corrupt snapshot at ply {ply}: {reason}")]
    CorruptSnapshot { ply: usize, reason: String },
}
