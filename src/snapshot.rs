use serde::{Deserialize, Serialize};

use crate::{
    error::GameError,
    fen,
    movement::Lan,
    session::{Game, MoveRecord, SessionStatus},
    termination::GameResult,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSnapshot {
    pub move_number: usize,
    pub move_input: String,
    pub move_notation: String,
    pub position_after: String,
}
impl From<&MoveRecord> for MoveSnapshot {
    fn from(record: &MoveRecord) -> Self {
        MoveSnapshot {
            move_number: record.move_number,
            move_input: record.input.to_string(),
            move_notation: record.notation.to_string(),
            position_after: fen::encode(&record.position_after),
        }
    }
}
/// Everything needed to store a game and bring it back, with positions in
/// their canonical text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub initial_position: String,
    pub current_position: String,
    pub status: SessionStatus,
    pub result: Option<GameResult>,
    pub moves: Vec<MoveSnapshot>,
}
fn corrupt(ply: usize, reason: impl Into<String>) -> GameError {
    GameError::CorruptSnapshot {
        ply,
        reason: reason.into(),
    }
}
impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            initial_position: fen::encode(self.initial_position()),
            current_position: fen::encode(self.position()),
            status: self.status(),
            result: self.result(),
            moves: self.history().iter().map(MoveSnapshot::from).collect(),
        }
    }
    /// Rebuilds a game by replaying the recorded inputs through the legality
    /// checker. Every recorded notation and position must match the replay.
    pub fn restore(snapshot: &GameSnapshot) -> Result<Game, GameError> {
        let mut game = Game::from_fen(&snapshot.initial_position)?;

        for (i, recorded) in snapshot.moves.iter().enumerate() {
            let ply = i + 1;
            if recorded.move_number != ply {
                return Err(corrupt(
                    ply,
                    format!("move recorded as number {}", recorded.move_number),
                ));
            }
            let lan: Lan = recorded
                .move_input
                .parse()
                .map_err(|err| corrupt(ply, format!("{:?}: {err}", recorded.move_input)))?;
            let record = game
                .submit_move(lan)
                .map_err(|err| corrupt(ply, err.to_string()))?;

            if record.notation != recorded.move_notation.as_str() {
                return Err(corrupt(
                    ply,
                    format!(
                        "notation {:?} replays as {}",
                        recorded.move_notation, record.notation
                    ),
                ));
            }
            if fen::encode(&record.position_after) != recorded.position_after {
                return Err(corrupt(ply, "position does not match replay"));
            }
        }
        let ply = snapshot.moves.len();
        if fen::encode(game.position()) != snapshot.current_position {
            return Err(corrupt(ply, "current position does not match replay"));
        }
        if game.status() != snapshot.status || game.result() != snapshot.result {
            return Err(corrupt(ply, "status does not match replay"));
        }
        Ok(game)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        error::GameError,
        session::{Game, SessionStatus},
        snapshot::GameSnapshot,
        termination::GameResult,
    };

    fn fools_mate() -> Game {
        let mut game = Game::new();
        for movement in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.submit_text(movement).unwrap();
        }
        game
    }
    #[test]
    fn wire_shape() {
        let snapshot = fools_mate().snapshot();
        assert_eq!(snapshot.status, SessionStatus::Finished);
        assert_eq!(snapshot.result, Some(GameResult::BlackWin));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["status"], "finished");
        assert_eq!(json["result"], "black_win");
        assert_eq!(json["moves"][3]["move_number"], 4);
        assert_eq!(json["moves"][3]["move_input"], "d8h4");
        assert_eq!(json["moves"][3]["move_notation"], "Qh4#");
        assert_eq!(
            json["initial_position"],
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert_eq!(json["current_position"], json["moves"][3]["position_after"]);

        let json = serde_json::to_value(Game::new().snapshot()).unwrap();
        assert_eq!(json["status"], "active");
        assert!(json["result"].is_null());
    }
    #[test]
    fn restore() {
        let game = fools_mate();
        let json = serde_json::to_string(&game.snapshot()).unwrap();
        let snapshot: GameSnapshot = serde_json::from_str(&json).unwrap();
        let restored = Game::restore(&snapshot).unwrap();
        assert_eq!(restored, game);
        assert_eq!(
            restored.clone().submit_text("e2e4"),
            Err(GameError::GameAlreadyFinished)
        );
    }
    #[test]
    fn tampered_notation() {
        let mut snapshot = fools_mate().snapshot();
        snapshot.moves[1].move_notation = "e6".to_string();
        assert!(matches!(
            Game::restore(&snapshot),
            Err(GameError::CorruptSnapshot { ply: 2, .. })
        ));
    }
    #[test]
    fn illegal_input() {
        let mut snapshot = fools_mate().snapshot();
        snapshot.moves[0].move_input = "f2f5".to_string();
        assert!(matches!(
            Game::restore(&snapshot),
            Err(GameError::CorruptSnapshot { ply: 1, .. })
        ));
    }
    #[test]
    fn tampered_status() {
        let mut snapshot = fools_mate().snapshot();
        snapshot.status = SessionStatus::Active;
        snapshot.result = None;
        assert!(matches!(
            Game::restore(&snapshot),
            Err(GameError::CorruptSnapshot { ply: 4, .. })
        ));
    }
    #[test]
    fn malformed_initial_position() {
        let mut snapshot = Game::new().snapshot();
        snapshot.initial_position = "rnbqkbnr w KQkq - 0 1".to_string();
        assert!(matches!(
            Game::restore(&snapshot),
            Err(GameError::MalformedInput(_))
        ));
    }
}
