use log::{debug, trace, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    color::Color,
    difficulty::Difficulty,
    error::GameError,
    fen,
    movement::Lan,
    opponent::MoveSelector,
    position::Position,
    san::San,
    termination::{self, GameResult, RepetitionKey, Termination},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Finished,
}
/// One applied ply of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    /// 1-based ply index.
    pub move_number: usize,
    pub input: Lan,
    pub notation: San,
    pub position_after: Position,
}
/// Moves applied by [`Game::play_turn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub human: MoveRecord,
    pub reply: Option<MoveRecord>,
}
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct History(FxHashMap<RepetitionKey, u8>);

impl History {
    fn record(&mut self, key: RepetitionKey) -> u8 {
        let count = self.0.entry(key).or_default();
        *count = count.saturating_add(1);
        *count
    }
}
/// A single game between a human and an opponent.
///
/// A game starts active and becomes finished exactly once, when the position
/// produced by the latest move is classified as over. Nothing mutates a
/// finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    initial_position: Position,
    position: Position,
    moves: Vec<MoveRecord>,
    history: History,
    termination: Termination,
}
impl Game {
    pub fn new() -> Self {
        Game::from_position(Position::starting_position())
    }
    pub fn from_position(position: Position) -> Self {
        let mut history = History::default();
        history.record(position.repetition_key());
        Game {
            initial_position: position.clone(),
            position,
            moves: Vec::new(),
            history,
            termination: Termination::Ongoing,
        }
    }
    pub fn from_fen(text: &str) -> Result<Self, GameError> {
        Ok(Game::from_position(fen::decode(text)?))
    }
    /// Rebuilds a game from its starting position and the notations of its
    /// moves.
    pub fn from_notations<'a>(
        position: Position,
        notations: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, GameError> {
        let mut game = Game::from_position(position);
        for notation in notations {
            let movement = game
                .position
                .parse_san(notation)
                .ok_or_else(|| GameError::IllegalMove {
                    input: notation.to_string(),
                })?;
            game.submit_move(movement.lan())?;
        }
        Ok(game)
    }
    pub fn status(&self) -> SessionStatus {
        if self.termination.is_over() {
            SessionStatus::Finished
        } else {
            SessionStatus::Active
        }
    }
    pub fn is_finished(&self) -> bool {
        self.status() == SessionStatus::Finished
    }
    pub fn result(&self) -> Option<GameResult> {
        self.termination.result(&self.position)
    }
    pub fn termination(&self) -> Termination {
        self.termination
    }
    pub fn initial_position(&self) -> &Position {
        &self.initial_position
    }
    pub fn position(&self) -> &Position {
        &self.position
    }
    pub fn turn(&self) -> Color {
        self.position.current_player()
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.moves
    }
    pub fn notations(&self) -> impl Iterator<Item = &San> {
        self.moves.iter().map(|record| &record.notation)
    }
    /// Legal moves in origin-destination-promotion form, empty once finished.
    pub fn legal_lans(&self) -> Vec<String> {
        if self.is_finished() {
            Vec::new()
        } else {
            self.position.legal_lans()
        }
    }
    pub fn submit_move(&mut self, lan: Lan) -> Result<&MoveRecord, GameError> {
        if self.is_finished() {
            return Err(GameError::GameAlreadyFinished);
        }
        let movement = self
            .position
            .legal_move(lan)
            .ok_or_else(|| GameError::IllegalMove {
                input: lan.to_string(),
            })?;
        let (position, notation) = self.position.play(movement);
        let occurrences = self.history.record(position.repetition_key());
        let termination = termination::classify(&position, occurrences);
        let move_number = self.moves.len() + 1;
        trace!("ply {move_number}: {lan} ({notation})");

        if termination.is_over() {
            debug!(
                "game finished after {notation}: {termination}, {}",
                termination
                    .result(&position)
                    .map_or_else(String::new, |result| result.to_string())
            );
        }
        self.termination = termination;
        self.position = position.clone();
        self.moves.push(MoveRecord {
            move_number,
            input: lan,
            notation,
            position_after: position,
        });
        Ok(&self.moves[move_number - 1])
    }
    /// Like [`Game::submit_move`] but for move text such as `e2e4` or
    /// `e7e8q`. Text that is not a move is an illegal move.
    pub fn submit_text(&mut self, text: &str) -> Result<&MoveRecord, GameError> {
        if self.is_finished() {
            return Err(GameError::GameAlreadyFinished);
        }
        let lan = text.trim().parse::<Lan>().map_err(|err| {
            trace!("unparseable move {text:?}: {err}");
            GameError::IllegalMove {
                input: text.to_string(),
            }
        })?;
        self.submit_move(lan)
    }
    /// Applies the human move, then, if the game goes on, asks `selector`
    /// for a reply and applies it. An illegal reply is discarded.
    pub fn play_turn(
        &mut self,
        human_input: &str,
        selector: &mut impl MoveSelector,
        difficulty: Difficulty,
    ) -> Result<TurnReport, GameError> {
        let human = self.submit_text(human_input)?.clone();
        if self.is_finished() {
            return Ok(TurnReport { human, reply: None });
        }
        let reply = match selector.select_move(&self.position.to_string(), difficulty) {
            Some(lan) => match self.submit_move(lan) {
                Ok(record) => Some(record.clone()),
                Err(err) => {
                    warn!("discarding opponent move {lan}: {err}");
                    None
                }
            },
            None => {
                debug!("opponent has no move for {}", self.position);
                None
            }
        };
        Ok(TurnReport { human, reply })
    }
    /// Plays the recorded inputs again from the initial position.
    pub fn replay(&self) -> Result<Game, GameError> {
        let mut game = Game::from_position(self.initial_position.clone());
        for record in &self.moves {
            game.submit_move(record.input)?;
        }
        Ok(game)
    }
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
