use log::{debug, trace};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::{
    difficulty::Difficulty,
    fen,
    movement::{Lan, LegalMove},
    termination::Termination,
};

/// Chooses moves for the opposing side.
///
/// Implementations receive the position in its canonical text form and
/// return a move or `None` when there is nothing to play. The returned move
/// is still checked for legality by the caller.
pub trait MoveSelector {
    fn select_move(&mut self, position: &str, difficulty: Difficulty) -> Option<Lan>;
}
/// A weak built-in opponent. It always takes a mate in one, and otherwise
/// prefers captures and checks more often the higher the difficulty.
#[derive(Debug, Clone)]
pub struct RandomMover {
    rng: SmallRng,
}
impl RandomMover {
    pub fn new() -> Self {
        RandomMover {
            rng: SmallRng::from_os_rng(),
        }
    }
    pub fn seeded(seed: u64) -> Self {
        RandomMover {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
    fn pick(&mut self, moves: &[LegalMove]) -> Option<Lan> {
        if moves.is_empty() {
            None
        } else {
            Some(moves[self.rng.random_range(0..moves.len())].lan())
        }
    }
}
impl Default for RandomMover {
    fn default() -> Self {
        RandomMover::new()
    }
}
impl MoveSelector for RandomMover {
    fn select_move(&mut self, position: &str, difficulty: Difficulty) -> Option<Lan> {
        let position = match fen::decode(position) {
            Ok(position) => position,
            Err(err) => {
                debug!("cannot select a move for {position:?}: {err}");
                return None;
            }
        };
        if position.classify().is_over() {
            return None;
        }
        let moves = position.legal_moves();
        let mut mates = Vec::new();
        let mut forcing = Vec::new();

        for movement in &moves {
            let after = position.after(&movement.candidate);
            if after.is_check() {
                if after.classify() == Termination::Checkmate {
                    mates.push(*movement);
                }
                forcing.push(*movement);
            } else if movement.is_capture() {
                forcing.push(*movement);
            }
        }
        if let Some(lan) = self.pick(&mates) {
            trace!("found mate {lan}");
            return Some(lan);
        }
        let skill = f64::from(difficulty.skill_level()) / 20.0;
        if !forcing.is_empty() && self.rng.random_bool(skill) {
            return self.pick(&forcing);
        }
        self.pick(&moves)
    }
}
