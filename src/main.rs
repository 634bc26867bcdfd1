#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

use std::io::{self, Write, stdin, stdout};

use chesstutor::{
    Color, Coord, Difficulty, Game, GameError, RandomMover, board_display::BoardDisplay, fen,
};
use log::info;

use crate::misc::{extract_prefix_token, strip_prefix_token};

mod misc;

fn print_help() {
    println!("flip           - flip the board");
    println!("import <fen>   - start a new game from a position");
    println!("reset          - start a new game from the starting position");
    println!("fen            - export the position as fen");
    println!("moves          - list legal moves and the game so far");
    println!("level <1-6>    - set the opponent's strength");
    println!("exit           - exit the game");
    println!("e2             - view legal moves of a piece");
    println!("e2e4           - play the move");
    println!("e7e8q          - move and promote");
    println!("e1g1           - perform castling");
}
fn status_lines(game: &Game, difficulty: Difficulty) -> String {
    let mut lines = Vec::new();
    match game.result() {
        Some(result) => {
            lines.push(game.termination().to_string());
            lines.push(result.to_string());
        }
        None => lines.push(format!("{} plays", game.turn())),
    }
    lines.push(format!("opponent: {difficulty}"));
    if let Some(record) = game.history().last() {
        lines.push(format!("last move: {}", record.notation));
    }
    lines.join("\n")
}
#[allow(
    clippy::too_many_lines,
    reason = "the state and procedure are very clearly defined; no need to decompose these into separate functions"
)]
fn main() -> io::Result<()> {
    env_logger::init();

    let mut game = Game::new();
    let mut opponent = RandomMover::new();
    let mut difficulty = Difficulty::default();
    let mut view = Color::White;
    let mut highlighted: Vec<Coord> = Vec::new();
    let mut update = true;
    let mut first_time = true;
    loop {
        if update {
            let mut panel = status_lines(&game, difficulty);
            if first_time {
                panel.push_str("\ntype `help` for instructions");
                first_time = false;
            }
            let last_move = game
                .history()
                .last()
                .map(|record| (record.input.origin, record.input.destination));
            print!(
                "{}",
                BoardDisplay {
                    position: game.position(),
                    view,
                    highlighted: &highlighted,
                    last_move,
                    info: &panel,
                },
            );
            update = false;
        }
        print!("> ");
        stdout().flush()?;
        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            return Ok(());
        }
        let input = input.trim();
        match extract_prefix_token(input) {
            "" => (),
            "help" => print_help(),
            "exit" => return Ok(()),
            "flip" => {
                view = !view;
                update = true;
            }
            "fen" => println!("{}", fen::encode(game.position())),
            "reset" => {
                game = Game::new();
                highlighted.clear();
                update = true;
            }
            "moves" => {
                println!("{}", game.legal_lans().join(" "));
                let notations: Vec<_> = game.notations().map(ToString::to_string).collect();
                if !notations.is_empty() {
                    println!("{}", notations.join(" "));
                }
            }
            "import" => {
                let text = strip_prefix_token(input, "import").unwrap_or_default();
                match Game::from_fen(text) {
                    Ok(imported) => {
                        info!("imported {text}");
                        game = imported;
                        highlighted.clear();
                        update = true;
                    }
                    Err(err) => eprintln!("Error: {err}"),
                }
            }
            "level" => {
                let text = strip_prefix_token(input, "level").unwrap_or_default();
                match text.parse::<Difficulty>() {
                    Ok(level) => {
                        difficulty = level;
                        update = true;
                    }
                    Err(err) => eprintln!("Error: {err}"),
                }
            }
            _ => {
                if let Ok(square) = input.parse::<Coord>() {
                    highlighted.clear();
                    highlighted.extend(
                        game.position()
                            .legal_moves()
                            .into_iter()
                            .filter(|movement| !game.is_finished() && movement.origin() == square)
                            .map(|movement| movement.destination()),
                    );
                    update = true;
                    continue;
                }
                match game.play_turn(input, &mut opponent, difficulty) {
                    Ok(report) => {
                        highlighted.clear();
                        if let Some(reply) = report.reply {
                            println!("{} {}", report.human.notation, reply.notation);
                        }
                        update = true;
                    }
                    Err(GameError::GameAlreadyFinished) => {
                        eprintln!("Error: the game is over, type `reset` or `import`");
                    }
                    Err(err) => eprintln!("Error: {err}"),
                }
            }
        }
    }
}
