//! Two-player hot-seat chess at the terminal: render the board, read a
//! move, hand it to the engine, repeat. Type `save` to store the game and
//! leave; `--resume` picks it back up.

use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::str::FromStr;

use clap::{arg, command};

use hearthchess::board::PrettyStyle;
use hearthchess::{Color, Game, GameStatus, Move, PromoteKind};

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let matches = command!()
        .about("Two-player hot-seat chess for the terminal")
        .arg(
            arg!(-f --file <PATH> "Save file used by the 'save' command and --resume")
                .default_value("hearthchess.sav"),
        )
        .arg(arg!(--resume "Resume the game stored in the save file"))
        .arg(arg!(--ascii "Render the board with ASCII letters instead of chess glyphs"))
        .get_matches();

    let save_path = matches.get_one::<String>("file").expect("has a default");
    let style = if matches.get_flag("ascii") {
        PrettyStyle::Ascii
    } else {
        PrettyStyle::Unicode
    };

    let mut game = if matches.get_flag("resume") {
        match load_game(save_path) {
            Ok(game) => game,
            Err(err) => {
                eprintln!("Cannot resume from {}: {}", save_path, err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        Game::new()
    };

    let mut stdin = io::stdin().lock();

    loop {
        println!();
        println!("{}", game.board().pretty(style));

        match game.status() {
            GameStatus::Checkmate { winner } => {
                println!("Checkmate! {} wins.", color_name(winner));
                break;
            }
            GameStatus::Check => println!("{} is in check.", color_name(game.side_to_move())),
            GameStatus::InProgress => {}
        }

        print!(
            "{} move ('e2 e4', or 'save'): ",
            color_name(game.side_to_move())
        );
        io::stdout().flush().expect("cannot flush stdout");

        let mut line = String::new();
        if stdin.read_line(&mut line).expect("cannot read stdin") == 0 {
            println!();
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("save") {
            if let Err(err) = fs::write(save_path, game.snapshot() + "\n") {
                eprintln!("Cannot save to {}: {}", save_path, err);
                return ExitCode::FAILURE;
            }
            println!("Game saved to {}.", save_path);
            break;
        }

        let mv = match Move::from_str(line) {
            Ok(mv) => mv,
            Err(err) => {
                println!("Bad move: {}. Enter a move like 'e2 e4'.", err);
                continue;
            }
        };

        // Ask for the promotion piece only once the move is known to be
        // playable; an illegal entry shouldn't trigger the extra prompt.
        let promote = if game.board().is_promotion(mv)
            && game.board().is_legal_move(mv.src(), mv.dst())
        {
            prompt_promotion(&mut stdin)
        } else {
            None
        };

        if let Err(err) = game.make_move(mv, promote) {
            println!("Illegal move: {}. Please try again.", err);
        }
    }

    ExitCode::SUCCESS
}

fn load_game(path: &str) -> Result<Game, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    Ok(Game::from_snapshot(text.trim())?)
}

fn prompt_promotion(stdin: &mut impl BufRead) -> Option<PromoteKind> {
    print!("Promote to [q/r/b/n] (default q): ");
    io::stdout().flush().expect("cannot flush stdout");
    let mut line = String::new();
    if stdin.read_line(&mut line).expect("cannot read stdin") == 0 {
        return None;
    }
    let line = line.trim();
    let choice = line.chars().next().and_then(PromoteKind::from_char);
    if choice.is_none() && !line.is_empty() {
        println!("Unrecognized choice, promoting to a queen.");
    }
    choice
}

fn color_name(c: Color) -> &'static str {
    match c {
        Color::White => "White",
        Color::Black => "Black",
    }
}
