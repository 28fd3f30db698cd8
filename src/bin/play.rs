//! Play a game of random legal moves from the starting position
//!
//! Usage: cargo run --release --bin play -- --moves 20 --seed 7

use clap::Parser;
use chessington::game::Game;

#[derive(Parser, Debug)]
#[command(name = "play")]
#[command(about = "Let both sides play random legal moves")]
struct Args {
    /// Number of full moves to play
    #[arg(short, long, default_value_t = 20)]
    moves: usize,

    /// Seed for a reproducible game
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only print the transcript at the end
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let mut game = if args.quiet {
        Game::new_silent(args.seed)
    } else {
        Game::new(args.seed)
    };
    if !args.quiet {
        game.board().draw_to_terminal();
    }

    let plies = game.play(args.moves);

    println!("{}", game.transcript());
    println!("{} plies played", plies);
    Ok(())
}
