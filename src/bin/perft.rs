//! Count the positions reachable from the starting position
//!
//! Usage: cargo run --release --bin perft -- --depth 4 --divide

use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::eyre;
use chessington::board::Board;
use chessington::perft::{divide, expected_start_node_count};

#[derive(Parser, Debug)]
#[command(name = "perft")]
#[command(about = "Count leaf positions of the legal move tree")]
struct Args {
    /// Depth in plies
    #[arg(short, long, default_value_t = 3)]
    depth: u8,

    /// Print the node count below every root move
    #[arg(long)]
    divide: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    if args.depth == 0 {
        return Err(eyre!("depth must be at least 1"));
    }

    let board = Board::standard();
    let start = Instant::now();
    let split = divide(&board, args.depth);
    let elapsed = start.elapsed();

    if args.divide {
        for ((from, to), nodes) in &split {
            println!("{} -> {}: {}", from, to, nodes);
        }
    }
    let nodes: u64 = split.iter().map(|(_, n)| n).sum();
    println!("Depth {}: {} nodes in {:?}", args.depth, nodes, elapsed);

    if let Some(expected) = expected_start_node_count(args.depth) {
        if expected != nodes {
            return Err(eyre!("expected {} nodes at depth {}", expected, args.depth));
        }
    }
    Ok(())
}
