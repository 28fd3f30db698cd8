use chrono::prelude::*;
use itertools::Itertools;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::board::Board;
use crate::types::Move;

/// A game where both sides play uniformly random legal moves
pub struct Game {
    board: Board,
    moves: Vec<Move>,
    rng: StdRng,
    game_start_time: DateTime<Local>,
    silent: bool,
}

impl Game {
    pub fn new(seed: Option<u64>) -> Self {
        Game::from_board(Board::standard(), seed)
    }

    pub fn new_silent(seed: Option<u64>) -> Self {
        Self {
            silent: true,
            ..Game::new(seed)
        }
    }

    pub fn from_board(board: Board, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            board,
            moves: Vec::new(),
            rng,
            game_start_time: Local::now(),
            silent: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Plays one random legal move for the active player. Returns `None` when there is none.
    pub fn step(&mut self) -> Option<Move> {
        let legal_moves = self.board.all_legal_moves();
        let &(from, to) = legal_moves.choose(&mut self.rng)?;
        if !self.board.apply_move(from, to) {
            return None;
        }
        let played = *self.board.last_move()?;
        self.moves.push(played);
        Some(played)
    }

    /// Plays up to `max_moves` full moves, stopping early when a side has no legal move.
    /// Returns the number of plies played.
    pub fn play(&mut self, max_moves: usize) -> usize {
        let max_moves_in_ply = 2 * max_moves;

        for i in 1..=max_moves_in_ply {
            let Some(played) = self.step() else {
                if !self.silent {
                    println!(
                        "{} has no legal moves left",
                        self.board.active_player().to_human()
                    );
                }
                return i - 1;
            };
            if !self.silent {
                println!("move {}: {}", (i + 1) / 2, played.to_human());
                self.board.draw_to_terminal();
            }
        }
        max_moves_in_ply
    }

    pub fn transcript(&self) -> String {
        let header = format!(
            "Random game started {}",
            self.game_start_time.format("%Y.%m.%d %H:%M:%S")
        );
        let body = self
            .moves
            .iter()
            .enumerate()
            .map(|(i, m)| format!("{}. {}", i / 2 + 1, m.to_human()))
            .join("\n");
        format!("{header}\n{body}")
    }
}
