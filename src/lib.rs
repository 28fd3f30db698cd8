pub mod types;
pub mod errors;
pub mod board;
pub mod movegen;
pub mod perft;
pub mod game;
