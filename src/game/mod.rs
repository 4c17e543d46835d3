//! Core Connect Four game logic: board representation, player marks, and the
//! session engine with move history, undo and score tally.

mod board;
mod engine;
mod player;

pub use board::{Board, Cell, DropError, COLS, CONNECT, ROWS};
pub use engine::{
    BoardEngine, GameOutcome, MoveRecord, MoveRejected, MoveResult, Scores, UndoRejected,
};
pub use player::Player;
