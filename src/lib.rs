//! A depth-limited minimax agent for the board game 'Connect 4'
//!
//! The agent searches a fixed number of plies ahead with alpha-beta pruning
//! and a per-search transposition table, scoring the leaves with a
//! threat-counting heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{BoardState, SearchEngine};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut engine = SearchEngine::new(BoardState::from_moves("112233")?);
//! let best_move = engine.compute_best_move(4);
//!
//! assert_eq!(best_move, Some(4));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod board;

pub mod line_detector;

pub mod evaluator;

pub mod transposition_table;

pub mod search;

pub mod config;

pub mod game;

pub mod self_play;


pub use board::{BoardState, Cell, MoveGuard, Player, StateKey};
pub use config::Config;
pub use game::{GameDriver, GameInterface, GameState};
pub use search::{SearchEngine, SearchOutcome, WIN_SCORE};
pub use self_play::{run_matches, MatchSummary};
pub use transposition_table::TranspositionTable;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// the evaluator and line detector are tuned for the standard board only
const_assert!(WIDTH == 7 && HEIGHT == 6);
