//! A minimax agent for playing the board games 'Tic-tac-toe' and 'Connect 4'
//!
//! The agent searches the game tree with alpha-beta pruning over a pluggable
//! set of game [rules], and can short-circuit the search with an
//! [opening cache] of previously solved positions.
//!
//! # Basic Usage
//!
//! ```
//! use minimax_ai::{connect_four::ConnectFour, rules::Rules, solver::Solver};
//!
//! let rules = ConnectFour::default();
//! let mut board = rules.new_board();
//! let mut solver = Solver::new(&rules);
//!
//! let engine_move = solver.best_move(&mut board, None).expect("empty board has moves");
//! assert!(engine_move.mv < minimax_ai::WIDTH);
//! ```
//!
//! [rules]: rules::Rules
//! [opening cache]: opening_cache::OpeningCache

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod rules;

pub mod tic_tac_toe;

pub mod connect_four;

pub mod solver;

pub mod opening_cache;

pub mod config;

pub mod session;


/// The width of the connect four board in tiles
pub const WIDTH: usize = 7;

/// The height of the connect four board in tiles
pub const HEIGHT: usize = 6;

/// The side length of the tic-tac-toe board
pub const TIC_TAC_TOE_SIZE: usize = 3;

/// The most moves any supported game offers in a single position
pub const MAX_MOVES: usize = 9;

// a 4-window must fit in every direction
const_assert!(WIDTH >= 4 && HEIGHT >= 4);
// terminal scores count down from a 100 ply horizon
const_assert!(WIDTH * HEIGHT < 100);
// every column and every tic-tac-toe cell must fit in a move list
const_assert!(WIDTH <= MAX_MOVES);
const_assert!(TIC_TAC_TOE_SIZE * TIC_TAC_TOE_SIZE <= MAX_MOVES);

pub use board::{Board, Cell, Coordinates, Move, Player};
pub use error::{CacheError, GameError};
pub use opening_cache::OpeningCache;
pub use rules::{Outcome, Rules, Score};
pub use session::Session;
pub use solver::Solver;
