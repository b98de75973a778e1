//! The capabilities a game must provide to be searched

use crate::board::{Board, Move, Player};
use crate::MAX_MOVES;

/// An evaluation: positive favours [`Player::Two`], negative favours [`Player::One`]
pub type Score = i64;

/// A bound no evaluation reaches, used to open the alpha-beta window
pub const INFINITY: Score = i64::MAX;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Winner(Player),
    Draw,
}

/// The candidate moves of a position, in the order they should be searched
#[derive(Copy, Clone, Debug)]
pub struct MoveList {
    size: usize,
    next: usize,
    moves: [Move; MAX_MOVES],
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            size: 0,
            next: 0,
            moves: [0; MAX_MOVES],
        }
    }

    pub fn push(&mut self, mv: Move) {
        self.moves[self.size] = mv;
        self.size += 1;
    }

    pub fn len(&self) -> usize {
        self.size - self.next
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for MoveList {
    type Item = Move;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.size {
            return None;
        }
        self.next += 1;
        Some(self.moves[self.next - 1])
    }
}

/// A two-player, perfect information game on a rectangular grid
///
/// The search engine only ever talks to a game through this trait. Moves
/// may be generated without checking legality; the engine skips those that
/// the board rejects.
pub trait Rules {
    /// Creates the empty board of this game
    fn new_board(&self) -> Board;

    /// Candidate moves in search order, given the move that led to this position
    fn generate_moves(&self, board: &Board, last_move: Option<Move>) -> MoveList;

    fn winner(&self, board: &Board) -> Option<Player>;

    /// Scores a position reached `depth` plies below the search root
    fn evaluate(&self, board: &Board, depth: usize) -> Score;

    /// The maximum search depth for a position
    fn max_depth(&self, board: &Board) -> usize;

    /// Distinguishes positions whose best move depends on the scoring policy
    fn variant_tag(&self) -> &'static str;

    /// Whether a searched score proves a win for the engine
    fn is_forced_win(&self, score: Score) -> bool;

    /// How many plies below the search root a proven result was found, if
    /// the score proves one
    fn plies_to_result(&self, _score: Score) -> Option<usize> {
        None
    }

    fn moves_left(&self, board: &Board) -> bool {
        board.has_open_cell()
    }

    /// A move the engine must play without searching, if any
    fn forced_move(&self, _board: &mut Board) -> Option<Move> {
        None
    }

    fn outcome(&self, board: &Board) -> Option<Outcome> {
        match self.winner(board) {
            Some(player) => Some(Outcome::Winner(player)),
            None if !self.moves_left(board) => Some(Outcome::Draw),
            None => None,
        }
    }
}
