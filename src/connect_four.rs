//! Connect four rules and the heuristics steering the search

use crate::board::{Addressing, Board, Move, Player};
use crate::rules::{MoveList, Rules, Score};
use crate::{HEIGHT, WIDTH};

/// The score of a single won position before depth scaling
pub const WIN_UNIT: Score = 100_000_000;

/// Terminal scores count down from this many plies
const HORIZON: Score = 100;

/// Bonus or penalty for a window one move away from completion
pub const THREAT_SCORE: Score = 100;

/// Search depth standing in for "play the game out"
pub const SOLVE_DEPTH: usize = 1000;

/// How a won position is scored against the depth it was found at
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum WinPolicy {
    /// Prefer the fastest win
    Rush,
    /// Prefer the slowest win, keeping the opponent on the board
    Stall,
}

impl Default for WinPolicy {
    fn default() -> Self {
        WinPolicy::Rush
    }
}

/// Returns the maximum search depth given how many columns can still be played
///
/// Fewer open columns shrink the branching factor, so the search can afford
/// to go deeper until it simply solves the rest of the game.
pub const fn depth_for_open_columns(open_columns: usize) -> usize {
    match open_columns {
        0 | 1 => SOLVE_DEPTH,
        2 => 19,
        3 => 12,
        4 => 9,
        5 | 6 => 8,
        _ => 7,
    }
}

/// Connect four on a [`WIDTH`] x [`HEIGHT`] board, moves being columns
#[derive(Clone, Debug)]
pub struct ConnectFour {
    policy: WinPolicy,
    windows: Vec<Vec<usize>>,
}

impl ConnectFour {
    pub fn new(policy: WinPolicy) -> Self {
        let board = Board::new(HEIGHT, WIDTH, Addressing::Gravity);
        Self {
            policy,
            windows: board.lines(4),
        }
    }

    /// Scores the 4-windows one piece away from completion: +100 for the
    /// engine's, -100 for the opponent's
    pub fn threat_score(&self, board: &Board) -> Score {
        self.windows
            .iter()
            .map(|window| {
                let mut engine = 0;
                let mut opponent = 0;
                let mut empty = 0;
                for &i in window.iter() {
                    match board.cell(i).player() {
                        Some(Player::Two) => engine += 1,
                        Some(Player::One) => opponent += 1,
                        None => empty += 1,
                    }
                }
                match (engine, opponent, empty) {
                    (3, 0, 1) => THREAT_SCORE,
                    (0, 3, 1) => -THREAT_SCORE,
                    _ => 0,
                }
            })
            .sum()
    }

    /// One point per engine piece in the three middle columns
    pub fn centre_score(&self, board: &Board) -> Score {
        let centre = WIDTH / 2;
        (centre - 1..=centre + 1)
            .map(|col| {
                (0..HEIGHT)
                    .filter(|&row| board.get(row, col).player() == Some(Player::Two))
                    .count() as Score
            })
            .sum()
    }

    // finds a column where `player` completes a line right away
    fn winning_column(&self, board: &mut Board, player: Player) -> Option<Move> {
        for column in 0..WIDTH {
            if let Ok(coordinates) = board.place(player, column) {
                let wins = self.winner(board) == Some(player);
                board.remove(coordinates);
                if wins {
                    return Some(column);
                }
            }
        }
        None
    }
}

impl Default for ConnectFour {
    fn default() -> Self {
        Self::new(WinPolicy::default())
    }
}

impl Rules for ConnectFour {
    fn new_board(&self) -> Board {
        Board::new(HEIGHT, WIDTH, Addressing::Gravity)
    }

    /// Starts at the last played column and fans out one column to the
    /// right, then one to the left, until every column is listed
    fn generate_moves(&self, _board: &Board, last_move: Option<Move>) -> MoveList {
        let anchor = last_move.filter(|&mv| mv < WIDTH).unwrap_or(WIDTH / 2);
        let mut moves = MoveList::new();
        moves.push(anchor);

        let (mut lower, mut higher) = (anchor, anchor);
        while higher < WIDTH - 1 || lower > 0 {
            if higher < WIDTH - 1 {
                higher += 1;
                moves.push(higher);
            }
            if lower > 0 {
                lower -= 1;
                moves.push(lower);
            }
        }
        moves
    }

    fn winner(&self, board: &Board) -> Option<Player> {
        board.line_winner(&self.windows)
    }

    fn evaluate(&self, board: &Board, depth: usize) -> Score {
        let depth = depth as Score;
        match self.winner(board) {
            // losing later leaves the opponent more room to go wrong
            Some(Player::One) => return -(HORIZON - depth) * WIN_UNIT,
            Some(Player::Two) => {
                return match self.policy {
                    WinPolicy::Rush => (HORIZON - depth) * WIN_UNIT,
                    WinPolicy::Stall => depth * WIN_UNIT,
                }
            }
            None => {}
        }
        if !board.has_open_cell() {
            return 0;
        }
        self.centre_score(board) + self.threat_score(board)
    }

    fn max_depth(&self, board: &Board) -> usize {
        depth_for_open_columns(board.open_columns())
    }

    fn variant_tag(&self) -> &'static str {
        match self.policy {
            WinPolicy::Rush => "c4-rush",
            WinPolicy::Stall => "c4-stall",
        }
    }

    fn is_forced_win(&self, score: Score) -> bool {
        score >= WIN_UNIT
    }

    fn plies_to_result(&self, score: Score) -> Option<usize> {
        let units = score.abs() / WIN_UNIT;
        if units == 0 {
            return None;
        }
        let plies = if score > 0 && self.policy == WinPolicy::Stall {
            units
        } else {
            HORIZON - units
        };
        Some(plies as usize)
    }

    /// Takes an immediate win if there is one, otherwise blocks the
    /// opponent's immediate win
    fn forced_move(&self, board: &mut Board) -> Option<Move> {
        self.winning_column(board, Player::Two)
            .or_else(|| self.winning_column(board, Player::One))
    }
}
