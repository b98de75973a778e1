use crate::board::{Addressing, Board, Move, Player};
use crate::rules::{MoveList, Rules, Score};
use crate::TIC_TAC_TOE_SIZE;

/// Tic-tac-toe, small enough to always be searched to the end
///
/// Moves are cell indices 0-8, row by row from the top left.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    lines: Vec<Vec<usize>>,
}

impl TicTacToe {
    pub fn new() -> Self {
        let board = Board::new(TIC_TAC_TOE_SIZE, TIC_TAC_TOE_SIZE, Addressing::Direct);
        Self {
            lines: board.lines(TIC_TAC_TOE_SIZE),
        }
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules for TicTacToe {
    fn new_board(&self) -> Board {
        Board::new(TIC_TAC_TOE_SIZE, TIC_TAC_TOE_SIZE, Addressing::Direct)
    }

    fn generate_moves(&self, board: &Board, _last_move: Option<Move>) -> MoveList {
        let mut moves = MoveList::new();
        for cell in 0..board.move_count() {
            moves.push(cell);
        }
        moves
    }

    fn winner(&self, board: &Board) -> Option<Player> {
        board.line_winner(&self.lines)
    }

    fn evaluate(&self, board: &Board, _depth: usize) -> Score {
        match self.winner(board) {
            Some(Player::One) => -1,
            Some(Player::Two) => 1,
            None => 0,
        }
    }

    fn max_depth(&self, _board: &Board) -> usize {
        TIC_TAC_TOE_SIZE * TIC_TAC_TOE_SIZE
    }

    fn variant_tag(&self) -> &'static str {
        "ttt"
    }

    fn is_forced_win(&self, score: Score) -> bool {
        score >= 1
    }
}
