//! An agent to search two-player games

use indicatif::HumanDuration;
use tracing::debug;

use std::time::Instant;

use crate::board::{Board, Move, Player};
use crate::config::SearchConfig;
use crate::rules::{Rules, Score, INFINITY};

/// Where an engine move came from
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MoveSource {
    /// Looked up in the opening cache
    Cache,
    /// Played without search to win or block on the spot
    Forced,
    /// Found by the game tree search
    Search,
}

/// A move chosen by the engine
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct EngineMove {
    pub mv: Move,
    /// The score backing the move, unknown for cached moves
    pub score: Option<Score>,
    pub source: MoveSource,
}

/// An agent choosing moves for [`Player::Two`] with a depth-limited minimax search
///
/// # Notes
/// The search never copies the board: each candidate move is placed on the
/// caller's board, searched, and removed again before the next candidate,
/// including when the remaining siblings are pruned.
///
/// # Move Choice
/// Candidates are tried in the order the [`Rules`] generate them, and the
/// first move reaching the best score is kept. Besides breaking ties, the
/// order decides how much of the tree alpha-beta pruning can skip.
pub struct Solver<'r, R> {
    rules: &'r R,
    config: SearchConfig,

    /// The number of positions evaluated by the last search (for diagnostics only)
    pub evaluations: usize,
}

impl<'r, R: Rules> Solver<'r, R> {
    /// Creates a new `Solver` with pruning on and no depth override
    pub fn new(rules: &'r R) -> Self {
        Self {
            rules,
            config: SearchConfig::default(),
            evaluations: 0,
        }
    }

    /// Replaces the search settings of an existing `Solver`
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Performs game tree search
    ///
    /// Returns the score of the position and the best move for the side to
    /// move, or no move when the position is a leaf.
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: usize,
        max_depth: usize,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
        last_move: Option<Move>,
    ) -> (Score, Option<Move>) {
        if depth >= max_depth
            || !self.rules.moves_left(board)
            || self.rules.winner(board).is_some()
        {
            return (self.evaluate(board, depth), None);
        }

        let player = if maximizing { Player::Two } else { Player::One };
        let mut best: Option<(Score, Move)> = None;

        for mv in self.rules.generate_moves(board, last_move) {
            let coordinates = match board.place(player, mv) {
                Ok(coordinates) => coordinates,
                Err(_) => continue,
            };
            let (score, _) =
                self.minimax(board, depth + 1, max_depth, !maximizing, alpha, beta, Some(mv));
            board.remove(coordinates);

            if maximizing {
                if best.map_or(true, |(best_score, _)| score > best_score) {
                    best = Some((score, mv));
                }
                alpha = alpha.max(score);
            } else {
                if best.map_or(true, |(best_score, _)| score < best_score) {
                    best = Some((score, mv));
                }
                beta = beta.min(score);
            }

            // the opponent already has a better option elsewhere, so
            // nothing below this node can reach the root
            if self.config.pruning && beta <= alpha {
                break;
            }
        }

        match best {
            Some((score, mv)) => (score, Some(mv)),
            None => (self.evaluate(board, depth), None),
        }
    }

    fn evaluate(&mut self, board: &Board, depth: usize) -> Score {
        if self.config.count_evaluations {
            self.evaluations += 1;
        }
        self.rules.evaluate(board, depth)
    }

    /// Searches `max_depth` plies below the current position with the
    /// engine to move
    ///
    /// Returns the score of the position and the calculated best move
    pub fn search(
        &mut self,
        board: &mut Board,
        max_depth: usize,
        last_move: Option<Move>,
    ) -> (Score, Option<Move>) {
        self.evaluations = 0;
        self.minimax(board, 0, max_depth, true, -INFINITY, INFINITY, last_move)
    }

    /// Picks the engine's move: a forced move if the rules name one,
    /// otherwise the result of a search as deep as the rules allow
    ///
    /// Returns `None` when the game is already over.
    pub fn best_move(&mut self, board: &mut Board, last_move: Option<Move>) -> Option<EngineMove> {
        self.evaluations = 0;
        if self.rules.outcome(board).is_some() {
            return None;
        }

        if let Some(mv) = self.rules.forced_move(board) {
            let coordinates = board.place(Player::Two, mv).ok()?;
            let score = self.rules.evaluate(board, 1);
            board.remove(coordinates);

            debug!(mv, score, "forced move");
            return Some(EngineMove {
                mv,
                score: Some(score),
                source: MoveSource::Forced,
            });
        }

        let max_depth = self
            .config
            .depth
            .unwrap_or_else(|| self.rules.max_depth(board))
            .max(1);
        let start = Instant::now();
        let (score, mv) = self.search(board, max_depth, last_move);

        debug!(
            ?mv,
            score,
            max_depth,
            evaluations = self.evaluations,
            elapsed = %HumanDuration(start.elapsed()),
            "search complete"
        );
        mv.map(|mv| EngineMove {
            mv,
            score: Some(score),
            source: MoveSource::Search,
        })
    }
}
