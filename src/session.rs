//! A single game between two players, or a player and the engine

use tracing::{debug, info, warn};

use crate::board::{Board, Move, Player, PlayerId};
use crate::config::{SearchConfig, SessionConfig};
use crate::error::GameError;
use crate::opening_cache::{cache_key, OpeningCache};
use crate::rules::{Outcome, Rules};
use crate::solver::{EngineMove, MoveSource, Solver};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SessionState {
    AwaitingMove(Player),
    Finished(Outcome),
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TurnStatus {
    Continue,
    Finished(Outcome),
}

/// The result of [`Session::make_turn`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Turn {
    pub status: TurnStatus,
    /// The engine's reply, if it moved during the turn
    pub engine_move: Option<EngineMove>,
}

/// Turn bookkeeping for one game
///
/// Against the engine, a call to [`Session::make_turn`] plays the human's
/// move and, unless that ended the game, the engine's reply before
/// returning.
pub struct Session<R> {
    rules: R,
    board: Board,
    player_one: PlayerId,
    player_two: Option<PlayerId>,
    state: SessionState,
    last_move: Option<Move>,
    last_engine_move: Option<EngineMove>,
    search: SearchConfig,
    cache: Option<OpeningCache>,
}

impl<R: Rules> Session<R> {
    /// Starts a game, letting the engine open if it moves first
    pub fn start(rules: R, config: SessionConfig, cache: Option<OpeningCache>) -> Self {
        let board = rules.new_board();
        let first = if config.player_one_starts {
            Player::One
        } else {
            Player::Two
        };
        let mut session = Self {
            rules,
            board,
            player_one: config.player_one,
            player_two: config.player_two,
            state: SessionState::AwaitingMove(first),
            last_move: None,
            last_engine_move: None,
            search: config.search,
            cache,
        };
        info!(
            player_one = session.player_one,
            player_two = ?session.player_two,
            variant = session.rules.variant_tag(),
            "session started"
        );

        if first == Player::Two && session.is_against_engine() {
            session.engine_turn();
        }
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_against_engine(&self) -> bool {
        self.player_two.is_none()
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished(_))
    }

    /// The identity expected to move next, `None` when the engine or nobody is
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.state {
            SessionState::AwaitingMove(Player::One) => Some(self.player_one),
            SessionState::AwaitingMove(Player::Two) => self.player_two,
            SessionState::Finished(_) => None,
        }
    }

    pub fn last_engine_move(&self) -> Option<EngineMove> {
        self.last_engine_move
    }

    /// Plays `mv` for `player`, followed by the engine's reply in a game
    /// against the engine
    pub fn make_turn(&mut self, player: PlayerId, mv: Move) -> Result<Turn, GameError> {
        let side = if player == self.player_one {
            Player::One
        } else if Some(player) == self.player_two {
            Player::Two
        } else {
            return Err(GameError::NotPartOfGame { player });
        };

        match self.state {
            SessionState::Finished(_) => return Err(GameError::GameOver),
            SessionState::AwaitingMove(to_move) if to_move != side => {
                return Err(GameError::NotPlayersTurn { player })
            }
            SessionState::AwaitingMove(_) => {}
        }

        self.board.place(side, mv)?;
        debug!(player, mv, "move played");
        if let TurnStatus::Finished(outcome) = self.advance(side, mv) {
            return Ok(Turn {
                status: TurnStatus::Finished(outcome),
                engine_move: None,
            });
        }

        let engine_move = if self.is_against_engine() {
            self.engine_turn()
        } else {
            None
        };
        let status = match self.state {
            SessionState::Finished(outcome) => TurnStatus::Finished(outcome),
            SessionState::AwaitingMove(_) => TurnStatus::Continue,
        };
        Ok(Turn {
            status,
            engine_move,
        })
    }

    // records a played move and moves the game on to the next state
    fn advance(&mut self, side: Player, mv: Move) -> TurnStatus {
        self.last_move = Some(mv);
        match self.rules.outcome(&self.board) {
            Some(outcome) => {
                info!(?outcome, "game over");
                self.state = SessionState::Finished(outcome);
                TurnStatus::Finished(outcome)
            }
            None => {
                self.state = SessionState::AwaitingMove(side.opponent());
                TurnStatus::Continue
            }
        }
    }

    // asks the cache, then the solver, for the engine's move and plays it
    fn engine_turn(&mut self) -> Option<EngineMove> {
        let key = cache_key(&self.rules, &self.board);

        let cached = self.cache.as_ref().and_then(|cache| cache.get(&key));
        let engine_move = match cached {
            Some(mv) if self.board.playable(mv) => EngineMove {
                mv,
                score: None,
                source: MoveSource::Cache,
            },
            cached => {
                if let Some(mv) = cached {
                    warn!(%key, mv, "cached move is not playable, searching instead");
                }
                let mut solver = Solver::new(&self.rules).with_config(self.search);
                let engine_move = solver.best_move(&mut self.board, self.last_move)?;

                if let (Some(cache), Some(score)) = (&self.cache, engine_move.score) {
                    if self.rules.is_forced_win(score) {
                        match cache.put(&key, engine_move.mv) {
                            Ok(true) => debug!(%key, mv = engine_move.mv, "forced win cached"),
                            Ok(false) => {}
                            Err(err) => warn!("failed to store cache entry: {:#}", err),
                        }
                    }
                }
                engine_move
            }
        };

        if let Err(err) = self.board.place(Player::Two, engine_move.mv) {
            warn!("engine chose an unplayable move: {}", err);
            return None;
        }
        debug!(
            mv = engine_move.mv,
            score = ?engine_move.score,
            source = ?engine_move.source,
            "engine moved"
        );
        self.advance(Player::Two, engine_move.mv);
        self.last_engine_move = Some(engine_move);
        Some(engine_move)
    }
}
