//! Error types for game sessions and the opening cache

use thiserror::Error;

use crate::board::{Move, PlayerId};

/// Failures surfaced to whoever drives a game
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: &'static str },

    #[error("it is not player {player}'s turn")]
    NotPlayersTurn { player: PlayerId },

    #[error("player {player} is not part of this game")]
    NotPartOfGame { player: PlayerId },

    #[error("the game is already over")]
    GameOver,
}

/// Failures reading a persisted cache entry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("corrupt cache entry on line {line}: '{content}'")]
    CorruptEntry { line: usize, content: String },

    #[error("cache entry on line {line} has an invalid move '{value}'")]
    BadMove { line: usize, value: String },
}
