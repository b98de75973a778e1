use crate::board::PlayerId;

/// Tunables for a single engine decision
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Skip subtrees that cannot change the result
    pub pruning: bool,
    /// Count evaluated leaves (for diagnostics only)
    pub count_evaluations: bool,
    /// Fixed maximum depth, replacing the rules' depth policy
    pub depth: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pruning: true,
            count_evaluations: false,
            depth: None,
        }
    }
}

/// Who plays a session and who moves first
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub player_one: PlayerId,
    /// `None` lets the engine play the second side
    pub player_two: Option<PlayerId>,
    pub player_one_starts: bool,
    pub search: SearchConfig,
}

impl SessionConfig {
    /// A game of `player` against the engine
    pub fn against_engine(player: PlayerId) -> Self {
        Self {
            player_one: player,
            player_two: None,
            player_one_starts: true,
            search: SearchConfig::default(),
        }
    }

    /// A game between two humans
    pub fn between(player_one: PlayerId, player_two: PlayerId) -> Self {
        Self {
            player_one,
            player_two: Some(player_two),
            player_one_starts: true,
            search: SearchConfig::default(),
        }
    }

    pub fn engine_first(mut self) -> Self {
        self.player_one_starts = false;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}
