use clap::{Parser, Subcommand, ValueEnum};

use std::path::PathBuf;

use minimax_ai::config::SearchConfig;
use minimax_ai::connect_four::WinPolicy;

/// Play tic-tac-toe or connect four against a minimax engine
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Opening cache file, read at start and appended to with new entries
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    /// Log more (-v for info, -vv for debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        #[arg(long, value_enum, default_value_t = Game::ConnectFour)]
        game: Game,

        /// Let the engine make the first move
        #[arg(long)]
        engine_first: bool,

        /// Two humans take turns instead of playing the engine
        #[arg(long)]
        two_players: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Precompute engine moves for the opening and store them in the cache
    Generate {
        #[arg(long, value_enum, default_value_t = Game::ConnectFour)]
        game: Game,

        /// Number of plies from the start of the game to cover
        #[arg(long, default_value_t = 4)]
        plies: usize,

        /// Cover the games where the engine moves first
        #[arg(long)]
        engine_first: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(clap::Args, Debug)]
pub struct EngineArgs {
    /// How the engine values a win found deeper in the tree
    #[arg(long, value_enum, default_value_t = Policy::Rush)]
    pub policy: Policy,

    /// Search every branch instead of pruning
    #[arg(long)]
    pub no_pruning: bool,

    /// Search to a fixed depth instead of the game's depth policy
    #[arg(long)]
    pub depth: Option<usize>,

    /// Report how many positions each search evaluated
    #[arg(long)]
    pub count_evaluations: bool,
}

impl EngineArgs {
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            pruning: !self.no_pruning,
            count_evaluations: self.count_evaluations,
            depth: self.depth,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Game {
    TicTacToe,
    ConnectFour,
}

impl Game {
    pub fn title(self) -> &'static str {
        match self {
            Game::TicTacToe => "Tic-tac-toe",
            Game::ConnectFour => "Connect 4",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    /// Take the fastest win
    Rush,
    /// Take the slowest win
    Stall,
}

impl From<Policy> for WinPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Rush => WinPolicy::Rush,
            Policy::Stall => WinPolicy::Stall,
        }
    }
}
