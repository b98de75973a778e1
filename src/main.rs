use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::cmp::Ordering;
use std::io::{stdin, stdout, Write};

use minimax_ai::config::{SearchConfig, SessionConfig};
use minimax_ai::connect_four::ConnectFour;
use minimax_ai::session::{Session, TurnStatus};
use minimax_ai::solver::MoveSource;
use minimax_ai::tic_tac_toe::TicTacToe;
use minimax_ai::*;

mod cli;
use cli::*;

mod display;

const PLAYER_ONE: board::PlayerId = 1;
const PLAYER_TWO: board::PlayerId = 2;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cache = match &cli.cache {
        Some(path) => Some(OpeningCache::open(path.clone())?),
        None => None,
    };

    match cli.command {
        Command::Play {
            game,
            engine_first,
            two_players,
            engine,
        } => {
            let mut config = if two_players {
                SessionConfig::between(PLAYER_ONE, PLAYER_TWO)
            } else {
                SessionConfig::against_engine(PLAYER_ONE)
            }
            .with_search(engine.search_config());
            if engine_first {
                config = config.engine_first();
            }
            match game {
                Game::TicTacToe => play(game, TicTacToe::new(), config, cache),
                Game::ConnectFour => {
                    play(game, ConnectFour::new(engine.policy.into()), config, cache)
                }
            }
        }
        Command::Generate {
            game,
            plies,
            engine_first,
            engine,
        } => {
            let cache = cache.ok_or_else(|| anyhow::anyhow!("generate needs a --cache file"))?;
            let search = engine.search_config();
            match game {
                Game::TicTacToe => generate(&TicTacToe::new(), &cache, plies, engine_first, search),
                Game::ConnectFour => generate(
                    &ConnectFour::new(engine.policy.into()),
                    &cache,
                    plies,
                    engine_first,
                    search,
                ),
            }
        }
    }
}

fn generate<R: Rules + Sync>(
    rules: &R,
    cache: &OpeningCache,
    plies: usize,
    engine_first: bool,
    search: SearchConfig,
) -> Result<()> {
    let entries = OpeningCache::generate(rules, plies, engine_first, search);
    let mut added = 0;
    for (key, mv) in entries.iter() {
        if cache.put(key, *mv)? {
            added += 1;
        }
    }
    println!(
        "Solved {} positions, {} new cache entries ({} total)",
        entries.len(),
        added,
        cache.len()
    );
    Ok(())
}

fn play<R: Rules>(
    game: Game,
    rules: R,
    config: SessionConfig,
    cache: Option<OpeningCache>,
) -> Result<()> {
    let stdin = stdin();

    println!("Welcome to {}\n", game.title());

    let mut session = Session::start(rules, config, cache);
    if let Some(engine_move) = session.last_engine_move() {
        report_engine_move(&session, engine_move);
    }

    // game loop
    loop {
        display::draw(session.board())?;

        let player = match session.current_player() {
            Some(player) => player,
            None => break,
        };

        print!("Player {} move input > ", player);
        stdout().flush()?;
        let mut input_str = String::new();
        if stdin.read_line(&mut input_str)? == 0 {
            return Ok(());
        }

        // the board counts moves from 1
        let mv = match input_str.trim().parse::<usize>() {
            Ok(mv) if mv >= 1 => mv - 1,
            _ => {
                println!("Invalid number: {}", input_str.trim());
                continue;
            }
        };

        match session.make_turn(player, mv) {
            Err(err) => {
                println!("{}", err);
                // try the move again
                continue;
            }
            Ok(turn) => {
                if let Some(engine_move) = turn.engine_move {
                    report_engine_move(&session, engine_move);
                }
                if let TurnStatus::Finished(_) = turn.status {
                    break;
                }
            }
        }
    }

    display::draw(session.board())?;
    match session.rules().outcome(session.board()) {
        Some(Outcome::Winner(Player::One)) => println!("Player 1 wins!"),
        Some(Outcome::Winner(Player::Two)) if session.is_against_engine() => {
            println!("The engine wins!")
        }
        Some(Outcome::Winner(Player::Two)) => println!("Player 2 wins!"),
        Some(Outcome::Draw) => println!("Draw!"),
        None => {}
    }
    Ok(())
}

fn report_engine_move<R: Rules>(session: &Session<R>, engine_move: solver::EngineMove) {
    let source = match engine_move.source {
        MoveSource::Cache => "from the opening cache",
        MoveSource::Forced => "forced",
        MoveSource::Search => "after search",
    };
    println!("Engine plays {} ({})", engine_move.mv + 1, source);

    let score = match engine_move.score {
        Some(score) => score,
        None => return,
    };
    if let Some(plies) = session.rules().plies_to_result(score) {
        let ply_string = if plies == 1 { "ply" } else { "plies" };
        match score.cmp(&0) {
            Ordering::Greater => println!(
                "The engine can force a win within {} {}.",
                plies, ply_string
            ),
            Ordering::Less => println!("You can force a win within {} {}.", plies, ply_string),
            Ordering::Equal => {}
        }
    }
}
