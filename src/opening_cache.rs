use anyhow::{Context, Result};
use indicatif::*;
use rayon::prelude::*;
use tracing::{info, warn};

use std::cell::RefCell;
use std::collections::{hash_map::Entry, HashMap, HashSet};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use crate::board::{Board, Move, Player};
use crate::config::SearchConfig;
use crate::error::CacheError;
use crate::rules::Rules;
use crate::solver::Solver;

/// Builds the cache key of a position: the board encoding followed by the
/// rules' variant tag
pub fn cache_key<R: Rules + ?Sized>(rules: &R, board: &Board) -> String {
    format!("{}/{}", board.encode(), rules.variant_tag())
}

/// A persistence medium for cache entries
pub trait CacheStore {
    /// Reads every stored entry
    fn load(&mut self) -> Result<HashMap<String, Move>>;

    /// Stores a single new entry
    fn append(&mut self, key: &str, mv: Move) -> Result<()>;
}

/// Stores entries in a text file, one `key: move` entry per line
pub struct TextFileStore {
    path: PathBuf,
}

impl TextFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl CacheStore for TextFileStore {
    /// A missing file loads as an empty cache
    fn load(&mut self) -> Result<HashMap<String, Move>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no opening cache file, starting empty");
                return Ok(HashMap::new());
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to open {}", self.path.display()))
            }
        };
        parse_entries(BufReader::new(file))
            .with_context(|| format!("failed to read {}", self.path.display()))
    }

    fn append(&mut self, key: &str, mv: Move) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        writeln!(file, "{}: {}", key, mv)
            .with_context(|| format!("failed to write to {}", self.path.display()))
    }
}

/// Parses one line of a text store, `line` being 1-based
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_entry(line: usize, content: &str) -> Result<Option<(String, Move)>, CacheError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let corrupt = || CacheError::CorruptEntry {
        line,
        content: content.to_string(),
    };

    let (key, value) = trimmed.split_once(':').ok_or_else(corrupt)?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || key.contains(char::is_whitespace) {
        return Err(corrupt());
    }
    let mv = value.parse::<Move>().map_err(|_| CacheError::BadMove {
        line,
        value: value.to_string(),
    })?;
    Ok(Some((key.to_string(), mv)))
}

/// Reads `key: move` lines into a mapping
///
/// Corrupt lines are skipped. A key that appears more than once keeps the
/// move of its first occurrence.
pub fn parse_entries<B: BufRead>(reader: B) -> Result<HashMap<String, Move>> {
    let mut entries = HashMap::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_entry(i + 1, &line) {
            Ok(Some((key, mv))) => match entries.entry(key) {
                Entry::Occupied(entry) => warn!(
                    line = i + 1,
                    key = %entry.key(),
                    first = *entry.get(),
                    duplicate = mv,
                    "duplicate cache key ignored"
                ),
                Entry::Vacant(entry) => {
                    entry.insert(mv);
                }
            },
            Ok(None) => {}
            Err(err) => warn!("{}", err),
        }
    }
    Ok(entries)
}

struct CacheStorage {
    entries: HashMap<String, Move>,
    store: Option<Box<dyn CacheStore>>,
}

/// Previously solved positions and the engine's move for each
///
/// Entries are never overwritten: the first move recorded for a key stays.
/// Clones share the same entries, so one cache can be handed to every
/// session of a process.
#[derive(Clone)]
pub struct OpeningCache(Rc<RefCell<CacheStorage>>);

impl OpeningCache {
    /// Creates an empty cache that is not persisted
    pub fn in_memory() -> Self {
        Self(Rc::new(RefCell::new(CacheStorage {
            entries: HashMap::new(),
            store: None,
        })))
    }

    /// Loads a cache from a store, writing new entries back to it
    pub fn load<S: CacheStore + 'static>(mut store: S) -> Result<Self> {
        let entries = store.load()?;
        info!(entries = entries.len(), "opening cache loaded");
        Ok(Self(Rc::new(RefCell::new(CacheStorage {
            entries,
            store: Some(Box::new(store)),
        }))))
    }

    /// Loads a cache persisted in a text file
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        Self::load(TextFileStore::new(path))
    }

    pub fn get(&self, key: &str) -> Option<Move> {
        self.0.borrow().entries.get(key).copied()
    }

    /// Records a move for a key not seen before
    ///
    /// Returns whether the entry was added; an existing key is left as is.
    pub fn put(&self, key: &str, mv: Move) -> Result<bool> {
        let mut storage = self.0.borrow_mut();
        if storage.entries.contains_key(key) {
            return Ok(false);
        }
        if let Some(store) = storage.store.as_mut() {
            store.append(key, mv)?;
        }
        storage.entries.insert(key.to_string(), mv);
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Solves every position the engine can face within the first `plies`
    /// plies of a game
    ///
    /// A position reached by several move orders is solved once, with move
    /// ordering anchored on the centre column rather than on the last move
    /// played. Where moves tie, a book entry can therefore differ from the
    /// move a live search would pick after a particular move order.
    /// Positions are solved in parallel, each by its own single-threaded
    /// search.
    ///
    /// Returns `(key, move)` pairs sorted by key.
    pub fn generate<R>(
        rules: &R,
        plies: usize,
        engine_first: bool,
        config: SearchConfig,
    ) -> Vec<(String, Move)>
    where
        R: Rules + Sync,
    {
        let start = Instant::now();

        let mut board = rules.new_board();
        let to_move = if engine_first {
            Player::Two
        } else {
            Player::One
        };
        let mut visited = HashSet::new();
        let mut positions = Vec::new();
        collect_positions(rules, &mut board, to_move, plies, &mut visited, &mut positions);
        info!(positions = positions.len(), plies, "positions enumerated");

        let progress = ProgressBar::new(positions.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Solving positions: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let mut entries: Vec<(String, Move)> = positions
            .into_par_iter()
            .filter_map(|(key, mut board)| {
                let mut solver = Solver::new(rules).with_config(config);
                let engine_move = solver.best_move(&mut board, None);
                progress.inc(1);
                engine_move.map(|engine_move| (key, engine_move.mv))
            })
            .collect();
        progress.finish();

        entries.sort_unstable();
        info!(
            entries = entries.len(),
            elapsed = %HumanDuration(start.elapsed()),
            "opening book generated"
        );
        entries
    }
}

// walks the game tree, collecting each distinct position where the engine is to move
fn collect_positions<R: Rules>(
    rules: &R,
    board: &mut Board,
    to_move: Player,
    plies_left: usize,
    visited: &mut HashSet<String>,
    positions: &mut Vec<(String, Board)>,
) {
    // the piece count fixes the side to move, so the encoding alone identifies a node
    if !visited.insert(board.encode()) || rules.outcome(board).is_some() {
        return;
    }
    if to_move == Player::Two {
        positions.push((cache_key(rules, board), board.clone()));
    }
    if plies_left == 0 {
        return;
    }
    for mv in 0..board.move_count() {
        if let Ok(coordinates) = board.place(to_move, mv) {
            collect_positions(
                rules,
                board,
                to_move.opponent(),
                plies_left - 1,
                visited,
                positions,
            );
            board.remove(coordinates);
        }
    }
}
