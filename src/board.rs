use crate::error::GameError;

/// A move: a cell index for directly addressed boards, a column for gravity boards
pub type Move = usize;

/// The identity of a human taking part in a game
pub type PlayerId = u64;

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    /// The human side, minimising the evaluation
    One,
    /// The engine side, maximising the evaluation
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    fn digit(&self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::PlayerOne => '1',
            Cell::PlayerTwo => '2',
        }
    }

    fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' | '.' => Some(Cell::Empty),
            '1' => Some(Cell::PlayerOne),
            '2' => Some(Cell::PlayerTwo),
            _ => None,
        }
    }
}

/// How a move index selects the cell it fills
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Addressing {
    /// The move is a row-major cell index
    Direct,
    /// The move is a column and the piece drops to its lowest empty row
    Gravity,
}

/// The position of a placed piece, row 0 being the top row
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Coordinates {
    pub row: usize,
    pub col: usize,
}

/// A fixed-size rectangular grid of cells
///
/// The board is mutated in place. The search plays a trial move with
/// [`Board::place`] and takes it back with [`Board::remove`] before trying
/// the next sibling, so a single board serves the whole search tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    // cells are stored left-to-right, top-to-bottom
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
    addressing: Addressing,
}

impl Board {
    pub fn new(rows: usize, cols: usize, addressing: Addressing) -> Self {
        Self {
            cells: vec![Cell::Empty; rows * cols],
            rows,
            cols,
            addressing,
        }
    }

    /// Rebuilds a board from its canonical encoding (see [`Board::encode`])
    ///
    /// `.` is accepted as an empty cell to keep hand-written layouts readable.
    pub fn decode(
        rows: usize,
        cols: usize,
        addressing: Addressing,
        encoding: &str,
    ) -> Option<Self> {
        let cells = encoding
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Cell::from_digit)
            .collect::<Option<Vec<_>>>()?;
        if cells.len() != rows * cols {
            return None;
        }
        Some(Self {
            cells,
            rows,
            cols,
            addressing,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The number of distinct moves the addressing scheme accepts
    pub fn move_count(&self) -> usize {
        match self.addressing {
            Addressing::Direct => self.cells.len(),
            Addressing::Gravity => self.cols,
        }
    }

    /// Finds the cell a move would fill, without placing anything
    pub fn target(&self, mv: Move) -> Result<Coordinates, GameError> {
        match self.addressing {
            Addressing::Direct => {
                if mv >= self.cells.len() {
                    return Err(GameError::IllegalMove {
                        mv,
                        reason: "cell out of range",
                    });
                }
                if !self.cells[mv].is_empty() {
                    return Err(GameError::IllegalMove {
                        mv,
                        reason: "cell already taken",
                    });
                }
                Ok(Coordinates {
                    row: mv / self.cols,
                    col: mv % self.cols,
                })
            }
            Addressing::Gravity => {
                if mv >= self.cols {
                    return Err(GameError::IllegalMove {
                        mv,
                        reason: "column out of range",
                    });
                }
                (0..self.rows)
                    .rev()
                    .find(|&row| self.get(row, mv).is_empty())
                    .map(|row| Coordinates { row, col: mv })
                    .ok_or(GameError::IllegalMove {
                        mv,
                        reason: "column full",
                    })
            }
        }
    }

    pub fn playable(&self, mv: Move) -> bool {
        self.target(mv).is_ok()
    }

    /// Places a piece, returning where it landed so the move can be undone
    pub fn place(&mut self, player: Player, mv: Move) -> Result<Coordinates, GameError> {
        let coordinates = self.target(mv)?;
        self.cells[coordinates.row * self.cols + coordinates.col] = player.cell();
        Ok(coordinates)
    }

    /// Empties a cell filled by an earlier successful [`Board::place`]
    pub fn remove(&mut self, coordinates: Coordinates) {
        self.cells[coordinates.row * self.cols + coordinates.col] = Cell::Empty;
    }

    pub fn has_open_cell(&self) -> bool {
        self.cells.iter().any(Cell::is_empty)
    }

    pub fn num_pieces(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// The number of columns with at least one empty cell
    pub fn open_columns(&self) -> usize {
        (0..self.cols)
            .filter(|&col| (0..self.rows).any(|row| self.get(row, col).is_empty()))
            .count()
    }

    /// Flattens the grid row by row into a digit string, the canonical position key
    pub fn encode(&self) -> String {
        self.cells.iter().map(Cell::digit).collect()
    }

    /// Lists the cell indices of every straight run of `length` cells
    /// across rows, columns and both diagonals
    pub fn lines(&self, length: usize) -> Vec<Vec<usize>> {
        let mut lines = Vec::new();
        if length == 0 {
            return lines;
        }
        // (row step, column step): right, down, down-right, down-left
        let directions: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];
        for row in 0..self.rows as isize {
            for col in 0..self.cols as isize {
                for &(dy, dx) in directions.iter() {
                    let end_row = row + dy * (length as isize - 1);
                    let end_col = col + dx * (length as isize - 1);
                    if end_row < 0
                        || end_row >= self.rows as isize
                        || end_col < 0
                        || end_col >= self.cols as isize
                    {
                        continue;
                    }
                    lines.push(
                        (0..length as isize)
                            .map(|i| ((row + dy * i) * self.cols as isize + col + dx * i) as usize)
                            .collect(),
                    );
                }
            }
        }
        lines
    }

    /// Returns the player owning every cell of any of the given lines
    pub fn line_winner(&self, lines: &[Vec<usize>]) -> Option<Player> {
        lines.iter().find_map(|line| {
            let first = self.cells[line[0]];
            if line.iter().all(|&i| self.cells[i] == first) {
                first.player()
            } else {
                None
            }
        })
    }
}
