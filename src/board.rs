//! Board state, move legality, and win detection.
//!
//! The board is a pure data container: all turn sequencing lives in
//! [`crate::game`]. Cells are mutable only through [`Board::place`] and a
//! non-empty cell never reverts, so the grid only ever fills up.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, instrument};

/// Number of consecutive marks required to win.
pub const WIN_LENGTH: usize = 5;

/// Smallest allowed column count.
pub const MIN_COLS: usize = 4;

/// Largest allowed row count.
pub const MAX_ROWS: usize = 25;

/// The 8 neighbor offsets used for adjacency legality.
const DIRS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The four axis pairs checked for a winning line: each entry is the
/// positive and negative direction of one axis.
const AXES: [[(isize, isize); 2]; 4] = [
    [(-1, 0), (1, 0)],
    [(0, -1), (0, 1)],
    [(-1, -1), (1, 1)],
    [(-1, 1), (1, -1)],
];

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Unoccupied cell.
    Empty,
    /// First player (human, moves first).
    X,
    /// Second player (automated opponent).
    O,
}

impl Mark {
    /// Canonical single-character symbol used by both on-disk formats.
    pub fn symbol(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'x',
            Mark::O => 'o',
        }
    }

    /// Decodes a symbol case-insensitively. Anything that is not `x` or
    /// `o` decodes to [`Mark::Empty`]; the lossiness is deliberate.
    pub fn from_symbol(c: char) -> Self {
        match c.to_ascii_lowercase() {
            'x' => Mark::X,
            'o' => Mark::O,
            _ => Mark::Empty,
        }
    }

    /// Returns the opposing player's mark. `Empty` has no opponent and
    /// maps to itself.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell coordinate in row-major orientation.
///
/// Coordinates are `usize`, so negative values are unrepresentable; bounds
/// against a concrete board are checked by [`Board::place`] and the
/// coordinate parser.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, new,
)]
pub struct Position {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl fmt::Display for Position {
    /// Renders coordinate notation: column letter plus 1-based row, `b3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = (b'a' + self.col as u8) as char;
        write!(f, "{}{}", letter, self.row + 1)
    }
}

/// Errors raised by board construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// Dimensions outside `4 <= cols <= rows <= 25`.
    #[display("board dimensions must satisfy 4 <= cols <= rows <= 25, got {}x{}", rows, cols)]
    InvalidDimensions {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
    },

    /// Placement target outside the grid.
    #[display("position {} is outside the board", position)]
    OutOfBounds {
        /// The rejected position.
        position: Position,
    },

    /// Placement target already holds a mark.
    #[display("cell {} is already occupied", position)]
    CellOccupied {
        /// The rejected position.
        position: Position,
    },

    /// A loaded grid does not match this board's dimensions.
    #[display("loaded {} count mismatch: expected {}, found {}", axis, expected, found)]
    DimensionMismatch {
        /// Which axis mismatched, `"row"` or `"column"`.
        axis: &'static str,
        /// The board's dimension.
        expected: usize,
        /// The supplied dimension.
        found: usize,
    },
}

/// Fixed-size rectangular grid of [`Mark`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Board {
    /// Row count, `4..=25`.
    rows: usize,
    /// Column count, `4..=rows`.
    cols: usize,
    /// Row-major cell storage, `rows * cols` entries.
    #[getter(skip)]
    cells: Vec<Mark>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] unless
    /// `4 <= cols <= rows <= 25`. Bounds are never clamped.
    #[instrument]
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if cols < MIN_COLS || rows < cols || rows > MAX_ROWS {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        debug!(rows, cols, "Board created");
        Ok(Self {
            rows,
            cols,
            cells: vec![Mark::Empty; rows * cols],
        })
    }

    /// Pure bounds predicate over signed coordinates, usable for neighbor
    /// arithmetic that may step off the grid.
    pub fn is_inside(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Returns the mark at `position`, or `None` outside the grid.
    pub fn mark_at(&self, position: Position) -> Option<Mark> {
        if position.row < self.rows && position.col < self.cols {
            Some(self.cells[position.row * self.cols + position.col])
        } else {
            None
        }
    }

    /// Places `mark` at `position`, mutating exactly that cell.
    ///
    /// Placing [`Mark::Empty`] is not a supported operation; occupied
    /// cells stay occupied for the life of the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] or [`BoardError::CellOccupied`];
    /// the board is untouched on either failure.
    #[instrument(skip(self))]
    pub fn place(&mut self, mark: Mark, position: Position) -> Result<(), BoardError> {
        debug_assert_ne!(mark, Mark::Empty);
        match self.mark_at(position) {
            None => Err(BoardError::OutOfBounds { position }),
            Some(existing) if existing != Mark::Empty => {
                Err(BoardError::CellOccupied { position })
            }
            Some(_) => {
                self.cells[position.row * self.cols + position.col] = mark;
                debug!(%position, ?mark, "Mark placed");
                Ok(())
            }
        }
    }

    /// The set of empty cells 8-adjacent to at least one occupied cell.
    ///
    /// Returns the empty set on a fully empty board; callers special-case
    /// the opening move with [`Board::center`].
    pub fn legal_positions_by_adjacency(&self) -> BTreeSet<Position> {
        let mut legal = BTreeSet::new();
        for (idx, mark) in self.cells.iter().enumerate() {
            if *mark == Mark::Empty {
                continue;
            }
            let row = (idx / self.cols) as isize;
            let col = (idx % self.cols) as isize;
            for (dr, dc) in DIRS {
                let (nr, nc) = (row + dr, col + dc);
                if self.is_inside(nr, nc) {
                    let neighbor = Position::new(nr as usize, nc as usize);
                    if self.mark_at(neighbor) == Some(Mark::Empty) {
                        legal.insert(neighbor);
                    }
                }
            }
        }
        legal
    }

    /// Reports whether `position` completes a line of five for `mark`.
    ///
    /// Counts consecutive same-mark cells outward in both directions along
    /// each of the four axes, plus the cell itself. Only meaningful for
    /// the mark and position of the most recent placement; this is not a
    /// full-board scan.
    pub fn has_winning_line_through(&self, mark: Mark, position: Position) -> bool {
        AXES.iter().any(|axis| {
            let run = 1 + axis
                .iter()
                .map(|&(dr, dc)| self.count_direction(mark, position, dr, dc))
                .sum::<usize>();
            run >= WIN_LENGTH
        })
    }

    /// Counts consecutive `mark` cells starting one step from `start` in
    /// direction `(dr, dc)`.
    fn count_direction(&self, mark: Mark, start: Position, dr: isize, dc: isize) -> usize {
        let mut row = start.row as isize + dr;
        let mut col = start.col as isize + dc;
        let mut count = 0;
        while self.is_inside(row, col)
            && self.cells[row as usize * self.cols + col as usize] == mark
        {
            count += 1;
            row += dr;
            col += dc;
        }
        count
    }

    /// The cell used to seed an empty board: `(rows/2, cols/2)`.
    pub fn center(&self) -> Position {
        Position::new(self.rows / 2, self.cols / 2)
    }

    /// Human-readable grid with column letters and 1-based row numbers.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.cols * 2 + 4) * (self.rows + 1));
        out.push_str("   ");
        for col in 0..self.cols {
            out.push((b'a' + col as u8) as char);
            out.push(' ');
        }
        out.push('\n');
        for row in 0..self.rows {
            out.push_str(&format!("{:2} ", row + 1));
            for col in 0..self.cols {
                out.push(self.cells[row * self.cols + col].symbol());
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// One fixed-width symbol string per row; the shared substrate for
    /// both serialization codecs.
    pub fn to_symbol_rows(&self) -> Vec<String> {
        (0..self.rows)
            .map(|row| {
                (0..self.cols)
                    .map(|col| self.cells[row * self.cols + col].symbol())
                    .collect()
            })
            .collect()
    }

    /// Overwrites every cell from decoded symbol rows.
    ///
    /// The whole row set is validated before any cell changes, so a
    /// failure leaves the board exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DimensionMismatch`] when the row count or any
    /// row's character count differs from this board's dimensions.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub fn load_symbol_rows(&mut self, lines: &[String]) -> Result<(), BoardError> {
        if lines.len() != self.rows {
            return Err(BoardError::DimensionMismatch {
                axis: "row",
                expected: self.rows,
                found: lines.len(),
            });
        }
        for line in lines {
            let width = line.chars().count();
            if width != self.cols {
                return Err(BoardError::DimensionMismatch {
                    axis: "column",
                    expected: self.cols,
                    found: width,
                });
            }
        }
        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                self.cells[row * self.cols + col] = Mark::from_symbol(c);
            }
        }
        debug!("Board contents replaced from symbol rows");
        Ok(())
    }
}
