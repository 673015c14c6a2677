//! Gomoku library - connected-five board game logic
//!
//! A two-player connected-five game on a rectangular grid where moves are
//! only legal adjacent to already-occupied cells.
//!
//! # Architecture
//!
//! - **Board**: grid state, move legality, win detection
//! - **Codecs**: two on-disk board formats (plain text and markup)
//! - **Game**: the turn state machine driving human and computer moves
//! - **Scores**: best-effort win tally persistence
//!
//! # Example
//!
//! ```
//! use gomoku::{Board, Mark, Position};
//!
//! let mut board = Board::new(10, 10)?;
//! board.place(Mark::X, Position::new(5, 5))?;
//! assert_eq!(board.legal_positions_by_adjacency().len(), 8);
//! # Ok::<(), gomoku::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod ai;
mod board;
mod console;
mod game;
mod scores;

/// On-disk board serialization codecs (Format A text, Format B markup).
pub mod codec;

// Crate-level exports - Board types
pub use board::{Board, BoardError, Mark, Position, MAX_ROWS, MIN_COLS, WIN_LENGTH};

// Crate-level exports - Codec error
pub use codec::CodecError;

// Crate-level exports - Console boundary
pub use console::{parse_position, Console, ParseError, StdConsole};

// Crate-level exports - Game controller
pub use game::{Game, GameError};

// Crate-level exports - Move sources
pub use ai::{FirstLegalAi, MoveSource, RandomAi};

// Crate-level exports - Score persistence
pub use scores::{ScoreRepository, DEFAULT_SCORES_FILE};
