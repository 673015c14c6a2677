//! Line-based console boundary and board-coordinate parsing.
//!
//! The game loop talks to the player through the [`Console`] trait so
//! tests can script the whole interaction without a terminal.

use crate::board::Position;
use derive_more::{Display, Error};
use derive_new::new;
use std::io::{self, BufRead, Write};
use tracing::instrument;

/// Minimum characters in a coordinate token: one letter plus one digit.
const MIN_COORDINATE_LEN: usize = 2;

/// Errors raised while decoding a coordinate token like `b3`.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseError {
    /// Token shorter than a letter plus a row number.
    #[display("enter a move like b3")]
    TooShort,

    /// Column letter outside the board's columns.
    #[display("unknown column letter '{}'", letter)]
    UnknownColumn {
        /// The rejected letter.
        letter: char,
    },

    /// Row part is not a number.
    #[display("the row must be a number, e.g. b3")]
    RowNotANumber {
        /// The rejected row text.
        input: String,
    },

    /// Row number outside `1..=rows`.
    #[display("row {} is outside the board", row)]
    RowOutOfRange {
        /// The rejected 1-based row number.
        row: usize,
    },
}

/// Decodes a coordinate token (column letter + 1-based row number) against
/// board dimensions, case-insensitively.
///
/// # Errors
///
/// Returns a [`ParseError`] when the token is shorter than 2 characters,
/// the letter exceeds the column count, or the row suffix is not an
/// integer in `1..=rows`.
#[instrument]
pub fn parse_position(input: &str, rows: usize, cols: usize) -> Result<Position, ParseError> {
    let token = input.trim().to_lowercase();
    if token.chars().count() < MIN_COORDINATE_LEN {
        return Err(ParseError::TooShort);
    }
    let letter = token.chars().next().unwrap_or('?');
    if !letter.is_ascii_lowercase() || (letter as usize - 'a' as usize) >= cols {
        return Err(ParseError::UnknownColumn { letter });
    }
    let row_part = &token[1..];
    let row: usize = row_part.parse().map_err(|_| ParseError::RowNotANumber {
        input: row_part.to_string(),
    })?;
    if row < 1 || row > rows {
        return Err(ParseError::RowOutOfRange { row });
    }
    Ok(Position::new(row - 1, letter as usize - 'a' as usize))
}

/// Blocking request/response interface to the player.
pub trait Console {
    /// Prints `prompt` without a newline and reads one input line.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] when the input stream fails or ends.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Prints one line of output.
    fn println(&mut self, text: &str);
}

/// [`Console`] over process stdin/stdout.
#[derive(Debug, Default, new)]
pub struct StdConsole;

impl Console for StdConsole {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn println(&mut self, text: &str) {
        println!("{text}");
    }
}
