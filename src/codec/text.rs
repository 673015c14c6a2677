//! Plain-text board format: `"<rows> <cols>\n"` followed by one symbol
//! line per row.

use crate::board::Board;
use crate::codec::CodecError;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

/// Number of tokens expected on the header line.
const HEADER_PARTS: usize = 2;

/// Writes `board` to `path` in the plain-text format.
///
/// # Errors
///
/// Returns [`CodecError::Io`] when the file cannot be written.
#[instrument(skip(board), fields(rows = board.rows(), cols = board.cols()))]
pub fn save(board: &Board, path: &Path) -> Result<(), CodecError> {
    let mut out = format!("{} {}\n", board.rows(), board.cols());
    for line in board.to_symbol_rows() {
        out.push_str(&line);
        out.push('\n');
    }
    fs::write(path, out)?;
    debug!(path = %path.display(), "Board saved as text");
    Ok(())
}

/// Reads a board from `path` in the plain-text format.
///
/// # Errors
///
/// Returns [`CodecError::Format`] when the file is empty, the header is
/// not exactly two integer tokens, or the body line count differs from
/// the declared row count; [`CodecError::Board`] when the declared
/// dimensions violate the board invariant or a row has the wrong width;
/// [`CodecError::Io`] when the file cannot be read.
#[instrument]
pub fn load(path: &Path) -> Result<Board, CodecError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(CodecError::format("input file is empty"));
    }

    let header: Vec<&str> = lines[0].split_whitespace().collect();
    if header.len() != HEADER_PARTS {
        return Err(CodecError::format("first line must be `<rows> <cols>`"));
    }
    let rows: usize = header[0]
        .parse()
        .map_err(|_| CodecError::format(format!("row count '{}' is not a number", header[0])))?;
    let cols: usize = header[1]
        .parse()
        .map_err(|_| CodecError::format(format!("column count '{}' is not a number", header[1])))?;

    let mut board = Board::new(rows, cols)?;
    let body = &lines[1..];
    if body.len() != rows {
        return Err(CodecError::format(format!(
            "expected {} board rows, found {}",
            rows,
            body.len()
        )));
    }
    let body: Vec<String> = body.iter().map(|s| s.to_string()).collect();
    board.load_symbol_rows(&body)?;
    debug!(path = %path.display(), rows, cols, "Board loaded from text");
    Ok(board)
}
