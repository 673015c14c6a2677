//! Markup board format: a `<game rows=".." cols="..">` wrapper holding one
//! `<row>` element per board row, with `&`, `<`, `>` escaped.

use crate::board::Board;
use crate::codec::CodecError;
use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

const GAME_OPEN: &str = "<game";
const ROW_OPEN: &str = "<row>";
const ROW_CLOSE: &str = "</row>";

/// Writes `board` to `path` in the markup format.
///
/// # Errors
///
/// Returns [`CodecError::Io`] when the file cannot be written.
#[instrument(skip(board), fields(rows = board.rows(), cols = board.cols()))]
pub fn save(board: &Board, path: &Path) -> Result<(), CodecError> {
    let mut out = String::with_capacity(board.rows() * (board.cols() + 20) + 64);
    out.push_str(&format!(
        "<game rows=\"{}\" cols=\"{}\">\n",
        board.rows(),
        board.cols()
    ));
    for line in board.to_symbol_rows() {
        out.push_str("  <row>");
        out.push_str(&escape(&line));
        out.push_str("</row>\n");
    }
    out.push_str("</game>\n");
    fs::write(path, out)?;
    debug!(path = %path.display(), "Board saved as markup");
    Ok(())
}

/// Reads a board from `path` in the markup format.
///
/// Symbols other than `x`/`o` (case-insensitive) decode to empty cells;
/// that lenience is part of the format, not an error.
///
/// # Errors
///
/// Returns [`CodecError::Format`] when the `<game>` wrapper or its
/// closing `>` is missing, an attribute is absent or unparsable, a row's
/// decoded length differs from the declared column count, or the row
/// count differs from the declared row count; [`CodecError::Board`] when
/// the declared dimensions violate the board invariant;
/// [`CodecError::Io`] when the file cannot be read.
#[instrument]
pub fn load(path: &Path) -> Result<Board, CodecError> {
    let xml = fs::read_to_string(path)?;

    let game_start = xml
        .find(GAME_OPEN)
        .ok_or_else(|| CodecError::format("missing <game> header"))?;
    let header_end = xml[game_start..]
        .find('>')
        .map(|i| game_start + i)
        .ok_or_else(|| CodecError::format("missing '>' in game header"))?;
    let header = &xml[game_start..header_end];

    let rows = parse_attr(header, "rows")?;
    let cols = parse_attr(header, "cols")?;
    let mut board = Board::new(rows, cols)?;

    let lines = extract_rows(&xml, header_end + 1, rows, cols)?;
    board.load_symbol_rows(&lines)?;
    debug!(path = %path.display(), rows, cols, "Board loaded from markup");
    Ok(board)
}

/// Collects and unescapes the `<row>` element contents after `start_idx`,
/// validating each row's width and the overall row count.
fn extract_rows(
    xml: &str,
    start_idx: usize,
    expected_rows: usize,
    expected_cols: usize,
) -> Result<Vec<String>, CodecError> {
    let mut lines = Vec::new();
    let mut idx = start_idx;
    while let Some(open) = xml[idx..].find(ROW_OPEN).map(|i| idx + i) {
        let close = xml[open..]
            .find(ROW_CLOSE)
            .map(|i| open + i)
            .ok_or_else(|| CodecError::format("missing </row>"))?;
        let content = unescape(&xml[open + ROW_OPEN.len()..close]);
        if content.chars().count() != expected_cols {
            return Err(CodecError::format(format!(
                "row {} has wrong length: expected {} symbols",
                lines.len() + 1,
                expected_cols
            )));
        }
        lines.push(content);
        idx = close + ROW_CLOSE.len();
    }
    if lines.len() != expected_rows {
        return Err(CodecError::format(format!(
            "expected {} row elements, found {}",
            expected_rows,
            lines.len()
        )));
    }
    Ok(lines)
}

/// Extracts an integer attribute `name="value"` from the header text.
fn parse_attr(header: &str, name: &str) -> Result<usize, CodecError> {
    let key = format!("{name}=\"");
    let start = header
        .find(&key)
        .map(|i| i + key.len())
        .ok_or_else(|| CodecError::format(format!("missing attribute: {name}")))?;
    let end = header[start..]
        .find('"')
        .map(|i| start + i)
        .ok_or_else(|| CodecError::format(format!("unterminated attribute: {name}")))?;
    header[start..end]
        .parse()
        .map_err(|_| CodecError::format(format!("attribute {name} is not a number")))
}

/// Escapes `&`, `<`, `>` for element content; `&` first so the entity
/// ampersands stay untouched.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Reverses [`escape`]; `&amp;` last so escaped ampersands are not
/// double-decoded.
fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
