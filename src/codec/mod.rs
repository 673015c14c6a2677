//! On-disk board serialization codecs.
//!
//! Two independent whole-file formats carry the same semantic content
//! (dimensions plus per-cell marks): [`text`] is a plain `<rows> <cols>`
//! header over symbol lines, [`xml`] is a single `<game>` element with
//! `<row>` children. Both decoders build a fresh [`crate::Board`] and
//! return it, so a failed load never touches a caller's live board.

use crate::board::BoardError;
use derive_more::{Display, Error, From};

pub mod text;
pub mod xml;

/// Errors raised while encoding or decoding a board file.
#[derive(Debug, Display, Error, From)]
pub enum CodecError {
    /// The file does not follow the expected format.
    #[display("invalid file format: {}", message)]
    #[from(ignore)]
    Format {
        /// What was wrong with the input.
        message: String,
    },

    /// The decoded content was rejected by the board itself.
    #[display("board rejected loaded data: {_0}")]
    Board(BoardError),

    /// Filesystem-level failure.
    #[display("i/o failure: {_0}")]
    Io(std::io::Error),
}

impl CodecError {
    /// Shorthand for a [`CodecError::Format`] with the given message.
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }
}
