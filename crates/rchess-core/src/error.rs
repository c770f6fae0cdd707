//! Crate-wide error types

use crate::notation::NotationError;
use crate::position::FenError;
use crate::types::Color;

/// Structural invariant violation in a position
///
/// Attack and legality computations need exactly one king per color.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPosition {
    /// No king of the given color on the board
    #[error("no {0} king on the board")]
    MissingKing(Color),

    /// More than one king of the given color
    #[error("{count} {color} kings on the board (expected 1)")]
    MultipleKings { color: Color, count: u32 },
}

/// Any error produced by this crate
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error(transparent)]
    Notation(#[from] NotationError),

    #[error(transparent)]
    InvalidPosition(#[from] InvalidPosition),
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
