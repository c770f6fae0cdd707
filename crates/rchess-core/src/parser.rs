//! Per-request facade over one position

use crate::error::{InvalidPosition, Result};
use crate::notation::{self, NotationError};
use crate::outcome::{self, Outcome};
use crate::position::{self, Position};
use crate::types::Color;

/// One parsed position and the operations a caller runs against it
///
/// The position is never modified; `with_sanitized_en_passant` returns a
/// new parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessParser {
    position: Position,
}

impl ChessParser {
    pub fn new(fen: &str) -> Result<Self> {
        let position = position::parse(fen)?;
        Ok(ChessParser { position })
    }

    pub fn from_position(position: Position) -> Self {
        ChessParser { position }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn long_to_short(&self, text: &str) -> std::result::Result<String, NotationError> {
        notation::long_to_short(text, &self.position)
    }

    pub fn short_to_long(&self, text: &str) -> std::result::Result<String, NotationError> {
        notation::short_to_long(text, &self.position)
    }

    /// Position string, 4 fields when `reduced`
    pub fn fen(&self, reduced: bool) -> String {
        position::serialize(&self.position, reduced)
    }

    /// Outcome for `perspective`, assuming the side to move has no legal reply
    pub fn result(&self, perspective: Color) -> std::result::Result<Outcome, InvalidPosition> {
        outcome::classify(&self.position, perspective)
    }

    /// Check status of the side to move (`current`) or of the other side
    pub fn check(&self, current: bool) -> std::result::Result<bool, InvalidPosition> {
        self.position.in_check(current)
    }

    pub fn with_sanitized_en_passant(&self) -> Self {
        ChessParser {
            position: self.position.sanitize_en_passant(),
        }
    }
}
