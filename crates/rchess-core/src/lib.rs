//! # rchess-core
//!
//! Chess position model and move notation translation.
//!
//! ## Modules
//!
//! - `types`: basic types (Color, File, Rank, Square, Piece)
//! - `bitboard`: 64-bit square sets
//! - `position`: position model and the position string codec
//! - `attacks`: attack tables and check detection
//! - `resolver`: legal origin squares for a partially described move
//! - `notation`: long / short algebraic conversion
//! - `outcome`: terminal outcome classification
//! - `parser`: per-request facade over one position
//!

// Basic types
pub mod error;
pub mod types;

// Board representation
pub mod bitboard;
pub mod position;

// Legality
pub mod attacks;
pub mod resolver;

// Conversion and classification
pub mod notation;
pub mod outcome;
pub mod parser;

pub use error::{Error, InvalidPosition, Result};
pub use notation::{NotationError, long_to_short, short_to_long};
pub use outcome::{Outcome, classify};
pub use parser::ChessParser;
pub use position::{FenError, Position};
pub use resolver::resolve_origins;
pub use types::{Color, File, Piece, PieceType, Rank, Square};
