//! Basic board types
//!
//! - `Color`: side (White / Black)
//! - `File`, `Rank`: board coordinates (a-h, 1-8)
//! - `Square`: one of the 64 squares, ordered a1 < b1 < ... < h8
//! - `PieceType`, `Piece`: piece kind and colored piece

mod color;
mod file;
mod piece;
mod rank;
mod square;

pub use color::Color;
pub use file::File;
pub use piece::{Piece, PieceType};
pub use rank::Rank;
pub use square::Square;
