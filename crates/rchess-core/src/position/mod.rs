//! Position module
//!
//! - `Position`: immutable board snapshot (placement, side to move, castling
//!   rights, en-passant target, move counters)
//! - `CastlingRights`: the four independent castling flags
//! - Position string (FEN) parsing and serialization, plus the shallow
//!   structural checks used as a pre-filter by callers
//!
//! Placement array and bitboards are only written through `put_piece` /
//! `remove_piece` and always agree with each other.

mod castling;
mod fen;
mod pos;

pub use castling::CastlingRights;
pub use fen::{FenError, STARTPOS, color_to_move, is_well_formed, parse, serialize};
pub use pos::Position;
