//! Move notation
//!
//! - `LongToken`: coordinate ("long") form, e.g. `e2e4`, `e7e8q`
//! - `MoveToken`: disambiguated algebraic ("short") form, e.g. `Nbd2`, `exd5`
//! - `CastlingToken`: `O-O` / `O-O-O`, shared by both forms
//! - `long_to_short` / `short_to_long`: conversion against a position

mod convert;
mod error;
mod token;

pub use convert::{long_to_short, short_to_long};
pub use error::NotationError;
pub use token::{CastlingSide, CastlingToken, CheckMarker, LongToken, MoveToken};
