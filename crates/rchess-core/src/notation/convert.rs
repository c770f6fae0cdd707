//! Conversion between the coordinate form and the short algebraic form

use log::debug;

use super::{CastlingToken, LongToken, MoveToken, NotationError};
use crate::position::Position;
use crate::resolver::{MoveQuery, resolve};
use crate::types::{Color, File, PieceType, Rank, Square};

/// Convert a coordinate-form move (`e2e4`, `e7e8q`) to the short form
/// (`e4`, `e8=Q`) in the context of `pos`
///
/// Castling literals are returned unchanged, a king moving two files becomes
/// `O-O` / `O-O-O`. The trailing check marker is kept. Only the side to move
/// can make the move.
pub fn long_to_short(text: &str, pos: &Position) -> Result<String, NotationError> {
    if CastlingToken::parse(text).is_some() {
        return Ok(text.to_string());
    }

    let long = LongToken::parse(text)?;
    let piece = pos
        .piece_on(long.from)
        .ok_or(NotationError::EmptyOrigin(long.from))?;
    let color = pos.side_to_move();
    if piece.color != color {
        return Err(NotationError::NoCandidate(text.to_string()));
    }
    let piece_type = piece.piece_type;

    if piece_type == PieceType::King && long.from.file().distance(long.to.file()) == 2 {
        let literal = if long.to.file() == File::FileG { "O-O" } else { "O-O-O" };
        let marker = long.marker.map(|m| m.to_char().to_string()).unwrap_or_default();
        return Ok(format!("{literal}{marker}"));
    }

    check_promotion(text, piece_type, color, long.to, long.promotion)?;

    let capture = pos.piece_on(long.to).is_some()
        || (piece_type == PieceType::Pawn && pos.en_passant() == Some(long.to));
    let query = MoveQuery::new(piece_type, color, long.to, capture);
    let (from_file, from_rank) = disambiguate(text, query, long.from, pos)?;

    let short = MoveToken {
        piece_type,
        from_file,
        from_rank,
        to: long.to,
        capture,
        promotion: long.promotion,
        marker: long.marker,
    };
    Ok(short.to_string())
}

/// Convert a short-form move (`Nbd7`, `exd5`, `e8=Q+`) to the coordinate
/// form for the side to move
///
/// Castling literals are returned unchanged. The check marker is dropped.
pub fn short_to_long(text: &str, pos: &Position) -> Result<String, NotationError> {
    if CastlingToken::parse(text).is_some() {
        return Ok(text.to_string());
    }

    let short = MoveToken::parse(text)?;
    let color = pos.side_to_move();
    check_promotion(text, short.piece_type, color, short.to, short.promotion)?;

    let query = MoveQuery::new(short.piece_type, color, short.to, short.capture)
        .with_file(short.from_file)
        .with_rank(short.from_rank);
    let origins = resolve(&query, pos)?;

    let mut iter = origins.iter().copied();
    let from = match (iter.next(), iter.next()) {
        (None, _) => return Err(NotationError::NoCandidate(text.to_string())),
        (Some(from), None) => from,
        (Some(_), Some(_)) => {
            return Err(NotationError::Ambiguous {
                token: text.to_string(),
                candidates: origins.into_iter().collect(),
            });
        }
    };

    let long = LongToken {
        from,
        to: short.to,
        promotion: short.promotion,
        marker: None,
    };
    Ok(long.to_string())
}

/// A promotion piece is only allowed on a pawn reaching its last rank
fn check_promotion(
    text: &str,
    piece_type: PieceType,
    color: Color,
    to: Square,
    promotion: Option<PieceType>,
) -> Result<(), NotationError> {
    if promotion.is_some()
        && (piece_type != PieceType::Pawn || to.rank() != Rank::promotion(color))
    {
        return Err(NotationError::Malformed(text.to_string()));
    }
    Ok(())
}

/// Shortest origin hint that singles out `from` among the legal origins
fn disambiguate(
    text: &str,
    query: MoveQuery,
    from: Square,
    pos: &Position,
) -> Result<(Option<File>, Option<Rank>), NotationError> {
    let candidates = resolve(&query, pos)?;
    if !candidates.contains(&from) {
        return Err(NotationError::NoCandidate(text.to_string()));
    }

    let hint = if query.piece_type == PieceType::Pawn && query.capture {
        (Some(from.file()), None)
    } else if candidates.len() == 1 {
        (None, None)
    } else if resolve(&query.with_file(Some(from.file())), pos)?.len() == 1 {
        (Some(from.file()), None)
    } else if resolve(&query.with_rank(Some(from.rank())), pos)?.len() == 1 {
        (None, Some(from.rank()))
    } else {
        (Some(from.file()), Some(from.rank()))
    };

    if candidates.len() > 1 {
        debug!(
            "{text}: {} candidates, hint {:?}/{:?}",
            candidates.len(),
            hint.0,
            hint.1
        );
    }
    Ok(hint)
}
