//! Move origin resolution
//!
//! Given what a move token says about a move (piece type, optional origin
//! file and rank, destination, capture flag), find every square the move can
//! legally start from. Castling is not handled here.

use std::collections::BTreeSet;

use log::debug;

use crate::attacks::{self, is_attacked};
use crate::error::InvalidPosition;
use crate::position::Position;
use crate::types::{Color, File, PieceType, Rank, Square};

/// Partial description of a move, as read from a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveQuery {
    pub piece_type: PieceType,
    pub color: Color,
    pub from_file: Option<File>,
    pub from_rank: Option<Rank>,
    pub to: Square,
    pub capture: bool,
}

impl MoveQuery {
    pub fn new(piece_type: PieceType, color: Color, to: Square, capture: bool) -> Self {
        MoveQuery {
            piece_type,
            color,
            from_file: None,
            from_rank: None,
            to,
            capture,
        }
    }

    pub fn with_file(self, file: Option<File>) -> Self {
        MoveQuery {
            from_file: file,
            ..self
        }
    }

    pub fn with_rank(self, rank: Option<Rank>) -> Self {
        MoveQuery {
            from_rank: rank,
            ..self
        }
    }

    fn matches_hints(&self, sq: Square) -> bool {
        self.from_file.is_none_or(|file| sq.file() == file)
            && self.from_rank.is_none_or(|rank| sq.rank() == rank)
    }
}

/// Squares from which the queried move is fully legal
///
/// Fails when `color` does not have exactly one king; an empty set is a
/// normal result.
pub fn resolve_origins(
    piece_type: PieceType,
    color: Color,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to: Square,
    capture: bool,
    pos: &Position,
) -> Result<BTreeSet<Square>, InvalidPosition> {
    let query = MoveQuery {
        piece_type,
        color,
        from_file,
        from_rank,
        to,
        capture,
    };
    resolve(&query, pos)
}

/// `resolve_origins` over a prepared query
pub fn resolve(query: &MoveQuery, pos: &Position) -> Result<BTreeSet<Square>, InvalidPosition> {
    pos.king_square(query.color)?;

    let mut origins = BTreeSet::new();
    for from in pos.pieces(query.piece_type, query.color) {
        if !query.matches_hints(from) || !is_pseudo_legal(query, from, pos) {
            continue;
        }
        if leaves_king_attacked(query, from, pos)? {
            debug!("{from}{} rejected: own king left in check", query.to);
            continue;
        }
        origins.insert(from);
    }

    debug!(
        "{:?} {:?} to {} (capture={}, hints={:?}/{:?}): {} origin(s)",
        query.color,
        query.piece_type,
        query.to,
        query.capture,
        query.from_file,
        query.from_rank,
        origins.len()
    );
    Ok(origins)
}

fn is_pseudo_legal(query: &MoveQuery, from: Square, pos: &Position) -> bool {
    let to = query.to;
    if from == to {
        return false;
    }
    let target = pos.piece_on(to);
    if target.is_some_and(|piece| piece.color == query.color) {
        return false;
    }

    if query.piece_type == PieceType::Pawn {
        return is_pawn_move(query, from, pos);
    }

    // occupancy must agree with the capture flag
    if query.capture != target.is_some() {
        return false;
    }
    attacks::attacks_from(query.piece_type, query.color, from, pos.occupied()).contains(to)
}

fn is_pawn_move(query: &MoveQuery, from: Square, pos: &Position) -> bool {
    let to = query.to;
    let color = query.color;

    if query.capture {
        let captures_piece = pos.piece_on(to).is_some();
        let en_passant = pos.en_passant() == Some(to) && pos.piece_on(to).is_none();
        return attacks::pawn_attacks(color, from).contains(to) && (captures_piece || en_passant);
    }

    if pos.piece_on(to).is_some() {
        return false;
    }
    let forward = color.forward();
    if from.offset(0, forward) == Some(to) {
        return true;
    }
    // double step from the starting rank through an empty square
    from.rank() == Rank::pawn_start(color)
        && from.offset(0, 2 * forward) == Some(to)
        && from
            .offset(0, forward)
            .is_some_and(|skipped| pos.piece_on(skipped).is_none())
}

fn leaves_king_attacked(
    query: &MoveQuery,
    from: Square,
    pos: &Position,
) -> Result<bool, InvalidPosition> {
    let next = pos.with_move(from, query.to, None);
    is_attacked(&next, query.color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{STARTPOS, parse};

    fn sq(s: &str) -> Square {
        Square::from_coord(s).unwrap()
    }

    fn origins(fen: &str, piece_type: PieceType, to: &str, capture: bool) -> Vec<String> {
        let pos = parse(fen).unwrap();
        let color = pos.side_to_move();
        resolve_origins(piece_type, color, None, None, sq(to), capture, &pos)
            .unwrap()
            .into_iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_pawn_pushes() {
        assert_eq!(origins(STARTPOS, PieceType::Pawn, "e4", false), ["e2"]);
        assert_eq!(origins(STARTPOS, PieceType::Pawn, "e3", false), ["e2"]);
        assert!(origins(STARTPOS, PieceType::Pawn, "e5", false).is_empty());
        assert!(origins(STARTPOS, PieceType::Pawn, "e4", true).is_empty());

        let black = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(origins(black, PieceType::Pawn, "d5", false), ["d7"]);
        assert_eq!(origins(black, PieceType::Pawn, "d6", false), ["d7"]);
    }

    #[test]
    fn test_pawn_double_step_blocked() {
        let fen = "4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1";
        assert!(origins(fen, PieceType::Pawn, "e4", false).is_empty());
        assert!(origins(fen, PieceType::Pawn, "e3", false).is_empty());

        // pawn not on its starting rank cannot double step
        let fen = "4k3/8/8/8/8/4P3/8/4K3 w - - 0 1";
        assert!(origins(fen, PieceType::Pawn, "e5", false).is_empty());
    }

    #[test]
    fn test_pawn_captures() {
        let fen = "4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1";
        assert_eq!(origins(fen, PieceType::Pawn, "d5", true), ["e4"]);
        assert!(origins(fen, PieceType::Pawn, "d5", false).is_empty());
        // no diagonal move onto an empty square without an en-passant target
        assert!(origins(fen, PieceType::Pawn, "f5", true).is_empty());

        let fen = "4k3/8/8/2p1p3/3P4/8/8/4K3 b - - 0 1";
        assert_eq!(origins(fen, PieceType::Pawn, "d4", true), ["c5", "e5"]);
    }

    #[test]
    fn test_en_passant() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1";
        assert_eq!(origins(fen, PieceType::Pawn, "d6", true), ["e5"]);
        assert!(origins(fen, PieceType::Pawn, "d6", false).is_empty());
    }

    #[test]
    fn test_en_passant_exposing_king_is_rejected() {
        // taking en passant would open the fifth rank to the rook
        let fen = "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1";
        assert!(origins(fen, PieceType::Pawn, "d6", true).is_empty());
    }

    #[test]
    fn test_knights() {
        let fen = "4k3/8/8/8/8/8/4N3/1N2K3 w - - 0 1";
        assert_eq!(origins(fen, PieceType::Knight, "c3", false), ["b1", "e2"]);
        assert_eq!(origins(STARTPOS, PieceType::Knight, "f3", false), ["g1"]);
        assert!(origins(STARTPOS, PieceType::Knight, "d2", false).is_empty());
    }

    #[test]
    fn test_hints_filter_candidates() {
        let pos = parse("4k3/8/8/8/8/8/4N3/1N2K3 w - - 0 1").unwrap();
        let found = resolve_origins(
            PieceType::Knight,
            Color::White,
            Some(File::FileB),
            None,
            sq("c3"),
            false,
            &pos,
        )
        .unwrap();
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![sq("b1")]);

        let found = resolve_origins(
            PieceType::Knight,
            Color::White,
            None,
            Some(Rank::Rank2),
            sq("c3"),
            false,
            &pos,
        )
        .unwrap();
        assert_eq!(found.into_iter().collect::<Vec<_>>(), vec![sq("e2")]);
    }

    #[test]
    fn test_sliders_respect_blocking() {
        let fen = "4k3/8/8/8/R2p3R/8/8/4K3 w - - 0 1";
        assert_eq!(origins(fen, PieceType::Rook, "d4", true), ["a4", "h4"]);
        assert_eq!(origins(fen, PieceType::Rook, "c4", false), ["a4"]);
        assert!(origins(fen, PieceType::Rook, "b4", true).is_empty());

        let fen = "4k3/8/8/8/8/2P5/8/B3K3 w - - 0 1";
        assert!(origins(fen, PieceType::Bishop, "d4", false).is_empty());
        assert_eq!(origins(fen, PieceType::Bishop, "b2", false), ["a1"]);

        let fen = "7Q/8/1k6/8/8/8/8/Q3K3 w - - 0 1";
        assert_eq!(origins(fen, PieceType::Queen, "d4", false), ["a1", "h8"]);
        // the king on e1 blocks the first rank
        assert_eq!(origins(fen, PieceType::Queen, "h1", false), ["h8"]);
    }

    #[test]
    fn test_capture_flag_must_match() {
        let fen = "4k3/8/8/8/8/2p5/8/1N2K3 w - - 0 1";
        assert_eq!(origins(fen, PieceType::Knight, "c3", true), ["b1"]);
        assert!(origins(fen, PieceType::Knight, "c3", false).is_empty());
        // own piece on the destination
        assert!(origins(STARTPOS, PieceType::Knight, "e2", true).is_empty());
        assert!(origins(STARTPOS, PieceType::Knight, "e2", false).is_empty());
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // knight on e2 is pinned by the rook on e8
        let fen = "4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1";
        assert!(origins(fen, PieceType::Knight, "c3", false).is_empty());

        // bishop pinned along the diagonal may still move along it
        let fen = "6k1/8/8/8/q7/8/2B5/3K4 w - - 0 1";
        assert_eq!(origins(fen, PieceType::Bishop, "b3", false), ["c2"]);
        assert!(origins(fen, PieceType::Bishop, "d3", false).is_empty());
    }

    #[test]
    fn test_king_moves() {
        let fen = "4k3/8/8/8/8/8/8/4K2r w - - 0 1";
        // f1 and d1 are on the rook's rank
        assert!(origins(fen, PieceType::King, "f1", false).is_empty());
        assert!(origins(fen, PieceType::King, "d1", false).is_empty());
        assert_eq!(origins(fen, PieceType::King, "e2", false), ["e1"]);
        // two-square king moves are not resolved here
        assert!(origins(fen, PieceType::King, "g1", false).is_empty());
    }

    #[test]
    fn test_missing_king_fails() {
        let pos = parse("4k3/8/8/8/8/8/8/1N6 w - - 0 1").unwrap();
        assert_eq!(
            resolve_origins(PieceType::Knight, Color::White, None, None, sq("c3"), false, &pos),
            Err(InvalidPosition::MissingKing(Color::White))
        );
    }
}
