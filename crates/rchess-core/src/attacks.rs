//! Attack tables and check detection
//!
//! Leaper attacks (knight, king, pawn) are precomputed once per process;
//! slider attacks walk rays and stop at the first occupied square.

use std::sync::OnceLock;

use crate::bitboard::Bitboard;
use crate::error::InvalidPosition;
use crate::position::Position;
use crate::types::{Color, PieceType, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Rook ray directions (file delta, rank delta)
const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Bishop ray directions (file delta, rank delta)
const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Pre-computed leaper tables
struct AttackTables {
    knight: [Bitboard; Square::NUM],
    king: [Bitboard; Square::NUM],
    /// pawn captures, [color][square]
    pawn: [[Bitboard; Square::NUM]; Color::NUM],
}

static ATTACK_TABLES: OnceLock<AttackTables> = OnceLock::new();

fn tables() -> &'static AttackTables {
    ATTACK_TABLES.get_or_init(AttackTables::new)
}

impl AttackTables {
    fn new() -> Self {
        let mut tables = AttackTables {
            knight: [Bitboard::EMPTY; Square::NUM],
            king: [Bitboard::EMPTY; Square::NUM],
            pawn: [[Bitboard::EMPTY; Square::NUM]; Color::NUM],
        };

        for sq in Square::all() {
            tables.knight[sq.index()] = step_attacks(sq, &KNIGHT_OFFSETS);
            tables.king[sq.index()] = step_attacks(sq, &KING_OFFSETS);
            for color in Color::ALL {
                let forward = color.forward();
                tables.pawn[color.index()][sq.index()] =
                    step_attacks(sq, &[(-1, forward), (1, forward)]);
            }
        }

        tables
    }
}

fn step_attacks(sq: Square, offsets: &[(i8, i8)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(df, dr)| sq.offset(df, dr))
        .fold(Bitboard::EMPTY, |bb, to| bb | Bitboard::from_square(to))
}

fn ray_attacks(sq: Square, directions: &[(i8, i8)], occupied: Bitboard) -> Bitboard {
    let mut bb = Bitboard::EMPTY;
    for &(df, dr) in directions {
        let mut cur = sq;
        while let Some(next) = cur.offset(df, dr) {
            bb.set(next);
            if occupied.contains(next) {
                break;
            }
            cur = next;
        }
    }
    bb
}

#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    tables().knight[sq.index()]
}

#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    tables().king[sq.index()]
}

/// Squares a pawn of `color` on `sq` captures on
#[inline]
pub fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    tables().pawn[color.index()][sq.index()]
}

/// Rook attacks, blocked by `occupied` (the blocker itself is included)
#[inline]
pub fn rook_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, &ORTHOGONALS, occupied)
}

/// Bishop attacks, blocked by `occupied` (the blocker itself is included)
#[inline]
pub fn bishop_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    ray_attacks(sq, &DIAGONALS, occupied)
}

#[inline]
pub fn queen_attacks(sq: Square, occupied: Bitboard) -> Bitboard {
    rook_attacks(sq, occupied) | bishop_attacks(sq, occupied)
}

/// Attack set of a `piece_type` of `color` standing on `sq`
pub fn attacks_from(piece_type: PieceType, color: Color, sq: Square, occupied: Bitboard) -> Bitboard {
    match piece_type {
        PieceType::Pawn => pawn_attacks(color, sq),
        PieceType::Knight => knight_attacks(sq),
        PieceType::Bishop => bishop_attacks(sq, occupied),
        PieceType::Rook => rook_attacks(sq, occupied),
        PieceType::Queen => queen_attacks(sq, occupied),
        PieceType::King => king_attacks(sq),
    }
}

/// Pieces of `by` attacking `sq`
///
/// Uses reverse lookups: a knight on X attacks `sq` iff a knight on `sq`
/// would attack X; for pawns the opposite color's pattern is used.
pub fn attackers_to(pos: &Position, sq: Square, by: Color) -> Bitboard {
    let occupied = pos.occupied();
    let rooks = pos.pieces(PieceType::Rook, by) | pos.pieces(PieceType::Queen, by);
    let bishops = pos.pieces(PieceType::Bishop, by) | pos.pieces(PieceType::Queen, by);

    (pawn_attacks(by.opponent(), sq) & pos.pieces(PieceType::Pawn, by))
        | (knight_attacks(sq) & pos.pieces(PieceType::Knight, by))
        | (king_attacks(sq) & pos.pieces(PieceType::King, by))
        | (rook_attacks(sq, occupied) & rooks)
        | (bishop_attacks(sq, occupied) & bishops)
}

/// Whether any piece of `by` attacks `sq`
#[inline]
pub fn is_square_attacked(pos: &Position, sq: Square, by: Color) -> bool {
    !attackers_to(pos, sq, by).is_empty()
}

/// Whether the king of `target` is attacked by the other side
pub fn is_attacked(pos: &Position, target: Color) -> Result<bool, InvalidPosition> {
    let king = pos.king_square(target)?;
    Ok(is_square_attacked(pos, king, target.opponent()))
}

impl Position {
    /// Check status of the side to move (`current`) or of the other side
    pub fn in_check(&self, current: bool) -> Result<bool, InvalidPosition> {
        let color = if current {
            self.side_to_move()
        } else {
            self.side_to_move().opponent()
        };
        is_attacked(self, color)
    }
}
