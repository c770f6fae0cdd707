//! Position body

use std::fmt;
use std::str::FromStr;

use log::debug;

use super::{CastlingRights, FenError};
use crate::bitboard::Bitboard;
use crate::error::InvalidPosition;
use crate::types::{Color, File, Piece, PieceType, Square};

/// Immutable chess position
///
/// Built once from a position string; every transformation returns a new
/// value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; Square::NUM],
    by_color: [Bitboard; Color::NUM],
    by_type: [Bitboard; PieceType::NUM],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Position {
    /// Empty board, White to move, no rights, counters at their initial values
    pub(crate) fn empty() -> Self {
        Position {
            board: [None; Square::NUM],
            by_color: [Bitboard::EMPTY; Color::NUM],
            by_type: [Bitboard::EMPTY; PieceType::NUM],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    pub(crate) fn put_piece(&mut self, sq: Square, piece: Piece) {
        self.remove_piece(sq);
        self.board[sq.index()] = Some(piece);
        self.by_color[piece.color.index()].set(sq);
        self.by_type[piece.piece_type.index()].set(sq);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.board[sq.index()].take()?;
        self.by_color[piece.color.index()].clear(sq);
        self.by_type[piece.piece_type.index()].clear(sq);
        Some(piece)
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    pub(crate) fn set_counters(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    /// Piece on a square
    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Squares holding pieces of `piece_type` and `color`
    #[inline]
    pub fn pieces(&self, piece_type: PieceType, color: Color) -> Bitboard {
        self.by_type[piece_type.index()] & self.by_color[color.index()]
    }

    /// Squares holding pieces of `color`
    #[inline]
    pub fn pieces_of(&self, color: Color) -> Bitboard {
        self.by_color[color.index()]
    }

    /// Squares holding any piece
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_color[0] | self.by_color[1]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Half-moves since the last capture or pawn advance
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Square of `color`'s king
    ///
    /// Fails unless exactly one such king is on the board.
    pub fn king_square(&self, color: Color) -> Result<Square, InvalidPosition> {
        let kings = self.pieces(PieceType::King, color);
        match kings.count_ones() {
            0 => Err(InvalidPosition::MissingKing(color)),
            1 => kings.into_iter().next().ok_or(InvalidPosition::MissingKing(color)),
            count => Err(InvalidPosition::MultipleKings { color, count }),
        }
    }

    /// Position after moving the piece on `from` to `to`
    ///
    /// Handles captures, en-passant captures, promotion, the rook leg of a
    /// castling king move, and the bookkeeping fields. No legality check is
    /// made; an empty origin yields an unchanged copy.
    pub fn with_move(&self, from: Square, to: Square, promotion: Option<PieceType>) -> Position {
        let mut next = self.clone();
        let Some(piece) = next.remove_piece(from) else {
            return next;
        };
        let color = piece.color;

        let mut captured = next.remove_piece(to);
        if piece.piece_type == PieceType::Pawn
            && captured.is_none()
            && self.en_passant == Some(to)
            && from.file() != to.file()
        {
            captured = next.remove_piece(Square::new(to.file(), from.rank()));
        }

        let placed = match promotion {
            Some(promoted) if piece.piece_type == PieceType::Pawn => Piece::new(promoted, color),
            _ => piece,
        };
        next.put_piece(to, placed);

        if piece.piece_type == PieceType::King && from.file().distance(to.file()) == 2 {
            let (rook_from, rook_to) = if to.file() == File::FileG {
                (File::FileH, File::FileF)
            } else {
                (File::FileA, File::FileD)
            };
            let rank = from.rank();
            if let Some(rook) = next.remove_piece(Square::new(rook_from, rank)) {
                next.put_piece(Square::new(rook_to, rank), rook);
            }
        }

        next.update_castling_rights(piece, from, to);

        next.en_passant = None;
        if piece.piece_type == PieceType::Pawn && from.rank().index().abs_diff(to.rank().index()) == 2
        {
            next.en_passant = from.offset(0, color.forward());
        }

        if piece.piece_type == PieceType::Pawn || captured.is_some() {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            next.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        next.side_to_move = color.opponent();
        next
    }

    fn update_castling_rights(&mut self, moved: Piece, from: Square, to: Square) {
        if moved.piece_type == PieceType::King {
            self.castling.revoke_all(moved.color);
        }
        for sq in [from, to] {
            match sq {
                Square::H1 => self.castling.white_kingside = false,
                Square::A1 => self.castling.white_queenside = false,
                Square::H8 => self.castling.black_kingside = false,
                Square::A8 => self.castling.black_queenside = false,
                _ => {}
            }
        }
    }

    /// Copy with the en-passant target cleared when no pawn of the side to
    /// move stands next to the pawn that just double-stepped
    pub fn sanitize_en_passant(&self) -> Position {
        let Some(target) = self.en_passant else {
            return self.clone();
        };
        let us = self.side_to_move;
        let capturer_rank = target.rank().offset(-us.forward());
        let pawns = self.pieces(PieceType::Pawn, us);
        let can_capture = capturer_rank.is_some_and(|rank| {
            [-1, 1]
                .into_iter()
                .filter_map(|delta| target.file().offset(delta))
                .any(|file| pawns.contains(Square::new(file, rank)))
        });
        if can_capture {
            return self.clone();
        }

        debug!("clearing en-passant target {target}: no {us} pawn can capture");
        let mut next = self.clone();
        next.en_passant = None;
        next
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::serialize(self, false))
    }
}
