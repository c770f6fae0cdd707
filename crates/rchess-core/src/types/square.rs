//! Square

use std::fmt;

use super::{File, Rank};

/// Board square (0-63)
///
/// Layout: rank-major, a1=0, b1=1, ..., h1=7, a2=8, ..., h8=63.
/// The derived order is the total order used for square sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Number of squares
    pub const NUM: usize = 64;

    pub const A1: Square = Square::new(File::FileA, Rank::Rank1);
    pub const C1: Square = Square::new(File::FileC, Rank::Rank1);
    pub const E1: Square = Square::new(File::FileE, Rank::Rank1);
    pub const G1: Square = Square::new(File::FileG, Rank::Rank1);
    pub const H1: Square = Square::new(File::FileH, Rank::Rank1);
    pub const A8: Square = Square::new(File::FileA, Rank::Rank8);
    pub const C8: Square = Square::new(File::FileC, Rank::Rank8);
    pub const E8: Square = Square::new(File::FileE, Rank::Rank8);
    pub const G8: Square = Square::new(File::FileG, Rank::Rank8);
    pub const H8: Square = Square::new(File::FileH, Rank::Rank8);

    /// Build a square from file and rank
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Square {
        Square(rank as u8 * 8 + file as u8)
    }

    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 % 8) as usize]
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 / 8) as usize]
    }

    /// Index for array access
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Build from an index (range checked)
    #[inline]
    pub const fn from_u8(n: u8) -> Option<Square> {
        if (n as usize) < Square::NUM {
            Some(Square(n))
        } else {
            None
        }
    }

    /// Square shifted by file/rank deltas, if still on the board
    #[inline]
    pub const fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        match (self.file().offset(file_delta), self.rank().offset(rank_delta)) {
            (Some(file), Some(rank)) => Some(Square::new(file, rank)),
            _ => None,
        }
    }

    /// Parse coordinate notation ("e4")
    pub fn from_coord(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = File::from_char(chars.next()?)?;
        let rank = Rank::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Square::new(file, rank))
    }

    /// Iterator over all squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Square::NUM as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file().to_char(), self.rank().to_char())
    }
}
