//! Rank (1-8)

use super::Color;

/// Rank 1 (White's back rank) to 8 (Black's back rank)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Rank1 = 0,
    Rank2 = 1,
    Rank3 = 2,
    Rank4 = 3,
    Rank5 = 4,
    Rank6 = 5,
    Rank7 = 6,
    Rank8 = 7,
}

impl Rank {
    /// Number of ranks
    pub const NUM: usize = 8;

    /// All ranks, 1 first
    pub const ALL: [Rank; 8] = [
        Rank::Rank1,
        Rank::Rank2,
        Rank::Rank3,
        Rank::Rank4,
        Rank::Rank5,
        Rank::Rank6,
        Rank::Rank7,
        Rank::Rank8,
    ];

    #[inline]
    pub const fn from_u8(n: u8) -> Option<Rank> {
        if (n as usize) < Rank::NUM {
            Some(Rank::ALL[n as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Digit '1'-'8'
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }

    /// Parse a rank digit
    #[inline]
    pub const fn from_char(c: char) -> Option<Rank> {
        if c.is_ascii_digit() && c != '0' {
            Rank::from_u8(c as u8 - b'1')
        } else {
            None
        }
    }

    /// Rank shifted by `delta`, if still on the board
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Rank> {
        let n = self as i8 + delta;
        if n < 0 { None } else { Rank::from_u8(n as u8) }
    }

    /// Rank seen from `color`'s side (Rank1 is always the home rank)
    #[inline]
    pub const fn relative(self, color: Color) -> Rank {
        match color {
            Color::White => self,
            Color::Black => Rank::ALL[7 - self as usize],
        }
    }

    /// Rank pawns of `color` start on
    #[inline]
    pub const fn pawn_start(color: Color) -> Rank {
        Rank::Rank2.relative(color)
    }

    /// Rank pawns of `color` promote on
    #[inline]
    pub const fn promotion(color: Color) -> Rank {
        Rank::Rank8.relative(color)
    }
}
