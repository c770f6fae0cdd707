//! Castling rights

use std::fmt;

use crate::types::Color;

/// Castling availability, one flag per color and wing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    /// No castling available ("-")
    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    /// Everything available ("KQkq")
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        !(self.white_kingside || self.white_queenside || self.black_kingside || self.black_queenside)
    }

    /// Drop both rights of `color`
    #[inline]
    pub(crate) fn revoke_all(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Parse the castling field ("KQkq", "Kq", "-", ...)
    ///
    /// Letters may appear in any order but at most once each.
    pub fn from_fen(s: &str) -> Option<CastlingRights> {
        if s == "-" {
            return Some(CastlingRights::NONE);
        }
        if s.is_empty() {
            return None;
        }
        let mut rights = CastlingRights::NONE;
        for c in s.chars() {
            let flag = match c {
                'K' => &mut rights.white_kingside,
                'Q' => &mut rights.white_queenside,
                'k' => &mut rights.black_kingside,
                'q' => &mut rights.black_queenside,
                _ => return None,
            };
            if *flag {
                return None;
            }
            *flag = true;
        }
        Some(rights)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let flags = [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ];
        for (set, c) in flags {
            if set {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_castling_from_fen() {
        assert_eq!(CastlingRights::from_fen("KQkq"), Some(CastlingRights::ALL));
        assert_eq!(CastlingRights::from_fen("-"), Some(CastlingRights::NONE));

        let rights = CastlingRights::from_fen("qK").unwrap();
        assert!(rights.kingside(Color::White));
        assert!(!rights.queenside(Color::White));
        assert!(rights.queenside(Color::Black));
        assert!(!rights.kingside(Color::Black));

        assert_eq!(CastlingRights::from_fen("KK"), None);
        assert_eq!(CastlingRights::from_fen("KX"), None);
        assert_eq!(CastlingRights::from_fen(""), None);
    }

    #[test]
    fn test_castling_display_is_canonical() {
        assert_eq!(CastlingRights::from_fen("qkQK").unwrap().to_string(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_string(), "-");
    }
}
