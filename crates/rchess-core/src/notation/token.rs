//! Move tokens and their tokenizers

use std::fmt;

use log::trace;

use super::NotationError;
use crate::types::{File, PieceType, Rank, Square};

/// Trailing check / mate marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckMarker {
    Check,
    Mate,
}

impl CheckMarker {
    pub const fn from_char(c: char) -> Option<CheckMarker> {
        match c {
            '+' => Some(CheckMarker::Check),
            '#' => Some(CheckMarker::Mate),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        match self {
            CheckMarker::Check => '+',
            CheckMarker::Mate => '#',
        }
    }
}

/// Split a trailing `+` / `#` off `text`
fn split_marker(text: &str) -> (&str, Option<CheckMarker>) {
    match text.chars().last().and_then(CheckMarker::from_char) {
        Some(marker) => (&text[..text.len() - 1], Some(marker)),
        None => (text, None),
    }
}

fn write_marker(f: &mut fmt::Formatter<'_>, marker: Option<CheckMarker>) -> fmt::Result {
    match marker {
        Some(marker) => write!(f, "{}", marker.to_char()),
        None => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

/// Castling literal, identical in both notations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingToken {
    pub side: CastlingSide,
    pub marker: Option<CheckMarker>,
}

impl CastlingToken {
    /// Recognize `O-O` / `O-O-O` with an optional trailing marker
    pub fn parse(text: &str) -> Option<CastlingToken> {
        let (body, marker) = split_marker(text);
        let side = match body {
            "O-O" => CastlingSide::Kingside,
            "O-O-O" => CastlingSide::Queenside,
            _ => return None,
        };
        Some(CastlingToken { side, marker })
    }
}

impl fmt::Display for CastlingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.side {
            CastlingSide::Kingside => f.write_str("O-O")?,
            CastlingSide::Queenside => f.write_str("O-O-O")?,
        }
        write_marker(f, self.marker)
    }
}

/// Coordinate-form move: origin, destination, optional promotion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongToken {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub marker: Option<CheckMarker>,
}

impl LongToken {
    /// Tokenize `e2e4`, `e7e8q`, `e7e8Q+`, ...
    pub fn parse(text: &str) -> Result<LongToken, NotationError> {
        let malformed = || NotationError::Malformed(text.to_string());
        let (body, marker) = split_marker(text);
        let chars: Vec<char> = body.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(malformed());
        }

        let square = |file: char, rank: char| {
            File::from_char(file)
                .zip(Rank::from_char(rank))
                .map(|(file, rank)| Square::new(file, rank))
        };
        let from = square(chars[0], chars[1]).ok_or_else(malformed)?;
        let to = square(chars[2], chars[3]).ok_or_else(malformed)?;

        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match PieceType::from_char(c) {
                Some(piece_type) if piece_type.is_promotion_target() => Some(piece_type),
                _ => return Err(malformed()),
            },
        };

        trace!("long token {text}: {from} -> {to}, promotion {promotion:?}");
        Ok(LongToken {
            from,
            to,
            promotion,
            marker,
        })
    }
}

/// Coordinate form without the check marker, promotion letter in lowercase
impl fmt::Display for LongToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.to_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Algebraic-form move, notation independent
///
/// Origin file/rank are only the hints the short form carries, not
/// necessarily the full origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveToken {
    pub piece_type: PieceType,
    pub from_file: Option<File>,
    pub from_rank: Option<Rank>,
    pub to: Square,
    pub capture: bool,
    pub promotion: Option<PieceType>,
    pub marker: Option<CheckMarker>,
}

impl MoveToken {
    /// Tokenize the short form
    ///
    /// Grammar: `[PNBRQK]? [a-h]? [1-8]? x? [a-h][1-8] (=?[QRBN])? [+#]?`
    pub fn parse(text: &str) -> Result<MoveToken, NotationError> {
        let malformed = || NotationError::Malformed(text.to_string());
        let (body, marker) = split_marker(text);
        let mut chars: Vec<char> = body.chars().collect();

        // promotion: "=Q", or a bare "Q" right after the destination rank
        let mut promotion = None;
        if let Some(&last) = chars.last() {
            if let Some(piece_type) = PieceType::from_char(last).filter(|_| last.is_ascii_uppercase())
            {
                let before = chars.len().checked_sub(2).map(|i| chars[i]);
                match before {
                    Some('=') => {
                        chars.truncate(chars.len() - 2);
                    }
                    Some(c) if c.is_ascii_digit() => {
                        chars.truncate(chars.len() - 1);
                    }
                    _ => return Err(malformed()),
                }
                if !piece_type.is_promotion_target() {
                    return Err(malformed());
                }
                promotion = Some(piece_type);
            }
        }

        if chars.len() < 2 {
            return Err(malformed());
        }
        let dest_file = chars[chars.len() - 2];
        let dest_rank = chars[chars.len() - 1];
        if !dest_file.is_ascii_lowercase() || !dest_rank.is_ascii_digit() {
            return Err(malformed());
        }
        let to = File::from_char(dest_file)
            .zip(Rank::from_char(dest_rank))
            .map(|(file, rank)| Square::new(file, rank))
            .ok_or_else(|| NotationError::BadDestination(text.to_string()))?;

        let mut prefix = chars[..chars.len() - 2].iter().copied().peekable();
        let piece_type = match prefix.peek().copied() {
            Some(c) if c.is_ascii_uppercase() => {
                prefix.next();
                PieceType::from_char(c).ok_or_else(malformed)?
            }
            _ => PieceType::Pawn,
        };
        let from_file = prefix.next_if(|c| File::from_char(*c).is_some()).and_then(File::from_char);
        let from_rank = prefix.next_if(|c| Rank::from_char(*c).is_some()).and_then(Rank::from_char);
        let capture = prefix.next_if_eq(&'x').is_some();
        if prefix.next().is_some() {
            return Err(malformed());
        }

        let token = MoveToken {
            piece_type,
            from_file,
            from_rank,
            to,
            capture,
            promotion,
            marker,
        };
        trace!("short token {text}: {token:?}");
        Ok(token)
    }
}

/// Short form: piece letter, disambiguator, capture, destination,
/// promotion, marker
impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.piece_type != PieceType::Pawn {
            write!(f, "{}", self.piece_type.to_char())?;
        }
        if let Some(file) = self.from_file {
            write!(f, "{}", file.to_char())?;
        }
        if let Some(rank) = self.from_rank {
            write!(f, "{}", rank.to_char())?;
        }
        if self.capture {
            f.write_str("x")?;
        }
        write!(f, "{}", self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion.to_char())?;
        }
        write_marker(f, self.marker)
    }
}
