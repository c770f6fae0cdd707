//! Position string (FEN) parsing and serialization

use super::{CastlingRights, Position};
use crate::types::{Color, File, Piece, Rank, Square};

/// Standard starting position
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Number of fields in a complete position string
const FULL_FIELDS: usize = 6;

/// Fields needed to read the side to move
const MIN_FIELDS: usize = 4;

/// Error type for position string parsing
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("board has {0} rank groups (expected 8)")]
    RankCount(usize),

    #[error("rank {rank} describes {squares} squares (expected 8)")]
    RankLength { rank: usize, squares: usize },

    #[error("unrecognized piece letter '{0}'")]
    BadPiece(char),

    #[error("invalid side to move '{0}' (expected 'w' or 'b')")]
    BadColor(String),

    #[error("invalid castling rights '{0}'")]
    BadCastling(String),

    #[error("invalid en-passant target '{0}'")]
    BadEnPassant(String),

    #[error("invalid move counter '{0}'")]
    BadCounter(String),
}

/// Parse a complete six-field position string
pub fn parse(text: &str) -> Result<Position, FenError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != FULL_FIELDS {
        return Err(FenError::FieldCount {
            expected: FULL_FIELDS,
            found: fields.len(),
        });
    }

    let mut pos = Position::empty();
    parse_board(fields[0], &mut pos)?;
    pos.set_side_to_move(parse_color(fields[1])?);

    let castling = CastlingRights::from_fen(fields[2])
        .ok_or_else(|| FenError::BadCastling(fields[2].to_string()))?;
    pos.set_castling_rights(castling);
    pos.set_en_passant(parse_en_passant(fields[3], pos.side_to_move())?);

    let halfmove_clock = parse_counter(fields[4])?;
    let fullmove_number = parse_counter(fields[5])?;
    pos.set_counters(halfmove_clock, fullmove_number);

    Ok(pos)
}

fn parse_board(board: &str, pos: &mut Position) -> Result<(), FenError> {
    let groups: Vec<&str> = board.split('/').collect();
    if groups.len() != Rank::NUM {
        return Err(FenError::RankCount(groups.len()));
    }

    // first group is rank 8
    for (group, rank) in groups.iter().zip(Rank::ALL.into_iter().rev()) {
        let mut file_idx = 0usize;
        for c in group.chars() {
            match c {
                '1'..='8' => {
                    file_idx += (c as u8 - b'0') as usize;
                }
                _ => {
                    let piece = Piece::from_fen_char(c).ok_or(FenError::BadPiece(c))?;
                    if let Some(&file) = File::ALL.get(file_idx) {
                        pos.put_piece(Square::new(file, rank), piece);
                    }
                    file_idx += 1;
                }
            }
        }
        if file_idx != File::NUM {
            return Err(FenError::RankLength {
                rank: rank.index() + 1,
                squares: file_idx,
            });
        }
    }
    Ok(())
}

fn parse_color(field: &str) -> Result<Color, FenError> {
    let mut chars = field.chars();
    match (chars.next().and_then(Color::from_fen_char), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(FenError::BadColor(field.to_string())),
    }
}

/// The target lies behind an enemy pawn that just double-stepped, so it is on
/// the sixth rank as seen from the side to move
fn parse_en_passant(field: &str, side_to_move: Color) -> Result<Option<Square>, FenError> {
    if field == "-" {
        return Ok(None);
    }
    match Square::from_coord(field) {
        Some(sq) if sq.rank() == Rank::Rank6.relative(side_to_move) => Ok(Some(sq)),
        _ => Err(FenError::BadEnPassant(field.to_string())),
    }
}

fn parse_counter(field: &str) -> Result<u32, FenError> {
    field
        .parse()
        .map_err(|_| FenError::BadCounter(field.to_string()))
}

/// Serialize a position
///
/// `reduced` drops the two move counters, leaving a key that identifies the
/// position independently of move-count bookkeeping.
pub fn serialize(pos: &Position, reduced: bool) -> String {
    let mut board = String::new();
    for (i, rank) in Rank::ALL.into_iter().rev().enumerate() {
        if i > 0 {
            board.push('/');
        }
        let mut empty = 0;
        for file in File::ALL {
            match pos.piece_on(Square::new(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        board.push_str(&empty.to_string());
                        empty = 0;
                    }
                    board.push(piece.to_fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            board.push_str(&empty.to_string());
        }
    }

    let en_passant = pos
        .en_passant()
        .map_or_else(|| "-".to_string(), |sq| sq.to_string());

    let mut parts = vec![
        board,
        pos.side_to_move().to_fen_char().to_string(),
        pos.castling_rights().to_string(),
        en_passant,
    ];
    if !reduced {
        parts.push(pos.halfmove_clock().to_string());
        parts.push(pos.fullmove_number().to_string());
    }
    parts.join(" ")
}

/// Side to move of a position string, reading nothing else
///
/// Lenient: only the first letter of the second field is looked at, so
/// `white` reads as White. `parse` requires the field to be exactly `w`/`b`.
pub fn color_to_move(text: &str) -> Result<Color, FenError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        return Err(FenError::FieldCount {
            expected: MIN_FIELDS,
            found: fields.len(),
        });
    }
    fields[1]
        .chars()
        .next()
        .and_then(Color::from_fen_char)
        .ok_or_else(|| FenError::BadColor(fields[1].to_string()))
}

/// Shallow structural check: at least four fields and eight rank groups
/// (ignoring trailing empty ones)
///
/// Piece letters, counters and the other fields are not inspected.
pub fn is_well_formed(text: &str) -> bool {
    let mut fields = text.split_whitespace();
    let Some(board) = fields.next() else {
        return false;
    };
    // trailing empty groups do not count
    let groups = board.trim_end_matches('/').split('/').count();
    fields.count() + 1 >= MIN_FIELDS && groups == Rank::NUM
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceType;
    use proptest::prelude::*;

    fn sq(s: &str) -> Square {
        Square::from_coord(s).unwrap()
    }

    #[test]
    fn test_parse_startpos() {
        let pos = parse(STARTPOS).unwrap();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.castling_rights(), CastlingRights::ALL);
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
        assert_eq!(pos.piece_on(sq("a1")), Some(Piece::new(PieceType::Rook, Color::White)));
        assert_eq!(pos.piece_on(sq("d8")), Some(Piece::new(PieceType::Queen, Color::Black)));
        assert_eq!(pos.piece_on(sq("e4")), None);
    }

    #[test]
    fn test_parse_fields() {
        let pos = parse("4k3/8/8/3pP3/8/8/8/4K3 w Kq d6 12 40").unwrap();
        assert_eq!(pos.en_passant(), Some(sq("d6")));
        assert!(pos.castling_rights().kingside(Color::White));
        assert!(pos.castling_rights().queenside(Color::Black));
        assert!(!pos.castling_rights().queenside(Color::White));
        assert_eq!(pos.halfmove_clock(), 12);
        assert_eq!(pos.fullmove_number(), 40);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenError::FieldCount { expected: 6, found: 4 })
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankCount(7))
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBXKBNR w KQkq - 0 1"),
            Err(FenError::BadPiece('X'))
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenError::BadColor("x".to_string()))
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - zero 1"),
            Err(FenError::BadCounter("zero".to_string()))
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 -1"),
            Err(FenError::BadCounter("-1".to_string()))
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1"),
            Err(FenError::BadCastling("KQkx".to_string()))
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1"),
            Err(FenError::BadEnPassant("e4".to_string()))
        );
    }

    #[test]
    fn test_en_passant_rank_follows_side_to_move() {
        // a rank-3 target only exists after a white double step
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1"),
            Err(FenError::BadEnPassant("e3".to_string()))
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e6 0 1"),
            Err(FenError::BadEnPassant("e6".to_string()))
        );
        let pos = parse("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(pos.en_passant(), Some(sq("e3")));
    }

    #[test]
    fn test_parse_rank_length() {
        assert_eq!(
            parse("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankLength { rank: 7, squares: 7 })
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::BadPiece('9'))
        );
        assert_eq!(
            parse("rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Ok(parse(STARTPOS).unwrap())
        );
        assert_eq!(
            parse("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenError::RankLength { rank: 8, squares: 9 })
        );
    }

    #[test]
    fn test_serialize() {
        let pos = parse(STARTPOS).unwrap();
        assert_eq!(serialize(&pos, false), STARTPOS);
        assert_eq!(
            serialize(&pos, true),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"
        );

        let text = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b Kq a3 7 23";
        assert_eq!(serialize(&parse(text).unwrap(), false), text);
    }

    #[test]
    fn test_reduced_key_ignores_counters() {
        let a = parse("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let b = parse("4k3/8/8/8/8/8/8/4K3 w - - 31 77").unwrap();
        assert_ne!(serialize(&a, false), serialize(&b, false));
        assert_eq!(serialize(&a, true), serialize(&b, true));
    }

    #[test]
    fn test_color_to_move() {
        assert_eq!(color_to_move(STARTPOS), Ok(Color::White));
        assert_eq!(color_to_move("8/8/8/8/8/8/8/8 b - -"), Ok(Color::Black));
        assert_eq!(
            color_to_move("8/8/8/8/8/8/8/8 b -"),
            Err(FenError::FieldCount { expected: 4, found: 3 })
        );
        assert_eq!(
            color_to_move("8/8/8/8/8/8/8/8 x - -"),
            Err(FenError::BadColor("x".to_string()))
        );
    }

    #[test]
    fn test_color_to_move_reads_first_letter() {
        assert_eq!(color_to_move("8/8/8/8/8/8/8/8 white - -"), Ok(Color::White));
        assert_eq!(color_to_move("8/8/8/8/8/8/8/8 black - -"), Ok(Color::Black));
        assert_eq!(
            color_to_move("8/8/8/8/8/8/8/8 White - -"),
            Err(FenError::BadColor("White".to_string()))
        );
        // the full parser stays strict
        assert_eq!(
            parse("8/8/8/8/8/8/8/8 white - - 0 1"),
            Err(FenError::BadColor("white".to_string()))
        );
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed(STARTPOS));
        assert!(is_well_formed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"));
        assert!(is_well_formed("zzz/yyy/8/8/8/8/8/8 ? ? ?"));
        assert!(!is_well_formed("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq"));
        assert!(!is_well_formed("8/8/8/8/8/8/8 w - - 0 1"));
        assert!(!is_well_formed("8/8/8/8/8/8/8/8/8 w - - 0 1"));
        assert!(!is_well_formed(""));
    }

    #[test]
    fn test_is_well_formed_ignores_trailing_empty_groups() {
        assert!(!is_well_formed("8/8/8/8/8/8/8/ w - -"));
        assert!(is_well_formed("8/8/8/8/8/8/8/8/ w - -"));
        assert!(!is_well_formed("//////// w - -"));
    }

    fn arb_group() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9]{1,10}"
    }

    fn arb_field() -> impl Strategy<Value = String> {
        "[!-~]{1,6}"
    }

    fn arb_piece() -> impl Strategy<Value = Option<Piece>> {
        prop_oneof![
            3 => Just(None),
            1 => (0..PieceType::NUM, any::<bool>()).prop_map(|(t, white)| {
                let color = if white { Color::White } else { Color::Black };
                Some(Piece::new(PieceType::ALL[t], color))
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_well_formed_accepts_any_letters(
            groups in proptest::collection::vec(arb_group(), 8),
            extra in proptest::collection::vec(arb_field(), 3..6),
        ) {
            let text = format!("{} {}", groups.join("/"), extra.join(" "));
            prop_assert!(is_well_formed(&text));
        }

        #[test]
        fn prop_well_formed_rejects_wrong_group_count(
            groups in proptest::collection::vec(arb_group(), 1..12),
            extra in proptest::collection::vec(arb_field(), 3..6),
        ) {
            prop_assume!(groups.len() != 8);
            let text = format!("{} {}", groups.join("/"), extra.join(" "));
            prop_assert!(!is_well_formed(&text));
        }

        #[test]
        fn prop_serialized_placement_parses_back(
            squares in proptest::collection::vec(arb_piece(), 64),
            black in any::<bool>(),
            halfmove in 0u32..200,
            fullmove in 1u32..500,
        ) {
            let board: Vec<String> = (0..8)
                .rev()
                .map(|rank| {
                    let mut out = String::new();
                    let mut empty = 0;
                    for file in 0..8 {
                        match squares[rank * 8 + file] {
                            Some(piece) => {
                                if empty > 0 {
                                    out.push_str(&empty.to_string());
                                    empty = 0;
                                }
                                out.push(piece.to_fen_char());
                            }
                            None => empty += 1,
                        }
                    }
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                    }
                    out
                })
                .collect();
            let side = if black { 'b' } else { 'w' };
            let text = format!("{} {side} - - {halfmove} {fullmove}", board.join("/"));

            let pos = parse(&text).unwrap();
            for sq in Square::all() {
                prop_assert_eq!(pos.piece_on(sq), squares[sq.index()]);
            }
            prop_assert_eq!(serialize(&pos, false), text);
        }
    }
}
