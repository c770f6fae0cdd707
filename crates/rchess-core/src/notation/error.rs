//! Error type for move notation

use crate::error::InvalidPosition;
use crate::types::Square;

/// Malformed or unresolvable move token
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("malformed move token '{0}'")]
    Malformed(String),

    #[error("destination of '{0}' is not a board square")]
    BadDestination(String),

    #[error("no piece on origin square {0}")]
    EmptyOrigin(Square),

    #[error("no legal origin for '{0}'")]
    NoCandidate(String),

    #[error("'{token}' is ambiguous between {}", join_squares(.candidates))]
    Ambiguous { token: String, candidates: Vec<Square> },

    #[error(transparent)]
    Position(#[from] InvalidPosition),
}

fn join_squares(squares: &[Square]) -> String {
    squares
        .iter()
        .map(|sq| sq.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let err = NotationError::Ambiguous {
            token: "Nc3".to_string(),
            candidates: vec![
                Square::from_coord("b1").unwrap(),
                Square::from_coord("d2").unwrap(),
            ],
        };
        assert_eq!(err.to_string(), "'Nc3' is ambiguous between b1, d2");
    }
}
