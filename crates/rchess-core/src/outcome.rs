//! Terminal outcome classification

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::InvalidPosition;
use crate::position::Position;
use crate::types::Color;

/// Half-moves without a capture or pawn move after which the game is drawn
pub const INACTIVITY_LIMIT: u32 = 100;

/// Result of a finished game from one color's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Integer encoding: win 1, draw 0, loss -1
    pub const fn reward(self) -> i32 {
        match self {
            Outcome::Win => 1,
            Outcome::Draw => 0,
            Outcome::Loss => -1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Draw => "draw",
        };
        f.write_str(s)
    }
}

/// Classify a position in which the side to move has no legal reply
///
/// Mate and stalemate are told apart by the check status only; whether a
/// legal reply exists is not verified here.
pub fn classify(pos: &Position, perspective: Color) -> Result<Outcome, InvalidPosition> {
    if pos.halfmove_clock() >= INACTIVITY_LIMIT {
        debug!("halfmove clock {} reached the limit", pos.halfmove_clock());
        return Ok(Outcome::Draw);
    }

    let outcome = if pos.in_check(true)? {
        if pos.side_to_move() == perspective {
            Outcome::Loss
        } else {
            Outcome::Win
        }
    } else {
        Outcome::Draw
    };
    Ok(outcome)
}
