//! rchess: chess move notation translator
//!
//! # Usage
//!
//! ```bash
//! rchess to-short --fen "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" e2e4
//! rchess to-long --fen "..." Nf3
//! rchess classify --fen "..." --perspective white
//! rchess check-fen "..."
//! rchess in-check --fen "..." [--opponent]
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use serde::Serialize;

use rchess_core::position::{color_to_move, is_well_formed, parse, serialize};
use rchess_core::{ChessParser, Color, Outcome};

#[derive(Parser, Debug)]
#[command(name = "rchess", version, about = "Translate chess moves between coordinate and short algebraic notation")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Coordinate form to short algebraic form (e2e4 -> e4)
    ToShort {
        #[command(flatten)]
        position: PositionArgs,
        /// Move in coordinate form
        #[arg(value_name = "MOVE")]
        mv: String,
    },
    /// Short algebraic form to coordinate form (Nf3 -> g1f3)
    ToLong {
        #[command(flatten)]
        position: PositionArgs,
        /// Move in short algebraic form
        #[arg(value_name = "MOVE")]
        mv: String,
    },
    /// Outcome of a position where the side to move has no legal reply
    Classify {
        #[arg(long)]
        fen: String,
        /// Color to report the outcome for
        #[arg(long, value_enum)]
        perspective: Side,
    },
    /// Shallow and full validation of a position string
    CheckFen {
        fen: String,
        /// Clear an en-passant target no pawn can capture on before keying
        #[arg(long)]
        sanitize_en_passant: bool,
    },
    /// Whether the side to move is in check
    InCheck {
        #[arg(long)]
        fen: String,
        /// Report on the side that just moved instead
        #[arg(long)]
        opponent: bool,
    },
}

#[derive(clap::Args, Debug)]
struct PositionArgs {
    /// Position string (6 fields)
    #[arg(long)]
    fen: String,
    /// Clear an en-passant target no pawn can capture on
    #[arg(long)]
    sanitize_en_passant: bool,
}

impl PositionArgs {
    fn parser(&self) -> Result<ChessParser> {
        let parser = ChessParser::new(&self.fen)
            .with_context(|| format!("invalid position string: {}", self.fen))?;
        if self.sanitize_en_passant {
            Ok(parser.with_sanitized_en_passant())
        } else {
            Ok(parser)
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Serialize)]
struct Translation<'a> {
    input: &'a str,
    output: String,
}

#[derive(Serialize)]
struct Classification {
    perspective: Color,
    outcome: Outcome,
    reward: i32,
}

#[derive(Serialize)]
struct FenReport {
    well_formed: bool,
    side_to_move: Option<Color>,
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct CheckStatus {
    color: Color,
    in_check: bool,
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn emit<T: Serialize>(json: bool, value: &T, plain: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(value).context("failed to encode JSON")?);
    } else {
        println!("{}", plain());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    debug!("{:?}", cli.cmd);

    match &cli.cmd {
        Cmd::ToShort { position, mv } => {
            let output = position
                .parser()?
                .long_to_short(mv)
                .with_context(|| format!("cannot convert {mv} to short form"))?;
            let result = Translation { input: mv, output };
            emit(cli.json, &result, || result.output.clone())
        }
        Cmd::ToLong { position, mv } => {
            let output = position
                .parser()?
                .short_to_long(mv)
                .with_context(|| format!("cannot convert {mv} to coordinate form"))?;
            let result = Translation { input: mv, output };
            emit(cli.json, &result, || result.output.clone())
        }
        Cmd::Classify { fen, perspective } => {
            let parser = ChessParser::new(fen)
                .with_context(|| format!("invalid position string: {fen}"))?;
            let perspective = Color::from(*perspective);
            let outcome = parser
                .result(perspective)
                .context("cannot classify position")?;
            let result = Classification {
                perspective,
                outcome,
                reward: outcome.reward(),
            };
            emit(cli.json, &result, || outcome.to_string())
        }
        Cmd::CheckFen {
            fen,
            sanitize_en_passant,
        } => {
            let parsed = parse(fen).map(|pos| {
                if *sanitize_en_passant {
                    pos.sanitize_en_passant()
                } else {
                    pos
                }
            });
            let report = FenReport {
                well_formed: is_well_formed(fen),
                side_to_move: color_to_move(fen).ok(),
                key: parsed.as_ref().ok().map(|pos| serialize(pos, true)),
                error: parsed.as_ref().err().map(|e| e.to_string()),
            };
            emit(cli.json, &report, || {
                let side = report
                    .side_to_move
                    .map_or_else(|| "-".to_string(), |c| c.to_string());
                let key = report.key.clone().unwrap_or_else(|| "-".to_string());
                format!(
                    "well-formed: {}\nside to move: {side}\nkey: {key}",
                    report.well_formed
                )
            })?;
            parsed
                .map(|_| ())
                .with_context(|| format!("invalid position string: {fen}"))
        }
        Cmd::InCheck { fen, opponent } => {
            let parser = ChessParser::new(fen)
                .with_context(|| format!("invalid position string: {fen}"))?;
            let current = !*opponent;
            let in_check = parser.check(current).context("cannot evaluate check")?;
            let side = parser.position().side_to_move();
            let result = CheckStatus {
                color: if current { side } else { side.opponent() },
                in_check,
            };
            emit(cli.json, &result, || in_check.to_string())
        }
    }
}
