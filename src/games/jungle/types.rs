//! Core domain types for the Jungle board.
//!
//! The orchestration layer only threads these values between the engine and
//! the renderer. It never interprets piece kinds and never decides legality.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of columns on the board.
pub const BOARD_WIDTH: u8 = 7;

/// Number of rows on the board.
pub const BOARD_HEIGHT: u8 = 9;

/// Player in the game.
///
/// On the wire and in the renderer players are the strings `"blue"` and `"red"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Player {
    /// Blue (always moves first).
    Blue,
    /// Red.
    Red,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Blue => Player::Red,
            Player::Red => Player::Blue,
        }
    }

    /// Wire name of the player.
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Coordinates outside the 7×9 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Position ({}, {}) is outside the {}x{} board", x, y, BOARD_WIDTH, BOARD_HEIGHT)]
pub struct PositionError {
    /// Requested column.
    pub x: i64,
    /// Requested row.
    pub y: i64,
}

/// A cell on the board, `x` in `[0, 7)` and `y` in `[0, 9)`.
///
/// Serialized as the `[x, y]` pair the engine uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i64, i64)", into = "(u8, u8)")]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a position, rejecting coordinates off the board.
    #[instrument]
    pub fn new(x: i64, y: i64) -> Result<Self, PositionError> {
        let on_board = (0..i64::from(BOARD_WIDTH)).contains(&x)
            && (0..i64::from(BOARD_HEIGHT)).contains(&y);
        if on_board {
            Ok(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            Err(PositionError { x, y })
        }
    }

    /// Column.
    pub fn x(self) -> u8 {
        self.x
    }

    /// Row.
    pub fn y(self) -> u8 {
        self.y
    }

    /// Row-major index into a 63-cell grid.
    pub fn index(self) -> usize {
        usize::from(self.y) * usize::from(BOARD_WIDTH) + usize::from(self.x)
    }

    /// Every cell, row by row.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_HEIGHT).flat_map(|y| (0..BOARD_WIDTH).map(move |x| Position { x, y }))
    }
}

impl TryFrom<(i64, i64)> for Position {
    type Error = PositionError;

    fn try_from((x, y): (i64, i64)) -> Result<Self, Self::Error> {
        Position::new(x, y)
    }
}

impl From<Position> for (u8, u8) {
    fn from(pos: Position) -> Self {
        (pos.x, pos.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Opaque piece identifier understood by the renderer ("rat", "lion", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, derive_more::From)]
#[serde(transparent)]
pub struct PieceKind(String);

impl PieceKind {
    /// Wraps a renderer piece identifier.
    pub fn new(kind: impl Into<String>) -> Self {
        Self(kind.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PieceKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

/// A terrain mark attached to a cell during board setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terrain {
    /// A player's den.
    Den(Player),
    /// A trap next to a player's den.
    Trap(Player),
    /// Plain ground.
    Grass,
    /// River cell.
    Water,
}

/// AI search horizon handed to the engine.
///
/// Always within `1..=6`; out-of-range requests are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(from = "i64", into = "u8")]
#[display("level {}", _0)]
pub struct Difficulty(u8);

impl Difficulty {
    /// Easiest level.
    pub const MIN: u8 = 1;
    /// Hardest level.
    pub const MAX: u8 = 6;

    /// Creates a difficulty, clamping into range.
    pub fn new(level: u8) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    /// Search horizon.
    pub fn level(self) -> u8 {
        self.0
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<u8> for Difficulty {
    fn from(level: u8) -> Self {
        Self::new(level)
    }
}

impl From<i64> for Difficulty {
    fn from(level: i64) -> Self {
        let clamped = level.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self::new(u8::try_from(clamped).unwrap_or(Self::MIN))
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_player_wire_names() {
        assert_eq!(Player::Blue.to_string(), "blue");
        assert_eq!(Player::from_str("red").unwrap(), Player::Red);
        assert!(Player::from_str("green").is_err());
    }

    #[test]
    fn test_opponent_alternates() {
        assert_eq!(Player::Blue.opponent(), Player::Red);
        assert_eq!(Player::Red.opponent().opponent(), Player::Red);
    }

    #[test]
    fn test_position_bounds() {
        assert!(Position::new(6, 8).is_ok());
        assert_eq!(Position::new(7, 0), Err(PositionError { x: 7, y: 0 }));
        assert!(Position::new(0, -1).is_err());
    }

    #[test]
    fn test_position_from_wire_pair() {
        let pos: Position = serde_json::from_str("[3, 8]").unwrap();
        assert_eq!((pos.x(), pos.y()), (3, 8));
        assert!(serde_json::from_str::<Position>("[3, 9]").is_err());
    }

    #[test]
    fn test_all_positions_cover_grid() {
        let all: Vec<Position> = Position::all().collect();
        assert_eq!(all.len(), 63);
        assert!(all.iter().enumerate().all(|(i, p)| p.index() == i));
    }

    #[test]
    fn test_difficulty_clamps() {
        assert_eq!(Difficulty::new(0).level(), 1);
        assert_eq!(Difficulty::new(42).level(), 6);
        assert_eq!(Difficulty::default().level(), 1);
    }

    #[test]
    fn test_difficulty_clamps_wide_wire_values() {
        let high: Difficulty = serde_json::from_str("300").unwrap();
        let low: Difficulty = serde_json::from_str("-1").unwrap();
        assert_eq!((high.level(), low.level()), (6, 1));
        assert_eq!(serde_json::to_string(&high).unwrap(), "6");
    }
}
