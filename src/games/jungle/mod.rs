//! Jungle (Dou Shou Qi) board vocabulary shared by the engine and the renderer.

mod action;
mod types;

pub use action::{LegalMove, MoveRecord};
pub use types::{
    BOARD_HEIGHT, BOARD_WIDTH, Difficulty, PieceKind, Player, Position, PositionError, Terrain,
};
