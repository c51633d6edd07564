//! Renderer-side board state.

mod cells;
mod view;

pub use cells::{BoardCells, CellChange, CellState, Occupant, ReconcileError};
pub use view::{Banner, BoardView};
