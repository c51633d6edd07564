//! The command side of the engine protocol.
//!
//! An engine is trusted: coordinates and identifiers it sends are not
//! re-validated here. Commands that change the board take the UI as
//! `&mut dyn RenderCallbacks` and call back into it before returning.

mod wire;

pub use wire::{CommandReply, LegalMoveReply, WireAdapter, WireEngine};

use crate::callbacks::RenderCallbacks;
use crate::games::jungle::{Difficulty, LegalMove, Player, Position};

/// Failure reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// The engine refused the command (illegal move, unknown player, ...).
    #[display("Engine rejected command: {}", _0)]
    Rejected(String),

    /// The engine found no move for the AI side.
    #[display("Engine has no move for {}", _0)]
    NoMove(Player),

    /// The engine's reply could not be decoded.
    #[display("Malformed engine reply: {}", _0)]
    Malformed(String),

    /// The engine failed to initialize.
    #[display("Engine failed to load: {}", _0)]
    Load(String),
}

impl std::error::Error for EngineError {}

/// Rules/AI engine commands.
///
/// Every command runs to completion, including all of its nested callbacks,
/// before it returns.
pub trait Engine {
    /// Initializes a fresh board.
    ///
    /// Emits `reset-board`, then every den, trap, terrain and starting piece.
    fn start_new_game(&mut self, ui: &mut dyn RenderCallbacks);

    /// Commits `player`'s move from `from` to `to`.
    ///
    /// On success the engine has emitted `apply-move` (and possibly
    /// `report-capture` and `announce-win`).
    fn submit_move(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: Player,
        from: Position,
        to: Position,
    ) -> Result<(), EngineError>;

    /// Every legal move for `player`.
    ///
    /// An `Err` means the query could not be answered; it is never the same as
    /// an empty `Ok`.
    fn request_legal_moves(&self, player: Player) -> Result<Vec<LegalMove>, EngineError>;

    /// Lets the engine pick and commit a move for `player`.
    fn request_ai_move(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: Player,
        difficulty: Difficulty,
    ) -> Result<(), EngineError>;
}
