//! The single path from the engine to the renderer.

use super::{CallbackSet, RegistrationError, RenderCallbacks};
use crate::games::jungle::{MoveRecord, PieceKind, Player, Position};
use tracing::{error, info, instrument, trace};

/// Holds exactly one validated renderer and forwards engine notifications to it.
///
/// Forwarding is synchronous and unconditional: no buffering, no coalescing,
/// no reordering. Call order from the engine is call order to the renderer.
pub struct CallbackRegistry {
    renderer: Box<dyn RenderCallbacks>,
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry").finish_non_exhaustive()
    }
}

impl CallbackRegistry {
    /// Registers a renderer that implements every capability by construction.
    #[instrument(skip(renderer))]
    pub fn new(renderer: impl RenderCallbacks + 'static) -> Self {
        info!("Registering renderer");
        Self {
            renderer: Box::new(renderer),
        }
    }

    /// Registers a closure-based renderer.
    ///
    /// # Panics
    ///
    /// Panics if any capability is missing, naming every absent one.
    #[track_caller]
    pub fn register(set: CallbackSet) -> Self {
        match Self::try_register(set) {
            Ok(registry) => registry,
            Err(e) => {
                error!(missing = ?e.missing, "Renderer registration failed");
                panic!("{e}");
            }
        }
    }

    /// Registers a closure-based renderer, reporting missing capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] naming every absent capability.
    #[instrument(skip(set))]
    pub fn try_register(set: CallbackSet) -> Result<Self, RegistrationError> {
        let validated = set.validate()?;
        Ok(Self::new(validated))
    }
}

impl RenderCallbacks for CallbackRegistry {
    fn reset_board(&mut self) {
        trace!("reset-board");
        self.renderer.reset_board();
    }

    fn place_den(&mut self, at: Position, owner: Player) {
        trace!(%at, %owner, "place-den");
        self.renderer.place_den(at, owner);
    }

    fn place_trap(&mut self, at: Position, owner: Player) {
        trace!(%at, %owner, "place-trap");
        self.renderer.place_trap(at, owner);
    }

    fn place_piece(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        trace!(%at, %owner, %kind, "place-piece");
        self.renderer.place_piece(at, owner, kind);
    }

    fn mark_grass(&mut self, at: Position) {
        trace!(%at, "mark-grass");
        self.renderer.mark_grass(at);
    }

    fn mark_water(&mut self, at: Position) {
        trace!(%at, "mark-water");
        self.renderer.mark_water(at);
    }

    fn announce_win(&mut self, winner: Player) {
        trace!(%winner, "announce-win");
        self.renderer.announce_win(winner);
    }

    fn apply_move(&mut self, record: &MoveRecord) {
        trace!(%record, "apply-move");
        self.renderer.apply_move(record);
    }

    fn report_capture(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        trace!(%at, %owner, %kind, "report-capture");
        self.renderer.report_capture(at, owner, kind);
    }
}
