//! Renderer callback surface and its registration.
//!
//! The engine reaches the UI only through [`RenderCallbacks`]. A renderer can
//! implement the trait directly, or be assembled from closures with a
//! [`CallbackSet`] that is validated before it is accepted.

mod registry;
mod set;

pub use registry::CallbackRegistry;
pub use set::{CallbackSet, Capability, RegistrationError, ValidatedCallbacks};

use crate::games::jungle::{MoveRecord, PieceKind, Player, Position};
use std::cell::RefCell;
use std::rc::Rc;

/// The nine notifications an engine sends while running a command.
///
/// Calls arrive synchronously, inside the engine command that caused them,
/// and in the order the engine issued them.
pub trait RenderCallbacks {
    /// Start of a new game, before any placement.
    fn reset_board(&mut self);

    /// A den owned by `owner`.
    fn place_den(&mut self, at: Position, owner: Player);

    /// A trap on `owner`'s side.
    fn place_trap(&mut self, at: Position, owner: Player);

    /// A starting piece. Never sent during reconciliation.
    fn place_piece(&mut self, at: Position, owner: Player, kind: &PieceKind);

    /// Grass terrain.
    fn mark_grass(&mut self, at: Position);

    /// Water terrain.
    fn mark_water(&mut self, at: Position);

    /// The engine reached a terminal position.
    fn announce_win(&mut self, winner: Player);

    /// A committed move (human or AI).
    fn apply_move(&mut self, record: &MoveRecord);

    /// Companion notice for a capture. Informational only.
    fn report_capture(&mut self, at: Position, owner: Player, kind: &PieceKind);
}

impl<T: RenderCallbacks + ?Sized> RenderCallbacks for Box<T> {
    fn reset_board(&mut self) {
        (**self).reset_board()
    }

    fn place_den(&mut self, at: Position, owner: Player) {
        (**self).place_den(at, owner)
    }

    fn place_trap(&mut self, at: Position, owner: Player) {
        (**self).place_trap(at, owner)
    }

    fn place_piece(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        (**self).place_piece(at, owner, kind)
    }

    fn mark_grass(&mut self, at: Position) {
        (**self).mark_grass(at)
    }

    fn mark_water(&mut self, at: Position) {
        (**self).mark_water(at)
    }

    fn announce_win(&mut self, winner: Player) {
        (**self).announce_win(winner)
    }

    fn apply_move(&mut self, record: &MoveRecord) {
        (**self).apply_move(record)
    }

    fn report_capture(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        (**self).report_capture(at, owner, kind)
    }
}

// Lets one renderer serve both as the callback target and as the table surface.
impl<T: RenderCallbacks + ?Sized> RenderCallbacks for Rc<RefCell<T>> {
    fn reset_board(&mut self) {
        self.borrow_mut().reset_board()
    }

    fn place_den(&mut self, at: Position, owner: Player) {
        self.borrow_mut().place_den(at, owner)
    }

    fn place_trap(&mut self, at: Position, owner: Player) {
        self.borrow_mut().place_trap(at, owner)
    }

    fn place_piece(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        self.borrow_mut().place_piece(at, owner, kind)
    }

    fn mark_grass(&mut self, at: Position) {
        self.borrow_mut().mark_grass(at)
    }

    fn mark_water(&mut self, at: Position) {
        self.borrow_mut().mark_water(at)
    }

    fn announce_win(&mut self, winner: Player) {
        self.borrow_mut().announce_win(winner)
    }

    fn apply_move(&mut self, record: &MoveRecord) {
        self.borrow_mut().apply_move(record)
    }

    fn report_capture(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        self.borrow_mut().report_capture(at, owner, kind)
    }
}
