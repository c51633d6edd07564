//! Turn alternation, legal-move caching and the invariants that govern them.

mod cache;
mod controller;
pub mod invariants;

pub use cache::LegalMoveCache;
pub use controller::{TurnController, TurnState};
pub use invariants::{
    AlternatingTurnInvariant, CacheKeyedByMoverInvariant, Invariant, InvariantSet,
    InvariantViolation, SessionInvariants, SingleSelectionInvariant,
};
