//! Move data exchanged with the engine.

use super::{Player, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One origin and every destination the engine allows from it.
///
/// Destinations keep the order the engine produced them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct LegalMove {
    /// Cell the piece moves from.
    pub origin: Position,
    /// Reachable cells, in engine order.
    pub destinations: Vec<Position>,
}

/// A move the engine has committed, as carried by the `apply-move` callback.
///
/// Not persisted by the engine; the session keeps its own log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct MoveRecord {
    /// Cell the piece left.
    pub origin: Position,
    /// Cell the piece arrived on.
    pub destination: Position,
    /// Player who moved.
    pub mover: Player,
    /// Whether an enemy piece was taken on the destination.
    pub captures: bool,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.mover, self.origin, self.destination)?;
        if self.captures {
            write!(f, " (capture)")?;
        }
        Ok(())
    }
}
