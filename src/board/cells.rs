//! Per-cell memory of terrain and occupant, as the renderer sees it.

use crate::games::jungle::{MoveRecord, PieceKind, Player, Position, Terrain};
use derive_getters::Getters;
use derive_new::new;
use tracing::{debug, instrument, warn};

/// The piece standing on a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, new)]
pub struct Occupant {
    /// Owning player.
    owner: Player,
    /// Renderer piece identifier.
    kind: PieceKind,
}

/// Everything the renderer knows about one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellState {
    terrain: Vec<Terrain>,
    occupant: Option<Occupant>,
}

impl CellState {
    /// Terrain marks, in the order they were set.
    pub fn terrain(&self) -> &[Terrain] {
        &self.terrain
    }

    /// Whether `mark` was set on this cell.
    pub fn has_terrain(&self, mark: Terrain) -> bool {
        self.terrain.contains(&mark)
    }

    /// The current occupant, if any.
    pub fn occupant(&self) -> Option<&Occupant> {
        self.occupant.as_ref()
    }

    /// Whether a piece stands here.
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// One observable change to cell state, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellChange {
    /// A piece was set on a cell.
    Placed(Position, Occupant),
    /// A moving piece left its origin.
    Vacated(Position, Occupant),
    /// A captured piece was removed.
    Cleared(Position, Occupant),
}

/// A move could not be reconciled against the current cells.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ReconcileError {
    /// Nothing stands on the origin cell.
    #[display("No piece on origin {}", _0)]
    EmptyOrigin(Position),
}

impl std::error::Error for ReconcileError {}

/// The 7×9 grid of cell states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCells {
    cells: Vec<CellState>,
    changes: Vec<CellChange>,
}

impl BoardCells {
    /// An empty grid: no terrain, no pieces.
    pub fn new() -> Self {
        Self {
            cells: vec![CellState::default(); Position::all().count()],
            changes: Vec::new(),
        }
    }

    /// State of the cell at `pos`.
    pub fn cell(&self, pos: Position) -> &CellState {
        &self.cells[pos.index()]
    }

    /// Occupant at `pos`, if any.
    pub fn occupant(&self, pos: Position) -> Option<&Occupant> {
        self.cell(pos).occupant()
    }

    /// Number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Occupied cells belonging to `owner`.
    pub fn pieces_of(&self, owner: Player) -> Vec<Position> {
        Position::all()
            .filter(|p| self.occupant(*p).is_some_and(|o| o.owner == owner))
            .collect()
    }

    /// Cell changes recorded since the grid was created.
    pub fn changes(&self) -> &[CellChange] {
        &self.changes
    }

    /// Attaches a terrain mark. Returns `false` if the mark was already there.
    #[instrument(skip(self))]
    pub fn mark(&mut self, pos: Position, terrain: Terrain) -> bool {
        let cell = &mut self.cells[pos.index()];
        if cell.terrain.contains(&terrain) {
            warn!(%pos, ?terrain, "Terrain mark set twice");
            return false;
        }
        cell.terrain.push(terrain);
        true
    }

    /// Sets `occupant` on `pos`.
    pub fn place(&mut self, pos: Position, occupant: Occupant) {
        self.cells[pos.index()].occupant = Some(occupant.clone());
        self.changes.push(CellChange::Placed(pos, occupant));
    }

    fn vacate(&mut self, pos: Position) -> Option<Occupant> {
        let occupant = self.cells[pos.index()].occupant.take()?;
        self.changes.push(CellChange::Vacated(pos, occupant.clone()));
        Some(occupant)
    }

    fn clear(&mut self, pos: Position) -> Option<Occupant> {
        let occupant = self.cells[pos.index()].occupant.take()?;
        self.changes.push(CellChange::Cleared(pos, occupant.clone()));
        Some(occupant)
    }

    /// Moves the piece on `record.origin` to `record.destination`.
    ///
    /// For a capture the destination occupant is cleared before the mover is
    /// placed. A non-capture never clears the destination.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::EmptyOrigin`] if no piece stands on the origin; the
    /// grid is left untouched.
    #[instrument(skip(self, record), fields(record = %record))]
    pub fn reconcile(&mut self, record: &MoveRecord) -> Result<(), ReconcileError> {
        let mover = self
            .vacate(record.origin)
            .ok_or(ReconcileError::EmptyOrigin(record.origin))?;

        if record.captures {
            match self.clear(record.destination) {
                Some(taken) => debug!(owner = %taken.owner, kind = %taken.kind, "Cleared captured piece"),
                None => warn!("Capture reported on an empty destination"),
            }
        } else if self.cell(record.destination).is_occupied() {
            warn!("Non-capture move onto an occupied destination");
        }

        self.place(record.destination, mover);
        Ok(())
    }
}

impl Default for BoardCells {
    fn default() -> Self {
        Self::new()
    }
}
