//! Reference text renderer.
//!
//! Implements both the engine callbacks and the table surface on top of
//! [`BoardCells`], and can draw the board as plain text.

use super::cells::{BoardCells, Occupant};
use crate::callbacks::RenderCallbacks;
use crate::games::jungle::{BOARD_WIDTH, MoveRecord, PieceKind, Player, Position, Terrain};
use crate::targets::{TableSurface, VisualHandle};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Status line above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Banner {
    /// Nothing shown.
    #[default]
    Hidden,
    /// "blue's turn".
    Turn(Player),
    /// "Player blue won!".
    Winner(Player),
}

impl std::fmt::Display for Banner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Banner::Hidden => Ok(()),
            Banner::Turn(player) => write!(f, "{player}'s turn"),
            Banner::Winner(player) => write!(f, "Player {player} won!"),
        }
    }
}

/// A renderer that keeps queryable cell state.
///
/// The board only exists between `reset-board` and `announce-win`; moves
/// arriving outside that window are ignored with a warning.
#[derive(Debug, Default)]
pub struct BoardView {
    cells: Option<BoardCells>,
    banner: Banner,
    targets: BTreeMap<VisualHandle, Position>,
    next_visual: u64,
    captures: Vec<(Position, Occupant)>,
}

impl BoardView {
    /// A view with no board built yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell state, if the board is built.
    pub fn cells(&self) -> Option<&BoardCells> {
        self.cells.as_ref()
    }

    /// Current status line.
    pub fn banner(&self) -> Banner {
        self.banner
    }

    /// Cells currently carrying a target marker.
    pub fn target_cells(&self) -> Vec<Position> {
        self.targets.values().copied().collect()
    }

    /// Pieces reported captured, in order.
    pub fn captures(&self) -> &[(Position, Occupant)] {
        &self.captures
    }

    fn with_cells(&mut self, what: &str, f: impl FnOnce(&mut BoardCells)) {
        match self.cells.as_mut() {
            Some(cells) => f(cells),
            None => warn!(what, "Board not built; ignoring"),
        }
    }

    /// Draws the board, one text row per board row, followed by the banner.
    ///
    /// Pieces use the first letter of their kind: upper case for blue, lower
    /// case for red. `*` marks a target, `#` a den, `^` a trap, `~` water and
    /// `.` grass.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(cells) = &self.cells {
            let marked: Vec<Position> = self.target_cells();
            for pos in Position::all() {
                out.push(Self::glyph(cells, pos, marked.contains(&pos)));
                if pos.x() + 1 == BOARD_WIDTH {
                    out.push('\n');
                }
            }
        }
        out.push_str(&self.banner.to_string());
        out
    }

    fn glyph(cells: &BoardCells, pos: Position, targeted: bool) -> char {
        let cell = cells.cell(pos);
        if targeted {
            return '*';
        }
        if let Some(occupant) = cell.occupant() {
            let initial = occupant.kind().as_str().chars().next().unwrap_or('?');
            return match occupant.owner() {
                Player::Blue => initial.to_ascii_uppercase(),
                Player::Red => initial.to_ascii_lowercase(),
            };
        }
        match cell.terrain().first() {
            Some(Terrain::Den(_)) => '#',
            Some(Terrain::Trap(_)) => '^',
            Some(Terrain::Water) => '~',
            Some(Terrain::Grass) => '.',
            None => ' ',
        }
    }
}

impl RenderCallbacks for BoardView {
    #[instrument(skip(self))]
    fn reset_board(&mut self) {
        self.cells = Some(BoardCells::new());
        self.targets.clear();
        self.banner = Banner::Hidden;
    }

    fn place_den(&mut self, at: Position, owner: Player) {
        self.with_cells("place-den", |c| {
            c.mark(at, Terrain::Den(owner));
        });
    }

    fn place_trap(&mut self, at: Position, owner: Player) {
        self.with_cells("place-trap", |c| {
            c.mark(at, Terrain::Trap(owner));
        });
    }

    fn place_piece(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        self.with_cells("place-piece", |c| {
            c.place(at, Occupant::new(owner, kind.clone()))
        });
    }

    fn mark_grass(&mut self, at: Position) {
        self.with_cells("mark-grass", |c| {
            c.mark(at, Terrain::Grass);
        });
    }

    fn mark_water(&mut self, at: Position) {
        self.with_cells("mark-water", |c| {
            c.mark(at, Terrain::Water);
        });
    }

    #[instrument(skip(self))]
    fn announce_win(&mut self, winner: Player) {
        info!(%winner, "Showing end of game");
        self.cells = None;
        self.targets.clear();
        self.banner = Banner::Winner(winner);
    }

    #[instrument(skip(self, record), fields(record = %record))]
    fn apply_move(&mut self, record: &MoveRecord) {
        let Some(cells) = self.cells.as_mut() else {
            // The board was torn down (win or reset) before this move arrived.
            warn!("Move for a board that no longer exists; ignoring");
            return;
        };
        if let Err(e) = cells.reconcile(record) {
            warn!(error = %e, "Move does not match the board; ignoring");
        }
    }

    fn report_capture(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        info!(%at, %owner, %kind, "Piece captured");
        self.captures.push((at, Occupant::new(owner, kind.clone())));
    }
}

impl TableSurface for BoardView {
    fn show_target(&mut self, at: Position) -> VisualHandle {
        self.next_visual += 1;
        let handle = VisualHandle(self.next_visual);
        self.targets.insert(handle, at);
        handle
    }

    fn remove_target(&mut self, handle: VisualHandle) {
        if self.targets.remove(&handle).is_none() {
            debug!(%handle, "Target visual already gone");
        }
    }

    fn show_turn(&mut self, player: Player) {
        self.banner = Banner::Turn(player);
    }

    fn hide_turn(&mut self) {
        if let Banner::Turn(_) = self.banner {
            self.banner = Banner::Hidden;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i64, y: i64) -> Position {
        Position::new(x, y).unwrap()
    }

    fn built_view() -> BoardView {
        let mut view = BoardView::new();
        view.reset_board();
        view.place_den(pos(3, 8), Player::Blue);
        view.mark_water(pos(1, 3));
        view.place_piece(pos(0, 6), Player::Blue, &PieceKind::new("elephant"));
        view.place_piece(pos(0, 5), Player::Red, &PieceKind::new("wolf"));
        view
    }

    #[test]
    fn test_capture_move_replaces_occupant() {
        let mut view = built_view();
        view.apply_move(&MoveRecord::new(pos(0, 6), pos(0, 5), Player::Blue, true));

        let cells = view.cells().unwrap();
        let occupant = cells.occupant(pos(0, 5)).unwrap();
        assert_eq!(*occupant.owner(), Player::Blue);
        assert_eq!(occupant.kind().as_str(), "elephant");
        assert_eq!(cells.piece_count(), 1);
    }

    #[test]
    fn test_move_after_win_is_ignored() {
        let mut view = built_view();
        view.announce_win(Player::Red);
        view.apply_move(&MoveRecord::new(pos(0, 6), pos(0, 5), Player::Blue, true));

        assert!(view.cells().is_none());
        assert_eq!(view.banner().to_string(), "Player red won!");
    }

    #[test]
    fn test_turn_banner_does_not_hide_winner() {
        let mut view = built_view();
        view.show_turn(Player::Blue);
        assert_eq!(view.banner().to_string(), "blue's turn");

        view.announce_win(Player::Blue);
        view.hide_turn();
        assert_eq!(view.banner(), Banner::Winner(Player::Blue));
    }

    #[test]
    fn test_render_marks_targets_and_pieces() {
        let mut view = built_view();
        view.show_target(pos(1, 6));
        view.show_turn(Player::Blue);

        let text = view.render();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 10);
        assert_eq!(rows[3].chars().nth(1), Some('~'));
        assert_eq!(rows[5].chars().next(), Some('w'));
        assert_eq!(&rows[6][..2], "E*");
        assert_eq!(rows[8].chars().nth(3), Some('#'));
        assert_eq!(rows[9], "blue's turn");
    }
}
