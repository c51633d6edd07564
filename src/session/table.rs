//! Game session lifecycle: ties the engine, the renderer, the targets and the
//! turn controller together.
//!
//! Engine commands receive the table's UI half as their callback target, so
//! every notification flows through here inline, before the command returns.

use super::{Session, SessionConfig};
use crate::callbacks::{CallbackRegistry, RenderCallbacks};
use crate::engine::{Engine, EngineError};
use crate::error::SessionError;
use crate::games::jungle::{MoveRecord, PieceKind, Player, Position};
use crate::targets::{TableSurface, TargetCommit, TargetId, TargetSet};
use crate::turn::{
    Invariant, InvariantSet, SessionInvariants, SingleSelectionInvariant, TurnController,
    TurnState,
};
use std::future::Future;
use tracing::{debug, info, instrument, warn};

/// Input delivered by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiEvent {
    /// A board cell was clicked.
    TileClicked(Position),
    /// A target marker was activated.
    TargetActivated(TargetId),
}

/// Everything the engine's callbacks may touch.
struct TableUi {
    registry: CallbackRegistry,
    surface: Box<dyn TableSurface>,
    targets: TargetSet,
    turns: TurnController,
}

impl TableUi {
    fn clear_targets(&mut self) -> usize {
        self.targets.destroy(self.surface.as_mut())
    }
}

impl RenderCallbacks for TableUi {
    fn reset_board(&mut self) {
        self.registry.reset_board();
    }

    fn place_den(&mut self, at: Position, owner: Player) {
        self.registry.place_den(at, owner);
    }

    fn place_trap(&mut self, at: Position, owner: Player) {
        self.registry.place_trap(at, owner);
    }

    fn place_piece(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        self.registry.place_piece(at, owner, kind);
    }

    fn mark_grass(&mut self, at: Position) {
        self.registry.mark_grass(at);
    }

    fn mark_water(&mut self, at: Position) {
        self.registry.mark_water(at);
    }

    fn announce_win(&mut self, winner: Player) {
        self.clear_targets();
        self.turns.finish(winner);
        self.surface.hide_turn();
        self.registry.announce_win(winner);
    }

    fn apply_move(&mut self, record: &MoveRecord) {
        self.turns.record(record);
        self.registry.apply_move(record);
    }

    fn report_capture(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        self.registry.report_capture(at, owner, kind);
    }
}

/// A board between one engine and one registered renderer.
///
/// Only built once the engine is ready and a renderer is registered, so no
/// engine command can run unregistered.
pub struct GameTable<E> {
    engine: E,
    ui: TableUi,
}

impl<E> std::fmt::Debug for GameTable<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameTable")
            .field("state", &self.ui.turns.state())
            .field("targets", &self.ui.targets.len())
            .finish_non_exhaustive()
    }
}

impl<E: Engine> GameTable<E> {
    /// Builds a table around an engine that is already initialized.
    #[instrument(skip_all)]
    pub fn with_engine(
        engine: E,
        registry: CallbackRegistry,
        surface: impl TableSurface + 'static,
    ) -> Self {
        info!("Table ready");
        Self {
            engine,
            ui: TableUi {
                registry,
                surface: Box::new(surface),
                targets: TargetSet::new(),
                turns: TurnController::new(),
            },
        }
    }

    /// Awaits the engine's one-time initialization, then builds the table.
    ///
    /// # Errors
    ///
    /// Returns the loader's [`EngineError`] if the engine fails to come up.
    #[instrument(skip_all)]
    pub async fn connect<F>(
        loader: F,
        registry: CallbackRegistry,
        surface: impl TableSurface + 'static,
    ) -> Result<Self, EngineError>
    where
        F: Future<Output = Result<E, EngineError>>,
    {
        debug!("Waiting for engine");
        let engine = loader.await.inspect_err(|e| warn!(error = %e, "Engine failed to load"))?;
        Ok(Self::with_engine(engine, registry, surface))
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The engine, mutably. Commands issued through it bypass the table.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Current turn state.
    pub fn state(&self) -> TurnState {
        self.ui.turns.state()
    }

    /// The live session, if a game is in progress.
    pub fn session(&self) -> Option<&Session> {
        self.ui.turns.session()
    }

    /// The live targets.
    pub fn targets(&self) -> &TargetSet {
        &self.ui.targets
    }

    /// Starts a fresh game.
    ///
    /// The engine resets and populates the board, the session is created from
    /// `config`, and legal moves are queried for the side to act. If blue is
    /// AI-controlled the AI moves first.
    ///
    /// # Errors
    ///
    /// [`SessionError::LegalMoves`] if the initial query fails,
    /// [`SessionError::Engine`] if an opening AI move fails.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, config: SessionConfig) -> Result<(), SessionError> {
        self.ui.clear_targets();
        self.ui.turns.reset();

        self.engine.start_new_game(&mut self.ui);
        self.ui.turns.begin(config);

        let result = self.advance();
        self.debug_check();
        result
    }

    /// Runs AI turns until a human must act, then queries their legal moves.
    ///
    /// Also the way to retry after an AI or query failure.
    ///
    /// # Errors
    ///
    /// See [`GameTable::new_game`].
    pub fn advance(&mut self) -> Result<(), SessionError> {
        loop {
            match self.ui.turns.state() {
                TurnState::AwaitingHumanSelection(player) => {
                    self.ui.surface.show_turn(player);
                    self.ui.turns.refresh(&self.engine)?;
                    return Ok(());
                }
                TurnState::AwaitingAiMove(player) => {
                    self.ui.surface.show_turn(player);
                    self.take_ai_turn(player)?;
                }
                TurnState::GameOver | TurnState::Idle => return Ok(()),
            }
        }
    }

    #[instrument(skip(self))]
    fn take_ai_turn(&mut self, player: Player) -> Result<(), SessionError> {
        let difficulty = *self
            .ui
            .turns
            .session()
            .ok_or(SessionError::NoGame)?
            .config()
            .difficulty();

        debug!(%difficulty, "Requesting AI move");
        self.engine
            .request_ai_move(&mut self.ui, player, difficulty)
            .map_err(|e| {
                warn!(error = %e, "AI move failed");
                SessionError::Engine(e)
            })?;

        self.ui.turns.complete_move();
        Ok(())
    }

    /// Shows targets for every legal destination from `origin`.
    ///
    /// The previous target set is always destroyed first. An origin with no
    /// legal moves shows nothing. Returns the number of targets shown.
    #[instrument(skip(self))]
    pub fn select_origin(&mut self, origin: Position) -> usize {
        let TableUi {
            surface,
            targets,
            turns,
            ..
        } = &mut self.ui;
        let destinations = turns.destinations(origin).unwrap_or(&[]);
        let shown = targets.offer(origin, destinations, surface.as_mut());
        self.debug_check();
        shown
    }

    /// Fires target `id`. A live target submits its move; a stale one does nothing.
    ///
    /// # Errors
    ///
    /// Any error from [`GameTable::submit_move`].
    #[instrument(skip(self))]
    pub fn activate(&mut self, id: TargetId) -> Result<Option<TargetCommit>, SessionError> {
        let commit = {
            let TableUi {
                surface, targets, ..
            } = &mut self.ui;
            targets.activate(id, surface.as_mut())
        };
        match commit {
            Some(commit) => {
                self.submit_move(commit.origin, commit.destination)?;
                Ok(Some(commit))
            }
            None => Ok(None),
        }
    }

    /// Submits a human move for the side to act.
    ///
    /// Refused without calling the engine unless a human move is expected.
    /// After the engine commits the move the turn passes; an AI reply follows
    /// immediately when the next side is AI-controlled.
    ///
    /// # Errors
    ///
    /// [`SessionError::GameOver`], [`SessionError::NoGame`] or
    /// [`SessionError::NotHumanTurn`] when refused; [`SessionError::Engine`]
    /// if the engine rejects the move. Legal moves are re-queried first; a
    /// failed re-query is logged and the rejection is still returned.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, from: Position, to: Position) -> Result<(), SessionError> {
        let player = self.ui.turns.human_to_move()?;
        self.ui.clear_targets();
        self.ui.turns.discard_moves();

        info!(%player, %from, %to, "Submitting move");
        if let Err(e) = self.engine.submit_move(&mut self.ui, player, from, to) {
            warn!(error = %e, "Engine rejected move");
            if let Err(requery) = self.ui.turns.refresh(&self.engine) {
                warn!(error = %requery, "Re-query after rejected move failed");
            }
            return Err(SessionError::Engine(e));
        }

        self.ui.turns.complete_move();
        let result = self.advance();
        self.debug_check();
        result
    }

    /// Routes a UI event.
    ///
    /// Clicking a cell that carries a target activates it; any other click
    /// selects that cell as the origin.
    ///
    /// # Errors
    ///
    /// Any error from a resulting move submission.
    pub fn handle(&mut self, event: UiEvent) -> Result<(), SessionError> {
        match event {
            UiEvent::TileClicked(at) => match self.ui.targets.target_at(at) {
                Some(id) => self.activate(id).map(|_| ()),
                None => {
                    self.select_origin(at);
                    Ok(())
                }
            },
            UiEvent::TargetActivated(id) => self.activate(id).map(|_| ()),
        }
    }

    /// Tears down targets and the session without starting a new game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let dismissed = self.ui.clear_targets();
        self.ui.turns.reset();
        self.ui.surface.hide_turn();
        debug!(dismissed, "Table reset");
    }

    fn debug_check(&self) {
        debug_assert!(
            SingleSelectionInvariant::holds(&self.ui.targets),
            "{}",
            SingleSelectionInvariant::description()
        );
        if let Some(session) = self.ui.turns.session() {
            debug_assert!(
                SessionInvariants::check_all(session).is_ok(),
                "Session invariants violated"
            );
        }
    }
}
