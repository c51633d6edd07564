//! Turn state machine.

use crate::engine::Engine;
use crate::error::SessionError;
use crate::games::jungle::{MoveRecord, Player, Position};
use crate::session::{Session, SessionConfig};
use tracing::{debug, info, instrument, warn};

/// Where the game is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnState {
    /// No game has been started.
    #[default]
    Idle,
    /// A human must pick a move for this side.
    AwaitingHumanSelection(Player),
    /// The engine must move for this side.
    AwaitingAiMove(Player),
    /// The engine announced a winner; only a new game leaves this state.
    GameOver,
}

impl TurnState {
    /// Side about to act, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            TurnState::AwaitingHumanSelection(p) | TurnState::AwaitingAiMove(p) => Some(p),
            TurnState::Idle | TurnState::GameOver => None,
        }
    }

    /// Whether a game is in progress.
    pub fn is_live(self) -> bool {
        self.player().is_some()
    }
}

/// Drives turn alternation and owns the session context.
///
/// The only writer of the current turn and the legal-move cache.
#[derive(Debug, Default)]
pub struct TurnController {
    state: TurnState,
    session: Option<Session>,
}

impl TurnController {
    /// A controller with no game.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// The live session, if a game is in progress.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn state_for(session: &Session) -> TurnState {
        let player = session.to_move();
        if session.config().is_ai(player) {
            TurnState::AwaitingAiMove(player)
        } else {
            TurnState::AwaitingHumanSelection(player)
        }
    }

    /// Opens a fresh session; blue acts first.
    #[instrument(skip(self))]
    pub fn begin(&mut self, config: SessionConfig) -> TurnState {
        if let Some(previous) = self.session.take() {
            previous.discard();
        }
        let session = Session::create(config);
        self.state = Self::state_for(&session);
        self.session = Some(session);
        info!(state = ?self.state, "Turn controller started");
        self.state
    }

    /// Side that must pick a move now.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoGame`], [`SessionError::GameOver`] or
    /// [`SessionError::NotHumanTurn`] when no human move is expected.
    pub fn human_to_move(&self) -> Result<Player, SessionError> {
        match self.state {
            TurnState::AwaitingHumanSelection(p) => Ok(p),
            TurnState::AwaitingAiMove(p) => Err(SessionError::NotHumanTurn(p)),
            TurnState::GameOver => Err(SessionError::GameOver),
            TurnState::Idle => Err(SessionError::NoGame),
        }
    }

    /// Re-queries legal moves for the side about to act, replacing the cache.
    ///
    /// Returns the number of origins with moves.
    ///
    /// # Errors
    ///
    /// [`SessionError::LegalMoves`] if the engine could not answer; the cache
    /// is left empty. Also fails when no human move is expected.
    #[instrument(skip(self, engine))]
    pub fn refresh<E: Engine + ?Sized>(&mut self, engine: &E) -> Result<usize, SessionError> {
        let player = self.human_to_move()?;
        let session = self.session.as_mut().ok_or(SessionError::NoGame)?;

        match engine.request_legal_moves(player) {
            Ok(moves) => {
                let origins = moves.len();
                session.legal_moves_mut().replace(player, moves);
                Ok(origins)
            }
            Err(e) => {
                warn!(%player, error = %e, "Legal move query failed");
                session.legal_moves_mut().clear();
                Err(SessionError::LegalMoves(e))
            }
        }
    }

    /// Drops the cached moves (a move is being submitted).
    pub fn discard_moves(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.legal_moves_mut().clear();
        }
    }

    /// Destinations from `origin` for the human about to act.
    pub fn destinations(&self, origin: Position) -> Option<&[Position]> {
        match self.state {
            TurnState::AwaitingHumanSelection(_) => {
                self.session.as_ref()?.legal_moves().destinations(origin)
            }
            _ => None,
        }
    }

    /// Logs a move the engine committed.
    pub fn record(&mut self, record: &MoveRecord) {
        match self.session.as_mut() {
            Some(session) => session.record(*record),
            None => debug!(%record, "Move arrived with no live session"),
        }
    }

    /// Alternates the side to act after a committed move.
    ///
    /// Does nothing once the game is over.
    #[instrument(skip(self))]
    pub fn complete_move(&mut self) -> TurnState {
        if !self.state.is_live() {
            return self.state;
        }
        if let Some(session) = self.session.as_mut() {
            let next = session.advance();
            self.state = Self::state_for(session);
            debug!(%next, state = ?self.state, "Turn passed");
        }
        self.state
    }

    /// Ends the game and discards the session.
    #[instrument(skip(self))]
    pub fn finish(&mut self, winner: Player) {
        info!(%winner, "Game over");
        self.state = TurnState::GameOver;
        if let Some(session) = self.session.take() {
            session.discard();
        }
    }

    /// Returns to the pre-game state, discarding any session.
    pub fn reset(&mut self) {
        self.state = TurnState::Idle;
        if let Some(session) = self.session.take() {
            session.discard();
        }
    }
}
