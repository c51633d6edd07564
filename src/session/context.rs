//! The per-game session context.

use super::SessionConfig;
use crate::games::jungle::{MoveRecord, Player};
use crate::turn::LegalMoveCache;
use tracing::{debug, info, instrument};

/// State that lives exactly as long as one game.
///
/// Created by a new game, discarded on a win or the next new game.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    to_move: Player,
    legal_moves: LegalMoveCache,
    history: Vec<MoveRecord>,
}

impl Session {
    /// Opens a session with blue to move.
    #[instrument]
    pub fn create(config: SessionConfig) -> Self {
        info!(mode = %config.mode(), ai_side = ?config.ai_side(), "Session created");
        Self {
            config,
            to_move: Player::Blue,
            legal_moves: LegalMoveCache::new(),
            history: Vec::new(),
        }
    }

    /// Closes the session.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn discard(self) {
        info!("Session discarded");
    }

    /// Caller-supplied configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Side about to act.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Cached legal moves for [`Session::to_move`].
    pub fn legal_moves(&self) -> &LegalMoveCache {
        &self.legal_moves
    }

    /// Moves committed so far, as reported by the engine.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub(crate) fn legal_moves_mut(&mut self) -> &mut LegalMoveCache {
        &mut self.legal_moves
    }

    pub(crate) fn record(&mut self, record: MoveRecord) {
        debug!(%record, "Recorded committed move");
        self.history.push(record);
    }

    /// Hands the turn to the other side and drops the stale move cache.
    pub(crate) fn advance(&mut self) -> Player {
        self.to_move = self.to_move.opponent();
        self.legal_moves.clear();
        self.to_move
    }
}
