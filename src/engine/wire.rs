//! JSON reply decoding for engines that speak the string/JSON export form.
//!
//! Such engines name players `"blue"`/`"red"`, take raw integer coordinates
//! and answer every command with an externally tagged result:
//! `{"Ok": ...}` or `{"Err": "message"}` (`{"Err": null}` when there is no
//! message).

use super::{Engine, EngineError};
use crate::callbacks::RenderCallbacks;
use crate::games::jungle::{Difficulty, LegalMove, Player, Position};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Reply to `get_next_moves`: `{"Ok": [[x, y, [[x, y], ...]], ...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum LegalMoveReply {
    /// Origins with their destinations.
    Ok(Vec<(i64, i64, Vec<Position>)>),
    /// The query could not be answered.
    Err(Option<String>),
}

impl LegalMoveReply {
    /// Parses a raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Malformed`] if the text is not a valid reply.
    #[instrument(skip(json))]
    pub fn decode(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Undecodable legal-move reply");
            EngineError::Malformed(e.to_string())
        })
    }

    /// Converts into legal moves, keeping an `Err` reply an error.
    ///
    /// # Errors
    ///
    /// [`EngineError::Rejected`] for an `Err` reply, [`EngineError::Malformed`]
    /// for an origin off the board.
    pub fn into_moves(self) -> Result<Vec<LegalMove>, EngineError> {
        match self {
            LegalMoveReply::Ok(entries) => entries
                .into_iter()
                .map(|(x, y, destinations)| {
                    let origin = Position::new(x, y)
                        .map_err(|e| EngineError::Malformed(e.to_string()))?;
                    Ok(LegalMove::new(origin, destinations))
                })
                .collect(),
            LegalMoveReply::Err(message) => Err(EngineError::Rejected(
                message.unwrap_or_else(|| "legal move query failed".to_string()),
            )),
        }
    }
}

/// Reply to `make_move` / `make_ai_move`: `{"Ok": null}` or `{"Err": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum CommandReply {
    /// The command was carried out.
    Ok(()),
    /// The command was refused, with an optional reason.
    Err(Option<String>),
}

impl CommandReply {
    /// Parses a raw reply.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Malformed`] if the text is not a valid reply.
    #[instrument(skip(json))]
    pub fn decode(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json).map_err(|e| {
            warn!(error = %e, "Undecodable command reply");
            EngineError::Malformed(e.to_string())
        })
    }
}

/// An engine exposing the string/JSON export surface.
pub trait WireEngine {
    /// Starts a fresh board, emitting setup callbacks.
    fn new_game(&mut self, ui: &mut dyn RenderCallbacks);

    /// JSON [`LegalMoveReply`] for `player`.
    fn get_next_moves(&self, player: &str) -> String;

    /// Applies a move; JSON [`CommandReply`].
    fn make_move(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: &str,
        from_x: i64,
        from_y: i64,
        to_x: i64,
        to_y: i64,
    ) -> String;

    /// Searches `horizon` plies and applies the best move; JSON [`CommandReply`].
    /// `{"Err": null}` means no move was found.
    fn make_ai_move(&mut self, ui: &mut dyn RenderCallbacks, player: &str, horizon: i32)
    -> String;
}

/// Adapts a [`WireEngine`] to the typed [`Engine`] commands.
#[derive(Debug, Clone)]
pub struct WireAdapter<W> {
    inner: W,
}

impl<W: WireEngine> WireAdapter<W> {
    /// Wraps a wire engine.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// The wrapped engine.
    pub fn inner(&self) -> &W {
        &self.inner
    }

    /// The wrapped engine, mutably.
    pub fn inner_mut(&mut self) -> &mut W {
        &mut self.inner
    }
}

impl<W: WireEngine> Engine for WireAdapter<W> {
    fn start_new_game(&mut self, ui: &mut dyn RenderCallbacks) {
        self.inner.new_game(ui);
    }

    #[instrument(skip(self, ui))]
    fn submit_move(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: Player,
        from: Position,
        to: Position,
    ) -> Result<(), EngineError> {
        let raw = self.inner.make_move(
            ui,
            player.as_str(),
            i64::from(from.x()),
            i64::from(from.y()),
            i64::from(to.x()),
            i64::from(to.y()),
        );
        match CommandReply::decode(&raw)? {
            CommandReply::Ok(()) => Ok(()),
            CommandReply::Err(message) => Err(EngineError::Rejected(
                message.unwrap_or_else(|| "move refused".to_string()),
            )),
        }
    }

    #[instrument(skip(self))]
    fn request_legal_moves(&self, player: Player) -> Result<Vec<LegalMove>, EngineError> {
        let raw = self.inner.get_next_moves(player.as_str());
        let moves = LegalMoveReply::decode(&raw)?.into_moves()?;
        debug!(origins = moves.len(), "Decoded legal moves");
        Ok(moves)
    }

    #[instrument(skip(self, ui))]
    fn request_ai_move(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: Player,
        difficulty: Difficulty,
    ) -> Result<(), EngineError> {
        let raw = self
            .inner
            .make_ai_move(ui, player.as_str(), i32::from(difficulty.level()));
        match CommandReply::decode(&raw)? {
            CommandReply::Ok(()) => Ok(()),
            CommandReply::Err(None) => Err(EngineError::NoMove(player)),
            CommandReply::Err(Some(message)) => Err(EngineError::Rejected(message)),
        }
    }
}
