//! Session-level errors.

use crate::engine::EngineError;
use crate::games::jungle::Player;

/// Error returned by session commands.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SessionError {
    /// No game has been started.
    #[display("No game in progress")]
    NoGame,

    /// The game has ended; start a new one first.
    #[display("Game is already over")]
    GameOver,

    /// The side to act is AI-controlled.
    #[display("It's not a human turn ({} is AI-controlled)", _0)]
    NotHumanTurn(Player),

    /// The legal-move query failed. Not the same as having no moves.
    #[display("Legal move query failed: {}", _0)]
    LegalMoves(EngineError),

    /// The engine refused a command.
    #[display("Engine error: {}", _0)]
    Engine(EngineError),
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::LegalMoves(e) | SessionError::Engine(e) => Some(e),
            _ => None,
        }
    }
}
