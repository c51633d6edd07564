//! Game sessions: configuration, per-game context and the table lifecycle.

mod config;
mod context;
mod table;

pub use config::{ConfigError, GameMode, SessionConfig};
pub use context::Session;
pub use table::{GameTable, UiEvent};
