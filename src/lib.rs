//! Jungle Table - the browser-side game session for a Jungle (Dou Shou Qi) engine
//!
//! The rules engine lives elsewhere. This library drives it: it registers a
//! renderer for the engine's callbacks, alternates turns between humans and
//! the AI, caches legal moves, and offers clickable move targets.
//!
//! # Architecture
//!
//! - **Callbacks**: the nine renderer notifications and their registration
//! - **Engine**: the command interface, plus an adapter for the JSON wire replies
//! - **Targets**: one-shot destination markers for the selected origin
//! - **Turn**: the turn state machine, legal-move cache and invariants
//! - **Session**: per-game context and the [`GameTable`] lifecycle
//! - **Board**: a reference renderer that keeps a cell grid in sync
//!
//! # Example
//!
//! ```no_run
//! use jungle_table::{BoardView, CallbackRegistry, Engine, GameTable, Position, SessionConfig, UiEvent};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! # fn example<E: Engine>(engine: E) -> Result<(), Box<dyn std::error::Error>> {
//! let view = Rc::new(RefCell::new(BoardView::new()));
//! let registry = CallbackRegistry::new(view.clone());
//! let mut table = GameTable::with_engine(engine, registry, view.clone());
//!
//! table.new_game(SessionConfig::local())?;
//! table.handle(UiEvent::TileClicked(Position::new(0, 6)?))?;
//! println!("{}", view.borrow().render());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod callbacks;
mod engine;
mod error;
mod games;
mod session;
mod targets;
mod turn;

// Crate-level exports - Game types
pub use games::jungle::{
    BOARD_HEIGHT, BOARD_WIDTH, Difficulty, LegalMove, MoveRecord, PieceKind, Player, Position,
    PositionError, Terrain,
};

// Crate-level exports - Renderer callbacks
pub use callbacks::{
    CallbackRegistry, CallbackSet, Capability, RegistrationError, RenderCallbacks,
    ValidatedCallbacks,
};

// Crate-level exports - Engine interface
pub use engine::{CommandReply, Engine, EngineError, LegalMoveReply, WireAdapter, WireEngine};

// Crate-level exports - Targets
pub use targets::{
    Subscription, TableSurface, Target, TargetCommit, TargetId, TargetSet, VisualHandle,
};

// Crate-level exports - Turn control
pub use turn::{
    AlternatingTurnInvariant, CacheKeyedByMoverInvariant, Invariant, InvariantSet,
    InvariantViolation, LegalMoveCache, SessionInvariants, SingleSelectionInvariant,
    TurnController, TurnState,
};

// Crate-level exports - Sessions
pub use session::{ConfigError, GameMode, GameTable, Session, SessionConfig, UiEvent};

// Crate-level exports - Errors
pub use error::SessionError;

// Crate-level exports - Reference renderer
pub use board::{Banner, BoardCells, BoardView, CellChange, CellState, Occupant, ReconcileError};
