//! Shared test fixtures: a scripted engine and a recording renderer.

#![allow(dead_code)]

use jungle_table::{
    CallbackSet, Difficulty, Engine, EngineError, LegalMove, MoveRecord, PieceKind, Player,
    Position, RenderCallbacks, Terrain, WireEngine,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Installs a test-writer subscriber; `RUST_LOG` controls the output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init(); // Don't panic if already initialized
}

pub fn pos(x: i64, y: i64) -> Position {
    Position::new(x, y).unwrap()
}

/// Standard Jungle terrain.
pub fn terrain_at(at: Position) -> Terrain {
    match (at.x(), at.y()) {
        (3, 0) => Terrain::Den(Player::Red),
        (3, 8) => Terrain::Den(Player::Blue),
        (2, 0) | (4, 0) | (3, 1) => Terrain::Trap(Player::Red),
        (2, 8) | (4, 8) | (3, 7) => Terrain::Trap(Player::Blue),
        (1 | 2 | 4 | 5, 3..=5) => Terrain::Water,
        _ => Terrain::Grass,
    }
}

/// Standard Jungle starting pieces.
pub fn starting_pieces() -> HashMap<Position, (Player, PieceKind)> {
    let red = [
        ((0, 0), "lion"),
        ((6, 0), "tiger"),
        ((1, 1), "dog"),
        ((5, 1), "cat"),
        ((0, 2), "rat"),
        ((2, 2), "leopard"),
        ((4, 2), "wolf"),
        ((6, 2), "elephant"),
    ];
    let blue = [
        ((0, 6), "elephant"),
        ((2, 6), "wolf"),
        ((4, 6), "leopard"),
        ((6, 6), "rat"),
        ((1, 7), "cat"),
        ((5, 7), "dog"),
        ((0, 8), "tiger"),
        ((6, 8), "lion"),
    ];
    red.iter()
        .map(|((x, y), kind)| (pos(*x, *y), (Player::Red, PieceKind::new(*kind))))
        .chain(
            blue.iter()
                .map(|((x, y), kind)| (pos(*x, *y), (Player::Blue, PieceKind::new(*kind)))),
        )
        .collect()
}

fn den_of(player: Player) -> Position {
    match player {
        Player::Blue => pos(3, 8),
        Player::Red => pos(3, 0),
    }
}

/// A stand-in rules engine.
///
/// Every piece steps one cell orthogonally, never into water or its own den,
/// and captures anything it lands on. Reaching the enemy den wins. The AI
/// plays the first legal move it finds.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    pieces: HashMap<Position, (Player, PieceKind)>,
    log: RefCell<Vec<String>>,
    pub fail_legal_moves: bool,
    pub ai_has_no_move: bool,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received, in order.
    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn piece_at(&self, at: Position) -> Option<&(Player, PieceKind)> {
        self.pieces.get(&at)
    }

    /// Moves a piece without emitting callbacks, to stage a position.
    pub fn teleport(&mut self, from: Position, to: Position) {
        if let Some(piece) = self.pieces.remove(&from) {
            self.pieces.insert(to, piece);
        }
    }

    fn neighbours(at: Position) -> Vec<Position> {
        let (x, y) = (i64::from(at.x()), i64::from(at.y()));
        [(x, y - 1), (x, y + 1), (x - 1, y), (x + 1, y)]
            .into_iter()
            .filter_map(|(x, y)| Position::new(x, y).ok())
            .collect()
    }

    fn moves_for(&self, player: Player) -> Vec<LegalMove> {
        Position::all()
            .filter(|at| self.pieces.get(at).is_some_and(|(owner, _)| *owner == player))
            .filter_map(|origin| {
                let destinations: Vec<Position> = Self::neighbours(origin)
                    .into_iter()
                    .filter(|to| terrain_at(*to) != Terrain::Water)
                    .filter(|to| *to != den_of(player))
                    .filter(|to| !self.pieces.get(to).is_some_and(|(owner, _)| *owner == player))
                    .collect();
                (!destinations.is_empty()).then(|| LegalMove::new(origin, destinations))
            })
            .collect()
    }

    fn commit(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: Player,
        from: Position,
        to: Position,
    ) -> Result<(), EngineError> {
        let legal = self
            .moves_for(player)
            .iter()
            .any(|m| m.origin == from && m.destinations.contains(&to));
        if !legal {
            return Err(EngineError::Rejected(format!("illegal move {from} -> {to}")));
        }

        let mover = self
            .pieces
            .remove(&from)
            .ok_or_else(|| EngineError::Rejected("no piece".to_string()))?;
        let captured = self.pieces.insert(to, mover);

        if to == den_of(player.opponent()) {
            ui.announce_win(player);
        }
        if let Some((owner, kind)) = &captured {
            ui.report_capture(to, *owner, kind);
        }
        ui.apply_move(&MoveRecord::new(from, to, player, captured.is_some()));
        Ok(())
    }
}

impl Engine for ScriptedEngine {
    fn start_new_game(&mut self, ui: &mut dyn RenderCallbacks) {
        self.log.borrow_mut().push("new_game".to_string());
        self.pieces = starting_pieces();

        ui.reset_board();
        for at in Position::all() {
            match terrain_at(at) {
                Terrain::Den(owner) => ui.place_den(at, owner),
                Terrain::Trap(owner) => ui.place_trap(at, owner),
                Terrain::Water => ui.mark_water(at),
                Terrain::Grass => ui.mark_grass(at),
            }
            if let Some((owner, kind)) = self.pieces.get(&at) {
                ui.place_piece(at, *owner, kind);
            }
        }
    }

    fn submit_move(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: Player,
        from: Position,
        to: Position,
    ) -> Result<(), EngineError> {
        self.log
            .borrow_mut()
            .push(format!("move {player} {from} {to}"));
        self.commit(ui, player, from, to)
    }

    fn request_legal_moves(&self, player: Player) -> Result<Vec<LegalMove>, EngineError> {
        self.log.borrow_mut().push(format!("moves {player}"));
        if self.fail_legal_moves {
            return Err(EngineError::Rejected("engine busy".to_string()));
        }
        Ok(self.moves_for(player))
    }

    fn request_ai_move(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: Player,
        difficulty: Difficulty,
    ) -> Result<(), EngineError> {
        self.log
            .borrow_mut()
            .push(format!("ai {player} {}", difficulty.level()));
        if self.ai_has_no_move {
            return Err(EngineError::NoMove(player));
        }
        let first = self
            .moves_for(player)
            .into_iter()
            .next()
            .ok_or(EngineError::NoMove(player))?;
        self.commit(ui, player, first.origin, first.destinations[0])
    }
}

/// The same engine behind the JSON export surface.
#[derive(Debug, Default)]
pub struct JsonEngine(pub ScriptedEngine);

fn player_named(name: &str) -> Option<Player> {
    name.parse().ok()
}

impl WireEngine for JsonEngine {
    fn new_game(&mut self, ui: &mut dyn RenderCallbacks) {
        self.0.start_new_game(ui);
    }

    fn get_next_moves(&self, player: &str) -> String {
        let Some(player) = player_named(player) else {
            return r#"{"Err":"player must be string red or blue."}"#.to_string();
        };
        match self.0.request_legal_moves(player) {
            Ok(moves) => {
                let entries: Vec<(u8, u8, Vec<Position>)> = moves
                    .into_iter()
                    .map(|m| (m.origin.x(), m.origin.y(), m.destinations))
                    .collect();
                serde_json::json!({ "Ok": entries }).to_string()
            }
            Err(e) => serde_json::json!({ "Err": e.to_string() }).to_string(),
        }
    }

    fn make_move(
        &mut self,
        ui: &mut dyn RenderCallbacks,
        player: &str,
        from_x: i64,
        from_y: i64,
        to_x: i64,
        to_y: i64,
    ) -> String {
        let Some(player) = player_named(player) else {
            return r#"{"Err":"player must be string red or blue."}"#.to_string();
        };
        match self
            .0
            .submit_move(ui, player, pos(from_x, from_y), pos(to_x, to_y))
        {
            Ok(()) => r#"{"Ok":null}"#.to_string(),
            Err(e) => serde_json::json!({ "Err": e.to_string() }).to_string(),
        }
    }

    fn make_ai_move(&mut self, ui: &mut dyn RenderCallbacks, player: &str, horizon: i32) -> String {
        let Some(player) = player_named(player) else {
            return r#"{"Err":"player must be string red or blue."}"#.to_string();
        };
        let level = u8::try_from(horizon).unwrap_or(1);
        match self.0.request_ai_move(ui, player, Difficulty::new(level)) {
            Ok(()) => r#"{"Ok":null}"#.to_string(),
            Err(EngineError::NoMove(_)) => r#"{"Err":null}"#.to_string(),
            Err(e) => serde_json::json!({ "Err": e.to_string() }).to_string(),
        }
    }
}

/// Renderer notifications, flattened to strings.
pub type EventLog = Rc<RefCell<Vec<String>>>;

/// A closure-built renderer that records every notification.
pub fn recording_callbacks() -> (CallbackSet, EventLog) {
    let log: EventLog = Rc::default();
    let push = |log: &EventLog| {
        let log = log.clone();
        move |entry: String| log.borrow_mut().push(entry)
    };

    let reset = push(&log);
    let den = push(&log);
    let trap = push(&log);
    let piece = push(&log);
    let grass = push(&log);
    let water = push(&log);
    let win = push(&log);
    let moved = push(&log);
    let capture = push(&log);

    let set = CallbackSet::new()
        .on_reset_board(move || reset("reset".to_string()))
        .on_place_den(move |at, owner| den(format!("den {at} {owner}")))
        .on_place_trap(move |at, owner| trap(format!("trap {at} {owner}")))
        .on_place_piece(move |at, owner, kind| piece(format!("piece {at} {owner} {kind}")))
        .on_mark_grass(move |at| grass(format!("grass {at}")))
        .on_mark_water(move |at| water(format!("water {at}")))
        .on_announce_win(move |winner| win(format!("win {winner}")))
        .on_apply_move(move |record| moved(format!("move {record}")))
        .on_report_capture(move |at, owner, kind| capture(format!("capture {at} {owner} {kind}")));

    (set, log)
}
