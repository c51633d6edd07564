//! Closure-based callback sets, validated before registration.

use super::RenderCallbacks;
use crate::games::jungle::{MoveRecord, PieceKind, Player, Position};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// One of the nine notifications a renderer must handle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Capability {
    /// `reset-board`
    ResetBoard,
    /// `place-den`
    PlaceDen,
    /// `place-trap`
    PlaceTrap,
    /// `place-piece`
    PlacePiece,
    /// `mark-grass`
    MarkGrass,
    /// `mark-water`
    MarkWater,
    /// `announce-win`
    AnnounceWin,
    /// `apply-move`
    ApplyMove,
    /// `report-capture`
    ReportCapture,
}

/// A callback set lacked required capabilities.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Renderer is missing required callbacks: {}", capability_list(missing))]
pub struct RegistrationError {
    /// Every capability that was not provided, in protocol order.
    pub missing: Vec<Capability>,
}

fn capability_list(capabilities: &[Capability]) -> String {
    capabilities
        .iter()
        .map(|c| <&'static str>::from(*c))
        .collect::<Vec<_>>()
        .join(", ")
}

impl std::error::Error for RegistrationError {}

type PositionFn = Box<dyn FnMut(Position)>;
type OwnedCellFn = Box<dyn FnMut(Position, Player)>;
type PieceFn = Box<dyn FnMut(Position, Player, &PieceKind)>;

/// Renderer capabilities collected one closure at a time.
///
/// Call [`CallbackSet::validate`] (or register it through
/// [`CallbackRegistry::register`](super::CallbackRegistry::register)) to turn
/// it into a usable renderer.
#[derive(Default)]
pub struct CallbackSet {
    reset_board: Option<Box<dyn FnMut()>>,
    place_den: Option<OwnedCellFn>,
    place_trap: Option<OwnedCellFn>,
    place_piece: Option<PieceFn>,
    mark_grass: Option<PositionFn>,
    mark_water: Option<PositionFn>,
    announce_win: Option<Box<dyn FnMut(Player)>>,
    apply_move: Option<Box<dyn FnMut(&MoveRecord)>>,
    report_capture: Option<PieceFn>,
}

impl std::fmt::Debug for CallbackSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let provided: Vec<Capability> = Capability::iter().filter(|c| self.has(*c)).collect();
        f.debug_struct("CallbackSet")
            .field("provided", &provided)
            .finish()
    }
}

impl CallbackSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles `reset-board`.
    pub fn on_reset_board(mut self, f: impl FnMut() + 'static) -> Self {
        self.reset_board = Some(Box::new(f));
        self
    }

    /// Handles `place-den`.
    pub fn on_place_den(mut self, f: impl FnMut(Position, Player) + 'static) -> Self {
        self.place_den = Some(Box::new(f));
        self
    }

    /// Handles `place-trap`.
    pub fn on_place_trap(mut self, f: impl FnMut(Position, Player) + 'static) -> Self {
        self.place_trap = Some(Box::new(f));
        self
    }

    /// Handles `place-piece`.
    pub fn on_place_piece(mut self, f: impl FnMut(Position, Player, &PieceKind) + 'static) -> Self {
        self.place_piece = Some(Box::new(f));
        self
    }

    /// Handles `mark-grass`.
    pub fn on_mark_grass(mut self, f: impl FnMut(Position) + 'static) -> Self {
        self.mark_grass = Some(Box::new(f));
        self
    }

    /// Handles `mark-water`.
    pub fn on_mark_water(mut self, f: impl FnMut(Position) + 'static) -> Self {
        self.mark_water = Some(Box::new(f));
        self
    }

    /// Handles `announce-win`.
    pub fn on_announce_win(mut self, f: impl FnMut(Player) + 'static) -> Self {
        self.announce_win = Some(Box::new(f));
        self
    }

    /// Handles `apply-move`.
    pub fn on_apply_move(mut self, f: impl FnMut(&MoveRecord) + 'static) -> Self {
        self.apply_move = Some(Box::new(f));
        self
    }

    /// Handles `report-capture`.
    pub fn on_report_capture(
        mut self,
        f: impl FnMut(Position, Player, &PieceKind) + 'static,
    ) -> Self {
        self.report_capture = Some(Box::new(f));
        self
    }

    /// Whether a handler for `capability` has been provided.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::ResetBoard => self.reset_board.is_some(),
            Capability::PlaceDen => self.place_den.is_some(),
            Capability::PlaceTrap => self.place_trap.is_some(),
            Capability::PlacePiece => self.place_piece.is_some(),
            Capability::MarkGrass => self.mark_grass.is_some(),
            Capability::MarkWater => self.mark_water.is_some(),
            Capability::AnnounceWin => self.announce_win.is_some(),
            Capability::ApplyMove => self.apply_move.is_some(),
            Capability::ReportCapture => self.report_capture.is_some(),
        }
    }

    /// Capabilities still missing, in protocol order.
    pub fn missing(&self) -> Vec<Capability> {
        Capability::iter().filter(|c| !self.has(*c)).collect()
    }

    /// Checks that all nine capabilities are present.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError`] listing every absent capability.
    #[instrument(skip(self))]
    pub fn validate(self) -> Result<ValidatedCallbacks, RegistrationError> {
        let missing = self.missing();
        debug!(missing = missing.len(), "Validating callback set");

        match self {
            CallbackSet {
                reset_board: Some(reset_board),
                place_den: Some(place_den),
                place_trap: Some(place_trap),
                place_piece: Some(place_piece),
                mark_grass: Some(mark_grass),
                mark_water: Some(mark_water),
                announce_win: Some(announce_win),
                apply_move: Some(apply_move),
                report_capture: Some(report_capture),
            } => Ok(ValidatedCallbacks {
                reset_board,
                place_den,
                place_trap,
                place_piece,
                mark_grass,
                mark_water,
                announce_win,
                apply_move,
                report_capture,
            }),
            _ => Err(RegistrationError { missing }),
        }
    }
}

/// A [`CallbackSet`] with every capability present.
pub struct ValidatedCallbacks {
    reset_board: Box<dyn FnMut()>,
    place_den: OwnedCellFn,
    place_trap: OwnedCellFn,
    place_piece: PieceFn,
    mark_grass: PositionFn,
    mark_water: PositionFn,
    announce_win: Box<dyn FnMut(Player)>,
    apply_move: Box<dyn FnMut(&MoveRecord)>,
    report_capture: PieceFn,
}

impl std::fmt::Debug for ValidatedCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatedCallbacks").finish_non_exhaustive()
    }
}

impl RenderCallbacks for ValidatedCallbacks {
    fn reset_board(&mut self) {
        (self.reset_board)()
    }

    fn place_den(&mut self, at: Position, owner: Player) {
        (self.place_den)(at, owner)
    }

    fn place_trap(&mut self, at: Position, owner: Player) {
        (self.place_trap)(at, owner)
    }

    fn place_piece(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        (self.place_piece)(at, owner, kind)
    }

    fn mark_grass(&mut self, at: Position) {
        (self.mark_grass)(at)
    }

    fn mark_water(&mut self, at: Position) {
        (self.mark_water)(at)
    }

    fn announce_win(&mut self, winner: Player) {
        (self.announce_win)(winner)
    }

    fn apply_move(&mut self, record: &MoveRecord) {
        (self.apply_move)(record)
    }

    fn report_capture(&mut self, at: Position, owner: Player, kind: &PieceKind) {
        (self.report_capture)(at, owner, kind)
    }
}
