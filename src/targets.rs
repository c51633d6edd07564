//! Move targets: the transient destination markers offered for a selected origin.
//!
//! A [`Target`] owns a one-shot [`Subscription`] and the visual the surface
//! drew for it. All targets of one selection share a single arming flag, so
//! firing any of them disarms every sibling before the set is torn down.

use crate::games::jungle::{Player, Position};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, instrument, warn};

/// Identifies a target across UI events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("target#{}", _0)]
pub struct TargetId(u64);

/// Visual resource created by a [`TableSurface`] for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
#[display("visual#{}", _0)]
pub struct VisualHandle(pub u64);

/// The parts of the UI the session draws itself, outside the engine callbacks.
pub trait TableSurface {
    /// Draws a target marker on `at`.
    fn show_target(&mut self, at: Position) -> VisualHandle;

    /// Removes a marker drawn by [`TableSurface::show_target`].
    fn remove_target(&mut self, handle: VisualHandle);

    /// Shows whose turn it is.
    fn show_turn(&mut self, player: Player);

    /// Hides the turn indicator.
    fn hide_turn(&mut self);
}

impl<T: TableSurface + ?Sized> TableSurface for Box<T> {
    fn show_target(&mut self, at: Position) -> VisualHandle {
        (**self).show_target(at)
    }

    fn remove_target(&mut self, handle: VisualHandle) {
        (**self).remove_target(handle)
    }

    fn show_turn(&mut self, player: Player) {
        (**self).show_turn(player)
    }

    fn hide_turn(&mut self) {
        (**self).hide_turn()
    }
}

impl<T: TableSurface + ?Sized> TableSurface for Rc<std::cell::RefCell<T>> {
    fn show_target(&mut self, at: Position) -> VisualHandle {
        self.borrow_mut().show_target(at)
    }

    fn remove_target(&mut self, handle: VisualHandle) {
        self.borrow_mut().remove_target(handle)
    }

    fn show_turn(&mut self, player: Player) {
        self.borrow_mut().show_turn(player)
    }

    fn hide_turn(&mut self) {
        self.borrow_mut().hide_turn()
    }
}

/// One-shot, cancellable activation for a target.
///
/// Live while both its own flag and the shared group flag are set.
#[derive(Debug)]
pub struct Subscription {
    own: Cell<bool>,
    group: Rc<Cell<bool>>,
}

impl Subscription {
    fn new(group: Rc<Cell<bool>>) -> Self {
        Self {
            own: Cell::new(true),
            group,
        }
    }

    /// Whether the subscription can still fire.
    pub fn is_live(&self) -> bool {
        self.own.get() && self.group.get()
    }

    /// Fires once. Disarms every sibling sharing the group flag.
    fn fire(&self) -> bool {
        if !self.is_live() {
            return false;
        }
        self.group.set(false);
        self.own.set(false);
        true
    }

    fn cancel(&self) {
        self.own.set(false);
    }
}

/// A destination marker: a live subscription plus its visual.
#[derive(Debug)]
pub struct Target {
    id: TargetId,
    destination: Position,
    subscription: Subscription,
    visual: VisualHandle,
}

impl Target {
    /// Event identifier.
    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Destination this target commits to.
    pub fn destination(&self) -> Position {
        self.destination
    }

    /// The activation subscription.
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// Cancels the subscription and removes the visual together.
    fn dismiss(self, surface: &mut dyn TableSurface) {
        self.subscription.cancel();
        surface.remove_target(self.visual);
    }
}

/// A move chosen by activating a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetCommit {
    /// Selected origin.
    pub origin: Position,
    /// Activated destination.
    pub destination: Position,
}

/// The single live set of targets, always for the currently selected origin.
#[derive(Debug, Default)]
pub struct TargetSet {
    origin: Option<Position>,
    targets: Vec<Target>,
    next_id: u64,
}

impl TargetSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Origin the live targets belong to.
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    /// Live targets, in destination order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Number of live targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no target is live.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Target drawn on `at`, if any.
    pub fn target_at(&self, at: Position) -> Option<TargetId> {
        self.targets
            .iter()
            .find(|t| t.destination == at)
            .map(Target::id)
    }

    /// Replaces the live set with one target per destination.
    ///
    /// The previous set is destroyed first, even when `destinations` is empty.
    #[instrument(skip(self, destinations, surface), fields(count = destinations.len()))]
    pub fn offer(
        &mut self,
        origin: Position,
        destinations: &[Position],
        surface: &mut dyn TableSurface,
    ) -> usize {
        self.destroy(surface);
        if destinations.is_empty() {
            return 0;
        }

        let group = Rc::new(Cell::new(true));
        self.origin = Some(origin);
        for &destination in destinations {
            self.next_id += 1;
            let visual = surface.show_target(destination);
            self.targets.push(Target {
                id: TargetId(self.next_id),
                destination,
                subscription: Subscription::new(group.clone()),
                visual,
            });
        }
        debug!(%origin, "Offered targets");
        self.targets.len()
    }

    /// Cancels and removes every target. Safe to call on an empty set.
    ///
    /// Returns how many targets were dismissed.
    pub fn destroy(&mut self, surface: &mut dyn TableSurface) -> usize {
        let count = self.targets.len();
        for target in self.targets.drain(..) {
            target.dismiss(surface);
        }
        self.origin = None;
        count
    }

    /// Fires the target `id` if it is still live.
    ///
    /// A successful activation destroys the whole set, whichever target fired.
    /// Stale or repeated activations return `None`.
    #[instrument(skip(self, surface))]
    pub fn activate(&mut self, id: TargetId, surface: &mut dyn TableSurface) -> Option<TargetCommit> {
        let Some(origin) = self.origin else {
            debug!("Activation with no live targets");
            return None;
        };
        let Some(target) = self.targets.iter().find(|t| t.id == id) else {
            debug!("Activation of a stale target");
            return None;
        };
        if !target.subscription.fire() {
            warn!("Target already fired");
            return None;
        }

        let commit = TargetCommit {
            origin,
            destination: target.destination,
        };
        self.destroy(surface);
        Some(commit)
    }
}
