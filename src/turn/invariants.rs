//! First-class invariants for a running table.
//!
//! Invariants are logical properties that must hold between commands. They
//! are checked in debug builds and can be tested independently.

use crate::games::jungle::Player;
use crate::session::Session;
use crate::targets::TargetSet;
use std::collections::HashSet;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: committed moves alternate blue, red, blue, ...
///
/// The side to act is always the opponent of the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<Session> for AlternatingTurnInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();

        if history.first().is_some_and(|m| m.mover != Player::Blue) {
            return false;
        }

        if history.windows(2).any(|w| w[0].mover == w[1].mover) {
            return false;
        }

        match history.last() {
            Some(last) => session.to_move() == last.mover.opponent(),
            None => session.to_move() == Player::Blue,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns (blue, red, blue, ...)"
    }
}

/// Invariant: cached legal moves, when present, belong to the side to act.
pub struct CacheKeyedByMoverInvariant;

impl Invariant<Session> for CacheKeyedByMoverInvariant {
    fn holds(session: &Session) -> bool {
        match session.legal_moves().player() {
            Some(player) => player == session.to_move(),
            None => session.legal_moves().is_empty(),
        }
    }

    fn description() -> &'static str {
        "Legal move cache is keyed by the side about to act"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (AlternatingTurnInvariant, CacheKeyedByMoverInvariant);

/// Invariant: the live targets form one consistent selection.
///
/// Every target is live, destinations are distinct, and an origin is
/// recorded exactly when targets exist.
pub struct SingleSelectionInvariant;

impl Invariant<TargetSet> for SingleSelectionInvariant {
    fn holds(set: &TargetSet) -> bool {
        if set.is_empty() {
            return set.origin().is_none();
        }
        let mut seen = HashSet::new();
        set.origin().is_some()
            && set
                .targets()
                .iter()
                .all(|t| t.subscription().is_live() && seen.insert(t.destination()))
    }

    fn description() -> &'static str {
        "At most one live target set, consistent with the selected origin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::jungle::{MoveRecord, Position};
    use crate::session::SessionConfig;

    fn pos(x: i64, y: i64) -> Position {
        Position::new(x, y).unwrap()
    }

    #[test]
    fn test_fresh_session_holds() {
        let session = Session::create(SessionConfig::local());
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_alternating_history_holds() {
        let mut session = Session::create(SessionConfig::local());
        session.record(MoveRecord::new(pos(0, 6), pos(0, 5), Player::Blue, false));
        session.advance();
        session.record(MoveRecord::new(pos(0, 2), pos(0, 3), Player::Red, false));
        session.advance();

        assert!(AlternatingTurnInvariant::holds(&session));
        assert_eq!(session.to_move(), Player::Blue);
    }

    #[test]
    fn test_same_player_twice_violates() {
        let mut session = Session::create(SessionConfig::local());
        session.record(MoveRecord::new(pos(0, 6), pos(0, 5), Player::Blue, false));
        session.record(MoveRecord::new(pos(0, 5), pos(0, 4), Player::Blue, false));
        session.advance();

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            AlternatingTurnInvariant::description()
        );
    }

    #[test]
    fn test_empty_target_set_holds() {
        assert!(SingleSelectionInvariant::holds(&TargetSet::new()));
    }
}
