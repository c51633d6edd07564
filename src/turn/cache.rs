//! Cached legal moves for the side about to act.

use crate::games::jungle::{LegalMove, Player, Position};
use std::collections::HashMap;
use tracing::debug;

/// Legal moves from the latest query, indexed by origin.
///
/// Every query replaces the cache in full; there are no incremental updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegalMoveCache {
    player: Option<Player>,
    moves: Vec<LegalMove>,
    by_origin: HashMap<Position, usize>,
}

impl LegalMoveCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cache with `moves` for `player`.
    pub fn replace(&mut self, player: Player, moves: Vec<LegalMove>) {
        self.by_origin = moves
            .iter()
            .enumerate()
            .map(|(i, m)| (m.origin, i))
            .collect();
        self.moves = moves;
        self.player = Some(player);
        debug!(%player, origins = self.moves.len(), "Legal move cache replaced");
    }

    /// Drops every cached move.
    pub fn clear(&mut self) {
        self.player = None;
        self.moves.clear();
        self.by_origin.clear();
    }

    /// Player the cache was queried for.
    pub fn player(&self) -> Option<Player> {
        self.player
    }

    /// Destinations reachable from `origin`, in engine order.
    pub fn destinations(&self, origin: Position) -> Option<&[Position]> {
        self.by_origin
            .get(&origin)
            .map(|&i| self.moves[i].destinations.as_slice())
    }

    /// All cached moves.
    pub fn moves(&self) -> &[LegalMove] {
        &self.moves
    }

    /// Whether the cache holds no origins.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i64, y: i64) -> Position {
        Position::new(x, y).unwrap()
    }

    #[test]
    fn test_lookup_by_origin() {
        let mut cache = LegalMoveCache::new();
        cache.replace(
            Player::Blue,
            vec![
                LegalMove::new(pos(0, 6), vec![pos(0, 5), pos(1, 6)]),
                LegalMove::new(pos(6, 6), vec![pos(6, 5)]),
            ],
        );

        assert_eq!(cache.destinations(pos(6, 6)), Some(&[pos(6, 5)][..]));
        assert_eq!(cache.destinations(pos(3, 3)), None);
        assert_eq!(cache.player(), Some(Player::Blue));
    }

    #[test]
    fn test_replace_is_total() {
        let mut cache = LegalMoveCache::new();
        cache.replace(Player::Blue, vec![LegalMove::new(pos(0, 6), vec![pos(0, 5)])]);
        cache.replace(Player::Red, vec![LegalMove::new(pos(0, 2), vec![pos(0, 3)])]);

        assert_eq!(cache.destinations(pos(0, 6)), None);
        assert_eq!(cache.moves().len(), 1);
        assert_eq!(cache.player(), Some(Player::Red));
    }
}
