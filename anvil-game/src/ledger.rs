//! Cross-game resource ledger and the global victory-point counter.
use crate::constants::{LEDGER_KEY_PREFIX, VICTORY_POINTS_KEY};
use crate::storage::{KeyValueStore, add_one, get_count};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minigames that keep a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameId {
    Forge,
    Glyph,
    Tide,
}

impl GameId {
    pub const ALL: [Self; 3] = [Self::Forge, Self::Glyph, Self::Tide];

    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Forge => "forge",
            Self::Glyph => "glyph",
            Self::Tide => "tide",
        }
    }

    /// Display name of the resource this game pays out.
    #[must_use]
    pub const fn resource(self) -> &'static str {
        match self {
            Self::Forge => "Crests",
            Self::Glyph => "Seals",
            Self::Tide => "Shards",
        }
    }

    #[must_use]
    pub fn storage_key(self) -> String {
        format!("{LEDGER_KEY_PREFIX}{}", self.slug())
    }

    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|game| game.slug() == slug)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Read/increment view over the per-game counters.
#[derive(Debug, Clone)]
pub struct ResourceLedger<S> {
    store: S,
}

impl<S: KeyValueStore> ResourceLedger<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn count(&self, game: GameId) -> i64 {
        get_count(&self.store, &game.storage_key())
    }

    /// Record one qualifying completion and return the new count.
    pub fn award(&self, game: GameId) -> i64 {
        let total = add_one(&self.store, &game.storage_key());
        log::debug!("ledger {game} -> {total}");
        total
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<(GameId, i64)> {
        GameId::ALL
            .into_iter()
            .map(|game| (game, self.count(game)))
            .collect()
    }
}

#[must_use]
pub fn victory_points(store: &impl KeyValueStore) -> i64 {
    get_count(store, VICTORY_POINTS_KEY)
}

/// Add exactly one victory point and return the new total.
pub fn award_victory_point(store: &impl KeyValueStore) -> i64 {
    add_one(store, VICTORY_POINTS_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn slugs_round_trip_and_form_keys() {
        for game in GameId::ALL {
            assert_eq!(GameId::from_slug(game.slug()), Some(game));
        }
        assert_eq!(GameId::Tide.storage_key(), "anvil.ledger.tide");
        assert!(GameId::from_slug("chess").is_none());
    }

    #[test]
    fn awards_are_independent_per_game() {
        let store = MemoryStore::new();
        let ledger = ResourceLedger::new(store.clone());
        assert_eq!(ledger.award(GameId::Forge), 1);
        assert_eq!(ledger.award(GameId::Forge), 2);
        assert_eq!(ledger.award(GameId::Glyph), 1);
        assert_eq!(
            ledger.snapshot(),
            vec![(GameId::Forge, 2), (GameId::Glyph, 1), (GameId::Tide, 0)]
        );
    }

    #[test]
    fn victory_points_count_up_from_garbage() {
        let store = MemoryStore::new();
        store.set(VICTORY_POINTS_KEY, "{}");
        assert_eq!(victory_points(&store), 0);
        assert_eq!(award_victory_point(&store), 1);
        assert_eq!(victory_points(&store), 1);
    }
}
