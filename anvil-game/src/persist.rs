//! The serializable forge snapshot and its load/save policy.
use crate::storage::KeyValueStore;
use crate::upgrades::UpgradeLevels;
use serde::{Deserialize, Serialize};

/// What survives a page reload. Combo, heat and the slider do not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub currency: u64,
    pub contract_index: usize,
    pub progress: f64,
    #[serde(default)]
    pub upgrades: UpgradeLevels,
}

/// Reads and writes one [`PersistedState`] blob under a fixed key.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    #[must_use]
    pub const fn backend(&self) -> &S {
        &self.store
    }

    /// Load the saved snapshot.
    ///
    /// A blob that does not parse is logged, removed from storage and
    /// treated as absent.
    #[must_use]
    pub fn load(&self) -> Option<PersistedState> {
        let raw = self.store.get(&self.key)?;
        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(state) if state.progress.is_finite() => Some(state),
            Ok(_) => {
                log::warn!("discarding saved state under {}: non-finite progress", self.key);
                self.store.remove(&self.key);
                None
            }
            Err(err) => {
                log::warn!("discarding corrupt saved state under {}: {err}", self.key);
                self.store.remove(&self.key);
                None
            }
        }
    }

    #[must_use]
    pub fn load_or_default(&self) -> PersistedState {
        self.load().unwrap_or_default()
    }

    pub fn save(&self, state: &PersistedState) {
        match serde_json::to_string(state) {
            Ok(json) => self.store.set(&self.key, &json),
            Err(err) => log::warn!("could not serialize state for {}: {err}", self.key),
        }
    }
}
