//! `localStorage` implementation of the core key-value capability.
use crate::dom;
use anvil_game::KeyValueStore;

/// Browser `localStorage`. Failures are logged and treated as a missing value
/// or a dropped write; the game never sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        let storage = dom::local_storage()
            .map_err(|err| log::warn!("storage read {key}: {}", dom::js_error_message(&err)))
            .ok()?;
        storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let result = dom::local_storage().and_then(|storage| storage.set_item(key, value));
        if let Err(err) = result {
            log::warn!("storage write {key}: {}", dom::js_error_message(&err));
        }
    }

    fn remove(&self, key: &str) {
        let result = dom::local_storage().and_then(|storage| storage.remove_item(key));
        if let Err(err) = result {
            log::warn!("storage remove {key}: {}", dom::js_error_message(&err));
        }
    }
}
