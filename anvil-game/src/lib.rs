//! Anvil Arcade Game Engine
//!
//! Platform-agnostic core logic for the Anvil Arcade minigames: the forge
//! session state machine, its upgrade shop, persistence over a key-value
//! capability, the cross-game ledger and the toast queue. No browser or UI
//! dependencies live here.

pub mod catalog;
pub mod constants;
pub mod forge;
pub mod ledger;
pub mod notify;
pub mod numbers;
pub mod persist;
pub mod session;
pub mod slider;
pub mod storage;
pub mod upgrades;

// Re-export commonly used types
pub use catalog::{CatalogError, Contract, ForgeCatalog, ForgeTuning};
pub use forge::{ForgeGame, StrikeReport};
pub use ledger::{GameId, ResourceLedger, award_victory_point, victory_points};
pub use notify::{Toast, ToastId, ToastRequest, ToastStore, ToastTicket, ToastVariant};
pub use persist::{PersistedState, SessionStore};
pub use session::{
    ContractReward, ForgeSession, PurchaseReceipt, SessionPhase, StrikeOutcome,
};
pub use slider::{Direction, Slider};
pub use storage::{KeyValueStore, MemoryStore, add_one, get_count, set_count};
pub use upgrades::{PurchaseError, UpgradeDefinition, UpgradeEffect, UpgradeLevels};
