//! Centralized balance and tuning constants for Anvil Arcade game logic.
//!
//! Contract and upgrade data ship as JSON; the values here are the fixed
//! arithmetic around them and only change through reviewed code.

// Storage keys -------------------------------------------------------------
pub const FORGE_SESSION_KEY: &str = "anvil.forge.session";
pub const LEDGER_KEY_PREFIX: &str = "anvil.ledger.";
pub const VICTORY_POINTS_KEY: &str = "anvil.victory-points";

// Track geometry -----------------------------------------------------------
pub const TRACK_MIN: f64 = 0.0;
pub const TRACK_MAX: f64 = 100.0;
pub(crate) const TARGET_MARGIN_CAP: f64 = 40.0;
pub(crate) const TARGET_MARGIN_PAD: f64 = 6.0;

// Strike scoring -----------------------------------------------------------
pub(crate) const STRIKE_BASE_PROGRESS: f64 = 1.0;
pub(crate) const STRIKE_ACCURACY_PROGRESS: f64 = 1.5;
pub(crate) const PAYOUT_FLOOR: f64 = 0.8;
pub(crate) const PAYOUT_ACCURACY_WEIGHT: f64 = 0.7;

// Heat ---------------------------------------------------------------------
pub const HEAT_MAX: f64 = 100.0;
pub(crate) const HEAT_HIT_BASE: f64 = 8.0;
pub(crate) const HEAT_HIT_ACCURACY: f64 = 12.0;
pub(crate) const HEAT_MISS_PENALTY: f64 = 12.0;
pub(crate) const HEAT_CONTRACT_COOLDOWN: f64 = 30.0;

// Upgrade effects ----------------------------------------------------------
pub(crate) const WINDOW_PER_LEVEL: f64 = 3.5;
pub(crate) const SPEED_REDUCTION_PER_LEVEL: f64 = 0.12;
pub(crate) const SPEED_REDUCTION_CAP: f64 = 0.6;
pub(crate) const QUALITY_PER_LEVEL: f64 = 0.25;
pub(crate) const PAYOUT_PER_LEVEL: f64 = 0.18;
pub(crate) const DIFFICULTY_SPEED_WEIGHT: f64 = 0.25;

// Notifications ------------------------------------------------------------
pub const TOAST_LIMIT: usize = 3;
pub const TOAST_DEFAULT_DURATION_MS: f64 = 4_000.0;
