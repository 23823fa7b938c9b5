//! Forge contracts, upgrade definitions and tuning, loaded from bundled JSON.
use crate::constants::{TARGET_MARGIN_CAP, WINDOW_PER_LEVEL};
use crate::upgrades::{UpgradeDefinition, UpgradeEffect};
use serde::{Deserialize, Serialize};

const DEFAULT_FORGE_DATA: &str = include_str!("../../anvil-web/static/assets/data/forge.json");

/// A single job in the forge campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub name: String,
    pub desc: String,
    /// Progress needed to finish the contract. Always positive in a valid catalog.
    pub hits_required: u32,
    pub base_reward: u64,
    pub difficulty: f64,
}

/// Base values the upgrade levels are layered on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForgeTuning {
    pub base_window: f64,
    pub base_speed: f64,
}

impl Default for ForgeTuning {
    fn default() -> Self {
        Self {
            base_window: 14.0,
            base_speed: 0.9,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog has no contracts")]
    NoContracts,
    #[error("contract {0} requires no hits")]
    ZeroHits(String),
    #[error("upgrade {0} is listed more than once")]
    DuplicateUpgrade(String),
    #[error("upgrade {0} has a non-positive cost curve")]
    BadCost(String),
    #[error("bad tuning: {0}")]
    BadTuning(String),
    #[error("window can grow to {width} but the track only fits {limit}")]
    WindowTooWide { width: f64, limit: f64 },
}

/// Ordered contracts plus the upgrade shop for one forge campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeCatalog {
    #[serde(default)]
    pub tuning: ForgeTuning,
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub upgrades: Vec<UpgradeDefinition>,
}

impl Default for ForgeCatalog {
    fn default() -> Self {
        Self::from_json(DEFAULT_FORGE_DATA).unwrap_or_else(|err| {
            log::warn!("bundled forge catalog rejected ({err}); using built-in fallback");
            Self::fallback()
        })
    }
}

impl ForgeCatalog {
    /// Parse and validate a catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the catalog breaks an invariant.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::default()
    }

    /// Check the invariants the session arithmetic relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let ForgeTuning {
            base_window,
            base_speed,
        } = self.tuning;
        if !base_window.is_finite() || base_window <= 0.0 {
            return Err(CatalogError::BadTuning(format!("base_window {base_window}")));
        }
        if !base_speed.is_finite() || base_speed <= 0.0 {
            return Err(CatalogError::BadTuning(format!("base_speed {base_speed}")));
        }
        if self.contracts.is_empty() {
            return Err(CatalogError::NoContracts);
        }
        if let Some(contract) = self.contracts.iter().find(|c| c.hits_required == 0) {
            return Err(CatalogError::ZeroHits(contract.id.clone()));
        }
        if let Some(contract) = self
            .contracts
            .iter()
            .find(|c| !c.difficulty.is_finite() || c.difficulty < 0.0)
        {
            return Err(CatalogError::BadTuning(format!(
                "contract {} difficulty {}",
                contract.id, contract.difficulty
            )));
        }
        for (idx, upgrade) in self.upgrades.iter().enumerate() {
            if self.upgrades[..idx].iter().any(|u| u.id == upgrade.id) {
                return Err(CatalogError::DuplicateUpgrade(upgrade.id.clone()));
            }
            if upgrade.base_cost == 0
                || !upgrade.cost_multiplier.is_finite()
                || upgrade.cost_multiplier < 1.0
            {
                return Err(CatalogError::BadCost(upgrade.id.clone()));
            }
        }
        self.check_window_fits()
    }

    /// The target margin tops out at `TARGET_MARGIN_CAP`, so a window wider
    /// than twice that would hang off the track at its widest level.
    fn check_window_fits(&self) -> Result<(), CatalogError> {
        let limit = 2.0 * TARGET_MARGIN_CAP;
        let width = match self.upgrade_for(UpgradeEffect::Window) {
            None => self.tuning.base_window,
            Some(def) => match def.max_level {
                Some(max) => f64::from(max).mul_add(WINDOW_PER_LEVEL, self.tuning.base_window),
                None => f64::INFINITY,
            },
        };
        if width > limit {
            return Err(CatalogError::WindowTooWide { width, limit });
        }
        Ok(())
    }

    #[must_use]
    pub fn contract(&self, index: usize) -> Option<&Contract> {
        self.contracts.get(index)
    }

    #[must_use]
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }

    #[must_use]
    pub fn upgrade(&self, id: &str) -> Option<&UpgradeDefinition> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    /// First upgrade with the given effect; the derived quantities read through this.
    #[must_use]
    pub fn upgrade_for(&self, effect: UpgradeEffect) -> Option<&UpgradeDefinition> {
        self.upgrades.iter().find(|u| u.effect == effect)
    }

    fn fallback() -> Self {
        let contract = |id: &str, name: &str, hits, reward, difficulty| Contract {
            id: id.to_string(),
            name: name.to_string(),
            desc: String::new(),
            hits_required: hits,
            base_reward: reward,
            difficulty,
        };
        let upgrade = |id: &str, name: &str, cost, mult, max, effect| UpgradeDefinition {
            id: id.to_string(),
            name: name.to_string(),
            desc: String::new(),
            base_cost: cost,
            cost_multiplier: mult,
            max_level: max,
            effect,
        };
        Self {
            tuning: ForgeTuning::default(),
            contracts: vec![
                contract("horseshoe-nails", "Horseshoe Nails", 8, 60, 0.6),
                contract("hunting-knife", "Hunting Knife", 10, 90, 0.8),
                contract("longsword", "Longsword", 12, 120, 1.0),
                contract("breastplate", "Breastplate", 14, 170, 1.3),
                contract("royal-crown", "Royal Crown", 16, 240, 1.6),
            ],
            upgrades: vec![
                upgrade("wide-tongs", "Wide Tongs", 40, 1.5, Some(8), UpgradeEffect::Window),
                upgrade("steady-bellows", "Steady Bellows", 55, 1.6, Some(5), UpgradeEffect::Speed),
                upgrade("whetstone", "Whetstone", 70, 1.7, Some(6), UpgradeEffect::Quality),
                upgrade("guild-seal", "Guild Seal", 90, 1.8, None, UpgradeEffect::Payout),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_matches_fallback() {
        let bundled = ForgeCatalog::from_json(DEFAULT_FORGE_DATA).unwrap();
        let fallback = ForgeCatalog::fallback();
        assert_eq!(bundled.tuning, fallback.tuning);
        assert_eq!(bundled.contract_count(), fallback.contract_count());
        for (a, b) in bundled.contracts.iter().zip(&fallback.contracts) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.hits_required, b.hits_required);
            assert_eq!(a.base_reward, b.base_reward);
        }
        let ids: Vec<_> = bundled.upgrades.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ["wide-tongs", "steady-bellows", "whetstone", "guild-seal"]);
    }

    #[test]
    fn rejects_empty_and_zero_hit_catalogs() {
        let empty = r#"{"contracts": []}"#;
        assert!(matches!(
            ForgeCatalog::from_json(empty),
            Err(CatalogError::NoContracts)
        ));

        let zero = r#"{"contracts": [
            {"id": "x", "name": "X", "desc": "", "hits_required": 0, "base_reward": 10, "difficulty": 1.0}
        ]}"#;
        assert!(matches!(
            ForgeCatalog::from_json(zero),
            Err(CatalogError::ZeroHits(id)) if id == "x"
        ));
    }

    fn with_tuning(base_window: f64, base_speed: f64, difficulty: f64) -> ForgeCatalog {
        let mut catalog = ForgeCatalog::fallback();
        catalog.tuning = ForgeTuning {
            base_window,
            base_speed,
        };
        catalog.contracts[0].difficulty = difficulty;
        catalog
    }

    #[test]
    fn rejects_bad_tuning() {
        let json = r#"{
            "tuning": {"base_window": -20.0, "base_speed": 0.9},
            "contracts": [{"id": "a", "name": "A", "desc": "", "hits_required": 3, "base_reward": 10, "difficulty": 1.0}]
        }"#;
        assert!(matches!(
            ForgeCatalog::from_json(json),
            Err(CatalogError::BadTuning(_))
        ));

        for catalog in [
            with_tuning(0.0, 0.9, 1.0),
            with_tuning(f64::NAN, 0.9, 1.0),
            with_tuning(14.0, 0.0, 1.0),
            with_tuning(14.0, f64::INFINITY, 1.0),
            with_tuning(14.0, 0.9, -0.5),
            with_tuning(14.0, 0.9, f64::NAN),
        ] {
            assert!(
                matches!(catalog.validate(), Err(CatalogError::BadTuning(_))),
                "{:?}",
                catalog.tuning
            );
        }
        assert!(with_tuning(14.0, 0.9, 0.0).validate().is_ok());

        let mut nan_cost = ForgeCatalog::fallback();
        nan_cost.upgrades[0].cost_multiplier = f64::NAN;
        assert!(matches!(nan_cost.validate(), Err(CatalogError::BadCost(id)) if id == "wide-tongs"));
    }

    #[test]
    fn rejects_windows_wider_than_the_track_allows() {
        let mut uncapped = ForgeCatalog::fallback();
        uncapped.upgrades[0].max_level = None;
        assert!(matches!(
            uncapped.validate(),
            Err(CatalogError::WindowTooWide { .. })
        ));

        let mut too_many_levels = ForgeCatalog::fallback();
        too_many_levels.upgrades[0].max_level = Some(20);
        assert!(matches!(
            too_many_levels.validate(),
            Err(CatalogError::WindowTooWide { width, .. }) if (width - 84.0).abs() < 1e-9
        ));

        let mut no_window_upgrade = with_tuning(81.0, 0.9, 1.0);
        no_window_upgrade.upgrades.clear();
        assert!(no_window_upgrade.validate().is_err());
        no_window_upgrade.tuning.base_window = 80.0;
        assert!(no_window_upgrade.validate().is_ok());
    }

    #[test]
    fn every_valid_catalog_keeps_targets_on_the_track() {
        use crate::constants::{TRACK_MAX, TRACK_MIN};
        use crate::session::ForgeSession;
        use rand::SeedableRng;
        use rand_chacha::ChaCha20Rng;

        let mut widest = with_tuning(52.0, 0.9, 1.0);
        assert!(widest.validate().is_ok());
        widest.upgrades.truncate(1);
        let mut session = ForgeSession::new(widest);
        for _ in 0..8 {
            session.upgrades.increment("wide-tongs");
        }
        assert!((session.window() - 80.0).abs() < 1e-9);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for _ in 0..2_000 {
            session.reroll_target(&mut rng);
            let (low, high) = session.target_bounds();
            assert!(low >= TRACK_MIN && high <= TRACK_MAX, "({low}, {high})");
        }
    }

    #[test]
    fn rejects_duplicate_upgrades() {
        let json = r#"{
            "contracts": [{"id": "a", "name": "A", "desc": "", "hits_required": 3, "base_reward": 10, "difficulty": 1.0}],
            "upgrades": [
                {"id": "u", "name": "U", "desc": "", "base_cost": 5, "cost_multiplier": 1.2, "effect": "window"},
                {"id": "u", "name": "U", "desc": "", "base_cost": 5, "cost_multiplier": 1.2, "effect": "speed"}
            ]
        }"#;
        assert!(matches!(
            ForgeCatalog::from_json(json),
            Err(CatalogError::DuplicateUpgrade(_))
        ));
    }

    #[test]
    fn missing_tuning_uses_defaults() {
        let json = r#"{"contracts": [{"id": "a", "name": "A", "desc": "", "hits_required": 3, "base_reward": 10, "difficulty": 1.0}]}"#;
        let catalog = ForgeCatalog::from_json(json).unwrap();
        assert_eq!(catalog.tuning, ForgeTuning::default());
        assert!(catalog.upgrades.is_empty());
        assert!(catalog.upgrade_for(UpgradeEffect::Window).is_none());
    }
}
