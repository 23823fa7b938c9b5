//! Upgrade shop definitions and the level ledger a session carries.
use crate::numbers::{round_f64_to_u64, u64_to_f64};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which derived quantity an upgrade feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeEffect {
    Window,
    Speed,
    Quality,
    Payout,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeDefinition {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub base_cost: u64,
    pub cost_multiplier: f64,
    #[serde(default)]
    pub max_level: Option<u32>,
    pub effect: UpgradeEffect,
}

impl UpgradeDefinition {
    /// Price of the next level when `level` levels are already owned.
    #[must_use]
    pub fn cost_at(&self, level: u32) -> u64 {
        let exponent = i32::try_from(level).unwrap_or(i32::MAX);
        let base = u64_to_f64(self.base_cost);
        round_f64_to_u64(base * self.cost_multiplier.powi(exponent))
    }

    #[must_use]
    pub fn is_maxed(&self, level: u32) -> bool {
        self.max_level.is_some_and(|max| level >= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseError {
    #[error("no such upgrade")]
    Unknown,
    #[error("already at max level")]
    Maxed,
    #[error("need {cost}, have {available}")]
    Unaffordable { cost: u64, available: u64 },
}

/// Purchased levels keyed by upgrade id. Absent ids are level 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpgradeLevels(BTreeMap<String, u32>);

impl UpgradeLevels {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn level(&self, id: &str) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Bump a level by one and return the new value.
    pub fn increment(&mut self, id: &str) -> u32 {
        let entry = self.0.entry(id.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.values().all(|level| *level == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, level)| (id.as_str(), *level))
    }

    /// Drop unknown ids and clamp each level to its definition's maximum.
    #[must_use]
    pub fn sanitized(mut self, defs: &[UpgradeDefinition]) -> Self {
        self.0.retain(|id, level| {
            let Some(def) = defs.iter().find(|d| &d.id == id) else {
                log::debug!("dropping unknown upgrade {id}");
                return false;
            };
            if let Some(max) = def.max_level {
                *level = (*level).min(max);
            }
            *level > 0
        });
        self
    }
}

impl FromIterator<(String, u32)> for UpgradeLevels {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
