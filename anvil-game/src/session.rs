//! Forge session state machine.
//!
//! A session walks the catalog's contracts in order. Strikes build progress
//! on the active contract; reaching the requirement parks the session in
//! [`SessionPhase::ContractComplete`] until [`ForgeSession::complete_contract`]
//! pays the bonus and moves on. Completing the last contract parks it in
//! [`SessionPhase::CampaignComplete`] until [`ForgeSession::finish_campaign`]
//! wipes the run.

use crate::catalog::{Contract, ForgeCatalog};
use crate::constants::{
    DIFFICULTY_SPEED_WEIGHT, HEAT_CONTRACT_COOLDOWN, HEAT_HIT_ACCURACY, HEAT_HIT_BASE, HEAT_MAX,
    HEAT_MISS_PENALTY, PAYOUT_ACCURACY_WEIGHT, PAYOUT_FLOOR, PAYOUT_PER_LEVEL, QUALITY_PER_LEVEL,
    SPEED_REDUCTION_CAP, SPEED_REDUCTION_PER_LEVEL, STRIKE_ACCURACY_PROGRESS,
    STRIKE_BASE_PROGRESS, TARGET_MARGIN_CAP, TARGET_MARGIN_PAD, TRACK_MAX, TRACK_MIN,
    WINDOW_PER_LEVEL,
};
use crate::numbers::{ceil_f64_to_u32, round_f64_to_u64, u64_to_f64};
use crate::persist::PersistedState;
use crate::slider::Slider;
use crate::upgrades::{PurchaseError, UpgradeEffect, UpgradeLevels};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Playing,
    ContractComplete,
    CampaignComplete,
}

/// Result of a single strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeOutcome {
    pub hit: bool,
    /// 1.0 dead centre, 0.0 at the window edge or outside it.
    pub accuracy: f64,
    pub progress_gained: f64,
    pub payout: u64,
    pub combo: u32,
    pub heat: f64,
    pub phase: SessionPhase,
}

/// Bonus paid when a contract's requirement is met.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractReward {
    pub contract_id: String,
    pub contract_name: String,
    pub bonus: u64,
    pub campaign_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseReceipt {
    pub upgrade_id: String,
    pub upgrade_name: String,
    pub cost: u64,
    pub level: u32,
}

#[derive(Debug, Clone)]
pub struct ForgeSession {
    catalog: ForgeCatalog,
    pub currency: u64,
    pub contract_index: usize,
    pub progress: f64,
    pub combo: u32,
    pub heat: f64,
    pub slider: Slider,
    pub target: f64,
    pub upgrades: UpgradeLevels,
    phase: SessionPhase,
}

impl ForgeSession {
    #[must_use]
    pub fn new(catalog: ForgeCatalog) -> Self {
        Self {
            catalog,
            currency: 0,
            contract_index: 0,
            progress: 0.0,
            combo: 0,
            heat: 0.0,
            slider: Slider::new(),
            target: f64::midpoint(TRACK_MIN, TRACK_MAX),
            upgrades: UpgradeLevels::new(),
            phase: SessionPhase::Playing,
        }
    }

    /// Rebuild a session from a saved snapshot, restoring the invariants
    /// the snapshot may have lost.
    #[must_use]
    pub fn from_persisted(catalog: ForgeCatalog, saved: PersistedState) -> Self {
        let mut session = Self::new(catalog);
        if saved.contract_index >= session.catalog.contract_count() {
            log::debug!(
                "saved contract index {} is past the campaign; starting fresh",
                saved.contract_index
            );
            return session;
        }
        session.currency = saved.currency;
        session.contract_index = saved.contract_index;
        session.upgrades = saved.upgrades.sanitized(&session.catalog.upgrades);
        session.progress = saved.progress.max(0.0);
        session.clamp_progress();
        session
    }

    #[must_use]
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            currency: self.currency,
            contract_index: self.contract_index,
            progress: self.progress,
            upgrades: self.upgrades.clone(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &ForgeCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The contract being worked. `None` only while a finished campaign
    /// waits for [`Self::finish_campaign`].
    #[must_use]
    pub fn contract(&self) -> Option<&Contract> {
        self.catalog.contract(self.contract_index)
    }

    #[must_use]
    pub fn is_final_contract(&self) -> bool {
        self.contract_index + 1 >= self.catalog.contract_count()
    }

    #[must_use]
    pub fn level_of(&self, effect: UpgradeEffect) -> u32 {
        self.catalog
            .upgrade_for(effect)
            .map_or(0, |def| self.upgrades.level(&def.id))
    }

    #[must_use]
    pub fn window(&self) -> f64 {
        f64::from(self.level_of(UpgradeEffect::Window))
            .mul_add(WINDOW_PER_LEVEL, self.catalog.tuning.base_window)
    }

    #[must_use]
    pub fn speed_multiplier(&self) -> f64 {
        let reduction = f64::from(self.level_of(UpgradeEffect::Speed)) * SPEED_REDUCTION_PER_LEVEL;
        1.0 - reduction.min(SPEED_REDUCTION_CAP)
    }

    #[must_use]
    pub fn quality_bonus(&self) -> f64 {
        f64::from(self.level_of(UpgradeEffect::Quality)) * QUALITY_PER_LEVEL
    }

    #[must_use]
    pub fn payout_bonus(&self) -> f64 {
        f64::from(self.level_of(UpgradeEffect::Payout)) * PAYOUT_PER_LEVEL
    }

    /// Slider travel per frame.
    #[must_use]
    pub fn step(&self) -> f64 {
        let difficulty = self.contract().map_or(0.0, |c| c.difficulty);
        difficulty.mul_add(DIFFICULTY_SPEED_WEIGHT, self.catalog.tuning.base_speed)
            * self.speed_multiplier()
    }

    /// Whole strikes-worth of progress still owed, rounded up.
    ///
    /// Near completion this can read 1 while the fractional progress is a
    /// hair short of the requirement; the display tolerates that.
    #[must_use]
    pub fn hits_remaining(&self) -> u32 {
        self.contract()
            .map_or(0, |c| ceil_f64_to_u32(f64::from(c.hits_required) - self.progress))
    }

    /// Fraction of the active contract done, 0..=1.
    #[must_use]
    pub fn completion(&self) -> f64 {
        self.contract().map_or(1.0, |c| {
            (self.progress / f64::from(c.hits_required)).clamp(0.0, 1.0)
        })
    }

    /// Lowest and highest edges of the target window on the track.
    #[must_use]
    pub fn target_bounds(&self) -> (f64, f64) {
        let half = self.window() / 2.0;
        (self.target - half, self.target + half)
    }

    /// Run the slider forward by `frames` animation frames.
    pub fn advance(&mut self, frames: f64) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.slider.advance(self.step() * frames);
    }

    /// Strike at the current slider position.
    ///
    /// Returns `None` while a completion is waiting to be resolved.
    pub fn strike<R: Rng>(&mut self, rng: &mut R) -> Option<StrikeOutcome> {
        if self.phase != SessionPhase::Playing {
            return None;
        }
        let contract = self.contract()?.clone();
        let half = self.window() / 2.0;
        let diff = (self.slider.value - self.target).abs();
        let accuracy = (1.0 - diff / half).max(0.0);
        let hit = diff <= half;

        let mut progress_gained = 0.0;
        let mut payout = 0;
        if hit {
            progress_gained = accuracy.mul_add(STRIKE_ACCURACY_PROGRESS, STRIKE_BASE_PROGRESS)
                + self.quality_bonus();
            self.progress += progress_gained;
            self.combo = self.combo.saturating_add(1);
            self.heat = (self.heat + accuracy.mul_add(HEAT_HIT_ACCURACY, HEAT_HIT_BASE)).min(HEAT_MAX);
            let per_hit = u64_to_f64(contract.base_reward) / f64::from(contract.hits_required);
            payout = round_f64_to_u64(
                per_hit
                    * accuracy.mul_add(PAYOUT_ACCURACY_WEIGHT, PAYOUT_FLOOR)
                    * (1.0 + self.payout_bonus()),
            );
            self.currency = self.currency.saturating_add(payout);
        } else {
            self.combo = 0;
            self.heat = (self.heat - HEAT_MISS_PENALTY).max(0.0);
        }

        self.reroll_target(rng);

        if self.progress >= f64::from(contract.hits_required) {
            log::debug!("contract {} requirement met", contract.id);
            self.phase = SessionPhase::ContractComplete;
        }

        Some(StrikeOutcome {
            hit,
            accuracy,
            progress_gained,
            payout,
            combo: self.combo,
            heat: self.heat,
            phase: self.phase,
        })
    }

    /// Place a new target so the whole window stays on the track.
    ///
    /// The margin is capped at `TARGET_MARGIN_CAP`; catalogs whose window can
    /// grow past twice that are rejected by [`ForgeCatalog::validate`].
    pub fn reroll_target<R: Rng>(&mut self, rng: &mut R) {
        let margin = (self.window() / 2.0 + TARGET_MARGIN_PAD).min(TARGET_MARGIN_CAP);
        let low = TRACK_MIN + margin;
        let high = TRACK_MAX - margin;
        self.target = if low < high {
            rng.gen_range(low..=high)
        } else {
            f64::midpoint(TRACK_MIN, TRACK_MAX)
        };
    }

    /// Pay the completion bonus and move to the next contract.
    ///
    /// Returns `None` unless a contract is waiting to be completed.
    pub fn complete_contract(&mut self) -> Option<ContractReward> {
        if self.phase != SessionPhase::ContractComplete {
            return None;
        }
        let contract = self.contract()?.clone();
        let bonus = round_f64_to_u64(u64_to_f64(contract.base_reward) * (1.0 + self.payout_bonus()));
        self.currency = self.currency.saturating_add(bonus);
        self.contract_index += 1;
        self.progress = 0.0;
        self.combo = 0;
        self.heat = (self.heat - HEAT_CONTRACT_COOLDOWN).max(0.0);

        let campaign_complete = self.contract_index >= self.catalog.contract_count();
        self.phase = if campaign_complete {
            SessionPhase::CampaignComplete
        } else {
            SessionPhase::Playing
        };
        log::info!(
            "contract {} complete (bonus {bonus}, campaign complete: {campaign_complete})",
            contract.id
        );
        Some(ContractReward {
            contract_id: contract.id,
            contract_name: contract.name,
            bonus,
            campaign_complete,
        })
    }

    /// Wipe the run back to the first contract with nothing owned.
    pub fn finish_campaign(&mut self) {
        self.currency = 0;
        self.contract_index = 0;
        self.progress = 0.0;
        self.combo = 0;
        self.heat = 0.0;
        self.upgrades.clear();
        self.phase = SessionPhase::Playing;
    }

    /// Price of the next level of `id`, or `None` if unknown or maxed.
    #[must_use]
    pub fn upgrade_cost(&self, id: &str) -> Option<u64> {
        let def = self.catalog.upgrade(id)?;
        let level = self.upgrades.level(id);
        (!def.is_maxed(level)).then(|| def.cost_at(level))
    }

    /// Buy one level of `id`.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the upgrade is unknown, already
    /// maxed, or costs more than the current currency.
    pub fn purchase_upgrade(&mut self, id: &str) -> Result<PurchaseReceipt, PurchaseError> {
        let def = self.catalog.upgrade(id).ok_or(PurchaseError::Unknown)?;
        let level = self.upgrades.level(id);
        if def.is_maxed(level) {
            return Err(PurchaseError::Maxed);
        }
        let cost = def.cost_at(level);
        if self.currency < cost {
            return Err(PurchaseError::Unaffordable {
                cost,
                available: self.currency,
            });
        }
        let upgrade_name = def.name.clone();
        self.currency -= cost;
        let level = self.upgrades.increment(id);
        Ok(PurchaseReceipt {
            upgrade_id: id.to_string(),
            upgrade_name,
            cost,
            level,
        })
    }

    fn clamp_progress(&mut self) {
        if let Some(contract) = self.contract() {
            self.progress = self.progress.min(f64::from(contract.hits_required));
        }
    }
}
