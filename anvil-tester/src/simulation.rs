use anyhow::{Result, bail};
use anvil_game::numbers::u64_to_f64;
use anvil_game::{ForgeCatalog, ForgeGame, MemoryStore, ToastStore};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

use crate::policy::Policy;

/// Milliseconds per animation frame, used to drive toast expiry.
const FRAME_MS: f64 = 1_000.0 / 60.0;
/// Frames allowed per strike before a run is declared stuck.
const FRAMES_PER_STRIKE_CAP: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub seed: u64,
    pub policy: Policy,
    pub campaigns: u32,
    pub max_strikes: u64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub policy: Option<Policy>,
    pub campaigns_completed: u32,
    pub contracts_completed: u32,
    pub strikes: u64,
    pub hits: u64,
    pub misses: u64,
    pub best_combo: u32,
    pub upgrades_bought: u32,
    pub coins_spent: u64,
    pub frames: u64,
    pub victory_points: i64,
    pub crests: i64,
}

impl RunSummary {
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        if self.strikes == 0 {
            return 0.0;
        }
        u64_to_f64(self.hits) / u64_to_f64(self.strikes)
    }
}

/// Play `config.campaigns` full campaigns against an in-memory store.
///
/// # Errors
///
/// Fails when the run needs more than `max_strikes` strikes or the policy
/// stops swinging.
pub fn run_campaigns(config: &RunConfig) -> Result<RunSummary> {
    let catalog = ForgeCatalog::load_from_static();
    let mut game = ForgeGame::load(MemoryStore::new(), catalog, config.seed);
    let mut toasts = ToastStore::new();
    let mut rng = ChaCha20Rng::seed_from_u64(config.seed ^ 0x5EED);
    let mut summary = RunSummary {
        seed: config.seed,
        policy: Some(config.policy),
        ..RunSummary::default()
    };
    let mut idle_frames = 0_u64;

    while summary.campaigns_completed < config.campaigns {
        if summary.strikes >= config.max_strikes {
            bail!(
                "seed {} ({}) hit the strike cap of {} after {} campaigns",
                config.seed,
                config.policy,
                config.max_strikes,
                summary.campaigns_completed
            );
        }
        if idle_frames >= FRAMES_PER_STRIKE_CAP {
            bail!("seed {} ({}) stopped striking", config.seed, config.policy);
        }

        game.advance(1.0);
        summary.frames += 1;
        idle_frames += 1;
        toasts.advance_to(u64_to_f64(summary.frames) * FRAME_MS);

        if !config.policy.should_strike(game.session(), &mut rng) {
            continue;
        }
        idle_frames = 0;
        let Some(report) = game.strike(&mut toasts) else {
            continue;
        };
        summary.strikes += 1;
        if report.outcome.hit {
            summary.hits += 1;
        } else {
            summary.misses += 1;
        }
        summary.best_combo = summary.best_combo.max(report.outcome.combo);
        if report.contract.is_some() {
            summary.contracts_completed += 1;
        }
        if let Some(points) = report.victory_points {
            summary.campaigns_completed += 1;
            log::info!(
                "seed {} finished campaign {}; victory points {points}",
                config.seed,
                summary.campaigns_completed
            );
        }

        while let Some(id) = config.policy.pick_upgrade(game.session()) {
            match game.purchase(&id, &mut toasts) {
                Ok(receipt) => {
                    log::debug!(
                        "bought {} level {} for {}",
                        receipt.upgrade_id,
                        receipt.level,
                        receipt.cost
                    );
                    summary.upgrades_bought += 1;
                    summary.coins_spent += receipt.cost;
                }
                Err(err) => {
                    log::warn!("policy picked {id} but purchase failed: {err}");
                    break;
                }
            }
        }
    }

    summary.victory_points = game.victory_points();
    summary.crests = game.crests();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(policy: Policy, campaigns: u32, max_strikes: u64) -> RunConfig {
        RunConfig {
            seed: 1337,
            policy,
            campaigns,
            max_strikes,
        }
    }

    #[test]
    fn perfect_player_finishes_campaigns() {
        let summary = run_campaigns(&config(Policy::Perfect, 2, 1_000)).unwrap();
        assert_eq!(summary.campaigns_completed, 2);
        assert_eq!(summary.victory_points, 2);
        assert_eq!(summary.contracts_completed, 10);
        assert_eq!(summary.crests, 10);
        assert_eq!(summary.misses, 0);
        assert!(summary.upgrades_bought > 0);
        assert!((summary.hit_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn runs_are_deterministic_per_seed() {
        let a = run_campaigns(&config(Policy::Steady, 1, 1_000)).unwrap();
        let b = run_campaigns(&config(Policy::Steady, 1, 1_000)).unwrap();
        assert_eq!(a.strikes, b.strikes);
        assert_eq!(a.frames, b.frames);
        assert_eq!(a.coins_spent, b.coins_spent);
    }

    #[test]
    fn strike_cap_aborts_the_run() {
        let err = run_campaigns(&config(Policy::Sloppy, 1, 5)).unwrap_err();
        assert!(err.to_string().contains("strike cap"));
    }
}
