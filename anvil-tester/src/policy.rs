use std::fmt;

use anvil_game::ForgeSession;
use clap::ValueEnum;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;

/// Scripted player behaviours for headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Strike on the frame closest to the target centre; buy upgrades greedily.
    Perfect,
    /// Strike anywhere in the inner part of the window; buy upgrades greedily.
    Steady,
    /// Strike at random moments; never shop.
    Sloppy,
}

/// Chance per frame that a sloppy player swings.
const SLOPPY_SWING_CHANCE: f64 = 1.0 / 40.0;
/// Fraction of the window a steady player treats as "close enough".
const STEADY_TOLERANCE: f64 = 0.3;

impl Policy {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Perfect => "Perfect",
            Self::Steady => "Steady",
            Self::Sloppy => "Sloppy",
        }
    }

    /// Decide whether to strike on this frame.
    pub fn should_strike(self, session: &ForgeSession, rng: &mut ChaCha20Rng) -> bool {
        let diff = (session.slider.value - session.target).abs();
        match self {
            Self::Perfect => diff <= session.step() / 2.0,
            Self::Steady => diff <= session.window() * STEADY_TOLERANCE,
            Self::Sloppy => rng.gen_bool(SLOPPY_SWING_CHANCE),
        }
    }

    /// Upgrade to buy next, if any. Cheapest affordable first.
    #[must_use]
    pub fn pick_upgrade(self, session: &ForgeSession) -> Option<String> {
        if self == Self::Sloppy {
            return None;
        }
        session
            .catalog()
            .upgrades
            .iter()
            .filter_map(|def| session.upgrade_cost(&def.id).map(|cost| (cost, &def.id)))
            .filter(|(cost, _)| *cost <= session.currency)
            .min_by_key(|(cost, _)| *cost)
            .map(|(_, id)| id.clone())
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
