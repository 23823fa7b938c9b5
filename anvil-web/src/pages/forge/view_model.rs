use anvil_game::{ForgeGame, ForgeSession, KeyValueStore, SessionPhase};

/// One row of the upgrade shop.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopEntry {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub level: u32,
    pub max_level: Option<u32>,
    /// `None` once maxed.
    pub cost: Option<u64>,
    pub affordable: bool,
}

/// Render-ready snapshot of a forge game.
#[derive(Debug, Clone, PartialEq)]
pub struct ForgeViewModel {
    pub contract_name: String,
    pub contract_desc: String,
    pub contract_number: usize,
    pub contract_total: usize,
    pub hits_remaining: u32,
    /// 0..=100
    pub progress_pct: f64,
    pub currency: u64,
    pub combo: u32,
    pub heat: f64,
    pub slider: f64,
    pub target: f64,
    pub window: f64,
    pub shop: Vec<ShopEntry>,
    pub victory_points: i64,
    pub crests: i64,
    pub playing: bool,
}

impl ForgeViewModel {
    #[must_use]
    pub fn from_game<S: KeyValueStore>(game: &ForgeGame<S>) -> Self {
        Self::from_session(game.session(), game.victory_points(), game.crests())
    }

    #[must_use]
    pub fn from_session(session: &ForgeSession, victory_points: i64, crests: i64) -> Self {
        let catalog = session.catalog();
        let (contract_name, contract_desc) = session
            .contract()
            .map(|c| (c.name.clone(), c.desc.clone()))
            .unwrap_or_default();
        let shop = catalog
            .upgrades
            .iter()
            .map(|def| {
                let cost = session.upgrade_cost(&def.id);
                ShopEntry {
                    id: def.id.clone(),
                    name: def.name.clone(),
                    desc: def.desc.clone(),
                    level: session.upgrades.level(&def.id),
                    max_level: def.max_level,
                    cost,
                    affordable: cost.is_some_and(|c| c <= session.currency),
                }
            })
            .collect();
        Self {
            contract_name,
            contract_desc,
            contract_number: (session.contract_index + 1).min(catalog.contract_count()),
            contract_total: catalog.contract_count(),
            hits_remaining: session.hits_remaining(),
            progress_pct: session.completion() * 100.0,
            currency: session.currency,
            combo: session.combo,
            heat: session.heat,
            slider: session.slider.value,
            target: session.target,
            window: session.window(),
            shop,
            victory_points,
            crests,
            playing: session.phase() == SessionPhase::Playing,
        }
    }
}
