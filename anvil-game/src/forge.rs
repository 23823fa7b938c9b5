//! The forge minigame wired to storage, the ledger and notifications.
use crate::catalog::ForgeCatalog;
use crate::constants::FORGE_SESSION_KEY;
use crate::ledger::{GameId, ResourceLedger, award_victory_point};
use crate::notify::{ToastRequest, ToastStore, ToastVariant};
use crate::persist::SessionStore;
use crate::session::{ContractReward, ForgeSession, PurchaseReceipt, SessionPhase, StrikeOutcome};
use crate::storage::KeyValueStore;
use crate::upgrades::PurchaseError;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Everything one strike caused, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct StrikeReport {
    pub outcome: StrikeOutcome,
    pub contract: Option<ContractReward>,
    pub crests: Option<i64>,
    /// New global total when this strike finished the campaign.
    pub victory_points: Option<i64>,
}

/// A mounted forge view: session plus its persistence and RNG.
pub struct ForgeGame<S: KeyValueStore> {
    session: ForgeSession,
    sessions: SessionStore<S>,
    rng: ChaCha20Rng,
}

impl<S: KeyValueStore> ForgeGame<S> {
    /// Restore the saved session (or start fresh) and place the first target.
    pub fn load(store: S, catalog: ForgeCatalog, seed: u64) -> Self {
        let sessions = SessionStore::new(store, FORGE_SESSION_KEY);
        let saved = sessions.load();
        let session = match saved.clone() {
            Some(state) => ForgeSession::from_persisted(catalog, state),
            None => ForgeSession::new(catalog),
        };
        let mut game = Self {
            session,
            sessions,
            rng: ChaCha20Rng::seed_from_u64(seed),
        };
        game.session.reroll_target(&mut game.rng);
        if saved.is_some_and(|state| state != game.session.snapshot()) {
            game.persist();
        }
        game
    }

    #[must_use]
    pub const fn session(&self) -> &ForgeSession {
        &self.session
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        self.sessions.backend()
    }

    #[must_use]
    pub fn victory_points(&self) -> i64 {
        crate::ledger::victory_points(self.store())
    }

    #[must_use]
    pub fn crests(&self) -> i64 {
        ResourceLedger::new(self.store()).count(GameId::Forge)
    }

    /// One animation tick's worth of slider travel, scaled by `frames`.
    pub fn advance(&mut self, frames: f64) {
        self.session.advance(frames);
    }

    /// Strike now and resolve any contract or campaign completion it causes.
    pub fn strike(&mut self, toasts: &mut ToastStore) -> Option<StrikeReport> {
        let outcome = self.session.strike(&mut self.rng)?;
        let mut report = StrikeReport {
            outcome,
            contract: None,
            crests: None,
            victory_points: None,
        };

        if self.session.phase() == SessionPhase::ContractComplete {
            self.complete_contract(toasts, &mut report);
        }
        if self.session.phase() == SessionPhase::CampaignComplete {
            report.victory_points = Some(self.finish_campaign(toasts));
        }
        self.persist();
        Some(report)
    }

    fn complete_contract(&mut self, toasts: &mut ToastStore, report: &mut StrikeReport) {
        let Some(reward) = self.session.complete_contract() else {
            return;
        };
        let crests = ResourceLedger::new(self.store()).award(GameId::Forge);
        let _ = toasts.emit(
            ToastRequest::new(format!("{} delivered", reward.contract_name))
                .description(format!("+{} coin bonus, +1 crest", reward.bonus))
                .variant(ToastVariant::Success),
        );
        report.crests = Some(crests);
        report.contract = Some(reward);
    }

    fn finish_campaign(&mut self, toasts: &mut ToastStore) -> i64 {
        let total = award_victory_point(self.store());
        log::info!("forge campaign complete; victory points now {total}");
        let _ = toasts.emit(
            ToastRequest::new("Campaign complete!")
                .description(format!("Victory points: {total}"))
                .variant(ToastVariant::Success),
        );
        self.session.finish_campaign();
        self.session.reroll_target(&mut self.rng);
        total
    }

    /// Buy one level of an upgrade, announcing the result either way.
    ///
    /// # Errors
    ///
    /// Returns the session's [`PurchaseError`]; nothing is spent or saved.
    pub fn purchase(
        &mut self,
        upgrade_id: &str,
        toasts: &mut ToastStore,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        match self.session.purchase_upgrade(upgrade_id) {
            Ok(receipt) => {
                let _ = toasts.emit(
                    ToastRequest::new(format!("{} upgraded", receipt.upgrade_name))
                        .description(format!("Level {} for {} coins", receipt.level, receipt.cost)),
                );
                self.persist();
                Ok(receipt)
            }
            Err(err) => {
                let _ = toasts.emit(
                    ToastRequest::new("Can't buy that yet")
                        .description(err.to_string())
                        .variant(ToastVariant::Destructive),
                );
                Err(err)
            }
        }
    }

    fn persist(&self) {
        self.sessions.save(&self.session.snapshot());
    }
}
