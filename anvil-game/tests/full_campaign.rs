use anvil_game::constants::{FORGE_SESSION_KEY, HEAT_MAX, TRACK_MAX, TRACK_MIN};
use anvil_game::{
    ForgeCatalog, ForgeGame, GameId, MemoryStore, PersistedState, ResourceLedger, SessionPhase,
    SessionStore, StrikeReport, ToastStore, ToastVariant, victory_points,
};

/// Sweep the slider until it sits in the inner half of the target window, then strike.
fn strike_on_target(game: &mut ForgeGame<MemoryStore>, toasts: &mut ToastStore) -> StrikeReport {
    for _ in 0..10_000 {
        let session = game.session();
        if (session.slider.value - session.target).abs() <= session.window() / 4.0 {
            return game.strike(toasts).expect("playing phase");
        }
        game.advance(0.25);
    }
    panic!("slider never reached the target window");
}

#[test]
fn full_campaign_awards_one_victory_point_and_resets() {
    let store = MemoryStore::new();
    let catalog = ForgeCatalog::default();
    let contract_count = catalog.contract_count();
    let mut game = ForgeGame::load(store.clone(), catalog, 0xF0E);
    let mut toasts = ToastStore::new();

    let mut completed = 0;
    let mut bought = 0;
    while completed < contract_count {
        let index_before = game.session().contract_index;
        let report = strike_on_target(&mut game, &mut toasts);
        assert!(report.outcome.hit);

        if let Some(reward) = report.contract {
            completed += 1;
            if reward.campaign_complete {
                assert_eq!(report.victory_points, Some(1));
                assert_eq!(game.session().contract_index, 0);
            } else {
                assert_eq!(game.session().contract_index, index_before + 1);
                assert!(report.victory_points.is_none());
                assert_eq!(victory_points(&store), 0);
            }
        }

        if game.session().currency >= 200 && game.purchase("whetstone", &mut toasts).is_ok() {
            bought += 1;
        }
    }

    assert!(bought > 0, "run should afford at least one whetstone");
    assert_eq!(victory_points(&store), 1);
    let ledger = ResourceLedger::new(store.clone());
    assert_eq!(ledger.count(GameId::Forge), i64::try_from(contract_count).unwrap());
    assert_eq!(ledger.count(GameId::Glyph), 0);

    let session = game.session();
    assert_eq!(session.phase(), SessionPhase::Playing);
    assert_eq!(session.currency, 0);
    assert_eq!(session.combo, 0);
    assert!(session.heat.abs() < f64::EPSILON);
    assert!(session.upgrades.is_empty());

    let saved = SessionStore::new(store.clone(), FORGE_SESSION_KEY)
        .load()
        .expect("reset state persisted");
    assert_eq!(saved, PersistedState::default());

    let last = &toasts.toasts()[0];
    assert_eq!(last.variant, ToastVariant::Success);
    assert!(
        last.description
            .as_deref()
            .unwrap_or_default()
            .contains("Victory points: 1")
    );
}

#[test]
fn second_campaign_adds_exactly_one_more_point() {
    let store = MemoryStore::new();
    let mut toasts = ToastStore::new();
    for expected in 1..=2 {
        let mut game = ForgeGame::load(store.clone(), ForgeCatalog::default(), expected);
        loop {
            let report = strike_on_target(&mut game, &mut toasts);
            if report.victory_points.is_some() {
                assert_eq!(report.victory_points, Some(expected.try_into().unwrap()));
                break;
            }
        }
    }
    assert_eq!(victory_points(&store), 2);
}

#[test]
fn random_play_keeps_heat_and_target_in_bounds() {
    for seed in 0..8_u64 {
        let store = MemoryStore::new();
        let mut game = ForgeGame::load(store, ForgeCatalog::default(), seed);
        let mut toasts = ToastStore::new();
        for step in 0..400_u64 {
            game.advance(((seed + step) % 37) as f64 * 0.7);
            let _ = game.strike(&mut toasts);
            let session = game.session();
            assert!((0.0..=HEAT_MAX).contains(&session.heat));
            let (low, high) = session.target_bounds();
            assert!(low >= TRACK_MIN && high <= TRACK_MAX);
            assert!((TRACK_MIN..=TRACK_MAX).contains(&session.slider.value));
            if let Some(contract) = session.contract() {
                assert!(session.progress < f64::from(contract.hits_required));
            }
        }
    }
}

#[test]
fn purchases_never_overdraw_or_exceed_max() {
    let store = MemoryStore::new();
    let mut game = ForgeGame::load(store, ForgeCatalog::default(), 99);
    let mut toasts = ToastStore::new();
    for _ in 0..300 {
        let report = strike_on_target(&mut game, &mut toasts);
        if report.victory_points.is_some() {
            break;
        }
        for id in ["wide-tongs", "steady-bellows", "whetstone", "guild-seal"] {
            let before = game.session().currency;
            match game.purchase(id, &mut toasts) {
                Ok(receipt) => assert_eq!(game.session().currency, before - receipt.cost),
                Err(_) => assert_eq!(game.session().currency, before),
            }
        }
        let session = game.session();
        for def in &session.catalog().upgrades {
            if let Some(max) = def.max_level {
                assert!(session.upgrades.level(&def.id) <= max);
            }
        }
    }
}
