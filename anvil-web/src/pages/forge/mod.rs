//! The forge minigame view.
//!
//! [`ForgePage`] owns the mounted [`ForgeGame`] and its animation loop;
//! [`ForgeView`] renders a [`ForgeViewModel`] snapshot of it.

mod view;
mod view_model;

pub use view::{ForgeView, ForgeViewProps};
pub use view_model::{ForgeViewModel, ShopEntry};

use crate::dom::{self, AnimationLoop};
use crate::storage::BrowserStore;
use crate::toasts::use_toasts;
use anvil_game::{ForgeCatalog, ForgeGame};
use yew::prelude::*;

#[function_component(ForgePage)]
pub fn forge_page() -> Html {
    let toasts = use_toasts();
    let game = use_mut_ref(|| {
        ForgeGame::load(BrowserStore, ForgeCatalog::load_from_static(), dom::random_seed())
    });
    let redraw = use_force_update();

    {
        let game = game.clone();
        let redraw = redraw.clone();
        use_effect_with((), move |()| {
            let frames = AnimationLoop::start(move || {
                game.borrow_mut().advance(1.0);
                redraw.force_update();
            });
            move || drop(frames)
        });
    }

    let on_strike = {
        let game = game.clone();
        let toasts = toasts.clone();
        let redraw = redraw.clone();
        Callback::from(move |()| {
            let report = toasts.with_store(|store| game.borrow_mut().strike(store));
            if let Some(report) = report {
                log::debug!(
                    "strike hit={} accuracy={:.2} payout={}",
                    report.outcome.hit,
                    report.outcome.accuracy,
                    report.outcome.payout
                );
            }
            redraw.force_update();
        })
    };

    let on_buy = {
        let game = game.clone();
        Callback::from(move |id: String| {
            let _ = toasts.with_store(|store| game.borrow_mut().purchase(&id, store));
            redraw.force_update();
        })
    };

    let model = ForgeViewModel::from_game(&game.borrow());
    html! { <ForgeView model={model} on_strike={on_strike} on_buy={on_buy} /> }
}
