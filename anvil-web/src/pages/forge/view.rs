use super::view_model::{ForgeViewModel, ShopEntry};
use crate::components::meter::Meter;
use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ForgeViewProps {
    pub model: ForgeViewModel,
    #[prop_or_default]
    pub on_strike: Callback<()>,
    #[prop_or_default]
    pub on_buy: Callback<String>,
}

fn shop_row(entry: &ShopEntry, on_buy: &Callback<String>) -> Html {
    let level_text = entry.max_level.map_or_else(
        || format!("Lv {}", entry.level),
        |max| format!("Lv {}/{max}", entry.level),
    );
    let price_text = entry
        .cost
        .map_or_else(|| "Maxed".to_string(), |cost| format!("{cost} coins"));
    let onclick = {
        let on_buy = on_buy.clone();
        let id = entry.id.clone();
        Callback::from(move |_| on_buy.emit(id.clone()))
    };
    html! {
        <li key={entry.id.clone()} class="shop-row">
            <div>
                <p class="font-bold">{ entry.name.clone() }</p>
                <p class="text-sm">{ entry.desc.clone() }</p>
            </div>
            <span class="shop-level">{ level_text }</span>
            <button
                id={format!("buy-{}", entry.id)}
                class="btn btn-sm"
                disabled={!entry.affordable}
                onclick={onclick}
            >
                { price_text }
            </button>
        </li>
    }
}

#[function_component(ForgeView)]
pub fn forge_view(props: &ForgeViewProps) -> Html {
    let m = &props.model;
    let half = m.window / 2.0;
    let window_style = format!("left:{:.2}%;width:{:.2}%", m.target - half, m.window);
    let slider_style = format!("left:{:.2}%", m.slider);
    let on_strike = {
        let cb = props.on_strike.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <main id="forge" class="forge">
            <nav>
                <Link<Route> to={Route::Home} classes={classes!("btn", "btn-ghost")}>{ "← Arcade" }</Link<Route>>
            </nav>
            <section class="contract" aria-labelledby="contract-name">
                <p class="text-sm">{ format!("Contract {} of {}", m.contract_number, m.contract_total) }</p>
                <h2 id="contract-name">{ m.contract_name.clone() }</h2>
                <p>{ m.contract_desc.clone() }</p>
                <p id="hits-remaining">{ format!("Hits remaining: {}", m.hits_remaining) }</p>
                <Meter label="Progress" pct={m.progress_pct} />
                <Meter label="Heat" pct={m.heat} class={classes!("heat")} />
            </section>
            <section class="stats">
                <span id="currency">{ format!("Coins: {}", m.currency) }</span>
                <span id="combo">{ format!("Combo: {}", m.combo) }</span>
                <span id="crests">{ format!("Crests: {}", m.crests) }</span>
                <span id="victory">{ format!("Victory points: {}", m.victory_points) }</span>
            </section>
            <div class="track" role="presentation">
                <div class="track-window" style={window_style}></div>
                <div class="track-hammer" style={slider_style}></div>
            </div>
            <button id="strike-btn" class="btn btn-primary" disabled={!m.playing} onclick={on_strike}>
                { "Strike!" }
            </button>
            <section class="shop" aria-label="Upgrades">
                <ul>
                    { for m.shop.iter().map(|entry| shop_row(entry, &props.on_buy)) }
                </ul>
            </section>
        </main>
    }
}
