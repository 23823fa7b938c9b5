use crate::router::Route;
use crate::storage::BrowserStore;
use anvil_game::{GameId, ResourceLedger, victory_points};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HomeViewProps {
    pub victory_points: i64,
    pub ledger: Vec<(GameId, i64)>,
}

const fn game_title(game: GameId) -> &'static str {
    match game {
        GameId::Forge => "The Forge",
        GameId::Glyph => "Glyph Seals",
        GameId::Tide => "Tide Shards",
    }
}

#[function_component(HomeView)]
pub fn home_view(props: &HomeViewProps) -> Html {
    html! {
        <main id="home" class="home">
            <header>
                <h1>{ "Anvil Arcade" }</h1>
                <p id="victory-points" class="stat">
                    { format!("Victory points: {}", props.victory_points) }
                </p>
            </header>
            <ul class="game-list">
                { for props.ledger.iter().map(|(game, count)| {
                    let title = game_title(*game);
                    let entry = Route::for_game(*game).map_or_else(
                        || html! { <span class="game-title muted">{ title }</span> },
                        |route| html! { <Link<Route> to={route} classes={classes!("game-title")}>{ title }</Link<Route>> },
                    );
                    html! {
                        <li key={game.slug()} id={format!("game-{}", game.slug())}>
                            { entry }
                            <span class="ledger-count">{ format!("{}: {count}", game.resource()) }</span>
                        </li>
                    }
                }) }
            </ul>
        </main>
    }
}

#[function_component(Home)]
pub fn home() -> Html {
    let totals = use_memo((), |()| {
        (
            victory_points(&BrowserStore),
            ResourceLedger::new(BrowserStore).snapshot(),
        )
    });
    let (points, ledger) = (*totals).clone();
    html! { <HomeView victory_points={points} ledger={ledger} /> }
}
