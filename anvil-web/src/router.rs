use crate::pages::{forge::ForgePage, home::Home, not_found::NotFound};
use anvil_game::GameId;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/forge")]
    Forge,
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    /// Route that plays `game`, if it has a playable view.
    #[must_use]
    pub const fn for_game(game: GameId) -> Option<Self> {
        match game {
            GameId::Forge => Some(Self::Forge),
            GameId::Glyph | GameId::Tide => None,
        }
    }
}

#[must_use]
pub fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Home /> },
        Route::Forge => html! { <ForgePage /> },
        Route::NotFound => html! { <NotFound /> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_to_routes() {
        assert_eq!(Route::recognize("/forge"), Some(Route::Forge));
        assert_eq!(Route::recognize("/anvil/nope"), Some(Route::NotFound));
        assert_eq!(Route::Home.to_path(), "/");
        assert_eq!(Route::Forge.to_path(), "/forge");
    }

    #[test]
    fn only_the_forge_is_playable() {
        assert_eq!(Route::for_game(GameId::Forge), Some(Route::Forge));
        assert!(Route::for_game(GameId::Glyph).is_none());
        assert!(Route::for_game(GameId::Tide).is_none());
    }
}
