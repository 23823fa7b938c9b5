use crate::router::Route;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <section id="not-found" class="not-found">
            <h1>{ "Nothing on this anvil" }</h1>
            <p>{ "That page does not exist." }</p>
            <Link<Route> to={Route::Home} classes={classes!("btn")}>{ "Back to the arcade" }</Link<Route>>
        </section>
    }
}
