use crate::router::{Route, switch};
use crate::toasts::ToastHost;
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let router_base = crate::paths::router_base().map(AttrValue::from);
    html! {
        <BrowserRouter basename={router_base}>
            <ToastHost>
                <Switch<Route> render={switch} />
            </ToastHost>
        </BrowserRouter>
    }
}
