//! Application-wide toast host.
//!
//! [`ToastHost`] owns the single [`ToastStore`] for the app and shares it
//! through context as a [`ToastHub`]. Views emit through the hub; the host
//! renders the list and runs the expiry timer.

use crate::components::toast_list::ToastList;
use crate::dom::{self, Interval};
use anvil_game::{ToastId, ToastStore};
use std::cell::RefCell;
use std::rc::Rc;
use yew::prelude::*;

const EXPIRY_POLL_MS: i32 = 250;

#[derive(Clone)]
pub struct ToastHub {
    store: Rc<RefCell<ToastStore>>,
    refresh: Callback<()>,
}

impl PartialEq for ToastHub {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl ToastHub {
    #[must_use]
    pub const fn new(store: Rc<RefCell<ToastStore>>, refresh: Callback<()>) -> Self {
        Self { store, refresh }
    }

    /// Run `f` against the store with its clock synced to now, then re-render the host.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut ToastStore) -> R) -> R {
        let out = {
            let mut store = self.store.borrow_mut();
            store.advance_to(dom::now_ms());
            f(&mut store)
        };
        self.refresh.emit(());
        out
    }

    pub fn dismiss(&self, id: &ToastId) {
        self.with_store(|store| store.dismiss(id));
    }

    pub fn dismiss_all(&self) {
        self.with_store(ToastStore::dismiss_all);
    }
}

/// The shared hub, or a detached one when rendered outside a [`ToastHost`].
#[hook]
pub fn use_toasts() -> ToastHub {
    let detached = use_mut_ref(ToastStore::new);
    use_context::<ToastHub>().unwrap_or_else(|| ToastHub::new(detached, Callback::noop()))
}

#[derive(Properties, PartialEq)]
pub struct Props {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ToastHost)]
pub fn toast_host(props: &Props) -> Html {
    let store = use_mut_ref(ToastStore::new);
    let redraw = use_force_update();
    let hub = {
        let redraw = redraw.clone();
        ToastHub::new(store.clone(), Callback::from(move |()| redraw.force_update()))
    };

    {
        let store = store.clone();
        use_effect_with((), move |()| {
            let ticker_store = store.clone();
            let interval = Interval::start(EXPIRY_POLL_MS, move || {
                let expired = ticker_store.borrow_mut().advance_to(dom::now_ms());
                if !expired.is_empty() {
                    redraw.force_update();
                }
            });
            move || {
                drop(interval);
                store.borrow_mut().shutdown();
            }
        });
    }

    let on_dismiss = {
        let hub = hub.clone();
        Callback::from(move |id: ToastId| hub.dismiss(&id))
    };
    let on_clear_all = {
        let hub = hub.clone();
        Callback::from(move |()| hub.dismiss_all())
    };
    let toasts = store.borrow().toasts().to_vec();

    html! {
        <ContextProvider<ToastHub> context={hub}>
            { props.children.clone() }
            <ToastList
                toasts={toasts}
                on_dismiss={Some(on_dismiss)}
                on_clear_all={Some(on_clear_all)}
            />
        </ContextProvider<ToastHub>>
    }
}
