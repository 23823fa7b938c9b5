use anvil_game::{Toast, ToastId, ToastVariant};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub toasts: Vec<Toast>,
    #[prop_or_default]
    pub on_dismiss: Option<Callback<ToastId>>,
    /// Shown only while more than one toast is up.
    #[prop_or_default]
    pub on_clear_all: Option<Callback<()>>,
}

const fn variant_class(variant: ToastVariant) -> &'static str {
    match variant {
        ToastVariant::Default => "alert-info",
        ToastVariant::Success => "alert-success",
        ToastVariant::Destructive => "alert-error",
    }
}

#[function_component(ToastList)]
pub fn toast_list(props: &Props) -> Html {
    let clear_all = props
        .on_clear_all
        .as_ref()
        .filter(|_| props.toasts.len() > 1)
        .map(|cb| {
            let cb = cb.clone();
            let on_click = Callback::from(move |_| cb.emit(()));
            html! { <button id="toast-clear-all" class="btn btn-sm" onclick={on_click}>{"Clear all"}</button> }
        })
        .unwrap_or_default();
    html! {
        <div class="toast toast-end toast-top" role="status" aria-live="polite">
            { clear_all }
            { for props.toasts.iter().map(|toast| {
                let dismiss_btn = props.on_dismiss.as_ref().map(|cb| {
                    let id = toast.id.clone();
                    let cb = cb.clone();
                    let on_click = Callback::from(move |_| cb.emit(id.clone()));
                    html! { <button class="btn btn-ghost btn-xs" aria-label="Dismiss" onclick={on_click}>{"✕"}</button> }
                }).unwrap_or_default();
                html! {
                    <div key={toast.id.to_string()} id={toast.id.to_string()} class={classes!("alert", variant_class(toast.variant))}>
                        <div>
                            if let Some(title) = &toast.title {
                                <p class="font-bold">{ title.clone() }</p>
                            }
                            if let Some(description) = &toast.description {
                                <p class="text-sm">{ description.clone() }</p>
                            }
                        </div>
                        { dismiss_btn }
                    </div>
                }
            }) }
        </div>
    }
}
