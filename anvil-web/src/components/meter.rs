use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub label: AttrValue,
    /// 0..=100
    pub pct: f64,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(Meter)]
pub fn meter(props: &Props) -> Html {
    let pct = if props.pct.is_finite() {
        props.pct.clamp(0.0, 100.0)
    } else {
        0.0
    };
    html! {
        <div class={classes!("meter", props.class.clone())}>
            <span class="meter-label">{ props.label.clone() }</span>
            <progress
                max="100"
                value={format!("{pct:.1}")}
                aria-label={props.label.clone()}
            />
        </div>
    }
}
