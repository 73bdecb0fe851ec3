//! Priority Selector Component
//!
//! One button per priority level, highlighted up to the current value.

use leptos::prelude::*;

use crate::models::{priority_label, PRIORITY_LABELS};

/// Priority buttons. `stars` renders ★ per level instead of the labels.
#[component]
pub fn PrioritySelector(
    #[prop(into)] current: Signal<i64>,
    #[prop(into)] on_change: Callback<i64>,
    #[prop(optional)] stars: bool,
) -> impl IntoView {
    view! {
        <div class=if stars { "priority-selector stars" } else { "priority-selector" }>
            {PRIORITY_LABELS.iter().map(|(value, label)| {
                let value = *value;
                let class = move || {
                    let selected = current.get();
                    match (stars, selected == value, selected >= value) {
                        (false, true, _) => "priority-btn active",
                        (true, _, true) => "priority-btn star lit",
                        (true, _, false) => "priority-btn star",
                        _ => "priority-btn",
                    }
                };
                view! {
                    <button
                        type="button"
                        class=class
                        title=priority_label(value)
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_change.run(value);
                        }
                    >
                        {if stars { "★" } else { *label }}
                    </button>
                }
            }).collect_view()}
        </div>
    }
}
