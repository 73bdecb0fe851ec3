//! Media Strip Component
//!
//! Thumbnails for a todo's media URLs, each with a remove button.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Hide images that fail to load
fn hide_broken(ev: &web_sys::Event) {
    if let Some(img) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) {
        let _ = img.style().set_property("display", "none");
    }
}

#[component]
pub fn MediaStrip(
    media: Vec<String>,
    #[prop(into)] on_remove: Callback<usize>,
) -> impl IntoView {
    if media.is_empty() {
        return None;
    }

    Some(view! {
        <div class="media-strip">
            <span class="media-caption">"Media:"</span>
            <div class="media-items">
                {media.into_iter().enumerate().map(|(index, url)| view! {
                    <div class="media-item">
                        <img
                            src=url
                            alt=format!("Media {}", index + 1)
                            on:error=move |ev| hide_broken(&ev)
                        />
                        <button
                            class="media-remove-btn"
                            title="Remove"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_remove.run(index);
                            }
                        >
                            "×"
                        </button>
                    </div>
                }).collect_view()}
            </div>
        </div>
    })
}
