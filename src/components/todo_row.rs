//! Todo Row Component
//!
//! A single todo in the list with its inline actions.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{DeleteConfirmButton, MediaStrip, PrioritySelector};
use crate::context::{use_app_context, AppContext};
use crate::models::{Todo, TodoPatch};
use crate::store::{store_remove_todo, store_update_todo};

/// PUT a patch and swap the response into the store
fn send_patch(ctx: AppContext, id: String, patch: TodoPatch, action: &'static str) {
    spawn_local(async move {
        match api::update_todo(&id, &patch).await {
            Ok(updated) => store_update_todo(&ctx.store, updated),
            Err(e) => ctx.report_error(action, &e),
        }
    });
}

fn prompt_media_url() -> Option<String> {
    let url = web_sys::window()?
        .prompt_with_message("Enter media URL (image, video, etc.):")
        .ok()
        .flatten()?;
    let url = url.trim().to_string();
    (!url.is_empty()).then_some(url)
}

/// A single todo row. Clicking the title runs `on_title_click`.
#[component]
pub fn TodoRow(
    todo: Todo,
    #[prop(into)] on_title_click: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    let completed = todo.completed;
    let priority = todo.priority;
    let title = todo.title.clone();
    let notes = todo.notes.clone();
    let updated_hint = format!("Updated {}", todo.updated_at.format("%Y-%m-%d %H:%M"));
    let id = StoredValue::new(todo.id.clone());
    let media = StoredValue::new(todo.media.clone());

    let (editing, set_editing) = signal(false);
    let (edit_title, set_edit_title) = signal(todo.title.clone());
    let (edit_notes, set_edit_notes) = signal(todo.notes.clone());

    let toggle = move |_| {
        send_patch(ctx, id.get_value(), TodoPatch::completed(!completed), "update todo");
    };

    let change_priority = move |p: i64| {
        if p != priority {
            send_patch(ctx, id.get_value(), TodoPatch::priority(p), "change priority");
        }
    };

    let save_edit = move || {
        let patch = TodoPatch::text(edit_title.get_untracked(), edit_notes.get_untracked());
        send_patch(ctx, id.get_value(), patch, "save todo");
        set_editing.set(false);
    };

    let original_title = todo.title.clone();
    let original_notes = todo.notes.clone();
    let cancel_edit = move || {
        set_edit_title.set(original_title.clone());
        set_edit_notes.set(original_notes.clone());
        set_editing.set(false);
    };

    let add_media = move |_| {
        if let Some(url) = prompt_media_url() {
            let mut next = media.get_value();
            next.push(url);
            send_patch(ctx, id.get_value(), TodoPatch::media(next), "add media");
        }
    };

    let remove_media = move |index: usize| {
        let next: Vec<String> = media
            .get_value()
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, url)| url)
            .collect();
        send_patch(ctx, id.get_value(), TodoPatch::media(next), "remove media");
    };

    let delete = move |_: ()| {
        let id = id.get_value();
        spawn_local(async move {
            match api::delete_todo(&id).await {
                Ok(()) => store_remove_todo(&ctx.store, &id),
                Err(e) => ctx.report_error("delete todo", &e),
            }
        });
    };

    let row_class = format!(
        "todo-row priority-{}{}",
        priority,
        if completed { " completed" } else { "" }
    );

    view! {
        <div class=row_class>
            <div class="todo-main">
                <span class="drag-handle" title="Drag to reorder">"⠿"</span>

                <input type="checkbox" checked=completed on:change=toggle />

                <div class="todo-body">
                    {move || if editing.get() {
                        let cancel_edit = cancel_edit.clone();
                        view! {
                            <div class="todo-edit">
                                <input
                                    type="text"
                                    maxlength="60"
                                    prop:value=move || edit_title.get()
                                    on:input=move |ev| set_edit_title.set(event_target_value(&ev))
                                />
                                <textarea
                                    rows="3"
                                    placeholder="Add notes..."
                                    prop:value=move || edit_notes.get()
                                    on:input=move |ev| set_edit_notes.set(event_target_value(&ev))
                                />
                                <div class="todo-edit-actions">
                                    <button class="save-btn" on:click=move |_| save_edit()>"Save"</button>
                                    <button class="cancel-btn" on:click=move |_| cancel_edit()>"Cancel"</button>
                                </div>
                            </div>
                        }.into_any()
                    } else {
                        view! {
                            <div>
                                <span
                                    class="todo-title"
                                    title=updated_hint.clone()
                                    on:click=move |_| on_title_click.run(())
                                >
                                    {title.clone()}
                                </span>
                                {(!notes.is_empty()).then(|| view! {
                                    <p class="todo-notes">{notes.clone()}</p>
                                })}
                            </div>
                        }.into_any()
                    }}
                </div>

                <PrioritySelector
                    current=Signal::derive(move || priority)
                    on_change=change_priority
                    stars=true
                />

                <button class="edit-btn" title="Edit" on:click=move |_| set_editing.set(true)>"✎"</button>
                <DeleteConfirmButton on_confirm=delete />
            </div>

            <MediaStrip media=media.get_value() on_remove=remove_media />

            <button class="add-media-btn" on:click=add_media>"+ Add Media"</button>
        </div>
    }
}
