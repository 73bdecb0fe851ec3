//! Add Todo Form Component
//!
//! Title input plus priority selector for creating todos.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::PrioritySelector;
use crate::context::use_app_context;
use crate::models::{NewTodo, DEFAULT_PRIORITY};
use crate::store::store_add_todo;

#[component]
pub fn AddTodoForm() -> impl IntoView {
    let ctx = use_app_context();

    let (new_title, set_new_title) = signal(String::new());
    let (priority, set_priority) = signal(DEFAULT_PRIORITY);
    let (submitting, set_submitting) = signal(false);

    let create_todo = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get().trim().to_string();
        if title.is_empty() || submitting.get() {
            return;
        }
        let input = NewTodo {
            title,
            priority: priority.get(),
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api::create_todo(&input).await {
                Ok(todo) => {
                    store_add_todo(&ctx.store, todo);
                    set_new_title.set(String::new());
                    set_priority.set(DEFAULT_PRIORITY);
                }
                Err(e) => ctx.report_error("add todo", &e),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="add-todo-form" on:submit=create_todo>
            <div class="add-todo-row">
                <input
                    type="text"
                    placeholder="What needs to be done?"
                    maxlength="60"
                    prop:value=move || new_title.get()
                    on:input=move |ev| set_new_title.set(event_target_value(&ev))
                />
                <button
                    type="submit"
                    disabled=move || submitting.get() || new_title.get().trim().is_empty()
                >
                    "Add"
                </button>
            </div>

            <div class="priority-row">
                <span class="priority-caption">"Priority"</span>
                <PrioritySelector current=priority on_change=move |p| set_priority.set(p) />
            </div>
        </form>
    }
}
