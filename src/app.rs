//! Todo Board Frontend App
//!
//! Main application component: error banner, add form and the todo list.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{AddTodoForm, TodoListView};
use crate::context::{AppContext, ERROR_BANNER_MS};
use crate::ordering::display_sort;
use crate::store::{TodoState, TodoStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(TodoState::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let ctx = AppContext::new(store, (reload_trigger, set_reload_trigger));
    provide_context(store);
    provide_context(ctx);

    // Load todos on mount and whenever a reload is requested
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        web_sys::console::log_1(&format!("[APP] Loading todos, trigger={}", trigger).into());
        spawn_local(async move {
            match api::list_todos().await {
                Ok(mut loaded) => {
                    web_sys::console::log_1(&format!("[APP] Loaded {} todos", loaded.len()).into());
                    display_sort(&mut loaded);
                    store.todos().set(loaded);
                    store.loading().set(false);
                }
                Err(e) => ctx.report_error("fetch todos", &e),
            }
        });
    });

    // Clear the banner after a while unless a newer error replaced it
    Effect::new(move |_| {
        let Some(message) = store.error().get() else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(ERROR_BANNER_MS).await;
            if store.error().get_untracked().as_deref() == Some(message.as_str()) {
                ctx.dismiss_error();
            }
        });
    });

    view! {
        <div class="app-layout">
            {move || store.error().get().map(|message| view! {
                <div class="error-banner" role="alert">
                    <span>{message}</span>
                    <button class="dismiss-btn" on:click=move |_| ctx.dismiss_error()>"×"</button>
                </div>
            })}

            <Show
                when=move || !store.loading().get()
                fallback=|| view! { <div class="loading">"Loading..."</div> }
            >
                <main class="main-content">
                    <h1>"Todo List"</h1>

                    <AddTodoForm />

                    <TodoListView />

                    <p class="todo-count">{move || {
                        let todos = store.todos().read();
                        let done = todos.iter().filter(|t| t.completed).count();
                        format!("{} todos, {} completed", todos.len(), done)
                    }}</p>
                </main>
            </Show>
        </div>
    }
}
