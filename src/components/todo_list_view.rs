//! Todo List View Component
//!
//! Displays todos in display order with drag-and-drop reordering.
//! Uses leptos-dragdrop with explicit DropSlots between rows.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{self, ReorderOutcome};
use crate::components::TodoRow;
use crate::context::{use_app_context, AppContext};
use crate::models::Todo;
use crate::ordering::{assign_positions, demote, drag_reorder, slot_to_destination};
use crate::store::{use_todo_store, TodoStateStoreFields};

use leptos_dragdrop::*;

/// Show the new sequence right away, then persist it.
/// Anything short of a full success reloads from the server.
fn apply_reorder(ctx: AppContext, mut next: Vec<Todo>) {
    assign_positions(&mut next);
    ctx.store.todos().set(next.clone());

    spawn_local(async move {
        match api::reorder_todos(&next).await {
            Ok(ReorderOutcome::Complete { updated }) => {
                web_sys::console::log_1(&format!("[DND] Reordered {} todos", updated).into());
            }
            Ok(ReorderOutcome::Partial { updated, failed }) => {
                for f in &failed {
                    web_sys::console::warn_1(
                        &format!("[DND] Entry {} ({:?}) not reordered: {}", f.index, f.id, f.error).into(),
                    );
                }
                ctx.show_error(format!(
                    "Reorder partially applied: {} updated, {} failed",
                    updated,
                    failed.len()
                ));
                ctx.reload();
            }
            Err(e) => {
                ctx.report_error("reorder todos", &e);
                ctx.reload();
            }
        }
    });
}

#[component]
pub fn TodoListView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_todo_store();

    let dnd = create_dnd_signals::<String>();

    bind_global_mouseup(dnd, move |dragged_id, target| {
        let todos = store.todos().get_untracked();
        let Some(source) = todos.iter().position(|t| t.id == dragged_id) else {
            return;
        };
        let destination = match &target {
            DropTarget::Item(target_id) => todos.iter().position(|t| &t.id == target_id),
            DropTarget::Slot(slot) => Some(slot_to_destination(source, *slot)),
        };
        web_sys::console::log_1(
            &format!("[DND] Drop: source={}, target={:?}, destination={:?}", source, target, destination).into(),
        );

        if let Some(next) = drag_reorder(&todos, source, destination) {
            apply_reorder(ctx, next);
        }
    });

    // A click that finishes a drag is not a demote
    let demote_on_click = move |id: String| {
        if dnd.just_dropped() {
            return;
        }
        let todos = store.todos().get_untracked();
        if let Some(next) = demote(&todos, &id) {
            apply_reorder(ctx, next);
        }
    };

    let rows = move || store.todos().get().into_iter().enumerate().collect::<Vec<_>>();

    view! {
        <div class="todo-list">
            <Show when=move || !store.todos().read().is_empty()>
                <DropSlot dnd=dnd at=0 />
            </Show>

            <For
                each=rows
                // Any field change or move re-renders the row
                key=|(index, todo)| (*index, todo.clone())
                children=move |(index, todo)| {
                    let id = todo.id.clone();
                    let on_title_click = {
                        let id = id.clone();
                        Callback::new(move |_: ()| demote_on_click(id.clone()))
                    };

                    let on_mousedown = make_on_mousedown(dnd, id.clone());
                    let on_mouseenter = make_on_item_mouseenter(dnd, id.clone());
                    let on_mouseleave = make_on_mouseleave(dnd);

                    let row_class = {
                        let id = id.clone();
                        move || {
                            let mut c = String::from("todo-row-wrapper");
                            if dnd.is_dragging_key(&id) { c.push_str(" dragging"); }
                            if dnd.is_target(&DropTarget::Item(id.clone())) { c.push_str(" drop-target"); }
                            c
                        }
                    };

                    view! {
                        <div
                            class=row_class
                            on:mousedown=on_mousedown
                            on:mouseenter=on_mouseenter
                            on:mouseleave=on_mouseleave
                        >
                            <TodoRow todo=todo on_title_click=on_title_click />
                        </div>

                        <DropSlot dnd=dnd at=index + 1 />
                    }
                }
            />

            <Show when=move || store.todos().read().is_empty()>
                <p class="empty-list">"Nothing to do yet. Add a todo above."</p>
            </Show>
        </div>
    }
}

/// Gap between rows; dropping here inserts at `at`
#[component]
pub fn DropSlot(
    dnd: DndSignals<String>,
    at: usize,
) -> impl IntoView {
    let on_mouseenter = make_on_slot_mouseenter(dnd, at);
    let on_mouseleave = make_on_mouseleave(dnd);

    let slot_class = move || {
        let mut c = String::from("drop-zone");
        if !dnd.is_dragging() { c.push_str(" hidden"); }
        if dnd.is_target(&DropTarget::Slot(at)) { c.push_str(" active"); }
        c
    };

    view! {
        <div
            class=slot_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}
