//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiError;
use crate::store::{TodoStateStoreFields, TodoStore};

/// How long an error stays in the banner
pub const ERROR_BANNER_MS: u32 = 5_000;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub store: TodoStore,
    /// Trigger to reload todos from the server - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload todos from the server - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(store: TodoStore, reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            store,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    /// Trigger a reload of todos
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Log a failed request and show it in the banner
    pub fn report_error(&self, action: &str, err: &ApiError) {
        self.show_error(format!("Failed to {}: {}", action, err));
    }

    pub fn show_error(&self, message: String) {
        web_sys::console::error_1(&format!("[APP] {}", message).into());
        self.store.error().set(Some(message));
    }

    pub fn dismiss_error(&self) {
        self.store.error().set(None);
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
