//! トースト通知
//!
//! 通知は積まれた順に表示し、一定時間で自動的に消す。

use gloo::timers::callback::Timeout;
use leptos::prelude::*;
use spermvision_common::{Notification, Notifier};

/// 自動で閉じるまでの時間
const TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone)]
pub struct ToastEntry {
    pub id: u64,
    pub notification: Notification,
}

/// 通知の受け口（シグナルのハンドルなので Copy）
#[derive(Clone, Copy)]
pub struct Toasts {
    entries: RwSignal<Vec<ToastEntry>>,
    next_id: StoredValue<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Self {
            entries: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn entries(&self) -> ReadSignal<Vec<ToastEntry>> {
        self.entries.read_only()
    }

    pub fn dismiss(&self, id: u64) {
        self.entries.try_update(|entries| entries.retain(|t| t.id != id));
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for Toasts {
    fn notify(&mut self, notification: Notification) {
        let mut id = 0;
        self.next_id.update_value(|next| {
            id = *next;
            *next += 1;
        });

        gloo::console::log!(format!(
            "[{}] {}: {}",
            notification.severity.as_str(),
            notification.title,
            notification.description
        ));

        self.entries.update(|entries| entries.push(ToastEntry { id, notification }));

        let toasts = *self;
        Timeout::new(TOAST_DURATION_MS, move || toasts.dismiss(id)).forget();
    }
}

#[component]
pub fn Toaster(toasts: Toasts) -> impl IntoView {
    let entries = toasts.entries();

    view! {
        <div class="toaster">
            <For
                each=move || entries.get()
                key=|entry| entry.id
                children=move |entry| {
                    let id = entry.id;
                    let n = entry.notification;
                    let class = if n.severity.is_destructive() {
                        "toast toast-destructive"
                    } else {
                        "toast"
                    };
                    view! {
                        <div class=class role="status">
                            <div class="toast-body">
                                <strong>{n.title}</strong>
                                <p>{n.description}</p>
                            </div>
                            <button class="toast-close" on:click=move |_| toasts.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
