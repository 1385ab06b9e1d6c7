//! Toast notifications.

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
}

pub trait Notifier {
    /// Fire-and-forget user notification.
    fn toast(&self, message: String, severity: Severity);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        let (toasts, set_toasts) = signal(Vec::new());
        Self {
            toasts,
            set_toasts,
            next_id: StoredValue::new(0),
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastService {
    fn toast(&self, message: String, severity: Severity) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.set_toasts.update(|toasts| {
            toasts.push(Toast { id, message, severity });
            // Keep only the last 5 toasts
            if toasts.len() > 5 {
                toasts.remove(0);
            }
        });
    }
}
