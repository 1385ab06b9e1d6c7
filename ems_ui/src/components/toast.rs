//! Toast notification component for change confirmations and failures.

use leptos::prelude::*;

use crate::service::{Severity, Toast, ToastService};

/// Toast notification container - stacks the active toasts.
#[component]
pub fn ToastContainer() -> impl IntoView {
    let toasts = use_context::<ToastService>().expect("ToastService not found");

    view! {
        <div class="fixed bottom-4 left-4 z-50 flex flex-col gap-2 max-w-sm">
            <For
                each=move || toasts.toasts.get()
                key=|toast| toast.id
                children=move |toast| view! { <ToastItem toast=toast /> }
            />
        </div>
    }
}

#[component]
fn ToastItem(toast: Toast) -> impl IntoView {
    let service = use_context::<ToastService>().expect("ToastService not found");
    let id = toast.id;

    // Errors stay longer
    let timeout = match toast.severity {
        Severity::Success => std::time::Duration::from_secs(5),
        Severity::Danger => std::time::Duration::from_secs(8),
    };
    set_timeout(move || service.dismiss(id), timeout);

    let (border, accent, icon) = match toast.severity {
        Severity::Success => ("border-[#22c55e40]", "text-[#22c55e]", "M5 13l4 4L19 7"),
        Severity::Danger => (
            "border-[#ff444440]",
            "text-[#ff4444]",
            "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
        ),
    };

    view! {
        <div class=format!("flex items-start gap-2 p-3 rounded-lg border shadow-lg bg-[#0d0d0d] {}", border)>
            <div class=accent>
                <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon/>
                </svg>
            </div>
            // Failure toasts carry the remote message on a second line
            <p class="flex-1 text-[11px] text-white whitespace-pre-line">{toast.message}</p>
            <button
                class="text-[#666666] hover:text-white transition-colors"
                on:click=move |_| service.dismiss(id)
            >
                <svg class="w-3 h-3" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"/>
                </svg>
            </button>
        </div>
    }
}
