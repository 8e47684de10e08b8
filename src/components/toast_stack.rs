//! Stacked toast notifications rendered in a fixed corner.

use leptos::prelude::*;

use crate::state::toast::ToastState;

/// Toast stack with one entry per queued toast, oldest at the top.
///
/// Entries disappear on their own when their timer expires; the button
/// closes them early. Both paths go through the same idempotent removal.
#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack">
            {move || {
                toasts
                    .get()
                    .toasts()
                    .iter()
                    .map(|toast| {
                        let id = toast.id;
                        let class = format!("toast toast--{}", toast.category.as_str());
                        let message = toast.message.clone();
                        view! {
                            <div class=class>
                                <span class="toast__message">{message}</span>
                                <button
                                    class="toast__close"
                                    on:click=move |_| toasts.update(|t| t.remove(id))
                                >
                                    "\u{00d7}"
                                </button>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}
