//! Transient toast notifications with auto-expiry.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

#[cfg(feature = "csr")]
use leptos::prelude::{RwSignal, Update};

/// Default lifetime of a toast before auto-expiry, in milliseconds.
pub const DEFAULT_TOAST_DURATION_MS: u32 = 5_000;

/// Severity category of a toast, mapped to its visual style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastCategory {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastCategory {
    /// CSS modifier suffix for the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A single queued notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub category: ToastCategory,
    pub duration_ms: u32,
}

/// Queue of visible toasts with a monotonic id counter.
///
/// Ids are assigned once and never reused; removal is idempotent so an
/// expiry timer firing after a manual close is a safe no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Currently visible toasts, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Append a toast and return its assigned id.
    ///
    /// `duration_ms` falls back to [`DEFAULT_TOAST_DURATION_MS`].
    pub fn add(
        &mut self,
        message: impl Into<String>,
        category: ToastCategory,
        duration_ms: Option<u32>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            category,
            duration_ms: duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS),
        });
        id
    }

    /// Remove the toast with `id` if it is still present.
    pub fn remove(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}

/// Add a toast and schedule its removal once the duration elapses.
///
/// The timer holds only the assigned id; if the toast was closed manually in
/// the meantime, the delayed removal is a no-op.
#[cfg(feature = "csr")]
pub fn add_toast(
    toasts: RwSignal<ToastState>,
    message: impl Into<String>,
    category: ToastCategory,
    duration_ms: Option<u32>,
) {
    let duration = duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS);
    let Some(id) = toasts.try_update(|t| t.add(message, category, Some(duration))) else {
        return;
    };
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(duration))).await;
        let _ = toasts.try_update(|t| t.remove(id));
    });
}
