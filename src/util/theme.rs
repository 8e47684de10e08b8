//! Theme preference: cookie persistence and the `<html>` class toggle.
//!
//! The preference lives in the `blnt-theme` cookie with values `dark` /
//! `light`.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

#[cfg(feature = "csr")]
use leptos::prelude::{LocalStorage, RwSignal, Update};

#[cfg(feature = "csr")]
use crate::state::ui::UiState;
#[cfg(feature = "csr")]
use crate::util::cookies;

/// Cookie key persisting the theme preference.
pub const THEME_COOKIE: &str = "blnt-theme";

/// Cookie value for a dark-theme flag.
pub fn theme_value(dark: bool) -> &'static str {
    if dark { "dark" } else { "light" }
}

/// Whether a persisted cookie value selects the dark theme.
///
/// Anything other than `dark` falls back to light.
pub fn is_dark(value: &str) -> bool {
    value == "dark"
}

/// Set the theme: update state, restyle the document, persist the cookie.
#[cfg(feature = "csr")]
pub fn set_theme(ui: RwSignal<UiState, LocalStorage>, dark: bool) {
    ui.update(|u| u.set_dark_theme(dark));
    apply(dark);
    cookies::set_cookie(THEME_COOKIE, theme_value(dark));
}

/// Initialize the theme from the persisted cookie.
///
/// A missing cookie is seeded with `light`, which matches the in-memory
/// default, so state is left untouched.
#[cfg(feature = "csr")]
pub fn init_theme(ui: RwSignal<UiState, LocalStorage>) {
    match cookies::get_cookie(THEME_COOKIE) {
        Some(value) => set_theme(ui, is_dark(&value)),
        None => cookies::set_cookie(THEME_COOKIE, theme_value(false)),
    }
}

/// Apply or remove the `theme--dark` class on the `<html>` element.
#[cfg(feature = "csr")]
pub fn apply(dark: bool) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        if let Some(el) = doc.document_element() {
            let class_list = el.class_list();
            if dark {
                let _ = class_list.add_1("theme--dark");
            } else {
                let _ = class_list.remove_1("theme--dark");
            }
        }
    }
}
