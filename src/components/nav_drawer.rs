//! Left navigation drawer.

use leptos::prelude::*;

use crate::state::ui::UiState;

/// Navigation drawer bound to the UI state's drawer flag.
#[component]
pub fn NavDrawer() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState, LocalStorage>>();

    view! {
        <Show when=move || ui.get().left_drawer()>
            <nav class="nav-drawer">
                <a class="nav-drawer__link" href="/">
                    "Home"
                </a>
            </nav>
        </Show>
    }
}
