//! Top application bar: drawer toggle, title, theme toggle, session controls.

use leptos::prelude::*;

use crate::state::ui::UiState;
use crate::state::user::UserState;

/// Application bar.
///
/// The left button toggles the navigation drawer and the moon/sun button
/// toggles the persisted theme. The right side follows the session: a
/// sign-in button while logged out, the username and a logout button
/// otherwise.
#[component]
pub fn AppBar() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState, LocalStorage>>();
    let user = expect_context::<RwSignal<UserState>>();
    #[cfg(feature = "csr")]
    let client = expect_context::<crate::net::browser::ClientHandle>();

    let on_drawer = move |_| {
        ui.update(|u| {
            let open = u.left_drawer();
            u.set_left_drawer(!open);
        });
    };

    let on_theme = move |_| {
        #[cfg(feature = "csr")]
        {
            let dark = ui.get_untracked().dark_theme();
            crate::util::theme::set_theme(ui, !dark);
        }
    };

    let on_sign_in = move |_| ui.update(|u| u.set_login_form(true));

    let on_logout = move |_| {
        #[cfg(feature = "csr")]
        client.with_value(|c| crate::state::user::logout(c, user));
    };

    let username = move || {
        user.get()
            .current_user()
            .map(|u| u.username.clone())
            .unwrap_or_default()
    };

    view! {
        <header class="app-bar">
            <button class="app-bar__drawer-toggle" on:click=on_drawer title="Menu">
                "\u{2630}"
            </button>
            <span class="app-bar__title">"Bolinette"</span>
            <span class="app-bar__spacer"></span>
            <button class="app-bar__theme-toggle" on:click=on_theme title="Toggle theme">
                {move || if ui.get().dark_theme() { "\u{2600}" } else { "\u{263e}" }}
            </button>
            <Show
                when=move || user.get().logged_in()
                fallback=move || {
                    view! {
                        <button class="btn app-bar__sign-in" on:click=on_sign_in>
                            "Sign in"
                        </button>
                    }
                }
            >
                <span class="app-bar__user">{username}</span>
                <button class="btn app-bar__logout" on:click=on_logout>
                    "Logout"
                </button>
            </Show>
        </header>
    }
}
