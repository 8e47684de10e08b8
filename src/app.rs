//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::app_bar::AppBar;
use crate::components::login_modal::LoginModal;
use crate::components::nav_drawer::NavDrawer;
use crate::components::toast_stack::ToastStack;
use crate::pages::home::HomePage;
use crate::state::{toast::ToastState, ui::UiState, user::UserState};

/// Root application component.
///
/// Provides the shared state contexts, builds the API client from its
/// browser collaborators, restores the persisted theme, and kicks off the
/// session-user fetch before rendering the routed pages.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    // The login resumption holds `Rc` callbacks, so this signal lives in
    // local storage.
    let ui = RwSignal::new_local(UiState::default());
    let user = RwSignal::new(UserState::default());

    provide_context(toasts);
    provide_context(ui);
    provide_context(user);

    #[cfg(feature = "csr")]
    {
        let client = crate::net::browser::browser_client(api_base_url(), ui);
        crate::util::theme::init_theme(ui);
        crate::state::user::fetch_info(&client, user);
        provide_context(StoredValue::new_local(client));
    }

    view! {
        <Title text="Bolinette"/>

        <Router>
            <AppBar/>
            <NavDrawer/>
            <main class="app-content">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                </Routes>
            </main>
            <LoginModal/>
            <ToastStack/>
        </Router>
    }
}

/// API origin: compile-time override, or same-origin relative calls.
#[cfg(feature = "csr")]
fn api_base_url() -> String {
    option_env!("API_URL").unwrap_or_default().to_owned()
}
