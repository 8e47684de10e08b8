//! Home page.

use leptos::prelude::*;

use crate::state::user::UserState;

/// Landing page greeting the signed-in user, or inviting a sign-in.
#[component]
pub fn HomePage() -> impl IntoView {
    let user = expect_context::<RwSignal<UserState>>();

    let greeting = move || {
        let state = user.get();
        if state.loading_user_info() {
            "Loading session...".to_owned()
        } else {
            match state.current_user() {
                Some(u) => format!("Welcome back, {}", u.username),
                None => "Welcome. Sign in to get started.".to_owned(),
            }
        }
    };

    view! {
        <section class="home-page">
            <h1>"Bolinette"</h1>
            <p class="home-page__greeting">{greeting}</p>
        </section>
    }
}
