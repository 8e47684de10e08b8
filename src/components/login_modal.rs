//! Login modal resolving or cancelling a suspended API call.

use leptos::prelude::*;

use crate::state::ui::UiState;

/// Modal login form.
///
/// Shown while the UI state's login-form flag is raised, either because a
/// call hit a step-up requirement or because the user asked to sign in.
/// Submitting resumes any pending call on success; Cancel abandons it.
#[component]
pub fn LoginModal() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState, LocalStorage>>();
    #[cfg(feature = "csr")]
    let user = expect_context::<RwSignal<crate::state::user::UserState>>();
    #[cfg(feature = "csr")]
    let toasts = expect_context::<RwSignal<crate::state::toast::ToastState>>();
    #[cfg(feature = "csr")]
    let client = expect_context::<crate::net::browser::ClientHandle>();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(Vec::<String>::new());

    let submit = Callback::new(move |()| {
        if username.get_untracked().trim().is_empty() {
            return;
        }
        #[cfg(feature = "csr")]
        {
            errors.set(Vec::new());
            let on_error = std::rc::Rc::new(move |messages: Vec<String>| errors.set(messages));
            client.with_value(|c| {
                crate::state::user::login(
                    c,
                    user,
                    ui,
                    toasts,
                    username.get_untracked(),
                    password.get_untracked(),
                    on_error,
                );
            });
        }
    });

    let cancel = move |_| {
        errors.set(Vec::new());
        password.set(String::new());
        let resume = ui.try_update(|u| u.take_login_resume()).flatten();
        if let Some(resume) = resume {
            resume.cancel();
        }
    };

    view! {
        <Show when=move || ui.get().login_form()>
            <div class="dialog-backdrop" on:click=cancel>
                <div class="dialog login-modal" on:click=move |ev| ev.stop_propagation()>
                    <h2>"Sign in"</h2>
                    <Show when=move || !errors.get().is_empty()>
                        <ul class="login-modal__errors">
                            {move || {
                                errors
                                    .get()
                                    .into_iter()
                                    .map(|message| view! { <li>{message}</li> })
                                    .collect::<Vec<_>>()
                            }}
                        </ul>
                    </Show>
                    <label class="dialog__label">
                        "Username"
                        <input
                            class="dialog__input"
                            type="text"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="dialog__label">
                        "Password"
                        <input
                            class="dialog__input"
                            type="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    submit.run(());
                                }
                            }
                        />
                    </label>
                    <div class="dialog__actions">
                        <button class="btn" on:click=cancel>
                            "Cancel"
                        </button>
                        <button class="btn btn--primary" on:click=move |_| submit.run(())>
                            "Sign in"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
