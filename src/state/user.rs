//! Authenticated-user session state and its backend actions.

#[cfg(test)]
#[path = "user_test.rs"]
mod user_test;

use crate::net::types::User;

#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use leptos::prelude::{LocalStorage, RwSignal, Update};

#[cfg(feature = "csr")]
use crate::net::api::{ApiClient, ApiRequest, FetchParams, Method, RequestBody};
#[cfg(feature = "csr")]
use crate::net::types::ApiResponse;
#[cfg(feature = "csr")]
use crate::state::toast::{ToastCategory, ToastState, add_toast};
#[cfg(feature = "csr")]
use crate::state::ui::UiState;

/// Session state for the authenticated principal.
///
/// The user record is replaced wholesale on login/logout and never mutated
/// in place; its presence is the sole login signal. `loading_user_info`
/// starts `true` because the initial `/user/info` fetch is issued at
/// startup.
#[derive(Clone, Debug, PartialEq)]
pub struct UserState {
    current_user: Option<User>,
    loading_user_info: bool,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            current_user: None,
            loading_user_info: true,
        }
    }
}

impl UserState {
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn loading_user_info(&self) -> bool {
        self.loading_user_info
    }

    pub fn logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.current_user = user;
    }

    pub fn set_loading(&mut self, value: bool) {
        self.loading_user_info = value;
    }
}

/// Fetch the session user from `GET /user/info`.
///
/// The loading flag stays raised until the call settles; if the call is
/// suspended for auth recovery, that settlement is deferred with it.
#[cfg(feature = "csr")]
pub fn fetch_info(client: &ApiClient, user: RwSignal<UserState>) {
    user.update(|u| u.set_loading(true));
    client.dispatch::<User>(
        ApiRequest::new("/user/info", Method::Get),
        FetchParams {
            success: Some(Rc::new(move |res: ApiResponse<User>| {
                user.update(|u| u.set_user(Some(res.data)));
            })),
            finally: Some(Rc::new(move || user.update(|u| u.set_loading(false)))),
            ..FetchParams::default()
        },
    );
}

/// Log out via `POST /user/logout`, then return to the home view.
///
/// A failed logout leaves the session untouched.
#[cfg(feature = "csr")]
pub fn logout(client: &ApiClient, user: RwSignal<UserState>) {
    client.dispatch::<serde_json::Value>(
        ApiRequest::new("/user/logout", Method::Post),
        FetchParams {
            success: Some(Rc::new(move |_res| {
                user.update(|u| u.set_user(None));
                // Navigate home via window.location for a clean state.
                if let Some(w) = web_sys::window() {
                    let _ = w.location().set_href("/");
                }
            })),
            ..FetchParams::default()
        },
    );
}

/// Sign in via `POST /user/login`.
///
/// On success the returned user becomes the session user and any call
/// suspended behind the login prompt is resumed; failures go to `on_error`
/// for in-form display.
#[cfg(feature = "csr")]
pub fn login(
    client: &ApiClient,
    user: RwSignal<UserState>,
    ui: RwSignal<UiState, LocalStorage>,
    toasts: RwSignal<ToastState>,
    username: String,
    password: String,
    on_error: Rc<dyn Fn(Vec<String>)>,
) {
    client.dispatch::<User>(
        ApiRequest::new("/user/login", Method::Post).with_body(RequestBody::Json(
            serde_json::json!({"username": username, "password": password}),
        )),
        FetchParams {
            success: Some(Rc::new(move |res: ApiResponse<User>| {
                let name = res.data.username.clone();
                user.update(|u| u.set_user(Some(res.data)));
                add_toast(
                    toasts,
                    format!("Signed in as {name}"),
                    ToastCategory::Success,
                    None,
                );
                let resume = ui.try_update(|u| u.take_login_resume()).flatten();
                if let Some(resume) = resume {
                    resume.resume();
                }
            })),
            error: Some(on_error),
            ..FetchParams::default()
        },
    );
}
