//! # blnt-webapp
//!
//! Leptos + WASM front-end for a Bolinette-backed web application: shared
//! session/toast/UI state containers and an API request helper that handles
//! cookie-based CSRF, silent access-token refresh, and step-up login
//! interception.
//!
//! The crate builds natively without features for the portable core (state
//! holders, the request state machine, and their tests); the `csr` feature
//! adds the browser layer: DOM mounting, the `gloo-net` transport, cookies,
//! and toast expiry timers.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and mounts the app onto `<body>`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn mount() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::mount_to_body(app::App);
}
