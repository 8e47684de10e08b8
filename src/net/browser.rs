//! Browser-side collaborators for [`ApiClient`]: the `gloo-net` transport,
//! the `document.cookie` jar, the login-prompt bridge, and the WASM task
//! spawner. Requires a browser environment.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use leptos::prelude::{LocalStorage, RwSignal, StoredValue, Update};

use crate::net::api::{
    ApiClient, CookieJar, FilePayload, HttpCall, LoginGate, Method, RequestBody, Spawner, Transport,
};
use crate::state::ui::{LoginResume, UiState};
use crate::util::cookies;

/// Context handle for the shared client; the client itself is `Rc`-based,
/// so it lives in local storage.
pub type ClientHandle = StoredValue<ApiClient, LocalStorage>;

/// Build the client from browser collaborators.
pub fn browser_client(
    base_url: impl Into<String>,
    ui: RwSignal<UiState, LocalStorage>,
) -> ApiClient {
    ApiClient::new(
        base_url,
        Rc::new(GlooTransport),
        Rc::new(BrowserCookies),
        Rc::new(UiLoginGate { ui }),
        wasm_spawner(),
    )
}

/// Transport over the browser fetch API via `gloo-net`.
///
/// Calls always include credentials and run in CORS mode; the response body
/// comes back as text regardless of HTTP status, since the envelope's `code`
/// governs classification.
pub struct GlooTransport;

impl Transport for GlooTransport {
    fn send(&self, call: HttpCall) -> LocalBoxFuture<'static, Result<String, String>> {
        Box::pin(async move {
            let response = send_call(call).await?;
            response.text().await.map_err(|e| e.to_string())
        })
    }
}

async fn send_call(call: HttpCall) -> Result<gloo_net::http::Response, String> {
    let mut builder = gloo_net::http::RequestBuilder::new(&call.url)
        .method(gloo_method(call.method))
        .credentials(web_sys::RequestCredentials::Include)
        .mode(web_sys::RequestMode::Cors);
    for (name, value) in &call.headers {
        builder = builder.header(name, value);
    }
    let request = match call.body {
        Some(RequestBody::Json(value)) => {
            builder.body(value.to_string()).map_err(|e| e.to_string())?
        }
        Some(RequestBody::File(file)) => {
            let form = multipart_body(&file)?;
            builder.body(form).map_err(|e| e.to_string())?
        }
        None => builder.build().map_err(|e| e.to_string())?,
    };
    request.send().await.map_err(|e| e.to_string())
}

fn gloo_method(method: Method) -> gloo_net::http::Method {
    match method {
        Method::Get => gloo_net::http::Method::GET,
        Method::Post => gloo_net::http::Method::POST,
        Method::Put => gloo_net::http::Method::PUT,
        Method::Delete => gloo_net::http::Method::DELETE,
    }
}

/// Wrap the payload in a `FormData` under the `file` field.
fn multipart_body(file: &FilePayload) -> Result<web_sys::FormData, String> {
    let buffer = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&buffer.into());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&file.mime);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| format!("{e:?}"))?;
    let form = web_sys::FormData::new().map_err(|e| format!("{e:?}"))?;
    form.append_with_blob_and_filename("file", &blob, &file.name)
        .map_err(|e| format!("{e:?}"))?;
    Ok(form)
}

/// Cookie jar over `document.cookie`.
pub struct BrowserCookies;

impl CookieJar for BrowserCookies {
    fn get(&self, name: &str) -> Option<String> {
        cookies::get_cookie(name)
    }
}

/// Login-prompt bridge writing into the shared UI state.
pub struct UiLoginGate {
    pub ui: RwSignal<UiState, LocalStorage>,
}

impl LoginGate for UiLoginGate {
    fn open_login(&self, resume: LoginResume) {
        self.ui.update(|u| u.open_login(resume));
    }
}

/// Spawner over the WASM single-threaded task queue.
pub fn wasm_spawner() -> Spawner {
    Rc::new(|fut| wasm_bindgen_futures::spawn_local(fut))
}
