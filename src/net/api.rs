//! API request helper with cookie-based CSRF and token-refresh handling.
//!
//! One logical call may span several network round-trips: an expired access
//! token is refreshed silently and the call re-run; a step-up requirement
//! suspends the call behind the login prompt and re-runs it once the user
//! signs in. The caller sees a single set of `success`/`error`/`finally`
//! callbacks either way.
//!
//! Collaborators (transport, cookie access, login prompt, task spawner) are
//! injected at construction so the retry flow runs under native tests with
//! fakes.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;

use crate::net::types::ApiResponse;
use crate::state::ui::LoginResume;

/// Header carrying the CSRF token.
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";
/// Cookie holding the CSRF value of the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "csrf_access_token";
/// Cookie holding the CSRF value of the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "csrf_refresh_token";

const TOKEN_EXPIRED: &str = "user.token.expired";
const FRESH_REQUIRED: &str = "user.token.fresh_required";
const REFRESH_PATH: &str = "/user/token/refresh";

/// HTTP method of an API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// Body attached to an API call.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// JSON payload, sent with `Content-Type: application/json`.
    Json(serde_json::Value),
    /// Binary upload, sent as multipart form data under the `file` field.
    File(FilePayload),
}

/// A file selected for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// One logical API call: path, method, and optional body.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub path: String,
    pub method: Method,
    pub body: Option<RequestBody>,
}

impl ApiRequest {
    pub fn new(path: impl Into<String>, method: Method) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
        }
    }

    /// Attach a body to the call.
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Outcome callbacks and per-call switches for [`ApiClient::fetch`].
///
/// Callbacks are `Rc<dyn Fn>` so the same set can drive the original attempt
/// and any transparent re-run.
pub struct FetchParams<R> {
    /// Invoked with the envelope when the call ultimately succeeds.
    pub success: Option<Rc<dyn Fn(ApiResponse<R>)>>,
    /// Invoked with the server messages when the call ultimately fails.
    pub error: Option<Rc<dyn Fn(Vec<String>)>>,
    /// Invoked exactly once after `success` or `error`, unless the call is
    /// suspended behind the login prompt.
    pub finally: Option<Rc<dyn Fn()>>,
    /// Allow a silent token refresh on `user.token.expired`.
    pub refresh: bool,
    /// Allow suspension behind the login prompt on
    /// `user.token.fresh_required`.
    pub open_login: bool,
}

impl<R> Clone for FetchParams<R> {
    fn clone(&self) -> Self {
        Self {
            success: self.success.clone(),
            error: self.error.clone(),
            finally: self.finally.clone(),
            refresh: self.refresh,
            open_login: self.open_login,
        }
    }
}

impl<R> Default for FetchParams<R> {
    fn default() -> Self {
        Self {
            success: None,
            error: None,
            finally: None,
            refresh: true,
            open_login: true,
        }
    }
}

/// A fully built HTTP call handed to the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpCall {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// Transport seam: sends a call and yields the raw response body.
///
/// The HTTP status line is ignored on purpose; the envelope's `code` field
/// governs classification. Transport-level failures surface as `Err`.
pub trait Transport {
    fn send(&self, call: HttpCall) -> LocalBoxFuture<'static, Result<String, String>>;
}

/// Read access to the cookie jar.
pub trait CookieJar {
    fn get(&self, name: &str) -> Option<String>;
}

/// UI-side hook that raises the login prompt with a pending resumption.
pub trait LoginGate {
    fn open_login(&self, resume: LoginResume);
}

/// Task spawner used to re-dispatch suspended calls.
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

/// Outcome of a single round-trip within one logical call.
enum Attempt {
    /// The call settled; `finally` is due.
    Settled,
    /// A token refresh succeeded; re-run the call with options unchanged.
    Retry,
    /// The call is parked behind the login prompt; nothing more fires here.
    Suspended,
}

/// API client binding the request flow to its collaborators.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    cookies: Rc<dyn CookieJar>,
    login: Rc<dyn LoginGate>,
    spawner: Spawner,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn Transport>,
        cookies: Rc<dyn CookieJar>,
        login: Rc<dyn LoginGate>,
        spawner: Spawner,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            cookies,
            login,
            spawner,
        }
    }

    /// Spawn [`Self::fetch`] on the injected spawner.
    pub fn dispatch<R>(&self, request: ApiRequest, params: FetchParams<R>)
    where
        R: DeserializeOwned + 'static,
    {
        let client = self.clone();
        (self.spawner)(Box::pin(async move {
            client.fetch(request, params).await;
        }));
    }

    /// Perform one logical API call, with transparent auth recovery.
    pub async fn fetch<R>(&self, request: ApiRequest, params: FetchParams<R>)
    where
        R: DeserializeOwned + 'static,
    {
        loop {
            match self.attempt(&request, &params).await {
                Attempt::Settled => {
                    if let Some(finally) = &params.finally {
                        finally();
                    }
                    return;
                }
                Attempt::Retry => {}
                Attempt::Suspended => return,
            }
        }
    }

    async fn attempt<R>(&self, request: &ApiRequest, params: &FetchParams<R>) -> Attempt
    where
        R: DeserializeOwned + 'static,
    {
        let text = match self.transport.send(self.build_call(request)).await {
            Ok(text) => text,
            Err(e) => {
                report_error(params, vec![e]);
                return Attempt::Settled;
            }
        };
        let envelope: ApiResponse<serde_json::Value> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) => {
                report_error(params, vec![e.to_string()]);
                return Attempt::Settled;
            }
        };

        if !envelope.is_success() {
            if params.refresh && envelope.messages.iter().any(|m| m == TOKEN_EXPIRED) {
                return self.refresh_token(params, envelope.messages).await;
            }
            if params.open_login && envelope.messages.iter().any(|m| m == FRESH_REQUIRED) {
                self.suspend_behind_login(request, params);
                return Attempt::Suspended;
            }
            report_error(params, envelope.messages);
            return Attempt::Settled;
        }

        let ApiResponse {
            code,
            data,
            messages,
            status,
        } = envelope;
        match serde_json::from_value::<R>(data) {
            Ok(data) => {
                if let Some(success) = &params.success {
                    success(ApiResponse {
                        code,
                        data,
                        messages,
                        status,
                    });
                }
            }
            Err(e) => report_error(params, vec![e.to_string()]),
        }
        Attempt::Settled
    }

    /// Silent refresh: exchange the refresh token, then re-run the call.
    ///
    /// A missing or rejected refresh token degrades the original failure to
    /// a reported error.
    async fn refresh_token<R>(&self, params: &FetchParams<R>, messages: Vec<String>) -> Attempt {
        let Some(token) = self.cookies.get(REFRESH_TOKEN_COOKIE) else {
            report_error(params, messages);
            return Attempt::Settled;
        };
        let call = HttpCall {
            method: Method::Post,
            url: self.url(REFRESH_PATH),
            headers: vec![
                ("Accept".to_owned(), "application/json".to_owned()),
                (CSRF_HEADER.to_owned(), token),
            ],
            body: None,
        };
        let refreshed = match self.transport.send(call).await {
            Ok(text) => serde_json::from_str::<ApiResponse<serde_json::Value>>(&text)
                .is_ok_and(|envelope| envelope.is_success()),
            Err(_) => false,
        };
        if refreshed {
            Attempt::Retry
        } else {
            leptos::logging::warn!("token refresh rejected; reporting original failure");
            report_error(params, messages);
            Attempt::Settled
        }
    }

    /// Park the call behind the login prompt.
    ///
    /// Login success re-dispatches the call with its options unchanged;
    /// cancel reports an empty error list and nothing more.
    fn suspend_behind_login<R>(&self, request: &ApiRequest, params: &FetchParams<R>)
    where
        R: DeserializeOwned + 'static,
    {
        let retry = {
            let client = self.clone();
            let request = request.clone();
            let params = params.clone();
            Rc::new(move || client.dispatch(request.clone(), params.clone()))
        };
        let cancel = {
            let error = params.error.clone();
            Rc::new(move || {
                if let Some(error) = &error {
                    error(Vec::new());
                }
            })
        };
        self.login.open_login(LoginResume::new(retry, cancel));
    }

    fn build_call(&self, request: &ApiRequest) -> HttpCall {
        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        if let Some(token) = self.cookies.get(ACCESS_TOKEN_COOKIE) {
            headers.push((CSRF_HEADER.to_owned(), token));
        }
        if matches!(request.body, Some(RequestBody::Json(_))) {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        HttpCall {
            method: request.method,
            url: self.url(&request.path),
            headers,
            body: request.body.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn report_error<R>(params: &FetchParams<R>, messages: Vec<String>) {
    if let Some(error) = &params.error {
        error(messages);
    }
}
