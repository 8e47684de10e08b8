use super::*;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::executor::block_on;
use futures::future::LocalBoxFuture;

use crate::net::types::User;

// =============================================================
// Test doubles
// =============================================================

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Success(u16),
    Error(Vec<String>),
    Finally,
}

#[derive(Default)]
struct FakeTransport {
    responses: RefCell<Vec<Result<String, String>>>,
    calls: RefCell<Vec<HttpCall>>,
}

impl Transport for FakeTransport {
    fn send(&self, call: HttpCall) -> LocalBoxFuture<'static, Result<String, String>> {
        self.calls.borrow_mut().push(call);
        let response = if self.responses.borrow().is_empty() {
            Err("no response scripted".to_owned())
        } else {
            self.responses.borrow_mut().remove(0)
        };
        Box::pin(async move { response })
    }
}

#[derive(Default)]
struct FakeCookies {
    values: RefCell<HashMap<String, String>>,
}

impl CookieJar for FakeCookies {
    fn get(&self, name: &str) -> Option<String> {
        self.values.borrow().get(name).cloned()
    }
}

#[derive(Default)]
struct FakeLoginGate {
    resume: RefCell<Option<LoginResume>>,
}

impl LoginGate for FakeLoginGate {
    fn open_login(&self, resume: LoginResume) {
        *self.resume.borrow_mut() = Some(resume);
    }
}

type TaskQueue = Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>;

struct Harness {
    client: ApiClient,
    transport: Rc<FakeTransport>,
    cookies: Rc<FakeCookies>,
    gate: Rc<FakeLoginGate>,
    tasks: TaskQueue,
    events: Rc<RefCell<Vec<Event>>>,
}

impl Harness {
    fn new() -> Self {
        let transport = Rc::new(FakeTransport::default());
        let cookies = Rc::new(FakeCookies::default());
        let gate = Rc::new(FakeLoginGate::default());
        let tasks: TaskQueue = Rc::new(RefCell::new(Vec::new()));
        let spawner: Spawner = {
            let tasks = tasks.clone();
            Rc::new(move |fut| tasks.borrow_mut().push(fut))
        };
        let client = ApiClient::new(
            "https://api.test",
            transport.clone(),
            cookies.clone(),
            gate.clone(),
            spawner,
        );
        Self {
            client,
            transport,
            cookies,
            gate,
            tasks,
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn respond(&self, body: &str) {
        self.transport.responses.borrow_mut().push(Ok(body.to_owned()));
    }

    fn fail_transport(&self, message: &str) {
        self.transport
            .responses
            .borrow_mut()
            .push(Err(message.to_owned()));
    }

    fn set_cookie(&self, name: &str, value: &str) {
        self.cookies
            .values
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }

    fn params(&self) -> FetchParams<User> {
        let success_events = self.events.clone();
        let error_events = self.events.clone();
        let finally_events = self.events.clone();
        FetchParams {
            success: Some(Rc::new(move |res: ApiResponse<User>| {
                success_events.borrow_mut().push(Event::Success(res.code));
            })),
            error: Some(Rc::new(move |messages| {
                error_events.borrow_mut().push(Event::Error(messages));
            })),
            finally: Some(Rc::new(move || {
                finally_events.borrow_mut().push(Event::Finally);
            })),
            ..FetchParams::default()
        }
    }

    fn run(&self, request: ApiRequest, params: FetchParams<User>) {
        block_on(self.client.fetch(request, params));
    }

    /// Drain tasks queued through the spawner (re-dispatched calls).
    fn drain_tasks(&self) {
        loop {
            let Some(task) = self.tasks.borrow_mut().pop() else {
                break;
            };
            block_on(task);
        }
    }

    fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn calls(&self) -> Vec<HttpCall> {
        self.transport.calls.borrow().clone()
    }
}

fn user_info() -> ApiRequest {
    ApiRequest::new("/user/info", Method::Get)
}

fn ok_user_body() -> String {
    r#"{"code":200,"status":"OK","messages":[],"data":{"username":"ada"}}"#.to_owned()
}

fn error_body(code: u16, message: &str) -> String {
    format!(r#"{{"code":{code},"status":"ERROR","messages":["{message}"],"data":null}}"#)
}

fn has_header(call: &HttpCall, name: &str, value: &str) -> bool {
    call.headers
        .iter()
        .any(|(n, v)| n == name && v == value)
}

fn header_names(call: &HttpCall) -> Vec<&str> {
    call.headers.iter().map(|(n, _)| n.as_str()).collect()
}

// =============================================================
// Success and plain failures
// =============================================================

#[test]
fn success_invokes_success_then_finally() {
    let h = Harness::new();
    h.respond(&ok_user_body());
    h.run(user_info(), h.params());
    assert_eq!(h.events(), vec![Event::Success(200), Event::Finally]);
}

#[test]
fn domain_failure_reports_messages_then_finally() {
    let h = Harness::new();
    h.respond(&error_body(500, "internal.error"));
    h.run(user_info(), h.params());
    assert_eq!(
        h.events(),
        vec![
            Event::Error(vec!["internal.error".to_owned()]),
            Event::Finally,
        ]
    );
}

#[test]
fn transport_failure_reports_single_message() {
    let h = Harness::new();
    h.fail_transport("connection reset");
    h.run(user_info(), h.params());
    assert_eq!(
        h.events(),
        vec![
            Event::Error(vec!["connection reset".to_owned()]),
            Event::Finally,
        ]
    );
    assert_eq!(h.calls().len(), 1);
}

#[test]
fn invalid_envelope_reports_parse_error() {
    let h = Harness::new();
    h.respond("<html>offline</html>");
    h.run(user_info(), h.params());

    let events = h.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], Event::Error(messages) if messages.len() == 1));
    assert_eq!(events[1], Event::Finally);
}

#[test]
fn mismatched_data_is_a_parse_error() {
    let h = Harness::new();
    h.respond(r#"{"code":200,"status":"OK","messages":[],"data":42}"#);
    h.run(user_info(), h.params());

    let events = h.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(&events[0], Event::Error(messages) if messages.len() == 1));
    assert_eq!(events[1], Event::Finally);
}

// =============================================================
// Headers and bodies
// =============================================================

#[test]
fn request_carries_accept_and_csrf_headers() {
    let h = Harness::new();
    h.set_cookie(ACCESS_TOKEN_COOKIE, "tok-123");
    h.respond(&ok_user_body());
    h.run(user_info(), h.params());

    let calls = h.calls();
    let call = &calls[0];
    assert_eq!(call.url, "https://api.test/user/info");
    assert_eq!(call.method, Method::Get);
    assert!(has_header(call, "Accept", "application/json"));
    assert!(has_header(call, CSRF_HEADER, "tok-123"));
    assert!(!header_names(call).contains(&"Content-Type"));
}

#[test]
fn csrf_header_omitted_without_cookie() {
    let h = Harness::new();
    h.respond(&ok_user_body());
    h.run(user_info(), h.params());
    assert!(!header_names(&h.calls()[0]).contains(&CSRF_HEADER));
}

#[test]
fn json_body_sets_content_type() {
    let h = Harness::new();
    h.respond(&ok_user_body());
    let request = ApiRequest::new("/user/login", Method::Post).with_body(RequestBody::Json(
        serde_json::json!({"username": "ada", "password": "secret"}),
    ));
    h.run(request, h.params());

    let calls = h.calls();
    let call = &calls[0];
    assert!(has_header(call, "Content-Type", "application/json"));
    assert!(matches!(call.body, Some(RequestBody::Json(_))));
}

#[test]
fn file_body_stays_multipart() {
    let h = Harness::new();
    h.respond(&ok_user_body());
    let request = ApiRequest::new("/file", Method::Post).with_body(RequestBody::File(FilePayload {
        name: "avatar.png".to_owned(),
        mime: "image/png".to_owned(),
        bytes: vec![1, 2, 3],
    }));
    h.run(request, h.params());

    let calls = h.calls();
    let call = &calls[0];
    assert!(!header_names(call).contains(&"Content-Type"));
    assert!(matches!(call.body, Some(RequestBody::File(_))));
}

// =============================================================
// Silent refresh
// =============================================================

#[test]
fn expired_token_refreshes_and_retries() {
    let h = Harness::new();
    h.set_cookie(REFRESH_TOKEN_COOKIE, "refresh-tok");
    h.respond(&error_body(401, "user.token.expired"));
    h.respond(r#"{"code":200,"status":"OK","messages":[],"data":null}"#);
    h.respond(&ok_user_body());
    h.run(user_info(), h.params());

    let calls = h.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1].method, Method::Post);
    assert_eq!(calls[1].url, "https://api.test/user/token/refresh");
    assert!(has_header(&calls[1], CSRF_HEADER, "refresh-tok"));
    assert_eq!(calls[2].url, calls[0].url);
    // The caller observes only the retried outcome.
    assert_eq!(h.events(), vec![Event::Success(200), Event::Finally]);
}

#[test]
fn missing_refresh_cookie_degrades_to_error() {
    let h = Harness::new();
    h.respond(&error_body(401, "user.token.expired"));
    h.run(user_info(), h.params());

    assert_eq!(h.calls().len(), 1);
    assert_eq!(
        h.events(),
        vec![
            Event::Error(vec!["user.token.expired".to_owned()]),
            Event::Finally,
        ]
    );
}

#[test]
fn rejected_refresh_degrades_to_original_error() {
    let h = Harness::new();
    h.set_cookie(REFRESH_TOKEN_COOKIE, "refresh-tok");
    h.respond(&error_body(401, "user.token.expired"));
    h.respond(&error_body(401, "user.token.invalid"));
    h.run(user_info(), h.params());

    assert_eq!(h.calls().len(), 2);
    assert_eq!(
        h.events(),
        vec![
            Event::Error(vec!["user.token.expired".to_owned()]),
            Event::Finally,
        ]
    );
}

#[test]
fn refresh_disabled_reports_error() {
    let h = Harness::new();
    h.set_cookie(REFRESH_TOKEN_COOKIE, "refresh-tok");
    h.respond(&error_body(401, "user.token.expired"));
    h.run(
        user_info(),
        FetchParams {
            refresh: false,
            ..h.params()
        },
    );

    assert_eq!(h.calls().len(), 1);
    assert_eq!(
        h.events(),
        vec![
            Event::Error(vec!["user.token.expired".to_owned()]),
            Event::Finally,
        ]
    );
}

// =============================================================
// Step-up login suspension
// =============================================================

#[test]
fn fresh_required_suspends_without_callbacks() {
    let h = Harness::new();
    h.respond(&error_body(401, "user.token.fresh_required"));
    h.run(user_info(), h.params());

    assert!(h.events().is_empty());
    assert!(h.gate.resume.borrow().is_some());
    assert_eq!(h.calls().len(), 1);
}

#[test]
fn login_resume_replays_the_call() {
    let h = Harness::new();
    h.respond(&error_body(401, "user.token.fresh_required"));
    h.run(user_info(), h.params());
    assert!(h.events().is_empty());

    h.respond(&ok_user_body());
    let resume = h.gate.resume.borrow_mut().take().expect("pending resume");
    resume.resume();
    h.drain_tasks();

    let calls = h.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].url, calls[0].url);
    assert_eq!(calls[1].method, calls[0].method);
    assert_eq!(h.events(), vec![Event::Success(200), Event::Finally]);
}

#[test]
fn login_cancel_reports_empty_error_only() {
    let h = Harness::new();
    h.respond(&error_body(401, "user.token.fresh_required"));
    h.run(user_info(), h.params());

    let resume = h.gate.resume.borrow_mut().take().expect("pending resume");
    resume.cancel();
    h.drain_tasks();

    // The suspended call never settles, so `finally` stays unfired.
    assert_eq!(h.events(), vec![Event::Error(Vec::new())]);
}

#[test]
fn open_login_disabled_reports_error() {
    let h = Harness::new();
    h.respond(&error_body(401, "user.token.fresh_required"));
    h.run(
        user_info(),
        FetchParams {
            open_login: false,
            ..h.params()
        },
    );

    assert!(h.gate.resume.borrow().is_none());
    assert_eq!(
        h.events(),
        vec![
            Event::Error(vec!["user.token.fresh_required".to_owned()]),
            Event::Finally,
        ]
    );
}
