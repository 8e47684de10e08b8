use super::*;

fn envelope(code: u16) -> ApiResponse<serde_json::Value> {
    ApiResponse {
        code,
        data: serde_json::Value::Null,
        messages: Vec::new(),
        status: String::new(),
    }
}

// =============================================================
// ApiResponse
// =============================================================

#[test]
fn envelope_deserializes_full_shape() {
    let env: ApiResponse<serde_json::Value> = serde_json::from_str(
        r#"{"code":200,"status":"OK","messages":["user.login.success"],"data":{"username":"ada"}}"#,
    )
    .expect("envelope");
    assert_eq!(env.code, 200);
    assert_eq!(env.status, "OK");
    assert_eq!(env.messages, vec!["user.login.success"]);
    assert_eq!(env.data["username"], "ada");
}

#[test]
fn envelope_tolerates_missing_messages_and_status() {
    let env: ApiResponse<serde_json::Value> =
        serde_json::from_str(r#"{"code":204,"data":null}"#).expect("envelope");
    assert!(env.messages.is_empty());
    assert!(env.status.is_empty());
}

#[test]
fn is_success_covers_2xx_only() {
    assert!(envelope(200).is_success());
    assert!(envelope(201).is_success());
    assert!(envelope(299).is_success());
    assert!(!envelope(199).is_success());
    assert!(!envelope(301).is_success());
    assert!(!envelope(401).is_success());
    assert!(!envelope(500).is_success());
}

// =============================================================
// User
// =============================================================

#[test]
fn user_deserializes_public_shape() {
    let user: User = serde_json::from_str(r#"{"username":"ada"}"#).expect("user");
    assert_eq!(user.username, "ada");
    assert!(user.email.is_none());
    assert!(user.roles.is_empty());
}

#[test]
fn user_deserializes_private_shape() {
    let user: User = serde_json::from_str(
        r#"{"username":"ada","email":"ada@example.com","roles":[{"name":"admin"}]}"#,
    )
    .expect("user");
    assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    assert!(user.has_role("admin"));
    assert!(!user.has_role("root"));
}
