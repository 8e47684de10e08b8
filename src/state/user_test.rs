use super::*;

fn user(name: &str) -> User {
    User {
        username: name.to_owned(),
        email: None,
        roles: Vec::new(),
    }
}

// =============================================================
// UserState defaults
// =============================================================

#[test]
fn user_state_default_no_user() {
    let state = UserState::default();
    assert!(state.current_user().is_none());
    assert!(!state.logged_in());
}

#[test]
fn user_state_default_loading() {
    // The initial session fetch is pending until it settles.
    let state = UserState::default();
    assert!(state.loading_user_info());
}

// =============================================================
// Mutations
// =============================================================

#[test]
fn set_user_stores_the_principal() {
    let mut state = UserState::default();
    state.set_user(Some(user("ada")));
    assert!(state.logged_in());
    assert_eq!(state.current_user().expect("user").username, "ada");
}

#[test]
fn set_user_none_logs_out() {
    let mut state = UserState::default();
    state.set_user(Some(user("ada")));
    state.set_user(None);
    assert!(!state.logged_in());
    assert!(state.current_user().is_none());
}

#[test]
fn set_loading_updates_flag() {
    let mut state = UserState::default();
    state.set_loading(false);
    assert!(!state.loading_user_info());
    state.set_loading(true);
    assert!(state.loading_user_info());
}
