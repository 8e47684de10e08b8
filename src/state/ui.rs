//! UI session state: theme, drawer, and the login prompt.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use std::fmt;
use std::rc::Rc;

/// Continuations for an API call suspended behind the login prompt.
///
/// `resume` re-dispatches the original call after a successful login;
/// `cancel` reports it as failed with no messages. At most one pair is
/// pending at a time.
#[derive(Clone)]
pub struct LoginResume {
    on_success: Rc<dyn Fn()>,
    on_cancel: Rc<dyn Fn()>,
}

impl LoginResume {
    pub fn new(on_success: Rc<dyn Fn()>, on_cancel: Rc<dyn Fn()>) -> Self {
        Self {
            on_success,
            on_cancel,
        }
    }

    /// Re-run the suspended call after a successful login.
    pub fn resume(&self) {
        (self.on_success)();
    }

    /// Abandon the suspended call.
    pub fn cancel(&self) {
        (self.on_cancel)();
    }
}

impl fmt::Debug for LoginResume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LoginResume")
    }
}

/// Shared UI session state.
///
/// The login-form flag and the pending resumption move together: both are
/// set by [`UiState::open_login`] and cleared by
/// [`UiState::take_login_resume`], whichever resumption path runs first.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    dark_theme: bool,
    left_drawer: bool,
    login_form: bool,
    login_resume: Option<LoginResume>,
}

impl UiState {
    pub fn dark_theme(&self) -> bool {
        self.dark_theme
    }

    pub fn left_drawer(&self) -> bool {
        self.left_drawer
    }

    pub fn login_form(&self) -> bool {
        self.login_form
    }

    pub fn has_login_resume(&self) -> bool {
        self.login_resume.is_some()
    }

    pub fn set_dark_theme(&mut self, value: bool) {
        self.dark_theme = value;
    }

    pub fn set_left_drawer(&mut self, value: bool) {
        self.left_drawer = value;
    }

    pub fn set_login_form(&mut self, value: bool) {
        self.login_form = value;
    }

    /// Register a pending resumption and show the login form.
    ///
    /// A second registration replaces the first: last writer wins.
    pub fn open_login(&mut self, resume: LoginResume) {
        self.login_resume = Some(resume);
        self.login_form = true;
    }

    /// Hide the login form and take the pending resumption, if any.
    ///
    /// After this returns, the other resumption path can no longer observe
    /// the pair.
    pub fn take_login_resume(&mut self) -> Option<LoginResume> {
        self.login_form = false;
        self.login_resume.take()
    }
}
