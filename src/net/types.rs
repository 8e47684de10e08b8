//! Wire types shared by every API call.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by every backend endpoint.
///
/// The HTTP status line is not part of the contract; `code` carries the
/// HTTP-like status and governs success/failure classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub data: T,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub status: String,
}

impl<T> ApiResponse<T> {
    /// Whether the envelope reports success (`code` in the 2xx range).
    pub fn is_success(&self) -> bool {
        self.code / 100 == 2
    }
}

/// Authenticated principal as returned by the user endpoints.
///
/// `/user/info` serves the public shape (username only); the private shape
/// adds email and roles, so both deserialize here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl User {
    /// Whether the user carries the named role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.name == role)
    }
}

/// A role attached to a user account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}
