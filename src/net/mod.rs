//! Networking: the response envelope, typed records, and the API request
//! helper with token refresh and login interception.

pub mod api;
#[cfg(feature = "csr")]
pub mod browser;
pub mod types;
