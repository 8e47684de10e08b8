//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`toast`, `ui`, `user`) so individual components
//! can depend on small focused models. Each state struct holds plain fields
//! behind read accessors; mutations are synchronous methods, and asynchronous
//! actions live alongside as free functions that drive those mutations.

pub mod toast;
pub mod ui;
pub mod user;
