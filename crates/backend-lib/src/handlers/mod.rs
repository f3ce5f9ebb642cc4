// crates/backend-lib/src/handlers/mod.rs

//! Request handlers mapping routes to service calls.

pub mod items;
pub mod users;
