// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token;
mod service;
mod service_impl;

pub use password::{hash_password, hash_password_secure, verify_password};
pub use service::{AuthService, LoginOutcome};
pub use service_impl::DefaultAuth;
pub use token::TokenIssuer;
