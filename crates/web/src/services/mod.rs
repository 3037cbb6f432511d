//! External service integrations.

pub mod auth;
