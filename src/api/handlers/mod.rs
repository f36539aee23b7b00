//! API request handlers.

/// Authentication handlers (signup, login, me).
pub mod auth;
