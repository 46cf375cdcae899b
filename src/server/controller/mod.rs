//! HTTP request handlers.
//!
//! Controllers extract request data, enforce the session guard and delegate to the
//! service layer. Errors bubble up as `AppError` and are rendered by its `IntoResponse`
//! implementation.

pub mod auth;
pub mod image;
pub mod role;
pub mod user;
