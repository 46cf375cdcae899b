//! Request and response DTOs exchanged with the browser frontend.

pub mod api;
pub mod id;
pub mod role;
pub mod user;
