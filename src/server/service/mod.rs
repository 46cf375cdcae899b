//! Business logic layer.
//!
//! Services orchestrate the upstream Discord adapters and the domain models. Controllers
//! construct a service per request from `AppState`, so no service holds state between
//! requests.

pub mod auth;
pub mod role;

#[cfg(test)]
pub mod test;
