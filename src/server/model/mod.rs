//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer. Upstream Discord
//! objects are projected into these models at the data boundary and transformed to DTOs at
//! the controller boundary, keeping classification and sanitization logic independent of
//! both the Discord client and the HTTP API.

pub mod role;
pub mod role_change;
