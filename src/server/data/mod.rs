//! Upstream data access layer.
//!
//! This application keeps no database; Discord is the only source of truth. This module
//! holds the adapters that fetch and mutate guild state through Discord's REST API and
//! project upstream objects into domain models at the boundary, so the service layer only
//! sees Serenity ID types, never its model structs.

pub mod discord;
