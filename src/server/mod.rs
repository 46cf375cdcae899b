//! Server-side API backend and business logic.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, session guard, and DTO conversion
//! - **Service Layer** (`service/`) - Role classification, sanitization and apply; OAuth2 login
//! - **Data Layer** (`data/`) - Bot-credentialed Discord REST calls behind the `GuildRoleApi` trait
//! - **Model Layer** (`model/`) - Domain models: roles, the rule table, role changes and outcomes
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Typed session wrappers and the authentication guard
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (config, HTTP clients, Discord client)
//! - **Startup** (`startup`) - Construction of clients and the session layer
//! - **Router** (`router`) - Axum route configuration and API documentation
//!
//! # Request Flow
//!
//! 1. **Router** receives HTTP request and routes to appropriate controller
//! 2. **Middleware** loads the session and checks for an access token
//! 3. **Controller** converts the DTO to a domain request, calls the service
//! 4. **Service** fetches the guild's roles, classifies and sanitizes, applies changes
//! 5. **Data** issues the Discord REST calls
//! 6. **Controller** converts the outcome to a DTO and picks the status code

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
