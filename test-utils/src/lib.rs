//! Rolebot Test Utils
//!
//! Provides shared testing utilities for the rolebot server. This crate offers a builder
//! pattern for creating test contexts holding the guild state an upstream Discord API would
//! return, along with an in-memory session for exercising authentication guards.
//!
//! # Overview
//!
//! The test utilities consist of three main components:
//! - **TestBuilder**: Fluent builder for describing the guild's roles and members
//! - **TestContext**: Test environment containing the fixture roles, members, and a session
//! - **serenity**: Factories for Serenity model objects deserialized from Discord-shaped JSON
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn classifies_roles() {
//!     let mut test = TestBuilder::new()
//!         .with_role(1, "He/Him")
//!         .with_role(2, "Admin")
//!         .build();
//!
//!     let session = test.session();
//!     // Hand `test.roles` to a fake upstream API...
//! }
//! ```

pub mod builder;
pub mod context;
pub mod serenity;
