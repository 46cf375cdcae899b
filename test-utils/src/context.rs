use serenity::all::{Member, Role};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, Session};

/// Test context containing guild fixtures and a lazily created session.
///
/// Holds the roles and members a fake upstream Discord API should serve, in the order
/// Discord would return them, plus an in-memory session for authentication tests.
pub struct TestContext {
    /// Guild roles in upstream order.
    pub roles: Vec<Role>,

    /// Guild members known to the fake upstream.
    pub members: Vec<Member>,

    /// Optional session instance for session handling.
    ///
    /// Initialized lazily when `session()` is first called. Backed by an in-memory
    /// store so no database is required.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates a new test context from the provided fixtures.
    ///
    /// # Arguments
    /// - `roles` - Guild roles in upstream order
    /// - `members` - Guild members
    ///
    /// # Returns
    /// - New `TestContext` instance with no session yet
    pub fn new(roles: Vec<Role>, members: Vec<Member>) -> Self {
        Self {
            roles,
            members,
            session: None,
        }
    }

    /// Gets or creates the test session instance.
    ///
    /// Returns a reference to the existing session if one exists, otherwise creates a new
    /// session backed by a `MemoryStore`. Subsequent calls return the same session instance.
    ///
    /// # Returns
    /// - `&Session` - Reference to the session instance
    ///
    /// # Example
    /// ```rust,ignore
    /// let mut test = TestBuilder::new().build();
    /// let session = test.session();
    ///
    /// session.insert("auth:access_token", "token").await?;
    /// ```
    pub fn session(&mut self) -> &Session {
        self.session.get_or_insert_with(|| {
            Session::new(
                None,
                Arc::new(MemoryStore::default()),
                Some(Expiry::OnInactivity(Duration::days(7))),
            )
        })
    }
}
