//! Driving port for user reads.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch users without
//! importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId, UserSortOrder};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user, optionally re-ordered.
    async fn list_users(&self, order: Option<UserSortOrder>) -> Result<Vec<User>, Error>;

    /// Return a single user or a not-found error.
    async fn fetch_user(&self, id: UserId) -> Result<User, Error>;
}
