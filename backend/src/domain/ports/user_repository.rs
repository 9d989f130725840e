//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store rejected a write because the email is already taken.
        Conflict => "user email is already taken",
    }
}

/// Driven port over the user collection.
///
/// Adapters return users in store order (ascending id) from
/// [`UserRepository::find_all`]. `update` and `delete` report a missing row as
/// `Ok(None)` rather than an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Lookup used for the email uniqueness check.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a user and return it with its store-assigned id.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user, returning the row as it was before deletion.
    async fn delete(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;
}
