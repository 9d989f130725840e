//! Driving port for user mutations.
//!
//! Commands take the raw JSON payload: validation against the user schema
//! belongs to the domain, so adapters pass request bodies through untouched.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate and store a new user.
    async fn create_user(&self, payload: &Value) -> Result<User, Error>;

    /// Validate the payload, then replace the user's name and email.
    async fn update_user(&self, id: UserId, payload: &Value) -> Result<User, Error>;

    /// Remove a user, returning the deleted record.
    async fn delete_user(&self, id: UserId) -> Result<User, Error>;
}
