//! User collection and item use cases.
//!
//! Every mutation validates the payload against [`user_schema`] before the
//! repository is touched, so an invalid request never reaches the store.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{
    Error, NewUser, USER_ALREADY_EXISTS, USER_DOES_NOT_EXIST, USER_NOT_FOUND, User, UserChanges,
    UserId, UserSortOrder, user_schema,
};

/// Users service implementing the user driving ports.
#[derive(Clone)]
pub struct UsersService<R> {
    repository: Arc<R>,
}

impl<R> UsersService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UsersService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::Conflict => Error::conflict(USER_ALREADY_EXISTS),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self, order: Option<UserSortOrder>) -> Result<Vec<User>, Error> {
        let mut users = self
            .repository
            .find_all()
            .await
            .map_err(Self::map_persistence_error)?;
        if let Some(order) = order {
            order.sort(&mut users);
        }
        Ok(users)
    }

    async fn fetch_user(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, payload: &Value) -> Result<User, Error> {
        let input: NewUser = user_schema().parse(payload)?;

        let existing = self
            .repository
            .find_by_email(&input.email)
            .await
            .map_err(Self::map_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict(USER_ALREADY_EXISTS));
        }

        self.repository
            .create(&input)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn update_user(&self, id: UserId, payload: &Value) -> Result<User, Error> {
        let input: NewUser = user_schema().parse(payload)?;
        let changes = UserChanges::from(input);

        self.repository
            .update(id, &changes)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_DOES_NOT_EXIST))
    }

    async fn delete_user(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_DOES_NOT_EXIST))
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
