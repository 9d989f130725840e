//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserChanges, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserChangesRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
///
/// Email uniqueness is enforced by the `users_email_key` index; violations
/// surface as [`UserPersistenceError::Conflict`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
        UserPersistenceError::conflict,
    )
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = UserId::new(row.id)
        .map_err(|err| UserPersistenceError::query(format!("stored user id {}: {err}", row.id)))?;
    Ok(User {
        id,
        name: row.name,
        email: row.email,
        followers: row.followers,
        is_active: row.is_active,
        created_at: Some(row.created_at),
    })
}

fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, UserPersistenceError> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows_to_users(rows)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?
            .map(row_to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?
            .map(row_to_user)
            .transpose()
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = NewUserRow {
            name: &user.name,
            email: &user.email,
            followers: user.followers,
            is_active: user.is_active,
            created_at: user.created_at,
        };
        let stored = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        row_to_user(stored)
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = UserChangesRow {
            name: &changes.name,
            email: &changes.email,
        };
        diesel::update(users::table.find(id.get()))
            .set(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?
            .map(row_to_user)
            .transpose()
    }

    async fn delete(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::delete(users::table.find(id.get()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?
            .map(row_to_user)
            .transpose()
    }
}
