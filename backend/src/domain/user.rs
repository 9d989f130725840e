//! User resource model and payload schema.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use super::validation::{FieldSchema, ObjectSchema};

/// Returned by fetch when no user has the requested id.
pub const USER_NOT_FOUND: &str = "User not found";
/// Returned by update and delete when the target user is absent.
pub const USER_DOES_NOT_EXIST: &str = "The user does not exist.";
/// Returned when another user already holds the email address.
pub const USER_ALREADY_EXISTS: &str = "User already exists.";

/// Stored user record.
///
/// ## Invariants
/// - `email` is unique across all stored users.
/// - `name` has at least three characters and `email` is well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followers: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Validated payload accepted by create and update.
///
/// A client-supplied `id` passes validation but is never used.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub followers: Option<i64>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields an update is allowed to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
}

impl From<NewUser> for UserChanges {
    fn from(input: NewUser) -> Self {
        Self {
            name: input.name,
            email: input.email,
        }
    }
}

static USER_SCHEMA: OnceLock<ObjectSchema> = OnceLock::new();

/// Schema every user payload is checked against.
pub fn user_schema() -> &'static ObjectSchema {
    USER_SCHEMA.get_or_init(|| {
        ObjectSchema::new(vec![
            FieldSchema::string("name").min_length(3),
            FieldSchema::string("email").email(),
            FieldSchema::number("id").optional(),
            FieldSchema::number("followers").optional().integer(),
            FieldSchema::boolean("isActive").optional(),
            FieldSchema::date("createdAt").optional(),
        ])
    })
}

/// Ordering applied to user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortOrder {
    Name,
    Email,
}

impl UserSortOrder {
    /// Stable sort; ties keep store order.
    pub fn sort(self, users: &mut [User]) {
        users.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(self, a: &User, b: &User) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::Email => a.email.cmp(&b.email),
        }
    }
}

impl FromStr for UserSortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            other => Err(format!(
                "unsupported sortOrder `{other}`; expected `name` or `email`"
            )),
        }
    }
}
