//! Row types used by the Diesel adapters. Never exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{products, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub followers: Option<i64>,
    pub is_active: Option<bool>,
    pub created_at: DateTime<Utc>,
}

/// `created_at: None` lets the column default (`now()`) apply.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub followers: Option<i64>,
    pub is_active: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangesRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub(crate) struct NewProductRow<'a> {
    pub name: &'a str,
    pub price: f64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub(crate) struct ProductChangesRow<'a> {
    pub name: &'a str,
    pub price: f64,
}
