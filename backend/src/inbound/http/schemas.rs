//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers below mirror their JSON shape for the generated documentation.

use utoipa::ToSchema;

/// A stored user.
#[derive(ToSchema)]
#[schema(as = User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Ada Lovelace", min_length = 3)]
    name: String,
    #[schema(example = "ada@example.com", format = "email")]
    email: String,
    followers: Option<i64>,
    is_active: Option<bool>,
    #[schema(format = "date-time")]
    created_at: Option<String>,
}

/// Payload accepted by user create and update. Unknown keys are ignored.
#[derive(ToSchema)]
#[schema(as = NewUser)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NewUserSchema {
    #[schema(example = "Ada Lovelace", min_length = 3)]
    name: String,
    #[schema(example = "ada@example.com", format = "email")]
    email: String,
    /// Accepted but ignored; ids are assigned by the store.
    id: Option<f64>,
    followers: Option<i64>,
    is_active: Option<bool>,
    #[schema(format = "date-time")]
    created_at: Option<String>,
}

/// A stored product.
#[derive(ToSchema)]
#[schema(as = Product)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProductSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Milk", min_length = 2)]
    name: String,
    #[schema(example = 2.5)]
    price: f64,
    #[schema(format = "date-time")]
    created_at: Option<String>,
}

/// Payload accepted by product create and update.
#[derive(ToSchema)]
#[schema(as = NewProduct)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NewProductSchema {
    #[schema(example = "Milk", min_length = 2)]
    name: String,
    #[schema(example = 2.5)]
    price: f64,
    id: Option<f64>,
    #[schema(format = "date-time")]
    created_at: Option<String>,
}

/// One element of the validation issue array.
///
/// Only `code`, `path` and `message` are always present; the other members
/// depend on `code`.
#[derive(ToSchema)]
#[schema(as = FieldIssue)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldIssueSchema {
    /// `invalid_type`, `too_small`, `too_big`, `invalid_string`,
    /// `invalid_date` or `custom`.
    #[schema(example = "too_small")]
    code: String,
    #[schema(example = json!(["name"]))]
    path: Vec<String>,
    #[schema(example = "String must contain at least 3 character(s)")]
    message: String,
    expected: Option<String>,
    received: Option<String>,
    minimum: Option<i64>,
    maximum: Option<i64>,
    #[schema(rename = "type")]
    value_type: Option<String>,
    inclusive: Option<bool>,
    exact: Option<bool>,
    validation: Option<String>,
}
