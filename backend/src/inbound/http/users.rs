//! Users API handlers.
//!
//! ```text
//! GET    /api/users[?sortOrder=name|email]
//! POST   /api/users        {"name":"Ada","email":"ada@example.com"}
//! GET    /api/users/{id}
//! PUT    /api/users/{id}   {"name":"Ada","email":"ada@example.com"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::domain::{USER_DOES_NOT_EXIST, USER_NOT_FOUND, User, UserId, UserSortOrder};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::{FieldIssueSchema, NewUserSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_resource_id, parse_sort_order};

/// Query parameters accepted by `GET /api/users`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UsersListQuery {
    /// `name` or `email`. Omit to keep store order.
    pub sort_order: Option<String>,
}

/// List every user.
#[utoipa::path(
    get,
    path = "/api/users",
    params(UsersListQuery),
    responses(
        (status = 200, description = "Users in store order", body = [UserSchema]),
        (status = 400, description = "Unsupported sortOrder", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<UsersListQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let order = parse_sort_order::<UserSortOrder>(query.sort_order.as_deref())?;
    let users = state.users_query.list_users(order).await?;
    Ok(web::Json(users))
}

/// Create a user after validating the payload and checking email uniqueness.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUserSchema,
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Validation issues; a taken email returns an ErrorBody instead", body = [FieldIssueSchema])
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let user = state.users.create_user(&payload).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "No such user", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id: UserId = parse_resource_id(&path, USER_NOT_FOUND)?;
    let user = state.users_query.fetch_user(id).await?;
    Ok(web::Json(user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = NewUserSchema,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Validation issues", body = [FieldIssueSchema]),
        (status = 404, description = "No such user", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<User>> {
    let id: UserId = parse_resource_id(&path, USER_DOES_NOT_EXIST)?;
    let user = state.users.update_user(id, &payload).await?;
    Ok(web::Json(user))
}

/// Delete a user and return the removed record.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted user", body = UserSchema),
        (status = 404, description = "No such user", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id: UserId = parse_resource_id(&path, USER_DOES_NOT_EXIST)?;
    let user = state.users.delete_user(id).await?;
    Ok(web::Json(user))
}

#[cfg(test)]
mod tests;
