//! Domain primitives, schemas and services.
//!
//! Purpose: define the user and product resources, the declarative schemas
//! their payloads are validated against, and the services that implement the
//! driving ports on top of the repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure type.
//! - User / Product: stored records; NewUser / NewProduct: validated input.
//! - UsersService / ProductsService: list, fetch, create, update, delete.
//! - validation: ObjectSchema, FieldSchema, FieldIssue, ValidationIssues.

pub mod error;
pub mod ports;
pub mod product;
pub mod products_service;
pub mod resource_id;
pub mod trace_id;
pub mod user;
pub mod users_service;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::product::{
    NewProduct, PRODUCT_ALREADY_EXISTS, PRODUCT_DOES_NOT_EXIST, PRODUCT_NOT_FOUND, Product,
    ProductChanges, ProductSortOrder, product_schema,
};
pub use self::products_service::ProductsService;
pub use self::resource_id::{ProductId, ResourceIdError, UserId};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    NewUser, USER_ALREADY_EXISTS, USER_DOES_NOT_EXIST, USER_NOT_FOUND, User, UserChanges,
    UserSortOrder, user_schema,
};
pub use self::users_service::UsersService;
pub use self::validation::{FieldIssue, IssueKind, ValidationIssues};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use storefront::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
