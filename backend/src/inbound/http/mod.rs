//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod products;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;
use error::{json_error_handler, query_error_handler};

/// Scope mounting every resource handler under `/api`.
///
/// Body and query extractor failures are rendered through the domain error
/// mapping so clients always receive `{"error": ...}`.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(products::list_products)
        .service(products::create_product)
        .service(products::get_product)
        .service(products::update_product)
        .service(products::delete_product)
}
