//! Products API handlers.
//!
//! ```text
//! GET    /api/products[?sortOrder=name|price]
//! POST   /api/products        {"name":"Milk","price":5}
//! GET    /api/products/{id}
//! PUT    /api/products/{id}   {"name":"Milk","price":6}
//! DELETE /api/products/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use crate::domain::{PRODUCT_DOES_NOT_EXIST, PRODUCT_NOT_FOUND, Product, ProductId, ProductSortOrder};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::{FieldIssueSchema, NewProductSchema, ProductSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_resource_id, parse_sort_order};

/// Query parameters accepted by `GET /api/products`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ProductsListQuery {
    /// `name` or `price`. Omit to keep store order.
    pub sort_order: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductsListQuery),
    responses(
        (status = 200, description = "Products in store order", body = [ProductSchema]),
        (status = 400, description = "Unsupported sortOrder", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    query: web::Query<ProductsListQuery>,
) -> ApiResult<web::Json<Vec<Product>>> {
    let order = parse_sort_order::<ProductSortOrder>(query.sort_order.as_deref())?;
    let products = state.products_query.list_products(order).await?;
    Ok(web::Json(products))
}

/// Create a product; names are unique.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = NewProductSchema,
    responses(
        (status = 201, description = "Product created", body = ProductSchema),
        (status = 400, description = "Validation issues; a taken name returns an ErrorBody instead", body = [FieldIssueSchema])
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let product = state.products.create_product(&payload).await?;
    Ok(HttpResponse::Created().json(product))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product", body = ProductSchema),
        (status = 404, description = "No such product", body = ErrorBody)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Product>> {
    let id: ProductId = parse_resource_id(&path, PRODUCT_NOT_FOUND)?;
    let product = state.products_query.fetch_product(id).await?;
    Ok(web::Json(product))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = NewProductSchema,
    responses(
        (status = 200, description = "Updated product", body = ProductSchema),
        (status = 400, description = "Validation issues", body = [FieldIssueSchema]),
        (status = 404, description = "No such product", body = ErrorBody)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<Product>> {
    let id: ProductId = parse_resource_id(&path, PRODUCT_DOES_NOT_EXIST)?;
    let product = state.products.update_product(id, &payload).await?;
    Ok(web::Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Deleted product", body = ProductSchema),
        (status = 404, description = "No such product", body = ErrorBody)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Product>> {
    let id: ProductId = parse_resource_id(&path, PRODUCT_DOES_NOT_EXIST)?;
    let product = state.products.delete_product(id).await?;
    Ok(web::Json(product))
}
