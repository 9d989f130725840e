//! Driving port for product reads.

use async_trait::async_trait;

use crate::domain::{Error, Product, ProductId, ProductSortOrder};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductsQuery: Send + Sync {
    async fn list_products(&self, order: Option<ProductSortOrder>)
    -> Result<Vec<Product>, Error>;

    async fn fetch_product(&self, id: ProductId) -> Result<Product, Error>;
}
