//! Driving port for product mutations.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, Product, ProductId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductsCommand: Send + Sync {
    async fn create_product(&self, payload: &Value) -> Result<Product, Error>;

    async fn update_product(&self, id: ProductId, payload: &Value) -> Result<Product, Error>;

    async fn delete_product(&self, id: ProductId) -> Result<Product, Error>;
}
