//! Product collection and item use cases.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::ports::{
    ProductPersistenceError, ProductRepository, ProductsCommand, ProductsQuery,
};
use crate::domain::{
    Error, NewProduct, PRODUCT_ALREADY_EXISTS, PRODUCT_DOES_NOT_EXIST, PRODUCT_NOT_FOUND, Product,
    ProductChanges, ProductId, ProductSortOrder, product_schema,
};

/// Products service implementing the product driving ports.
#[derive(Clone)]
pub struct ProductsService<R> {
    repository: Arc<R>,
}

impl<R> ProductsService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> ProductsService<R>
where
    R: ProductRepository,
{
    fn map_persistence_error(error: ProductPersistenceError) -> Error {
        match error {
            ProductPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("product repository unavailable: {message}"))
            }
            ProductPersistenceError::Query { message } => {
                Error::internal(format!("product repository error: {message}"))
            }
            ProductPersistenceError::Conflict => Error::conflict(PRODUCT_ALREADY_EXISTS),
        }
    }
}

#[async_trait]
impl<R> ProductsQuery for ProductsService<R>
where
    R: ProductRepository,
{
    async fn list_products(&self, order: Option<ProductSortOrder>) -> Result<Vec<Product>, Error> {
        let mut products = self
            .repository
            .find_all()
            .await
            .map_err(Self::map_persistence_error)?;
        if let Some(order) = order {
            order.sort(&mut products);
        }
        Ok(products)
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_NOT_FOUND))
    }
}

#[async_trait]
impl<R> ProductsCommand for ProductsService<R>
where
    R: ProductRepository,
{
    async fn create_product(&self, payload: &Value) -> Result<Product, Error> {
        let input: NewProduct = product_schema().parse(payload)?;

        let existing = self
            .repository
            .find_by_name(&input.name)
            .await
            .map_err(Self::map_persistence_error)?;
        if existing.is_some() {
            return Err(Error::conflict(PRODUCT_ALREADY_EXISTS));
        }

        self.repository
            .create(&input)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn update_product(&self, id: ProductId, payload: &Value) -> Result<Product, Error> {
        let input: NewProduct = product_schema().parse(payload)?;
        let changes = ProductChanges::from(input);

        self.repository
            .update(id, &changes)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_DOES_NOT_EXIST))
    }

    async fn delete_product(&self, id: ProductId) -> Result<Product, Error> {
        self.repository
            .delete(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(PRODUCT_DOES_NOT_EXIST))
    }
}

#[cfg(test)]
#[path = "products_service_tests.rs"]
mod tests;
