//! Port abstraction for product persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewProduct, Product, ProductChanges, ProductId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product repository adapters.
    pub enum ProductPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "product repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "product repository query failed: {message}",
        /// The store rejected a write because the name is already taken.
        Conflict => "product name is already taken",
    }
}

/// Driven port over the product collection. Mirrors
/// [`UserRepository`](super::UserRepository) with `name` as the unique key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, ProductPersistenceError>;

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductPersistenceError>;

    async fn create(&self, product: &NewProduct) -> Result<Product, ProductPersistenceError>;

    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, ProductPersistenceError>;

    async fn delete(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError>;
}
