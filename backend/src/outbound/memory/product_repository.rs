use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{ProductPersistenceError, ProductRepository};
use crate::domain::{NewProduct, Product, ProductChanges, ProductId};

#[derive(Debug, Default)]
struct ProductTable {
    rows: BTreeMap<ProductId, Product>,
    last_id: i64,
}

impl ProductTable {
    fn name_taken(&self, name: &str, except: Option<ProductId>) -> bool {
        self.rows
            .values()
            .any(|product| product.name == name && Some(product.id) != except)
    }
}

/// Mutex-guarded product store; `name` is unique.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    table: Mutex<ProductTable>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, ProductTable>, ProductPersistenceError> {
        self.table
            .lock()
            .map_err(|_| ProductPersistenceError::query("product store lock poisoned"))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductPersistenceError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|product| product.name == name)
            .cloned())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, ProductPersistenceError> {
        let mut table = self.lock()?;
        if table.name_taken(&product.name, None) {
            return Err(ProductPersistenceError::conflict());
        }
        let id = ProductId::new(table.last_id + 1)
            .map_err(|err| ProductPersistenceError::query(err.to_string()))?;
        let stored = Product {
            id,
            name: product.name.clone(),
            price: product.price,
            created_at: Some(product.created_at.unwrap_or_else(Utc::now)),
        };
        table.last_id = id.get();
        table.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        let mut table = self.lock()?;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.name_taken(&changes.name, Some(id)) {
            return Err(ProductPersistenceError::conflict());
        }
        Ok(table.rows.get_mut(&id).map(|product| {
            product.name.clone_from(&changes.name);
            product.price = changes.price;
            product.clone()
        }))
    }

    async fn delete(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError> {
        Ok(self.lock()?.rows.remove(&id))
    }
}
