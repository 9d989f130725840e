//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductPersistenceError, ProductRepository};
use crate::domain::{NewProduct, Product, ProductChanges, ProductId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewProductRow, ProductChangesRow, ProductRow};
use super::pool::{DbPool, PoolError};
use super::schema::products;

/// Diesel-backed implementation of the `ProductRepository` port.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> ProductPersistenceError {
    map_pool_error(error, ProductPersistenceError::connection)
}

fn map_diesel(error: diesel::result::Error) -> ProductPersistenceError {
    map_diesel_error(
        error,
        ProductPersistenceError::query,
        ProductPersistenceError::connection,
        ProductPersistenceError::conflict,
    )
}

fn row_to_product(row: ProductRow) -> Result<Product, ProductPersistenceError> {
    let id = ProductId::new(row.id).map_err(|err| {
        ProductPersistenceError::query(format!("stored product id {}: {err}", row.id))
    })?;
    Ok(Product {
        id,
        name: row.name,
        price: row.price,
        created_at: Some(row.created_at),
    })
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        products::table
            .order(products::id.asc())
            .select(ProductRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?
            .into_iter()
            .map(row_to_product)
            .collect()
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        products::table
            .find(id.get())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?
            .map(row_to_product)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        products::table
            .filter(products::name.eq(name))
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?
            .map(row_to_product)
            .transpose()
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = NewProductRow {
            name: &product.name,
            price: product.price,
            created_at: product.created_at,
        };
        let stored = diesel::insert_into(products::table)
            .values(&row)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;
        row_to_product(stored)
    }

    async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Option<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = ProductChangesRow {
            name: &changes.name,
            price: changes.price,
        };
        diesel::update(products::table.find(id.get()))
            .set(&row)
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?
            .map(row_to_product)
            .transpose()
    }

    async fn delete(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::delete(products::table.find(id.get()))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?
            .map(row_to_product)
            .transpose()
    }
}
