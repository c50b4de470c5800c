//! Diesel-based product repository for SQLite.
//!
//! Uses diesel-async's SyncConnectionWrapper to provide an async interface
//! while maintaining Diesel's compile-time query checking.

use diesel::prelude::*;
use diesel_async::{RunQueryDsl, SimpleAsyncConnection};

use super::diesel_models::{ProductRecord, StoreRecord};
use super::diesel_pool::{AsyncSqlitePool, DieselError};
use crate::models::ProductHit;
use crate::schema::{products, stores};

/// Maximum rows a keyword search returns.
const SEARCH_LIMIT: i64 = 50;

/// Repository for marketplace products joined with store metadata.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: AsyncSqlitePool,
}

impl DieselProductRepository {
    /// Create a repository backed by the given connection factory.
    pub fn new(pool: AsyncSqlitePool) -> Self {
        Self { pool }
    }

    /// Create the tables if they do not exist yet.
    pub async fn init_schema(&self) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        conn.batch_execute(
            r#"CREATE TABLE IF NOT EXISTS stores (
                store_id INTEGER PRIMARY KEY,
                store_name TEXT NOT NULL,
                address TEXT NOT NULL,
                contact_number TEXT NOT NULL,
                latitude DOUBLE,
                longitude DOUBLE,
                maps_url TEXT,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS products (
                product_id INTEGER PRIMARY KEY,
                store_id INTEGER NOT NULL REFERENCES stores(store_id),
                product_name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                price DOUBLE NOT NULL,
                stock_quantity INTEGER NOT NULL DEFAULT 0,
                category TEXT NOT NULL DEFAULT '',
                image_url TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_products_created_at
                ON products(created_at);"#,
        )
        .await?;

        Ok(())
    }

    /// Save a store (insert or replace).
    pub async fn save_store(&self, store: &StoreRecord) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::replace_into(stores::table)
            .values(store)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Save a product (insert or replace).
    pub async fn save_product(&self, product: &ProductRecord) -> Result<(), DieselError> {
        let mut conn = self.pool.get().await?;

        diesel::replace_into(products::table)
            .values(product)
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Keyword search over product name, description, and category.
    ///
    /// Case-insensitive substring match (SQLite LIKE), joined with store
    /// metadata, newest products first, capped at 50 rows.
    pub async fn search(&self, keyword: &str) -> Result<Vec<ProductHit>, DieselError> {
        let mut conn = self.pool.get().await?;
        let pattern = format!("%{}%", keyword);

        let rows: Vec<(ProductRecord, StoreRecord)> = products::table
            .inner_join(stores::table)
            .filter(
                products::product_name
                    .like(pattern.clone())
                    .or(products::description.like(pattern.clone()))
                    .or(products::category.like(pattern)),
            )
            .order(products::created_at.desc())
            .limit(SEARCH_LIMIT)
            .select((ProductRecord::as_select(), StoreRecord::as_select()))
            .load(&mut conn)
            .await?;

        Ok(rows.into_iter().map(ProductHit::from).collect())
    }
}
