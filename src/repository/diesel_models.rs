//! Diesel row types for the marketplace tables.

use chrono::Utc;
use diesel::prelude::*;

use crate::models::ProductHit;
use crate::schema::{products, stores};

/// Row in the `stores` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = stores)]
pub struct StoreRecord {
    pub store_id: i32,
    pub store_name: String,
    pub address: String,
    pub contact_number: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub maps_url: Option<String>,
    pub created_at: String,
}

impl StoreRecord {
    pub fn new(store_id: i32, store_name: &str, address: &str, contact_number: &str) -> Self {
        Self {
            store_id,
            store_name: store_name.to_string(),
            address: address.to_string(),
            contact_number: contact_number.to_string(),
            latitude: None,
            longitude: None,
            maps_url: None,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Row in the `products` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = products)]
pub struct ProductRecord {
    pub product_id: i32,
    pub store_id: i32,
    pub product_name: String,
    pub description: String,
    pub price: f64,
    pub stock_quantity: i32,
    pub category: String,
    pub image_url: String,
    pub created_at: String,
}

impl ProductRecord {
    pub fn new(product_id: i32, store_id: i32, product_name: &str, price: f64) -> Self {
        Self {
            product_id,
            store_id,
            product_name: product_name.to_string(),
            description: String::new(),
            price,
            stock_quantity: 0,
            category: String::new(),
            image_url: String::new(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_stock(mut self, stock: i32) -> Self {
        self.stock_quantity = stock;
        self
    }

    pub fn with_created_at(mut self, created_at: &str) -> Self {
        self.created_at = created_at.to_string();
        self
    }
}

/// Flatten a joined product/store pair into the response DTO.
impl From<(ProductRecord, StoreRecord)> for ProductHit {
    fn from((product, store): (ProductRecord, StoreRecord)) -> Self {
        ProductHit {
            product_id: product.product_id,
            name: product.product_name,
            description: product.description,
            price: product.price,
            stock: product.stock_quantity,
            category: product.category,
            image: product.image_url,
            store: store.store_name,
            address: store.address,
            contact: store.contact_number,
            latitude: store.latitude,
            longitude: store.longitude,
            maps_url: store.maps_url,
            source: "database".to_string(),
        }
    }
}
