//! Database access for marketplace products and stores.

mod diesel_models;
mod diesel_pool;
mod diesel_product;
mod util;

pub use diesel_models::{ProductRecord, StoreRecord};
pub use diesel_pool::{AsyncSqliteConnection, AsyncSqlitePool, DieselError};
pub use diesel_product::DieselProductRepository;
