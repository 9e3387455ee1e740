//! # Car Store
//!
//! Persistence seam for car records. The HTTP layer only talks to the
//! [`CarStore`] trait; backends provide the actual storage.

pub mod errors;
pub mod memory;
pub mod sqlite;

use async_trait::async_trait;

use crate::model::Car;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryCarStore;
pub use sqlite::SqliteCarStore;

/// Store trait for car CRUD and filtered queries.
///
/// All listing operations return cars in ascending id order, so filter
/// results are deterministic across backends. Price boundaries are
/// inclusive on both ends.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// List every stored car.
    async fn find_all(&self) -> StoreResult<Vec<Car>>;

    /// Look up a single car by id.
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Car>>;

    /// List cars whose color matches, ignoring case.
    async fn find_by_color(&self, color: &str) -> StoreResult<Vec<Car>>;

    /// List cars with `min <= price <= max`.
    async fn find_by_price_between(&self, min: f64, max: f64) -> StoreResult<Vec<Car>>;

    /// List cars with `price <= max`.
    async fn find_by_price_under(&self, max: f64) -> StoreResult<Vec<Car>>;

    /// List cars with `price >= min`.
    async fn find_by_price_over(&self, min: f64) -> StoreResult<Vec<Car>>;

    /// Insert or replace, keyed on `car.id`.
    async fn save(&self, car: &Car) -> StoreResult<()>;

    /// Delete by id. Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: i64) -> StoreResult<()>;
}
