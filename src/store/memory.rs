//! # In-Memory Car Store
//!
//! `BTreeMap`-backed store. Default backend when no database is
//! configured, and the test double for the HTTP layer.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::model::Car;

use super::errors::{StoreError, StoreResult};
use super::CarStore;

/// In-memory car store keyed by id.
///
/// The `BTreeMap` keeps iteration in ascending id order, matching the
/// relational backend's `ORDER BY id`.
pub struct MemoryCarStore {
    cars: RwLock<BTreeMap<i64, Car>>,
}

impl MemoryCarStore {
    pub fn new() -> Self {
        Self {
            cars: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-populated with the given cars.
    pub fn with_cars(cars: impl IntoIterator<Item = Car>) -> Self {
        Self {
            cars: RwLock::new(cars.into_iter().map(|c| (c.id, c)).collect()),
        }
    }

    fn filter<F>(&self, pred: F) -> StoreResult<Vec<Car>>
    where
        F: Fn(&Car) -> bool,
    {
        let cars = self.cars.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(cars.values().filter(|c| pred(c)).cloned().collect())
    }
}

impl Default for MemoryCarStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarStore for MemoryCarStore {
    async fn find_all(&self) -> StoreResult<Vec<Car>> {
        self.filter(|_| true)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Car>> {
        let cars = self.cars.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(cars.get(&id).cloned())
    }

    async fn find_by_color(&self, color: &str) -> StoreResult<Vec<Car>> {
        self.filter(|c| c.color.eq_ignore_ascii_case(color))
    }

    async fn find_by_price_between(&self, min: f64, max: f64) -> StoreResult<Vec<Car>> {
        self.filter(|c| c.price >= min && c.price <= max)
    }

    async fn find_by_price_under(&self, max: f64) -> StoreResult<Vec<Car>> {
        self.filter(|c| c.price <= max)
    }

    async fn find_by_price_over(&self, min: f64) -> StoreResult<Vec<Car>> {
        self.filter(|c| c.price >= min)
    }

    async fn save(&self, car: &Car) -> StoreResult<()> {
        let mut cars = self.cars.write().map_err(|_| StoreError::LockPoisoned)?;
        cars.insert(car.id, car.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let mut cars = self.cars.write().map_err(|_| StoreError::LockPoisoned)?;
        cars.remove(&id);
        Ok(())
    }
}
