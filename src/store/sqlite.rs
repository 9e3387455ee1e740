//! # SQLite Car Store
//!
//! Relational backend: a single `cars` table with `id` as primary key.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::model::Car;

use super::errors::StoreResult;
use super::CarStore;

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS cars (
    id INTEGER PRIMARY KEY,
    color TEXT NOT NULL,
    model TEXT NOT NULL,
    price REAL NOT NULL
)";

/// SQLite-backed car store over an `sqlx` connection pool.
pub struct SqliteCarStore {
    pool: SqlitePool,
}

impl SqliteCarStore {
    /// Connect to the given database URL and ensure the schema exists.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new().connect(url).await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Private in-memory database, mainly for tests.
    ///
    /// Pinned to a single connection: each SQLite `:memory:` connection
    /// is its own database, so a larger pool would scatter the data.
    pub async fn in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn fetch_where(&self, sql: &str, params: &[f64]) -> StoreResult<Vec<Car>> {
        let mut query = sqlx::query_as::<_, Car>(sql);
        for param in params {
            query = query.bind(*param);
        }
        Ok(query.fetch_all(&self.pool).await?)
    }
}

#[async_trait]
impl CarStore for SqliteCarStore {
    async fn find_all(&self) -> StoreResult<Vec<Car>> {
        self.fetch_where("SELECT id, color, model, price FROM cars ORDER BY id", &[])
            .await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Car>> {
        let car = sqlx::query_as::<_, Car>("SELECT id, color, model, price FROM cars WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(car)
    }

    async fn find_by_color(&self, color: &str) -> StoreResult<Vec<Car>> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT id, color, model, price FROM cars WHERE LOWER(color) = LOWER(?) ORDER BY id",
        )
        .bind(color)
        .fetch_all(&self.pool)
        .await?;
        Ok(cars)
    }

    async fn find_by_price_between(&self, min: f64, max: f64) -> StoreResult<Vec<Car>> {
        self.fetch_where(
            "SELECT id, color, model, price FROM cars WHERE price >= ? AND price <= ? ORDER BY id",
            &[min, max],
        )
        .await
    }

    async fn find_by_price_under(&self, max: f64) -> StoreResult<Vec<Car>> {
        self.fetch_where(
            "SELECT id, color, model, price FROM cars WHERE price <= ? ORDER BY id",
            &[max],
        )
        .await
    }

    async fn find_by_price_over(&self, min: f64) -> StoreResult<Vec<Car>> {
        self.fetch_where(
            "SELECT id, color, model, price FROM cars WHERE price >= ? ORDER BY id",
            &[min],
        )
        .await
    }

    async fn save(&self, car: &Car) -> StoreResult<()> {
        sqlx::query("INSERT OR REPLACE INTO cars (id, color, model, price) VALUES (?, ?, ?, ?)")
            .bind(car.id)
            .bind(&car.color)
            .bind(&car.model)
            .bind(car.price)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
