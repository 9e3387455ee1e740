//! # Car Routes
//!
//! Endpoints for car CRUD and filtered queries under `/api/cars`.
//!
//! Status-code policy for filtered listings is three-way: 400 for an
//! invalid range (checked before touching the store), 404 when the query
//! is valid but nothing matches, 200 otherwise. The 4xx listing responses
//! carry an empty JSON array body, matching the original list contract;
//! only create validation and store failures use the structured error body.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::model::Car;
use crate::store::CarStore;

use super::errors::ApiError;

// ==================
// Shared State
// ==================

/// Car API state shared across handlers
pub struct CarApiState {
    pub store: Arc<dyn CarStore>,
}

impl CarApiState {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self { store }
    }
}

// ==================
// Car Routes
// ==================

/// Create car routes
pub fn car_routes(state: Arc<CarApiState>) -> Router {
    Router::new()
        .route("/api/cars", get(list_cars_handler))
        .route("/api/cars", post(create_car_handler))
        .route("/api/cars/{id}", put(replace_car_handler))
        .route("/api/cars/{id}", delete(delete_car_handler))
        .route("/api/cars/color/{color}", get(cars_by_color_handler))
        .route(
            "/api/cars/price/between/{min}/{max}",
            get(cars_priced_between_handler),
        )
        .route("/api/cars/price/under/{max}", get(cars_priced_under_handler))
        .route("/api/cars/price/over/{min}", get(cars_priced_over_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// 200 with the matches, or 404 with an empty list when nothing matched.
fn ok_or_not_found(cars: Vec<Car>) -> (StatusCode, Json<Vec<Car>>) {
    if cars.is_empty() {
        (StatusCode::NOT_FOUND, Json(cars))
    } else {
        (StatusCode::OK, Json(cars))
    }
}

/// Validate and persist a candidate car.
///
/// Ids are client-supplied; `id <= 0` is rejected with a structured 400
/// instead of persisting anything.
async fn persist_car(state: &CarApiState, car: Car) -> Result<Car, ApiError> {
    if !car.has_valid_id() {
        tracing::error!(id = car.id, "car id must be greater than zero");
        return Err(ApiError::InvalidCarId(car.id));
    }
    state.store.save(&car).await?;
    tracing::info!(id = car.id, "car saved");
    Ok(car)
}

/// PUT fallback when the path id matches nothing: delegate to the create
/// path, validation included. The candidate's own id is what gets
/// persisted; the path id only decided that we fell through to create.
async fn create_via_put_fallback(state: &CarApiState, car: Car) -> Result<Car, ApiError> {
    persist_car(state, car).await
}

// ==================
// CRUD Handlers
// ==================

async fn list_cars_handler(
    State(state): State<Arc<CarApiState>>,
) -> Result<Json<Vec<Car>>, ApiError> {
    let cars = state.store.find_all().await?;
    Ok(Json(cars))
}

async fn create_car_handler(
    State(state): State<Arc<CarApiState>>,
    Json(car): Json<Car>,
) -> Result<Json<Car>, ApiError> {
    let car = persist_car(&state, car).await?;
    Ok(Json(car))
}

async fn replace_car_handler(
    State(state): State<Arc<CarApiState>>,
    Path(id): Path<i64>,
    Json(car): Json<Car>,
) -> Result<(StatusCode, Json<Car>), ApiError> {
    match state.store.find_by_id(id).await? {
        Some(_) => {
            // Full replace; the body's id wins even when it differs from
            // the path id.
            state.store.save(&car).await?;
            tracing::info!(id, "car replaced");
            Ok((StatusCode::OK, Json(car)))
        }
        None => {
            tracing::info!(id, "car not found, creating");
            let car = create_via_put_fallback(&state, car).await?;
            Ok((StatusCode::CREATED, Json(car)))
        }
    }
}

async fn delete_car_handler(
    State(state): State<Arc<CarApiState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_by_id(id).await?;
    tracing::info!(id, "car deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ==================
// Filter Handlers
// ==================

async fn cars_by_color_handler(
    State(state): State<Arc<CarApiState>>,
    Path(color): Path<String>,
) -> Result<(StatusCode, Json<Vec<Car>>), ApiError> {
    let cars = state.store.find_by_color(&color).await?;
    if cars.is_empty() {
        tracing::warn!(%color, "no cars found for color");
    } else {
        tracing::info!(count = cars.len(), %color, "found cars for color");
    }
    Ok(ok_or_not_found(cars))
}

async fn cars_priced_between_handler(
    State(state): State<Arc<CarApiState>>,
    Path((min, max)): Path<(f64, f64)>,
) -> Result<(StatusCode, Json<Vec<Car>>), ApiError> {
    if min > max {
        tracing::warn!(min, max, "invalid price range");
        return Ok((StatusCode::BAD_REQUEST, Json(Vec::new())));
    }
    let cars = state.store.find_by_price_between(min, max).await?;
    Ok(ok_or_not_found(cars))
}

async fn cars_priced_under_handler(
    State(state): State<Arc<CarApiState>>,
    Path(max): Path<f64>,
) -> Result<(StatusCode, Json<Vec<Car>>), ApiError> {
    let cars = state.store.find_by_price_under(max).await?;
    Ok(ok_or_not_found(cars))
}

async fn cars_priced_over_handler(
    State(state): State<Arc<CarApiState>>,
    Path(min): Path<f64>,
) -> Result<(StatusCode, Json<Vec<Car>>), ApiError> {
    let cars = state.store.find_by_price_over(min).await?;
    Ok(ok_or_not_found(cars))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_or_not_found_policy() {
        let (status, Json(body)) = ok_or_not_found(vec![]);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());

        let (status, Json(body)) = ok_or_not_found(vec![Car::new(1, "red", "Ferrari", 250000.0)]);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.len(), 1);
    }

    #[tokio::test]
    async fn test_persist_car_rejects_non_positive_id() {
        use crate::store::MemoryCarStore;

        let state = CarApiState::new(Arc::new(MemoryCarStore::new()));
        let err = persist_car(&state, Car::new(0, "000", "000", 9999.0))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        // Nothing was persisted on the rejected path.
        assert!(state.store.find_all().await.unwrap().is_empty());
    }
}
