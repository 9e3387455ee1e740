//! HTTP integration tests for the car API.
//!
//! Drives the assembled router directly with `tower::ServiceExt::oneshot`
//! against a seeded in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use motorpool::api::{car_routes, CarApiState};
use motorpool::model::Car;
use motorpool::store::MemoryCarStore;

fn sample_fleet() -> Vec<Car> {
    vec![
        Car::new(1, "black", "BMW x5", 25000.0),
        Car::new(2, "green", "Audi A4", 15000.0),
        Car::new(3, "white", "MB A220", 18000.0),
        Car::new(4, "red", "Ferrari", 250000.0),
    ]
}

fn seeded_router() -> Router {
    let store = Arc::new(MemoryCarStore::with_cars(sample_fleet()));
    car_routes(Arc::new(CarApiState::new(store)))
}

fn empty_router() -> Router {
    let store = Arc::new(MemoryCarStore::new());
    car_routes(Arc::new(CarApiState::new(store)))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

async fn send_json(router: &Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

// ==================
// Listing
// ==================

#[tokio::test]
async fn list_returns_all_cars() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars").await;
    assert_eq!(status, StatusCode::OK);
    let cars = body.as_array().unwrap();
    assert_eq!(cars.len(), 4);
    assert_eq!(cars[0]["model"], "BMW x5");
}

#[tokio::test]
async fn list_on_empty_store_is_ok_not_404() {
    let router = empty_router();
    let (status, body) = get(&router, "/api/cars").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

// ==================
// Color filter
// ==================

#[tokio::test]
async fn color_filter_matches_red_car() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars/color/red").await;
    assert_eq!(status, StatusCode::OK);
    let cars = body.as_array().unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["color"], "red");
    assert_eq!(cars[0]["model"], "Ferrari");
}

#[tokio::test]
async fn color_filter_is_case_insensitive() {
    let router = seeded_router();
    for uri in ["/api/cars/color/RED", "/api/cars/color/ReD"] {
        let (status, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn color_filter_unknown_color_is_404_with_empty_list() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars/color/purple").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.as_array().unwrap().is_empty());
}

// ==================
// Price filters
// ==================

#[tokio::test]
async fn price_between_returns_matches_in_id_order() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars/price/between/10000/30000").await;
    assert_eq!(status, StatusCode::OK);
    let cars = body.as_array().unwrap();
    assert_eq!(cars.len(), 3);
    assert_eq!(cars[0]["model"], "BMW x5");
}

#[tokio::test]
async fn price_between_includes_boundary_prices() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars/price/between/15000/25000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn price_between_no_matches_is_404() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars/price/between/100/500").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn price_between_min_over_max_is_400_regardless_of_contents() {
    for router in [seeded_router(), empty_router()] {
        let (status, body) = get(&router, "/api/cars/price/between/30000/10000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn price_under_includes_boundary() {
    let router = seeded_router();

    let (status, body) = get(&router, "/api/cars/price/under/16000").await;
    assert_eq!(status, StatusCode::OK);
    let cars = body.as_array().unwrap();
    assert_eq!(cars.len(), 1);
    assert_eq!(cars[0]["model"], "Audi A4");

    // 25000 is a stored price; "under" keeps it.
    let (status, body) = get(&router, "/api/cars/price/under/25000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn price_under_no_matches_is_404() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars/price/under/1000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn price_over_returns_matches() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars/price/over/20000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn price_over_no_matches_is_404() {
    let router = seeded_router();
    let (status, body) = get(&router, "/api/cars/price/over/1000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.as_array().unwrap().is_empty());
}

// ==================
// Create
// ==================

#[tokio::test]
async fn create_persists_and_echoes_the_car() {
    let router = empty_router();
    let car = json!({"id": 7, "color": "blue", "model": "VW Golf", "price": 12000.0});

    let (status, body) = send_json(&router, "POST", "/api/cars", car.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, car);

    let (_, body) = get(&router, "/api/cars").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_with_non_positive_id_is_400_and_persists_nothing() {
    let router = empty_router();

    for id in [0, -1] {
        let car = json!({"id": id, "color": "blue", "model": "VW Golf", "price": 12000.0});
        let (status, body) = send_json(&router, "POST", "/api/cars", car).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("greater than zero"));
    }

    let (_, body) = get(&router, "/api/cars").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_with_existing_id_overwrites() {
    let router = seeded_router();
    let car = json!({"id": 1, "color": "silver", "model": "BMW x5", "price": 27000.0});

    let (status, _) = send_json(&router, "POST", "/api/cars", car).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&router, "/api/cars").await;
    let cars = body.as_array().unwrap();
    assert_eq!(cars.len(), 4);
    assert_eq!(cars[0]["color"], "silver");
}

// ==================
// Replace (PUT)
// ==================

#[tokio::test]
async fn put_existing_id_replaces_and_returns_200() {
    let router = seeded_router();
    let car = json!({"id": 1, "color": "blue", "model": "BMW x5", "price": 26000.0});

    let (status, body) = send_json(&router, "PUT", "/api/cars/1", car.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, car);

    let (_, body) = get(&router, "/api/cars/color/blue").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn put_absent_id_falls_back_to_create_with_201() {
    let router = seeded_router();
    let car = json!({"id": 9, "color": "yellow", "model": "Fiat 500", "price": 8000.0});

    let (status, body) = send_json(&router, "PUT", "/api/cars/99", car.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, car);

    let (_, body) = get(&router, "/api/cars").await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn put_persists_the_body_id_not_the_path_id() {
    let router = seeded_router();
    let car = json!({"id": 5, "color": "grey", "model": "Opel Astra", "price": 9000.0});

    // Path id 1 exists, so this is a replace, but the body id 5 wins.
    let (status, _) = send_json(&router, "PUT", "/api/cars/1", car).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&router, "/api/cars").await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert!(ids.contains(&5));
    // Car 1 was never removed; only the body car was upserted.
    assert!(ids.contains(&1));
}

#[tokio::test]
async fn put_absent_id_with_invalid_body_id_is_400() {
    let router = seeded_router();
    let car = json!({"id": 0, "color": "grey", "model": "Opel Astra", "price": 9000.0});

    let (status, body) = send_json(&router, "PUT", "/api/cars/99", car).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("greater than zero"));
}

// ==================
// Delete
// ==================

#[tokio::test]
async fn delete_removes_the_car() {
    let router = seeded_router();
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/cars/4")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = get(&router, "/api/cars").await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let router = seeded_router();
    for _ in 0..2 {
        let request = Request::builder()
            .method("DELETE")
            .uri("/api/cars/4")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&router, request).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}

// ==================
// Malformed input
// ==================

#[tokio::test]
async fn non_numeric_path_id_is_a_client_error() {
    let router = seeded_router();
    let request = Request::builder()
        .method("DELETE")
        .uri("/api/cars/abc")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn non_numeric_price_is_a_client_error() {
    let router = seeded_router();
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/cars/price/under/cheap")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
