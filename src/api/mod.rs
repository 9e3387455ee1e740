//! # Car API
//!
//! HTTP surface of the service: routing, handlers, status-code policy,
//! server shell and configuration.

pub mod config;
pub mod errors;
pub mod routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::ApiError;
pub use routes::{car_routes, CarApiState};
pub use server::HttpServer;
