//! motorpool - a small car fleet inventory HTTP service
//!
//! CRUD over a single `Car` resource backed by a relational table,
//! plus color and price-range filter endpoints.

pub mod api;
pub mod cli;
pub mod model;
pub mod store;
