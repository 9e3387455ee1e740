//! # Car Model
//!
//! The single domain record this service manages.

use serde::{Deserialize, Serialize};

/// A car record, addressable by its client-supplied `id`.
///
/// Ids are not server-generated: `save` performs an upsert keyed on `id`,
/// so posting a car with an existing id overwrites the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Car {
    pub id: i64,
    pub color: String,
    pub model: String,
    pub price: f64,
}

impl Car {
    pub fn new(id: i64, color: impl Into<String>, model: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            color: color.into(),
            model: model.into(),
            price,
        }
    }

    /// A car id is valid when it is strictly positive.
    pub fn has_valid_id(&self) -> bool {
        self.id > 0
    }
}
