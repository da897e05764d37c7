//! Package catalogue models.

use ascend_core::types::EntityId;
use serde::{Deserialize, Serialize};

/// A purchasable coaching offering. Seeded at start-up, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: EntityId,
    pub name: String,
    /// Whole currency units.
    pub price: i64,
    pub target_audience: String,
    pub description: String,
    /// Display order is significant.
    pub features: Vec<String>,
    pub is_popular: bool,
}

/// DTO for seeding a package. The id is a stable slug chosen by the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPackage {
    pub id: EntityId,
    pub name: String,
    pub price: i64,
    pub target_audience: String,
    pub description: String,
    pub features: Vec<String>,
    #[serde(default)]
    pub is_popular: bool,
}

impl From<NewPackage> for Package {
    fn from(input: NewPackage) -> Self {
        Self {
            id: input.id,
            name: input.name,
            price: input.price,
            target_audience: input.target_audience,
            description: input.description,
            features: input.features,
            is_popular: input.is_popular,
        }
    }
}
