//! Location domain model.
//!
//! Locations are the leaves of the tenant hierarchy — the physical
//! venues everything in the backoffice is ultimately scoped to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A physical venue operated under a brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    /// The brand this location belongs to.
    pub brand_id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// URL-safe identifier, unique within the brand.
    pub slug: String,
    /// Display city, used for disambiguation in the switcher.
    pub city: String,
    /// Arbitrary key-value metadata.
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLocation {
    pub brand_id: Uuid,
    pub name: String,
    pub slug: String,
    pub city: String,
    pub metadata: Option<serde_json::Value>,
}

/// Fields that can be updated on an existing location.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateLocation {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub city: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
