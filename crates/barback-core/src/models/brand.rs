//! Brand domain model.
//!
//! Brands sit between organizations and locations. A brand is a single
//! customer-facing concept (a cocktail bar format, a tea house line)
//! that an organization operates at one or more locations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A brand belongs to exactly one organization and owns its locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brand {
    pub id: Uuid,
    /// The organization this brand belongs to.
    pub organization_id: Uuid,
    /// Human-readable name.
    pub name: String,
    /// URL-safe identifier, unique within the organization.
    pub slug: String,
    /// Arbitrary key-value metadata.
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new brand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBrand {
    pub organization_id: Uuid,
    pub name: String,
    pub slug: String,
    pub metadata: Option<serde_json::Value>,
}

/// Fields that can be updated on an existing brand.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateBrand {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
