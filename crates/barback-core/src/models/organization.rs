//! Organization domain model.
//!
//! Organizations are the top-level entity in BARBACK's tenant hierarchy.
//! They own brands and carry the billing relationship for everything
//! operated underneath them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization groups multiple brands under a single commercial owner.
///
/// Organizations represent the contracting company: a restaurant group,
/// a franchise holder, a hotel operator. Billing and ownership live here;
/// day-to-day operation happens at brand and location level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Human-readable name. Not unique: two organizations may share a
    /// display name, which is why grouping keys by id.
    pub name: String,
    /// URL-safe unique identifier (e.g., `meridian-group`).
    pub slug: String,
    /// Invoice recipient for the whole organization.
    pub billing_email: String,
    /// Arbitrary key-value metadata.
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub slug: String,
    pub billing_email: String,
    pub metadata: Option<serde_json::Value>,
}

/// Fields that can be updated on an existing organization.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub billing_email: Option<String>,
    pub metadata: Option<serde_json::Value>,
}
