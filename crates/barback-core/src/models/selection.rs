//! Persisted selection identifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identifier triple persisted to durable session storage when a
/// selection commits.
///
/// Only identifiers are stored, never resolved records. A restored
/// session re-resolves these through the entity repositories, so entities
/// deleted or reassigned between sessions are caught instead of trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSelection {
    pub organization_id: Uuid,
    pub brand_id: Uuid,
    pub location_id: Uuid,
}
