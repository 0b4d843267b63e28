//! The fully-resolved tenant context.

use barback_core::models::brand::Brand;
use barback_core::models::location::Location;
use barback_core::models::organization::Organization;
use barback_core::models::selection::SavedSelection;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ResolutionError;

/// The verified (organization, brand, location) triple everything else
/// in the backoffice scopes by.
///
/// Invariant: `brand.organization_id == organization.id` and
/// `location.brand_id == brand.id`. The fields are private and the only
/// constructor validates, so a context violating the invariant is never
/// observable. Contexts are created by the resolver, held by the
/// selection store, and replaced (never mutated) on re-selection.
#[derive(Debug, Clone, Serialize)]
pub struct TenantContext {
    organization: Organization,
    brand: Brand,
    location: Location,
}

impl TenantContext {
    /// Assemble a context from authoritative records, verifying the
    /// cross-reference invariant.
    pub(crate) fn try_new(
        organization: Organization,
        brand: Brand,
        location: Location,
    ) -> Result<Self, ResolutionError> {
        if brand.organization_id != organization.id {
            return Err(ResolutionError::Inconsistent {
                detail: format!(
                    "brand {} belongs to organization {}, not {}",
                    brand.id, brand.organization_id, organization.id,
                ),
            });
        }
        if location.brand_id != brand.id {
            return Err(ResolutionError::Inconsistent {
                detail: format!(
                    "location {} belongs to brand {}, not {}",
                    location.id, location.brand_id, brand.id,
                ),
            });
        }

        Ok(Self {
            organization,
            brand,
            location,
        })
    }

    pub fn organization(&self) -> &Organization {
        &self.organization
    }

    pub fn brand(&self) -> &Brand {
        &self.brand
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn organization_id(&self) -> Uuid {
        self.organization.id
    }

    pub fn brand_id(&self) -> Uuid {
        self.brand.id
    }

    pub fn location_id(&self) -> Uuid {
        self.location.id
    }

    /// The identifier triple persisted to session storage.
    pub fn saved_selection(&self) -> SavedSelection {
        SavedSelection {
            organization_id: self.organization.id,
            brand_id: self.brand.id,
            location_id: self.location.id,
        }
    }
}
