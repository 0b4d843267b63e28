//! Entity resolution — directory summary to verified context.

use barback_core::models::directory::LocationSummary;
use barback_core::repository::{BrandRepository, LocationRepository, OrganizationRepository};
use tracing::debug;
use uuid::Uuid;

use crate::context::TenantContext;
use crate::error::ResolutionError;

/// Turns a [`LocationSummary`] into a verified [`TenantContext`].
///
/// Only the three identifiers of a summary are trusted; the full
/// organization, brand, and location records are fetched concurrently
/// from the authoritative repositories and cross-checked. Either all
/// three line up and a context is produced, or a typed error is returned
/// and nothing else happens. There is no partially-resolved output and
/// no internal retry.
pub struct EntityResolver<O, B, L> {
    organizations: O,
    brands: B,
    locations: L,
}

impl<O, B, L> EntityResolver<O, B, L>
where
    O: OrganizationRepository,
    B: BrandRepository,
    L: LocationRepository,
{
    pub fn new(organizations: O, brands: B, locations: L) -> Self {
        Self {
            organizations,
            brands,
            locations,
        }
    }

    /// Resolve a directory summary. Everything except the identifiers is
    /// ignored: display names in the summary are hints, not facts.
    pub async fn resolve(&self, summary: &LocationSummary) -> Result<TenantContext, ResolutionError> {
        self.resolve_ids(summary.organization_id, summary.brand_id, summary.id)
            .await
    }

    /// Resolve an identifier triple (also the restore path, where only
    /// persisted ids exist).
    pub async fn resolve_ids(
        &self,
        organization_id: Uuid,
        brand_id: Uuid,
        location_id: Uuid,
    ) -> Result<TenantContext, ResolutionError> {
        require_id("organization", organization_id)?;
        require_id("brand", brand_id)?;
        require_id("location", location_id)?;

        debug!(
            organization = %organization_id,
            brand = %brand_id,
            location = %location_id,
            "Resolving tenant context"
        );

        // The three fetches are independent; none may depend on
        // another's result.
        let (organization, brand, location) = tokio::join!(
            self.organizations.get_by_id(organization_id),
            self.brands.get_by_id(brand_id),
            self.locations.get_by_id(location_id),
        );

        let organization = organization?;
        let brand = brand?;
        let location = location?;

        TenantContext::try_new(organization, brand, location)
    }
}

/// A nil UUID cannot identify a record; reject it before fetching.
fn require_id(entity: &str, id: Uuid) -> Result<(), ResolutionError> {
    if id.is_nil() {
        return Err(ResolutionError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        });
    }
    Ok(())
}
