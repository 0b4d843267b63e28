//! SurrealDB implementation of [`DirectoryService`].
//!
//! The directory is a read-model: one round-trip fetches locations,
//! brands, and organizations, and the denormalized summaries are
//! assembled here. Summary order is location creation order, which is
//! the stable directory order auto-selection depends on.

use std::collections::HashMap;

use barback_core::error::BarbackResult;
use barback_core::models::directory::LocationSummary;
use barback_core::models::identity::CallerIdentity;
use barback_core::repository::DirectoryService;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct LocationEntry {
    record_id: String,
    brand_id: String,
    name: String,
    slug: String,
    city: String,
    // Projected so ORDER BY can sort on it.
    #[allow(dead_code)]
    created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, SurrealValue)]
struct BrandEntry {
    record_id: String,
    organization_id: String,
    name: String,
}

#[derive(Debug, SurrealValue)]
struct OrganizationEntry {
    record_id: String,
    name: String,
}

/// SurrealDB implementation of the directory listing.
#[derive(Clone)]
pub struct SurrealDirectoryService<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDirectoryService<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> DirectoryService for SurrealDirectoryService<C> {
    async fn list_locations(
        &self,
        caller: &CallerIdentity,
    ) -> BarbackResult<Vec<LocationSummary>> {
        debug!(subject = %caller.subject, "Listing directory");

        // Access filtering happens upstream in the identity layer; the
        // directory returns every location the deployment holds.
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, brand_id, name, slug, city, \
                 created_at FROM location ORDER BY created_at ASC;\
                 SELECT meta::id(id) AS record_id, organization_id, name \
                 FROM brand;\
                 SELECT meta::id(id) AS record_id, name FROM organization;",
            )
            .await
            .map_err(DbError::from)?;

        let locations: Vec<LocationEntry> = result.take(0).map_err(DbError::from)?;
        let brands: Vec<BrandEntry> = result.take(1).map_err(DbError::from)?;
        let organizations: Vec<OrganizationEntry> = result.take(2).map_err(DbError::from)?;

        let brands: HashMap<String, BrandEntry> = brands
            .into_iter()
            .map(|b| (b.record_id.clone(), b))
            .collect();
        let organizations: HashMap<String, OrganizationEntry> = organizations
            .into_iter()
            .map(|o| (o.record_id.clone(), o))
            .collect();

        let mut summaries = Vec::with_capacity(locations.len());
        for location in locations {
            // A dangling reference means the hierarchy changed mid-listing;
            // the directory never invents display names for such rows.
            let Some(brand) = brands.get(&location.brand_id) else {
                warn!(
                    location = %location.record_id,
                    brand = %location.brand_id,
                    "Skipping directory row with missing brand"
                );
                continue;
            };
            let Some(organization) = organizations.get(&brand.organization_id) else {
                warn!(
                    location = %location.record_id,
                    organization = %brand.organization_id,
                    "Skipping directory row with missing organization"
                );
                continue;
            };

            summaries.push(LocationSummary {
                id: parse_id(&location.record_id, "location")?,
                name: location.name,
                slug: location.slug,
                city: location.city,
                brand_id: parse_id(&brand.record_id, "brand")?,
                brand_name: brand.name.clone(),
                organization_id: parse_id(&organization.record_id, "organization")?,
                organization_name: organization.name.clone(),
            });
        }

        Ok(summaries)
    }
}

fn parse_id(raw: &str, entity: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Migration(format!("invalid {entity} UUID: {e}")))
}
