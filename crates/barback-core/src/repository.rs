//! Repository and collaborator trait definitions for data access
//! abstraction.
//!
//! All operations are async. The resolution core in `barback-tenancy` is
//! generic over these traits and never touches a concrete backend.

use uuid::Uuid;

use crate::error::BarbackResult;
use crate::models::{
    brand::{Brand, CreateBrand, UpdateBrand},
    directory::LocationSummary,
    identity::CallerIdentity,
    location::{CreateLocation, Location, UpdateLocation},
    organization::{CreateOrganization, Organization, UpdateOrganization},
    selection::SavedSelection,
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Entity repositories
// ---------------------------------------------------------------------------

pub trait OrganizationRepository: Send + Sync {
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = BarbackResult<Organization>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = BarbackResult<Organization>> + Send;
    fn get_by_slug(&self, slug: &str) -> impl Future<Output = BarbackResult<Organization>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateOrganization,
    ) -> impl Future<Output = BarbackResult<Organization>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = BarbackResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = BarbackResult<PaginatedResult<Organization>>> + Send;
}

pub trait BrandRepository: Send + Sync {
    fn create(&self, input: CreateBrand) -> impl Future<Output = BarbackResult<Brand>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = BarbackResult<Brand>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateBrand,
    ) -> impl Future<Output = BarbackResult<Brand>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = BarbackResult<()>> + Send;
    fn list_by_organization(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = BarbackResult<PaginatedResult<Brand>>> + Send;
}

pub trait LocationRepository: Send + Sync {
    fn create(&self, input: CreateLocation)
    -> impl Future<Output = BarbackResult<Location>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = BarbackResult<Location>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateLocation,
    ) -> impl Future<Output = BarbackResult<Location>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = BarbackResult<()>> + Send;
    fn list_by_brand(
        &self,
        brand_id: Uuid,
        pagination: Pagination,
    ) -> impl Future<Output = BarbackResult<PaginatedResult<Location>>> + Send;
}

// ---------------------------------------------------------------------------
// Directory (read-model)
// ---------------------------------------------------------------------------

/// Flat listing of every location the caller may operate.
///
/// Returned summaries carry denormalized brand/organization names for
/// display without a join; the resolver treats everything except the
/// identifiers as untrusted. The list order is the stable directory
/// order (creation order) that auto-selection depends on. Access
/// filtering is enforced upstream by the identity layer that produced
/// the [`CallerIdentity`].
pub trait DirectoryService: Send + Sync {
    fn list_locations(
        &self,
        caller: &CallerIdentity,
    ) -> impl Future<Output = BarbackResult<Vec<LocationSummary>>> + Send;
}

// ---------------------------------------------------------------------------
// Durable session storage
// ---------------------------------------------------------------------------

/// Durable storage for the active selection's identifiers.
///
/// One instance per session; any backend with read-your-write
/// consistency within a session is sufficient.
pub trait SelectionStorage: Send + Sync {
    fn persist(&self, selection: SavedSelection) -> impl Future<Output = BarbackResult<()>> + Send;
    fn load(&self) -> impl Future<Output = BarbackResult<Option<SavedSelection>>> + Send;
    fn clear(&self) -> impl Future<Output = BarbackResult<()>> + Send;
}
