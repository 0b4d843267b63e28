//! In-memory fixtures for selection-store and bootstrap tests.
//!
//! `FakeHierarchy` implements the three entity repositories over shared
//! HashMaps, with per-location gates so tests can decide the order in
//! which concurrent fetches complete, and per-location failure
//! injection for transport errors.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use barback_core::error::{BarbackError, BarbackResult};
use barback_core::models::brand::{Brand, CreateBrand, UpdateBrand};
use barback_core::models::directory::LocationSummary;
use barback_core::models::identity::CallerIdentity;
use barback_core::models::location::{CreateLocation, Location, UpdateLocation};
use barback_core::models::organization::{CreateOrganization, Organization, UpdateOrganization};
use barback_core::models::selection::SavedSelection;
use barback_core::repository::{
    BrandRepository, DirectoryService, LocationRepository, OrganizationRepository,
    PaginatedResult, Pagination, SelectionStorage,
};
use chrono::Utc;
use tokio::sync::{Notify, watch};
use uuid::Uuid;

fn not_found(entity: &str, id: Uuid) -> BarbackError {
    BarbackError::NotFound {
        entity: entity.into(),
        id: id.to_string(),
    }
}

fn transport(detail: &str) -> BarbackError {
    BarbackError::Database(detail.into())
}

// -----------------------------------------------------------------------
// Entity builders
// -----------------------------------------------------------------------

pub fn organization(name: &str) -> Organization {
    let slug = name.to_lowercase().replace(' ', "-");
    Organization {
        id: Uuid::new_v4(),
        name: name.into(),
        billing_email: format!("billing@{slug}.test"),
        slug,
        metadata: serde_json::json!({}),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn brand(org: &Organization, name: &str) -> Brand {
    Brand {
        id: Uuid::new_v4(),
        organization_id: org.id,
        name: name.into(),
        slug: name.to_lowercase().replace(' ', "-"),
        metadata: serde_json::json!({}),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn location(brand: &Brand, name: &str, city: &str) -> Location {
    Location {
        id: Uuid::new_v4(),
        brand_id: brand.id,
        name: name.into(),
        slug: name.to_lowercase().replace(' ', "-"),
        city: city.into(),
        metadata: serde_json::json!({}),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A directory summary whose identifiers point at the given records.
pub fn summary(org: &Organization, brand: &Brand, location: &Location) -> LocationSummary {
    LocationSummary {
        id: location.id,
        name: location.name.clone(),
        slug: location.slug.clone(),
        city: location.city.clone(),
        brand_id: brand.id,
        brand_name: brand.name.clone(),
        organization_id: org.id,
        organization_name: org.name.clone(),
    }
}

// -----------------------------------------------------------------------
// Gate — lets a test hold a location fetch open until released
// -----------------------------------------------------------------------

pub struct Gate {
    entered: watch::Sender<bool>,
    release: Notify,
}

impl Gate {
    fn new() -> Arc<Self> {
        let (entered, _) = watch::channel(false);
        Arc::new(Self {
            entered,
            release: Notify::new(),
        })
    }

    /// Wait until a fetch has reached this gate.
    pub async fn entered(&self) {
        let mut rx = self.entered.subscribe();
        rx.wait_for(|v| *v).await.expect("gate sender dropped");
    }

    /// Let the held fetch proceed.
    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn pass(&self) {
        self.entered.send_replace(true);
        self.release.notified().await;
    }
}

// -----------------------------------------------------------------------
// FakeHierarchy — the three entity repositories over shared maps
// -----------------------------------------------------------------------

#[derive(Default)]
struct HierarchyInner {
    organizations: Mutex<HashMap<Uuid, Organization>>,
    brands: Mutex<HashMap<Uuid, Brand>>,
    locations: Mutex<HashMap<Uuid, Location>>,
    location_gates: Mutex<HashMap<Uuid, Arc<Gate>>>,
    failing_locations: Mutex<HashSet<Uuid>>,
}

#[derive(Clone, Default)]
pub struct FakeHierarchy {
    inner: Arc<HierarchyInner>,
}

impl FakeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_organization(&self, org: Organization) {
        self.inner
            .organizations
            .lock()
            .unwrap()
            .insert(org.id, org);
    }

    pub fn insert_brand(&self, brand: Brand) {
        self.inner.brands.lock().unwrap().insert(brand.id, brand);
    }

    pub fn insert_location(&self, location: Location) {
        self.inner
            .locations
            .lock()
            .unwrap()
            .insert(location.id, location);
    }

    pub fn remove_location(&self, id: Uuid) {
        self.inner.locations.lock().unwrap().remove(&id);
    }

    /// Hold the next fetch of this location open until the gate is
    /// released.
    pub fn gate_location(&self, id: Uuid) -> Arc<Gate> {
        let gate = Gate::new();
        self.inner
            .location_gates
            .lock()
            .unwrap()
            .insert(id, gate.clone());
        gate
    }

    /// Make fetches of this location fail with a transport error.
    pub fn fail_location(&self, id: Uuid) {
        self.inner.failing_locations.lock().unwrap().insert(id);
    }

    pub fn heal_location(&self, id: Uuid) {
        self.inner.failing_locations.lock().unwrap().remove(&id);
    }
}

impl OrganizationRepository for FakeHierarchy {
    async fn create(&self, input: CreateOrganization) -> BarbackResult<Organization> {
        let org = Organization {
            id: Uuid::new_v4(),
            name: input.name,
            slug: input.slug,
            billing_email: input.billing_email,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_organization(org.clone());
        Ok(org)
    }

    async fn get_by_id(&self, id: Uuid) -> BarbackResult<Organization> {
        self.inner
            .organizations
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("organization", id))
    }

    async fn get_by_slug(&self, slug: &str) -> BarbackResult<Organization> {
        self.inner
            .organizations
            .lock()
            .unwrap()
            .values()
            .find(|o| o.slug == slug)
            .cloned()
            .ok_or_else(|| BarbackError::NotFound {
                entity: "organization".into(),
                id: format!("slug={slug}"),
            })
    }

    async fn update(&self, id: Uuid, input: UpdateOrganization) -> BarbackResult<Organization> {
        let mut orgs = self.inner.organizations.lock().unwrap();
        let org = orgs.get_mut(&id).ok_or_else(|| not_found("organization", id))?;
        if let Some(name) = input.name {
            org.name = name;
        }
        if let Some(slug) = input.slug {
            org.slug = slug;
        }
        if let Some(billing_email) = input.billing_email {
            org.billing_email = billing_email;
        }
        if let Some(metadata) = input.metadata {
            org.metadata = metadata;
        }
        org.updated_at = Utc::now();
        Ok(org.clone())
    }

    async fn delete(&self, id: Uuid) -> BarbackResult<()> {
        self.inner.organizations.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> BarbackResult<PaginatedResult<Organization>> {
        let mut items: Vec<Organization> = self
            .inner
            .organizations
            .lock()
            .unwrap()
            .values()
            .cloned()
            .collect();
        items.sort_by_key(|o| o.created_at);
        Ok(paginate(items, pagination))
    }
}

impl BrandRepository for FakeHierarchy {
    async fn create(&self, input: CreateBrand) -> BarbackResult<Brand> {
        let brand = Brand {
            id: Uuid::new_v4(),
            organization_id: input.organization_id,
            name: input.name,
            slug: input.slug,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_brand(brand.clone());
        Ok(brand)
    }

    async fn get_by_id(&self, id: Uuid) -> BarbackResult<Brand> {
        self.inner
            .brands
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("brand", id))
    }

    async fn update(&self, id: Uuid, input: UpdateBrand) -> BarbackResult<Brand> {
        let mut brands = self.inner.brands.lock().unwrap();
        let brand = brands.get_mut(&id).ok_or_else(|| not_found("brand", id))?;
        if let Some(name) = input.name {
            brand.name = name;
        }
        if let Some(slug) = input.slug {
            brand.slug = slug;
        }
        if let Some(metadata) = input.metadata {
            brand.metadata = metadata;
        }
        brand.updated_at = Utc::now();
        Ok(brand.clone())
    }

    async fn delete(&self, id: Uuid) -> BarbackResult<()> {
        self.inner.brands.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn list_by_organization(
        &self,
        organization_id: Uuid,
        pagination: Pagination,
    ) -> BarbackResult<PaginatedResult<Brand>> {
        let mut items: Vec<Brand> = self
            .inner
            .brands
            .lock()
            .unwrap()
            .values()
            .filter(|b| b.organization_id == organization_id)
            .cloned()
            .collect();
        items.sort_by_key(|b| b.created_at);
        Ok(paginate(items, pagination))
    }
}

impl LocationRepository for FakeHierarchy {
    async fn create(&self, input: CreateLocation) -> BarbackResult<Location> {
        let location = Location {
            id: Uuid::new_v4(),
            brand_id: input.brand_id,
            name: input.name,
            slug: input.slug,
            city: input.city,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.insert_location(location.clone());
        Ok(location)
    }

    async fn get_by_id(&self, id: Uuid) -> BarbackResult<Location> {
        // Honor a registered gate first so tests control completion
        // order of concurrent resolutions.
        let gate = self.inner.location_gates.lock().unwrap().remove(&id);
        if let Some(gate) = gate {
            gate.pass().await;
        }

        if self.inner.failing_locations.lock().unwrap().contains(&id) {
            return Err(transport("injected location fetch failure"));
        }

        self.inner
            .locations
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("location", id))
    }

    async fn update(&self, id: Uuid, input: UpdateLocation) -> BarbackResult<Location> {
        let mut locations = self.inner.locations.lock().unwrap();
        let location = locations
            .get_mut(&id)
            .ok_or_else(|| not_found("location", id))?;
        if let Some(name) = input.name {
            location.name = name;
        }
        if let Some(slug) = input.slug {
            location.slug = slug;
        }
        if let Some(city) = input.city {
            location.city = city;
        }
        if let Some(metadata) = input.metadata {
            location.metadata = metadata;
        }
        location.updated_at = Utc::now();
        Ok(location.clone())
    }

    async fn delete(&self, id: Uuid) -> BarbackResult<()> {
        self.inner.locations.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn list_by_brand(
        &self,
        brand_id: Uuid,
        pagination: Pagination,
    ) -> BarbackResult<PaginatedResult<Location>> {
        let mut items: Vec<Location> = self
            .inner
            .locations
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.brand_id == brand_id)
            .cloned()
            .collect();
        items.sort_by_key(|l| l.created_at);
        Ok(paginate(items, pagination))
    }
}

fn paginate<T>(items: Vec<T>, pagination: Pagination) -> PaginatedResult<T> {
    let total = items.len() as u64;
    let items = items
        .into_iter()
        .skip(pagination.offset as usize)
        .take(pagination.limit as usize)
        .collect();
    PaginatedResult {
        items,
        total,
        offset: pagination.offset,
        limit: pagination.limit,
    }
}

// -----------------------------------------------------------------------
// FakeDirectory
// -----------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct FakeDirectory {
    summaries: Arc<Mutex<Vec<LocationSummary>>>,
    failing: Arc<AtomicBool>,
}

impl FakeDirectory {
    pub fn new(summaries: Vec<LocationSummary>) -> Self {
        Self {
            summaries: Arc::new(Mutex::new(summaries)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl DirectoryService for FakeDirectory {
    async fn list_locations(
        &self,
        _caller: &CallerIdentity,
    ) -> BarbackResult<Vec<LocationSummary>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(transport("directory offline"));
        }
        Ok(self.summaries.lock().unwrap().clone())
    }
}

// -----------------------------------------------------------------------
// FakeStorage
// -----------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct FakeStorage {
    saved: Arc<Mutex<Option<SavedSelection>>>,
    fail_persist: Arc<AtomicBool>,
    fail_load: Arc<AtomicBool>,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saved(selection: SavedSelection) -> Self {
        let storage = Self::default();
        *storage.saved.lock().unwrap() = Some(selection);
        storage
    }

    pub fn saved(&self) -> Option<SavedSelection> {
        *self.saved.lock().unwrap()
    }

    pub fn set_fail_persist(&self, failing: bool) {
        self.fail_persist.store(failing, Ordering::SeqCst);
    }

    pub fn set_fail_load(&self, failing: bool) {
        self.fail_load.store(failing, Ordering::SeqCst);
    }
}

impl SelectionStorage for FakeStorage {
    async fn persist(&self, selection: SavedSelection) -> BarbackResult<()> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(transport("session storage write failed"));
        }
        *self.saved.lock().unwrap() = Some(selection);
        Ok(())
    }

    async fn load(&self) -> BarbackResult<Option<SavedSelection>> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(transport("session storage read failed"));
        }
        Ok(*self.saved.lock().unwrap())
    }

    async fn clear(&self) -> BarbackResult<()> {
        *self.saved.lock().unwrap() = None;
        Ok(())
    }
}
