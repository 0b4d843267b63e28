//! SurrealDB implementation of [`LocationRepository`].

use barback_core::error::BarbackResult;
use barback_core::models::location::{CreateLocation, Location, UpdateLocation};
use barback_core::repository::{LocationRepository, PaginatedResult, Pagination};
use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct LocationRow {
    brand_id: String,
    name: String,
    slug: String,
    city: String,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LocationRow {
    fn into_location(self, id: Uuid) -> Result<Location, DbError> {
        let brand_id = Uuid::parse_str(&self.brand_id)
            .map_err(|e| DbError::Migration(format!("invalid brand UUID: {e}")))?;
        Ok(Location {
            id,
            brand_id,
            name: self.name,
            slug: self.slug,
            city: self.city,
            metadata: self.metadata,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct LocationRowWithId {
    record_id: String,
    brand_id: String,
    name: String,
    slug: String,
    city: String,
    metadata: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LocationRowWithId {
    fn try_into_location(self) -> Result<Location, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        let brand_id = Uuid::parse_str(&self.brand_id)
            .map_err(|e| DbError::Migration(format!("invalid brand UUID: {e}")))?;
        Ok(Location {
            id,
            brand_id,
            name: self.name,
            slug: self.slug,
            city: self.city,
            metadata: self.metadata,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the Location repository.
#[derive(Clone)]
pub struct SurrealLocationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealLocationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> LocationRepository for SurrealLocationRepository<C> {
    async fn create(&self, input: CreateLocation) -> BarbackResult<Location> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let brand_id_str = input.brand_id.to_string();
        let metadata = input
            .metadata
            .unwrap_or(serde_json::Value::Object(Default::default()));

        let result = self
            .db
            .query(
                "CREATE type::record('location', $id) SET \
                 brand_id = $brand_id, \
                 name = $name, slug = $slug, city = $city, \
                 metadata = $metadata",
            )
            .bind(("id", id_str.clone()))
            .bind(("brand_id", brand_id_str))
            .bind(("name", input.name))
            .bind(("slug", input.slug))
            .bind(("city", input.city))
            .bind(("metadata", metadata))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<LocationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "location".into(),
            id: id_str,
        })?;

        Ok(row.into_location(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> BarbackResult<Location> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('location', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LocationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "location".into(),
            id: id_str,
        })?;

        Ok(row.into_location(id)?)
    }

    async fn update(&self, id: Uuid, input: UpdateLocation) -> BarbackResult<Location> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.slug.is_some() {
            sets.push("slug = $slug");
        }
        if input.city.is_some() {
            sets.push("city = $city");
        }
        if input.metadata.is_some() {
            sets.push("metadata = $metadata");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('location', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(slug) = input.slug {
            builder = builder.bind(("slug", slug));
        }
        if let Some(city) = input.city {
            builder = builder.bind(("city", city));
        }
        if let Some(metadata) = input.metadata {
            builder = builder.bind(("metadata", metadata));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<LocationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "location".into(),
            id: id_str,
        })?;

        Ok(row.into_location(id)?)
    }

    async fn delete(&self, id: Uuid) -> BarbackResult<()> {
        self.db
            .query("DELETE type::record('location', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list_by_brand(
        &self,
        brand_id: Uuid,
        pagination: Pagination,
    ) -> BarbackResult<PaginatedResult<Location>> {
        let brand_id_str = brand_id.to_string();

        let mut count_result = self
            .db
            .query(
                "SELECT count() AS total FROM location \
                 WHERE brand_id = $brand_id GROUP ALL",
            )
            .bind(("brand_id", brand_id_str.clone()))
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM location \
                 WHERE brand_id = $brand_id \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("brand_id", brand_id_str))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<LocationRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_location())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
