//! SurrealDB implementation of [`SelectionStorage`].
//!
//! One `saved_selection` record per backoffice session, keyed by the
//! session key supplied at construction. The record is upserted on every
//! commit, so the stored triple always reflects the latest committed
//! selection.

use barback_core::error::BarbackResult;
use barback_core::models::selection::SavedSelection;
use barback_core::repository::SelectionStorage;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct SavedSelectionRow {
    organization_id: String,
    brand_id: String,
    location_id: String,
}

impl SavedSelectionRow {
    fn try_into_selection(self) -> Result<SavedSelection, DbError> {
        let parse = |raw: &str, field: &str| {
            Uuid::parse_str(raw)
                .map_err(|e| DbError::Migration(format!("invalid {field} UUID: {e}")))
        };
        Ok(SavedSelection {
            organization_id: parse(&self.organization_id, "organization")?,
            brand_id: parse(&self.brand_id, "brand")?,
            location_id: parse(&self.location_id, "location")?,
        })
    }
}

/// SurrealDB-backed durable session storage for the active selection.
#[derive(Clone)]
pub struct SurrealSelectionStorage<C: Connection> {
    db: Surreal<C>,
    session_key: String,
}

impl<C: Connection> SurrealSelectionStorage<C> {
    /// `session_key` identifies the backoffice session (typically the
    /// caller's subject); each session owns exactly one record.
    pub fn new(db: Surreal<C>, session_key: impl Into<String>) -> Self {
        Self {
            db,
            session_key: session_key.into(),
        }
    }
}

impl<C: Connection> SelectionStorage for SurrealSelectionStorage<C> {
    async fn persist(&self, selection: SavedSelection) -> BarbackResult<()> {
        self.db
            .query(
                "UPSERT type::record('saved_selection', $key) SET \
                 organization_id = $org_id, brand_id = $brand_id, \
                 location_id = $location_id, updated_at = time::now()",
            )
            .bind(("key", self.session_key.clone()))
            .bind(("org_id", selection.organization_id.to_string()))
            .bind(("brand_id", selection.brand_id.to_string()))
            .bind(("location_id", selection.location_id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        Ok(())
    }

    async fn load(&self) -> BarbackResult<Option<SavedSelection>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('saved_selection', $key)")
            .bind(("key", self.session_key.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SavedSelectionRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_selection()?)),
            None => Ok(None),
        }
    }

    async fn clear(&self) -> BarbackResult<()> {
        self.db
            .query("DELETE type::record('saved_selection', $key)")
            .bind(("key", self.session_key.clone()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
