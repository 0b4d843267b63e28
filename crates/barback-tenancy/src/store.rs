//! The session's selection store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use barback_core::models::directory::LocationSummary;
use barback_core::repository::{
    BrandRepository, LocationRepository, OrganizationRepository, SelectionStorage,
};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::context::TenantContext;
use crate::error::ResolutionError;
use crate::resolver::EntityResolver;

/// Holds the single authoritative [`TenantContext`] for a session and
/// mediates every transition into and out of it.
///
/// Owned by the session. Independent stores share nothing, so parallel
/// sessions (and parallel tests) cannot interfere. There is exactly one
/// writer path: a resolution commits only while its sequence token is
/// still the latest issued, so of several in-flight selections the
/// most recently requested one wins regardless of completion order.
/// Superseded resolutions are discarded on arrival; their transport
/// work is not aborted.
pub struct SelectionStore<O, B, L, S> {
    resolver: EntityResolver<O, B, L>,
    storage: S,
    issued: AtomicU64,
    /// Serializes commits so storage and notifications observe commit
    /// order; the token check is re-evaluated under this lock.
    commit_gate: Mutex<()>,
    tx: watch::Sender<Option<Arc<TenantContext>>>,
}

impl<O, B, L, S> SelectionStore<O, B, L, S>
where
    O: OrganizationRepository,
    B: BrandRepository,
    L: LocationRepository,
    S: SelectionStorage,
{
    pub fn new(resolver: EntityResolver<O, B, L>, storage: S) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            resolver,
            storage,
            issued: AtomicU64::new(0),
            commit_gate: Mutex::new(()),
            tx,
        }
    }

    /// The currently active context, if any. Never suspends.
    pub fn current(&self) -> Option<Arc<TenantContext>> {
        self.tx.borrow().clone()
    }

    /// Observe context changes. The receiver sees exactly one update per
    /// committed change, and none for a failed or superseded
    /// resolution.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<TenantContext>>> {
        self.tx.subscribe()
    }

    /// Resolve a directory summary and, if it is still the latest
    /// request when resolution completes, commit it as the active
    /// context and persist its identifiers.
    ///
    /// On any failure the previous context stays active; there is no
    /// fallback to a stale or default context. A [`ResolutionError::Superseded`]
    /// result means a newer selection won; callers must swallow it
    /// rather than surface an error.
    pub async fn select(
        &self,
        summary: &LocationSummary,
    ) -> Result<Arc<TenantContext>, ResolutionError> {
        let token = self.issue_token();
        debug!(location = %summary.id, token, "Selection requested");

        match self.resolver.resolve(summary).await {
            Ok(context) => self.commit(token, context).await,
            Err(err) => {
                debug!(location = %summary.id, error = %err, "Selection failed to resolve");
                Err(err)
            }
        }
    }

    /// Re-resolve and adopt the selection persisted by a previous
    /// session, if one exists.
    ///
    /// Persisted identifiers are never trusted verbatim: they go through
    /// the full resolver, so entities deleted or reassigned since the
    /// last session surface here. A stale selection is cleared from
    /// storage and reported as "nothing to restore"; transport failures
    /// propagate and leave the stored selection in place.
    pub async fn restore(&self) -> Result<Option<Arc<TenantContext>>, ResolutionError> {
        let saved = match self.storage.load().await {
            Ok(Some(saved)) => saved,
            Ok(None) => return Ok(None),
            Err(err) => return Err(ResolutionError::from(err)),
        };

        let token = self.issue_token();
        let resolved = self
            .resolver
            .resolve_ids(saved.organization_id, saved.brand_id, saved.location_id)
            .await;

        match resolved {
            Ok(context) => match self.commit(token, context).await {
                Ok(context) => Ok(Some(context)),
                // A user selection raced the restore and won.
                Err(ResolutionError::Superseded) => Ok(None),
                Err(other) => Err(other),
            },
            Err(
                err @ (ResolutionError::NotFound { .. } | ResolutionError::Inconsistent { .. }),
            ) => {
                info!(error = %err, "Persisted selection is stale, clearing it");
                if let Err(clear_err) = self.storage.clear().await {
                    warn!(error = %clear_err, "Failed to clear stale persisted selection");
                }
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn issue_token(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn commit(
        &self,
        token: u64,
        context: TenantContext,
    ) -> Result<Arc<TenantContext>, ResolutionError> {
        let _gate = self.commit_gate.lock().await;

        let latest = self.issued.load(Ordering::SeqCst);
        if token != latest {
            debug!(token, latest, "Discarding stale resolution");
            return Err(ResolutionError::Superseded);
        }

        let context = Arc::new(context);

        // The context is fully verified at this point; a persistence
        // failure costs reload survival, not the session's selection.
        if let Err(err) = self.storage.persist(context.saved_selection()).await {
            warn!(error = %err, "Failed to persist selection identifiers");
        }

        self.tx.send_replace(Some(context.clone()));
        info!(
            organization = %context.organization_id(),
            brand = %context.brand_id(),
            location = %context.location_id(),
            "Committed tenant context"
        );

        Ok(context)
    }
}
