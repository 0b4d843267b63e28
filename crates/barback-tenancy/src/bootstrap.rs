//! Session bootstrap — deciding the initial context with no user
//! interaction yet.

use std::sync::Arc;

use barback_core::models::identity::CallerIdentity;
use barback_core::repository::{
    BrandRepository, DirectoryService, LocationRepository, OrganizationRepository,
    SelectionStorage,
};
use tracing::{info, warn};

use crate::context::TenantContext;
use crate::error::ResolutionError;
use crate::store::SelectionStore;

/// Bootstrap state machine:
/// `Uninitialized → Loading → {Restored, AutoSelected, Onboarding, Failed}`.
///
/// Exactly one terminal outcome per attempt. `Restored` and
/// `AutoSelected` are mutually exclusive; restore is checked first.
/// `Failed` is the only re-enterable terminal state.
#[derive(Debug)]
pub enum BootstrapState {
    Uninitialized,
    Loading,
    /// A previously persisted selection re-resolved successfully.
    Restored(Arc<TenantContext>),
    /// No persisted selection; the first location in directory order was
    /// selected.
    AutoSelected(Arc<TenantContext>),
    /// The directory is empty; a first location must be created
    /// out-of-band. No context exists.
    Onboarding,
    /// Directory fetch or restore failed. Retryable: `run` may be
    /// called again.
    Failed(ResolutionError),
}

impl BootstrapState {
    /// Whether `run` may (re-)enter the loading transition from here.
    fn can_run(&self) -> bool {
        matches!(self, BootstrapState::Uninitialized | BootstrapState::Failed(_))
    }
}

/// Drives one bootstrap attempt for a fresh session.
pub struct SessionBootstrap<D> {
    directory: D,
    state: BootstrapState,
}

impl<D: DirectoryService> SessionBootstrap<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            state: BootstrapState::Uninitialized,
        }
    }

    pub fn state(&self) -> &BootstrapState {
        &self.state
    }

    /// Run one bootstrap attempt against the session's store.
    ///
    /// The directory fetch and the restore attempt run concurrently.
    /// Outcome priority:
    /// 1. a successful restore wins outright;
    /// 2. otherwise an empty directory means onboarding;
    /// 3. otherwise the first location in directory order is selected.
    ///
    /// Any restore or directory failure lands in [`BootstrapState::Failed`],
    /// from which `run` may be called again. Calling `run` on an
    /// already-successful terminal state leaves it untouched.
    pub async fn run<O, B, L, S>(
        &mut self,
        caller: &CallerIdentity,
        store: &SelectionStore<O, B, L, S>,
    ) -> &BootstrapState
    where
        O: OrganizationRepository,
        B: BrandRepository,
        L: LocationRepository,
        S: SelectionStorage,
    {
        if !self.state.can_run() {
            return &self.state;
        }
        self.state = BootstrapState::Loading;

        let (directory, restored) =
            tokio::join!(self.directory.list_locations(caller), store.restore());

        // 1. A restored context takes priority over everything else:
        //    with a persisted selection present, auto-selection must
        //    never fire.
        self.state = match restored {
            Ok(Some(context)) => {
                info!(location = %context.location_id(), "Bootstrap restored persisted selection");
                BootstrapState::Restored(context)
            }
            Ok(None) => match directory {
                Err(err) => {
                    warn!(error = %err, "Bootstrap directory fetch failed");
                    BootstrapState::Failed(ResolutionError::from(err))
                }
                Ok(summaries) if summaries.is_empty() => {
                    info!("Bootstrap found an empty directory, entering onboarding");
                    BootstrapState::Onboarding
                }
                // 2. Deterministic default: the first location in
                //    directory order. Display grouping never reorders
                //    the underlying list, so this is stable.
                Ok(summaries) => match store.select(&summaries[0]).await {
                    Ok(context) => {
                        info!(location = %context.location_id(), "Bootstrap auto-selected first location");
                        BootstrapState::AutoSelected(context)
                    }
                    Err(err) => {
                        warn!(error = %err, "Bootstrap auto-selection failed");
                        BootstrapState::Failed(err)
                    }
                },
            },
            Err(err) => {
                warn!(error = %err, "Bootstrap restore failed");
                BootstrapState::Failed(err)
            }
        };

        &self.state
    }
}
