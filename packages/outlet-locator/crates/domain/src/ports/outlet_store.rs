use crate::entities::geo::Distance;
use crate::entities::outlet::{Outlet, OutletSite};
use crate::error::Result;
use crate::overlap::OverlapFlags;

/// Read-only access to the outlet repository.
///
/// Implementations acquire a connection per call and release it on every
/// exit path.
#[async_trait::async_trait]
pub trait OutletStore: Send + Sync {
    /// Every outlet with the full projection.
    async fn fetch_all_outlets(&self) -> Result<Vec<Outlet>>;

    /// Every outlet without categories or telephone, for overlap work.
    async fn fetch_outlet_sites(&self) -> Result<Vec<OutletSite>>;

    /// Overlap flags computed by the repository's own geospatial predicate.
    async fn fetch_overlap_flags(&self, threshold: Distance) -> Result<OverlapFlags>;
}
