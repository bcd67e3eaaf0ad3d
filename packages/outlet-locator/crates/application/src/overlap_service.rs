use domain::ports::OutletStore;
use domain::{compute_overlaps, locate_all, Distance, OutletSite, Result, OVERLAP_THRESHOLD};
use serde::Serialize;
use std::sync::Arc;

/// Which algorithm produces the overlap flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapMode {
    /// The repository's `ST_DWithin` predicate.
    ServerPredicate,
    /// All-pairs geodesic comparison in process.
    Geodesic,
}

/// One row of an outlet listing annotated with its overlap flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutletOverlap {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub intersects_5km: bool,
}

impl OutletOverlap {
    fn new(site: OutletSite, intersects_5km: bool) -> Self {
        Self {
            id: site.id,
            latitude: site.location.map(|p| p.latitude()),
            longitude: site.location.map(|p| p.longitude()),
            name: site.name,
            address: site.address,
            intersects_5km,
        }
    }
}

/// Outlet listings with freshly computed overlap flags. Nothing is cached.
pub struct OverlapService {
    store: Arc<dyn OutletStore>,
    threshold: Distance,
}

impl OverlapService {
    pub fn new(store: Arc<dyn OutletStore>) -> Self {
        Self::with_threshold(store, OVERLAP_THRESHOLD)
    }

    pub fn with_threshold(store: Arc<dyn OutletStore>, threshold: Distance) -> Self {
        Self { store, threshold }
    }

    pub async fn list_outlets(&self, mode: OverlapMode) -> Result<Vec<OutletOverlap>> {
        let sites = self.store.fetch_outlet_sites().await?;

        let flags = match mode {
            OverlapMode::ServerPredicate => {
                // ST_DWithin on a NULL geom is false; report it like the geodesic path does.
                locate_all(&sites)?;
                self.store.fetch_overlap_flags(self.threshold).await?
            }
            OverlapMode::Geodesic => compute_overlaps(&sites, self.threshold)?,
        };

        tracing::debug!(
            outlets = sites.len(),
            overlapping = flags.values().filter(|f| **f).count(),
            ?mode,
            "Computed outlet overlaps"
        );

        // An outlet inserted between the two repository reads has no flag yet.
        Ok(sites
            .into_iter()
            .map(|site| {
                let flag = flags.get(&site.id).copied().unwrap_or(false);
                OutletOverlap::new(site, flag)
            })
            .collect())
    }
}
