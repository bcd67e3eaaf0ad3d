//! Service-radius overlap between outlets.
//!
//! Each outlet serves a fixed radius; two outlets overlap when their radii
//! intersect, i.e. their centers lie within twice the radius of each other.
//! The geodesic path here must agree with the repository's own
//! `ST_DWithin` predicate for the same threshold.

use crate::entities::geo::{Distance, GeoPoint};
use crate::entities::outlet::OutletSite;
use crate::error::{LocatorError, Result};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Radius each outlet is assumed to serve.
pub const SERVICE_RADIUS: Distance = Distance::from_meters(5_000.0);

/// Two service radii back to back: outlets closer than this overlap.
pub const OVERLAP_THRESHOLD: Distance = Distance::from_meters(10_000.0);

/// Above this many outlets the all-pairs loop is spread across threads.
pub const PARALLEL_THRESHOLD: usize = 512;

/// Outlet id to "has another outlet within the threshold".
pub type OverlapFlags = BTreeMap<i64, bool>;

/// Combined threshold for two outlets with the given radius each.
pub fn combined_threshold(radius: Distance) -> Distance {
    radius + radius
}

/// Pure-computation overlap: compares every ordered pair of distinct
/// outlets by geodesic distance.
///
/// O(n²) in the number of outlets. Fails on the first pair (in input
/// order) where either side has no coordinates.
pub fn compute_overlaps(sites: &[OutletSite], threshold: Distance) -> Result<OverlapFlags> {
    let located = locate_all(sites)?;
    Ok(flag_neighbours(&located, threshold))
}

fn flag_neighbours(located: &[(i64, GeoPoint)], threshold: Distance) -> OverlapFlags {
    if located.len() > PARALLEL_THRESHOLD {
        tracing::warn!(
            outlets = located.len(),
            pairs = located.len() * (located.len() - 1),
            "Geodesic overlap over a large outlet set, running all-pairs comparison in parallel"
        );
        return located
            .par_iter()
            .map(|(id, point)| (*id, has_neighbour(*id, point, located, threshold)))
            .collect();
    }

    located
        .iter()
        .map(|(id, point)| (*id, has_neighbour(*id, point, located, threshold)))
        .collect()
}

fn has_neighbour(id: i64, point: &GeoPoint, all: &[(i64, GeoPoint)], threshold: Distance) -> bool {
    all.iter()
        .filter(|(other_id, _)| *other_id != id)
        .any(|(_, other)| point.geodesic_distance(other) <= threshold)
}

/// Two distinct outlets whose service radii intersect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapPair {
    pub outlet_a: i64,
    pub outlet_b: i64,
    pub distance: Distance,
}

/// Every unordered overlapping pair, `outlet_a` before `outlet_b` in input order.
pub fn overlapping_pairs(sites: &[OutletSite], threshold: Distance) -> Result<Vec<OverlapPair>> {
    let located = locate_all(sites)?;

    let mut pairs = Vec::new();
    for (i, (a, point_a)) in located.iter().enumerate() {
        for (b, point_b) in &located[i + 1..] {
            if a == b {
                continue;
            }
            let distance = point_a.geodesic_distance(point_b);
            if distance <= threshold {
                pairs.push(OverlapPair {
                    outlet_a: *a,
                    outlet_b: *b,
                    distance,
                });
            }
        }
    }
    Ok(pairs)
}

/// Resolves every site to a point, reporting the first pair that cannot be compared.
///
/// Any overlap source must pass its sites through here, so an outlet without
/// coordinates fails the listing instead of coming back as non-overlapping.
pub fn locate_all(sites: &[OutletSite]) -> Result<Vec<(i64, GeoPoint)>> {
    let mut located = Vec::with_capacity(sites.len());

    for (idx, site) in sites.iter().enumerate() {
        match site.location {
            Some(point) => located.push((site.id, point)),
            None => {
                // A lone outlet has nothing to be compared against.
                let partner = sites
                    .iter()
                    .enumerate()
                    .find(|(other_idx, _)| *other_idx != idx)
                    .map(|(_, other)| other.id);

                if let Some(other) = partner {
                    return Err(LocatorError::OverlapComputation {
                        outlet: site.id,
                        other,
                        reason: format!("outlet {} has no coordinates", site.id),
                    });
                }
            }
        }
    }

    Ok(located)
}
