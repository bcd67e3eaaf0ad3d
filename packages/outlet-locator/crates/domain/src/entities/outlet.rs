use super::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A retail outlet as read from the repository. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlet {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub telephone: Option<String>,
    #[serde(flatten)]
    pub location: GeoPoint,
    pub categories: Vec<String>,
}

/// Narrow projection used for overlap computation.
///
/// `location` is `None` when the repository row has no coordinates; the
/// overlap engine reports such outlets instead of skipping them.
#[derive(Debug, Clone, PartialEq)]
pub struct OutletSite {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub location: Option<GeoPoint>,
}

/// The slice of an outlet that goes into a semantic-mode prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutletSummary {
    pub name: String,
    pub address: String,
}

impl From<&Outlet> for OutletSite {
    fn from(outlet: &Outlet) -> Self {
        Self {
            id: outlet.id,
            name: outlet.name.clone(),
            address: outlet.address.clone(),
            location: Some(outlet.location),
        }
    }
}
