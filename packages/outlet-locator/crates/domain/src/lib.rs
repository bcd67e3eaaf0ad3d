pub mod entities;
pub mod error;
pub mod overlap;
pub mod ports;
pub mod prompt;

pub use entities::geo::{Distance, GeoPoint};
pub use entities::message::ChatMessage;
pub use entities::outlet::{Outlet, OutletSite, OutletSummary};
pub use error::{LocatorError, Result};
pub use overlap::{
    compute_overlaps, locate_all, overlapping_pairs, OverlapFlags, OverlapPair, OVERLAP_THRESHOLD,
    SERVICE_RADIUS,
};
