//! Clients for the two PAGIS ArcGIS REST services.

mod locator;
mod parcels;

pub use locator::{Candidate, Locator};
pub use parcels::{build_where_clause, Feature, ParcelService};

use thiserror::Error;

/// Failure of a single geocoding request. All variants are recovered
/// per-row by the pipeline; none abort the run.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("no candidates returned")]
    NoCandidates,
    #[error("feature has no boundary ring")]
    NoGeometry,
    #[error(transparent)]
    Geometry(#[from] crate::geometry::GeometryError),
    #[error("service resolved to the origin sentinel")]
    OriginSentinel,
}
