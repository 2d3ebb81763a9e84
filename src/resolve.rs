//! Resolution dispatch: route a classified address to the right
//! service and normalize the answer to a [`Point`].

use tracing::warn;

use crate::arcgis::{build_where_clause, Locator, ParcelService, ResolveError};
use crate::classify::{Classification, Classifier};
use crate::geometry::{centroid, Point};
use crate::legal::{LegalDescription, LegalParser};

/// Why a row ended up without coordinates. Wraps the per-path errors
/// so the pipeline can log one diagnostic per row and keep going.
#[derive(Debug, thiserror::Error)]
pub enum Unresolved {
    #[error(transparent)]
    Parse(#[from] crate::legal::LegalParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

pub struct Resolver {
    classifier: Classifier,
    parser: LegalParser,
    locator: Locator,
    parcels: ParcelService,
}

impl Resolver {
    pub fn new(locator: Locator, parcels: ParcelService) -> Self {
        Self {
            classifier: Classifier::new(),
            parser: LegalParser::new(),
            locator,
            parcels,
        }
    }

    /// Classify and resolve one address string.
    ///
    /// `Ok(None)` means the string matched neither grammar and no
    /// request was made. `Err` means a resolution was attempted and
    /// failed; the caller treats both as "leave the row alone".
    pub async fn resolve(&self, text: &str) -> Result<Option<Point>, Unresolved> {
        match self.classifier.classify(text) {
            Classification::StreetAddress => Ok(Some(self.resolve_address(text).await?)),
            Classification::LegalDescription => {
                let legal = self.parser.parse(text)?;
                Ok(Some(self.resolve_legal(&legal).await?))
            }
            Classification::Unclassifiable => Ok(None),
        }
    }

    /// Single-line geocode; first ranked candidate wins.
    pub async fn resolve_address(&self, address: &str) -> Result<Point, ResolveError> {
        let candidates = self.locator.find_candidates(address).await?;
        let first = candidates.first().ok_or(ResolveError::NoCandidates)?;
        checked(first.location)
    }

    /// Parcel lookup by lot/block/subdivision; first matching parcel's
    /// outer boundary, reduced to its vertex-mean centroid.
    pub async fn resolve_legal(&self, legal: &LegalDescription) -> Result<Point, ResolveError> {
        let clause = build_where_clause(legal);
        let features = self.parcels.query(&clause).await?;
        let first = features.first().ok_or(ResolveError::NoCandidates)?;
        if features.len() > 1 {
            warn!(
                "{} parcels match {:?}; using the first",
                features.len(),
                clause
            );
        }
        let ring = first.outer_ring()?;
        checked(centroid(&ring)?)
    }
}

/// The upstream data uses the origin as a null location. Demote it to
/// a failure so it can never leak into an output row as real data.
fn checked(point: Point) -> Result<Point, ResolveError> {
    if point.is_origin() {
        Err(ResolveError::OriginSentinel)
    } else {
        Ok(point)
    }
}
