//! Parcel-boundary queries against the PAGIS parcels map layer.
//!
//! Parcels are matched by attribute (subdivision name prefix plus
//! optional lot/block equality) inside a fixed city-wide envelope, and
//! the response carries the parcel polygon rings.

use geo_types::Coord;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::ResolveError;
use crate::config::Envelope;
use crate::legal::LegalDescription;

/// One matching parcel. `rings` is the esri polygon encoding: the
/// outer boundary first, then any holes or disjoint parts.
#[derive(Debug, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub rings: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

impl Feature {
    /// The outer boundary as coordinates. Rings past the first are
    /// ignored; the centroid here is a placement point, not a survey.
    pub fn outer_ring(&self) -> Result<Vec<Coord<f64>>, ResolveError> {
        let ring = self.geometry.rings.first().ok_or(ResolveError::NoGeometry)?;
        Ok(ring.iter().map(|&[x, y]| Coord { x, y }).collect())
    }
}

/// Server-side filter for a legal description.
///
/// Subdivision matches by uppercased prefix (the layer stores names
/// uppercase, often with a recorded-plat suffix after the part the
/// description carries); lot and block match exactly when present,
/// AND-combined.
pub fn build_where_clause(legal: &LegalDescription) -> String {
    let mut clause = format!("SUB_NAME LIKE '{}%'", legal.subdivision.to_uppercase());
    if let Some(lot) = legal.lot {
        clause.push_str(&format!(" AND LOT LIKE '{}'", lot));
    }
    if let Some(block) = legal.block {
        clause.push_str(&format!(" AND BLOCK LIKE '{}'", block));
    }
    clause
}

/// Client for the parcels layer query endpoint.
pub struct ParcelService {
    client: Client,
    url: Url,
    envelope: Envelope,
}

impl ParcelService {
    pub fn new(client: Client, url: Url, envelope: Envelope) -> Self {
        Self {
            client,
            url,
            envelope,
        }
    }

    /// Run an attribute query constrained to the city envelope,
    /// returning matching features with their boundary geometry.
    pub async fn query(&self, where_clause: &str) -> Result<Vec<Feature>, ResolveError> {
        let envelope = self.envelope.to_esri_json();
        let response = self
            .client
            .get(self.url.clone())
            .query(&[
                ("where", where_clause),
                ("geometry", envelope.as_str()),
                ("geometryType", "esriGeometryEnvelope"),
                ("spatialRel", "esriSpatialRelIntersects"),
                ("returnGeometry", "true"),
                ("f", "pjson"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ResolveError::Status(response.status()));
        }

        let body: QueryResponse = response.json().await?;
        debug!(
            "parcel query {:?} matched {} feature(s)",
            where_clause,
            body.features.len()
        );
        Ok(body.features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legal(lot: Option<i64>, block: Option<i64>, subdivision: &str) -> LegalDescription {
        LegalDescription {
            lot,
            block,
            subdivision: subdivision.to_string(),
        }
    }

    #[test]
    fn test_where_clause_full() {
        let clause = build_where_clause(&legal(Some(12), Some(3), "Shadylane"));
        assert_eq!(
            clause,
            "SUB_NAME LIKE 'SHADYLANE%' AND LOT LIKE '12' AND BLOCK LIKE '3'"
        );
    }

    #[test]
    fn test_where_clause_lot_only() {
        let clause = build_where_clause(&legal(Some(12), None, "Shadylane"));
        assert_eq!(clause, "SUB_NAME LIKE 'SHADYLANE%' AND LOT LIKE '12'");
    }

    #[test]
    fn test_where_clause_block_only() {
        let clause = build_where_clause(&legal(None, Some(3), "Shadylane"));
        assert_eq!(clause, "SUB_NAME LIKE 'SHADYLANE%' AND BLOCK LIKE '3'");
    }

    #[test]
    fn test_feature_deserialize_and_outer_ring() {
        let body = r#"{
            "features": [
                {"attributes": {"SUB_NAME": "SHADYLANE"},
                 "geometry": {"rings": [
                     [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0]],
                     [[1.0, 1.0], [2.0, 1.0], [1.0, 2.0]]
                 ]}}
            ]
        }"#;
        let parsed: QueryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.features.len(), 1);
        let ring = parsed.features[0].outer_ring().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[1], Coord { x: 4.0, y: 0.0 });
    }

    #[test]
    fn test_empty_geometry_is_no_geometry() {
        let feature = Feature {
            geometry: Geometry { rings: vec![] },
        };
        assert!(matches!(
            feature.outer_ring(),
            Err(ResolveError::NoGeometry)
        ));
    }
}
