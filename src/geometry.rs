//! Planar points and polygon-ring centroids.
//!
//! Coordinates live in the spatial reference of the parcel service
//! (wkid 102651, Arkansas North state plane), not lat/lon.

use geo_types::Coord;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("cannot take the centroid of an empty ring")]
    EmptyRing,
}

/// A resolved planar coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The parcel data source uses the origin to mean "no location".
    /// A point sitting exactly there is never a real geocode result.
    pub fn is_origin(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Vertex-mean centroid of a single polygon ring.
///
/// This is deliberately not an area-weighted centroid: parcels are
/// small convex-ish polygons and the mean of the boundary vertices is
/// close enough for point placement. Callers with multi-ring
/// geometries pass only the outer ring; holes and disjoint parts are
/// ignored.
pub fn centroid(ring: &[Coord<f64>]) -> Result<Point, GeometryError> {
    if ring.is_empty() {
        return Err(GeometryError::EmptyRing);
    }
    let n = ring.len() as f64;
    let x_sum: f64 = ring.iter().map(|c| c.x).sum();
    let y_sum: f64 = ring.iter().map(|c| c.y).sum();
    Ok(Point::new(x_sum / n, y_sum / n))
}
