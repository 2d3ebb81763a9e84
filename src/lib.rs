//! Magnolia - batch geocoding for mixed address/legal-description datasets
//!
//! Classifies each row's address string, resolves it against the PAGIS
//! locator or parcel service, and writes the coordinates back out.

pub mod arcgis;
pub mod classify;
pub mod config;
pub mod geometry;
pub mod legal;
pub mod pipeline;
pub mod resolve;

pub use classify::{Classification, Classifier};
pub use geometry::Point;
pub use legal::{LegalDescription, LegalParser};
pub use resolve::Resolver;
