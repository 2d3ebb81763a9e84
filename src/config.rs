//! Endpoint, envelope, and timeout configuration (TOML, all defaultable).

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_LOCATOR_URL: &str =
    "http://pagis.org/arcgis/rest/services/LOCATORS/AddressPoints/GeocodeServer/findAddressCandidates";
const DEFAULT_PARCELS_URL: &str =
    "http://pagis.org/arcgis/rest/services/APPS/OperationalLayers/MapServer/51/query";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub locator_url: String,
    pub parcels_url: String,
    pub envelope: Envelope,
    /// Per-request timeout. The services have no SLA; this bounds how
    /// long one bad row can stall the run.
    pub timeout_secs: u64,
}

/// City-wide search envelope in the parcel layer's spatial reference.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct Envelope {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub wkid: u32,
    pub latest_wkid: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locator_url: DEFAULT_LOCATOR_URL.to_string(),
            parcels_url: DEFAULT_PARCELS_URL.to_string(),
            envelope: Envelope::default(),
            timeout_secs: 30,
        }
    }
}

impl Default for Envelope {
    fn default() -> Self {
        // Covers the Little Rock metro in Arkansas North state plane feet
        Self {
            xmin: 1_150_000.0,
            ymin: 100_000.0,
            xmax: 1_275_000.0,
            ymax: 180_000.0,
            wkid: 102651,
            latest_wkid: 3433,
        }
    }
}

impl Envelope {
    /// Serialize in the esri envelope JSON shape the query endpoint
    /// expects in its `geometry` parameter.
    pub fn to_esri_json(&self) -> String {
        serde_json::json!({
            "xmin": self.xmin,
            "ymin": self.ymin,
            "xmax": self.xmax,
            "ymax": self.ymax,
            "spatialReference": {"wkid": self.wkid, "latestWkid": self.latest_wkid},
        })
        .to_string()
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.locator_url.contains("findAddressCandidates"));
        assert_eq!(config.envelope.wkid, 102651);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: Config = toml::from_str(
            r#"
            timeout_secs = 5

            [envelope]
            xmin = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.envelope.xmin, 0.0);
        // untouched fields keep their defaults
        assert_eq!(config.envelope.ymax, 180_000.0);
        assert_eq!(config.parcels_url, Config::default().parcels_url);
    }

    #[test]
    fn test_envelope_esri_json_shape() {
        let value: serde_json::Value =
            serde_json::from_str(&Envelope::default().to_esri_json()).unwrap();
        assert_eq!(value["xmin"], 1_150_000.0);
        assert_eq!(value["spatialReference"]["latestWkid"], 3433);
    }
}
