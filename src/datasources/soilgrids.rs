use crate::config::SoilGridsConfig;
use crate::error::{HabitatError, Result};
use crate::models::Coordinates;
use serde::Deserialize;

const TOPSOIL_DEPTH: &str = "0-5cm";
const PROPERTY_PARAMS: &str = "property=phh2o&property=soc&property=clay";

pub struct SoilGridsClient {
    client: reqwest::Client,
    config: SoilGridsConfig,
}

/// Topsoil properties in conventional units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilProperties {
    pub ph: f64,
    pub organic_carbon_g_per_kg: Option<f64>,
    pub clay_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
struct Layer {
    name: String,
    unit_measure: UnitMeasure,
    depths: Vec<Depth>,
}

#[derive(Debug, Deserialize)]
struct UnitMeasure {
    d_factor: f64,
}

#[derive(Debug, Deserialize)]
struct Depth {
    label: String,
    values: DepthValues,
}

#[derive(Debug, Deserialize)]
struct DepthValues {
    mean: Option<f64>,
}

impl QueryResponse {
    /// Topsoil mean for a property, divided by its mapping factor.
    fn topsoil_mean(&self, property: &str) -> Option<f64> {
        let layer = self.properties.layers.iter().find(|l| l.name == property)?;
        let depth = layer.depths.iter().find(|d| d.label == TOPSOIL_DEPTH)?;
        let factor = if layer.unit_measure.d_factor > 0.0 {
            layer.unit_measure.d_factor
        } else {
            1.0
        };
        depth.values.mean.map(|v| v / factor)
    }

    fn into_properties(self) -> Result<SoilProperties> {
        let ph = self.topsoil_mean("phh2o").ok_or_else(|| {
            HabitatError::InvalidData("SoilGrids has no pH estimate for this location".into())
        })?;

        Ok(SoilProperties {
            ph,
            organic_carbon_g_per_kg: self.topsoil_mean("soc"),
            clay_pct: self.topsoil_mean("clay"),
        })
    }
}

impl SoilGridsClient {
    pub fn new(client: reqwest::Client, config: SoilGridsConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch_properties(&self, coords: Coordinates) -> Result<SoilProperties> {
        let url = format!(
            "{}/properties/query?lon={}&lat={}&{}&depth={}&value=mean",
            self.config.base_url.trim_end_matches('/'),
            coords.lng,
            coords.lat,
            PROPERTY_PARAMS,
            TOPSOIL_DEPTH
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                HabitatError::DataSourceUnavailable(format!("SoilGrids: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(HabitatError::DataSourceUnavailable(format!(
                "SoilGrids returned {}",
                response.status()
            )));
        }

        let body: QueryResponse = response.json().await.map_err(|e| {
            HabitatError::DataSourceUnavailable(format!(
                "Failed to parse SoilGrids response: {}",
                e
            ))
        })?;

        body.into_properties()
    }

    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/properties/layers",
            self.config.base_url.trim_end_matches('/')
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                HabitatError::DataSourceUnavailable(format!("SoilGrids: {}", e))
            })?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "Feature",
        "geometry": {"type": "Point", "coordinates": [78.96, 20.59]},
        "properties": {
            "layers": [
                {
                    "name": "phh2o",
                    "unit_measure": {"d_factor": 10, "mapped_units": "pH*10", "target_units": "-"},
                    "depths": [{"label": "0-5cm", "range": {}, "values": {"mean": 72}}]
                },
                {
                    "name": "soc",
                    "unit_measure": {"d_factor": 10, "mapped_units": "dg/kg"},
                    "depths": [{"label": "0-5cm", "range": {}, "values": {"mean": 184}}]
                },
                {
                    "name": "clay",
                    "unit_measure": {"d_factor": 10, "mapped_units": "g/kg", "target_units": "%"},
                    "depths": [{"label": "0-5cm", "range": {}, "values": {"mean": null}}]
                }
            ]
        }
    }"#;

    #[test]
    fn converts_mapped_units() {
        let response: QueryResponse = serde_json::from_str(SAMPLE).unwrap();
        let props = response.into_properties().unwrap();

        assert!((props.ph - 7.2).abs() < 0.001);
        assert_eq!(props.organic_carbon_g_per_kg, Some(18.4));
        assert_eq!(props.clay_pct, None);
    }

    #[test]
    fn missing_ph_is_an_error() {
        let json = r#"{"properties": {"layers": []}}"#;
        let response: QueryResponse = serde_json::from_str(json).unwrap();
        assert!(response.into_properties().is_err());
    }
}
