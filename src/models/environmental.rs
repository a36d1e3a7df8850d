use crate::error::{HabitatError, Result};
use serde::{Deserialize, Serialize};

/// Where a piece of upstream data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    OpenWeatherMap,
    #[serde(rename = "OpenWeatherMap Air Pollution")]
    OpenWeatherMapAirPollution,
    #[serde(rename = "ISRIC SoilGrids")]
    SoilGrids,
    #[serde(rename = "Global Forest Watch")]
    GlobalForestWatch,
    #[serde(rename = "synthetic")]
    Synthetic,
    #[serde(rename = "fallback")]
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::OpenWeatherMap => "OpenWeatherMap",
            DataSource::OpenWeatherMapAirPollution => "OpenWeatherMap Air Pollution",
            DataSource::SoilGrids => "ISRIC SoilGrids",
            DataSource::GlobalForestWatch => "Global Forest Watch",
            DataSource::Synthetic => "synthetic",
            DataSource::Fallback => "fallback",
        }
    }

    pub fn is_live(&self) -> bool {
        !matches!(self, DataSource::Synthetic | DataSource::Fallback)
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(HabitatError::InvalidCoordinates(format!(
                "lat must be a number between -90 and 90, got {}",
                lat
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(HabitatError::InvalidCoordinates(format!(
                "lng must be a number between -180 and 180, got {}",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }

    /// Parse raw query-string values, rejecting missing or non-numeric input.
    pub fn parse(lat: Option<&str>, lng: Option<&str>) -> Result<Self> {
        let lat = parse_component("lat", lat)?;
        let lng = parse_component("lng", lng)?;
        Self::new(lat, lng)
    }
}

fn parse_component(name: &str, raw: Option<&str>) -> Result<f64> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HabitatError::InvalidCoordinates(format!("missing {}", name)))?;

    raw.parse::<f64>().map_err(|_| {
        HabitatError::InvalidCoordinates(format!("{} is not a number: '{}'", name, raw))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
    pub wind_speed_ms: f64,
    pub description: String,
}

impl WeatherConditions {
    pub fn fallback() -> Self {
        Self {
            temperature_c: 28.0,
            humidity_pct: 65.0,
            rainfall_mm: 5.0,
            wind_speed_ms: 3.0,
            description: "unavailable".into(),
        }
    }
}

/// Spectral indices for the point. NDVI tracks canopy greenness, NDMI canopy water.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatelliteIndices {
    pub ndvi: f64,
    pub ndmi: f64,
}

impl SatelliteIndices {
    pub fn fallback() -> Self {
        Self {
            ndvi: 0.45,
            ndmi: 0.1,
        }
    }

    /// NDMI rescaled from [-1, 1] to a 0-100 moisture index.
    pub fn moisture_index_pct(&self) -> f64 {
        ((self.ndmi + 1.0) * 50.0).clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilProfile {
    pub ph: f64,
    pub moisture_pct: f64,
    pub organic_carbon_g_per_kg: Option<f64>,
    pub clay_pct: Option<f64>,
}

impl SoilProfile {
    pub fn fallback() -> Self {
        Self {
            ph: 6.8,
            moisture_pct: SatelliteIndices::fallback().moisture_index_pct(),
            organic_carbon_g_per_kg: None,
            clay_pct: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeforestationSummary {
    pub recent_alerts: u32,
    pub alert_area_ha: f64,
    pub forest_cover_pct: f64,
    pub lookback_days: u32,
}

impl DeforestationSummary {
    /// India's national forest cover estimate, used when no regional figure is known.
    pub const DEFAULT_FOREST_COVER_PCT: f64 = 21.7;

    pub fn fallback() -> Self {
        Self {
            recent_alerts: 0,
            alert_area_ha: 0.0,
            forest_cover_pct: Self::DEFAULT_FOREST_COVER_PCT,
            lookback_days: 30,
        }
    }
}

pub const FALLBACK_AQI: f64 = 85.0;

/// The flat set of readings the scoring core works from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub ndvi: f64,
    pub moisture_index_pct: f64,
    pub temperature_c: f64,
    pub aqi: f64,
    pub forest_cover_pct: f64,
    pub soil_ph: f64,
    pub humidity_pct: f64,
    pub rainfall_mm: f64,
}

impl EnvironmentalReading {
    pub fn from_sources(
        weather: &WeatherConditions,
        satellite: &SatelliteIndices,
        soil: &SoilProfile,
        deforestation: &DeforestationSummary,
        aqi: f64,
    ) -> Self {
        Self {
            ndvi: satellite.ndvi,
            moisture_index_pct: soil.moisture_pct,
            temperature_c: weather.temperature_c,
            aqi,
            forest_cover_pct: deforestation.forest_cover_pct,
            soil_ph: soil.ph,
            humidity_pct: weather.humidity_pct,
            rainfall_mm: weather.rainfall_mm,
        }
    }
}
