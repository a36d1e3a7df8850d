use super::{
    Alert, Coordinates, DataSource, EnvironmentalReading, HealthCalculation, HistoryPoint,
    RiskAdvisory, SubScore,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Raw readings plus the headline score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub ndvi: f64,
    pub ndmi: f64,
    pub moisture_index: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub aqi: f64,
    pub forest_cover: f64,
    pub soil_ph: f64,
    pub deforestation_alerts: u32,
    pub health_score: f64,
}

impl Metrics {
    pub fn new(
        reading: &EnvironmentalReading,
        ndmi: f64,
        deforestation_alerts: u32,
        health_score: f64,
    ) -> Self {
        Self {
            ndvi: reading.ndvi,
            ndmi,
            moisture_index: reading.moisture_index_pct,
            temperature: reading.temperature_c,
            humidity: reading.humidity_pct,
            rainfall: reading.rainfall_mm,
            aqi: reading.aqi,
            forest_cover: reading.forest_cover_pct,
            soil_ph: reading.soil_ph,
            deforestation_alerts,
            health_score,
        }
    }
}

/// Provenance of each input group in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSources {
    pub weather: DataSource,
    pub satellite: DataSource,
    pub soil: DataSource,
    pub deforestation: DataSource,
    pub air_quality: DataSource,
}

impl DataSources {
    #[cfg(test)]
    pub fn all_fallback() -> Self {
        Self {
            weather: DataSource::Fallback,
            satellite: DataSource::Fallback,
            soil: DataSource::Fallback,
            deforestation: DataSource::Fallback,
            air_quality: DataSource::Fallback,
        }
    }

    pub fn live_count(&self) -> usize {
        [
            self.weather,
            self.satellite,
            self.soil,
            self.deforestation,
            self.air_quality,
        ]
        .iter()
        .filter(|s| s.is_live())
        .count()
    }
}

/// Full payload served for `GET /monitoring`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub location: Coordinates,
    pub metrics: Metrics,
    pub health_breakdown: Vec<SubScore>,
    pub health_calculation: HealthCalculation,
    pub risk_advisory: RiskAdvisory,
    pub history: Vec<HistoryPoint>,
    pub alerts: Vec<Alert>,
    pub data_sources: DataSources,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_sources_serialize_as_labels() {
        let sources = DataSources {
            weather: DataSource::OpenWeatherMap,
            satellite: DataSource::Synthetic,
            ..DataSources::all_fallback()
        };
        let json = serde_json::to_value(sources).unwrap();

        assert_eq!(json["weather"], "OpenWeatherMap");
        assert_eq!(json["satellite"], "synthetic");
        assert_eq!(json["soil"], "fallback");
        assert_eq!(sources.live_count(), 1);
    }
}
