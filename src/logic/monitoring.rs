use super::{assess_site, health, normalizer, RiskEstimator, SiteInputs};
use crate::config::Config;
use crate::datasources::{
    GlobalForestWatchClient, OpenWeatherMapClient, SeededSynthetic, SoilGridsClient,
    SyntheticDataProvider,
};
use crate::error::Result;
use crate::models::{
    Coordinates, DataSource, DataSources, DeforestationSummary, EnvironmentalReading,
    HealthCalculation, HistoryPoint, Metrics, MonitoringReport, RiskAdvisory, SoilProfile,
    WeatherConditions, FALLBACK_AQI,
};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Length of the trend series attached to each report.
pub const HISTORY_DAYS: u32 = 30;

/// Upstream inputs for one site together with where each came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedInputs {
    pub inputs: SiteInputs,
    pub sources: DataSources,
}

pub struct MonitoringService {
    openweathermap_client: Option<OpenWeatherMapClient>,
    soilgrids_client: Option<SoilGridsClient>,
    globalforestwatch_client: Option<GlobalForestWatchClient>,
    synthetic: Arc<dyn SyntheticDataProvider>,
    estimator: RiskEstimator,
}

impl MonitoringService {
    /// A service with no upstreams; every input comes from the synthetic provider or a fallback.
    #[cfg(test)]
    pub fn offline(synthetic: Arc<dyn SyntheticDataProvider>) -> Self {
        Self {
            openweathermap_client: None,
            soilgrids_client: None,
            globalforestwatch_client: None,
            synthetic,
            estimator: RiskEstimator::new(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let http = config.upstream.http_client()?;

        let openweathermap_client = config
            .openweathermap
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!("OpenWeatherMap client configured for weather and air quality");
                OpenWeatherMapClient::new(http.clone(), c.clone())
            });

        if openweathermap_client.is_none() {
            tracing::info!(
                "OpenWeatherMap not configured - weather will use fallbacks \
                 and air quality will be estimated"
            );
        }

        let soilgrids_client = if config.soilgrids.enabled {
            tracing::info!("SoilGrids client configured at {}", config.soilgrids.base_url);
            Some(SoilGridsClient::new(http.clone(), config.soilgrids.clone()))
        } else {
            tracing::info!("SoilGrids disabled - soil pH will use the fallback value");
            None
        };

        let globalforestwatch_client = config
            .globalforestwatch
            .as_ref()
            .filter(|c| c.enabled && !c.api_key.is_empty())
            .map(|c| {
                tracing::info!(
                    "Global Forest Watch client configured ({} day lookback)",
                    c.lookback_days
                );
                GlobalForestWatchClient::new(http.clone(), c.clone())
            });

        if globalforestwatch_client.is_none() {
            tracing::info!("Global Forest Watch not configured - deforestation alerts unavailable");
        }

        let synthetic = match config.synthetic.seed {
            Some(seed) => SeededSynthetic::new(seed),
            None => SeededSynthetic::from_entropy(),
        };
        tracing::debug!("Synthetic data seed: {}", synthetic.seed());

        Ok(Self {
            openweathermap_client,
            soilgrids_client,
            globalforestwatch_client,
            synthetic: Arc::new(synthetic),
            estimator: RiskEstimator::new(),
        })
    }

    /// Fetch every upstream concurrently, substituting fallbacks for any that fail.
    pub async fn collect(&self, coords: Coordinates) -> CollectedInputs {
        let weather = async {
            match &self.openweathermap_client {
                Some(client) => Some(client.fetch_current(coords).await),
                None => None,
            }
        };
        let air_quality = async {
            match &self.openweathermap_client {
                Some(client) => Some(client.fetch_air_quality(coords).await),
                None => None,
            }
        };
        let soil = async {
            match &self.soilgrids_client {
                Some(client) => Some(client.fetch_properties(coords).await),
                None => None,
            }
        };
        let deforestation = async {
            match &self.globalforestwatch_client {
                Some(client) => Some(client.fetch_summary(coords).await),
                None => None,
            }
        };

        let (weather, air_quality, soil, deforestation) =
            tokio::join!(weather, air_quality, soil, deforestation);

        let (weather, weather_source) = match weather {
            Some(Ok(weather)) => (weather, DataSource::OpenWeatherMap),
            Some(Err(e)) => {
                tracing::warn!("Failed to fetch weather, using fallback: {}", e);
                (WeatherConditions::fallback(), DataSource::Fallback)
            }
            None => (WeatherConditions::fallback(), DataSource::Fallback),
        };

        let (aqi, air_quality_source) = match air_quality {
            Some(Ok(aqi)) => (aqi, DataSource::OpenWeatherMapAirPollution),
            Some(Err(e)) => {
                tracing::warn!("Failed to fetch air quality, using fallback: {}", e);
                (FALLBACK_AQI, DataSource::Fallback)
            }
            None => (self.synthetic.air_quality_index(coords), DataSource::Synthetic),
        };

        let satellite = self.synthetic.satellite_indices(coords);

        let fallback_soil = SoilProfile {
            moisture_pct: satellite.moisture_index_pct(),
            ..SoilProfile::fallback()
        };
        let (soil, soil_source) = match soil {
            Some(Ok(props)) => (
                SoilProfile {
                    ph: props.ph,
                    moisture_pct: satellite.moisture_index_pct(),
                    organic_carbon_g_per_kg: props.organic_carbon_g_per_kg,
                    clay_pct: props.clay_pct,
                },
                DataSource::SoilGrids,
            ),
            Some(Err(e)) => {
                tracing::warn!("Failed to fetch soil properties, using fallback: {}", e);
                (fallback_soil, DataSource::Fallback)
            }
            None => (fallback_soil, DataSource::Fallback),
        };

        let (deforestation, deforestation_source) = match deforestation {
            Some(Ok(summary)) => (summary, DataSource::GlobalForestWatch),
            Some(Err(e)) => {
                tracing::warn!("Failed to fetch deforestation alerts, using fallback: {}", e);
                (DeforestationSummary::fallback(), DataSource::Fallback)
            }
            None => (DeforestationSummary::fallback(), DataSource::Fallback),
        };

        tracing::debug!(
            "Collected inputs: {:.1}°C, {:.0}% humidity, AQI {:.0}, NDVI {:.3}, pH {:.1}, \
             {} alerts",
            weather.temperature_c,
            weather.humidity_pct,
            aqi,
            satellite.ndvi,
            soil.ph,
            deforestation.recent_alerts
        );

        CollectedInputs {
            inputs: SiteInputs {
                weather,
                satellite,
                soil,
                deforestation,
                aqi,
            },
            sources: DataSources {
                weather: weather_source,
                satellite: DataSource::Synthetic,
                soil: soil_source,
                deforestation: deforestation_source,
                air_quality: air_quality_source,
            },
        }
    }

    /// Collect inputs and run the scoring pipeline for one site.
    pub async fn report(&self, coords: Coordinates) -> MonitoringReport {
        let generated_at = Utc::now();
        let collected = self.collect(coords).await;
        let assessment = assess_site(&collected.inputs, &self.estimator, generated_at);

        tracing::info!(
            "Site {:.4},{:.4}: health {:.2} ({}), {} risk(s), {} alert(s), {}/5 live sources",
            coords.lat,
            coords.lng,
            assessment.health.total,
            assessment.health.status(),
            assessment.risks.len(),
            assessment.alerts.len(),
            collected.sources.live_count()
        );

        let history = self.history(coords, &assessment.reading, generated_at.date_naive());

        MonitoringReport {
            report_id: Uuid::new_v4(),
            generated_at,
            location: coords,
            metrics: Metrics::new(
                &assessment.reading,
                collected.inputs.satellite.ndmi,
                collected.inputs.deforestation.recent_alerts,
                assessment.health.total,
            ),
            health_breakdown: assessment.health.breakdown,
            health_calculation: HealthCalculation::describe(),
            risk_advisory: RiskAdvisory::new(assessment.risks, assessment.advisory),
            history,
            alerts: assessment.alerts,
            data_sources: collected.sources,
        }
    }

    /// Display-only trend series, oldest first and ending today. Each day is
    /// scored with the same pipeline as the live reading.
    fn history(
        &self,
        coords: Coordinates,
        current: &EnvironmentalReading,
        today: NaiveDate,
    ) -> Vec<HistoryPoint> {
        let readings = self.synthetic.history_readings(coords, current, HISTORY_DAYS);
        let count = readings.len() as u64;

        readings
            .iter()
            .enumerate()
            .filter_map(|(i, reading)| {
                let age = count - 1 - i as u64;
                let date = today.checked_sub_days(chrono::Days::new(age))?;
                let score = health::aggregate(&normalizer::normalize(reading));
                Some(HistoryPoint {
                    date,
                    ndvi: reading.ndvi,
                    moisture_index: reading.moisture_index_pct,
                    temperature: reading.temperature_c,
                    health_score: score.total,
                })
            })
            .collect()
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        let openweathermap = async {
            match &self.openweathermap_client {
                Some(client) => Some(client.test_connection().await.unwrap_or(false)),
                None => None,
            }
        };
        let soilgrids = async {
            match &self.soilgrids_client {
                Some(client) => Some(client.test_connection().await.unwrap_or(false)),
                None => None,
            }
        };
        let globalforestwatch = async {
            match &self.globalforestwatch_client {
                Some(client) => Some(client.test_connection().await.unwrap_or(false)),
                None => None,
            }
        };

        let (openweathermap, soilgrids, globalforestwatch) =
            tokio::join!(openweathermap, soilgrids, globalforestwatch);

        ConnectionStatus {
            openweathermap,
            soilgrids,
            globalforestwatch,
        }
    }
}

/// Reachability of each upstream; `None` when it is not configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStatus {
    pub openweathermap: Option<bool>,
    pub soilgrids: Option<bool>,
    pub globalforestwatch: Option<bool>,
}

impl ConnectionStatus {
    fn all(&self) -> [Option<bool>; 3] {
        [self.openweathermap, self.soilgrids, self.globalforestwatch]
    }

    pub fn any_configured(&self) -> bool {
        self.all().iter().any(Option::is_some)
    }

    /// True when every configured upstream answered.
    pub fn all_reachable(&self) -> bool {
        self.all().iter().all(|s| s.unwrap_or(true))
    }
}
