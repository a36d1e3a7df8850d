pub mod advisory;
pub mod alerts;
pub mod hazards;
pub mod health;
pub mod monitoring;
pub mod normalizer;

pub use hazards::{RiskEstimator, RiskInputs};
pub use monitoring::{ConnectionStatus, MonitoringService};

use crate::models::{
    Advisory, Alert, DeforestationSummary, EnvironmentalReading, HealthScore, RiskAssessment,
    SatelliteIndices, SoilProfile, WeatherConditions,
};
use chrono::{DateTime, Utc};

/// Upstream data for one site, after fallbacks have been substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteInputs {
    pub weather: WeatherConditions,
    pub satellite: SatelliteIndices,
    pub soil: SoilProfile,
    pub deforestation: DeforestationSummary,
    pub aqi: f64,
}

impl SiteInputs {
    pub fn reading(&self) -> EnvironmentalReading {
        EnvironmentalReading::from_sources(
            &self.weather,
            &self.satellite,
            &self.soil,
            &self.deforestation,
            self.aqi,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteAssessment {
    pub reading: EnvironmentalReading,
    pub health: HealthScore,
    /// Only hazards above the reporting threshold.
    pub risks: Vec<RiskAssessment>,
    pub advisory: Advisory,
    pub alerts: Vec<Alert>,
}

/// Run the full scoring pipeline for one site. Pure apart from the supplied timestamp.
pub fn assess_site(
    inputs: &SiteInputs,
    estimator: &RiskEstimator,
    generated_at: DateTime<Utc>,
) -> SiteAssessment {
    let reading = inputs.reading();

    let subscores = normalizer::normalize(&reading);
    let health = health::aggregate(&subscores);

    let risks = estimator.estimate(&RiskInputs::from(&reading));
    let advisory = advisory::compose_advisory(&risks, &inputs.weather, &inputs.soil);

    let alerts = alerts::generate_alerts(
        &inputs.deforestation,
        &inputs.weather,
        &health.breakdown,
        generated_at,
    );

    SiteAssessment {
        reading,
        health,
        risks,
        advisory,
        alerts,
    }
}
